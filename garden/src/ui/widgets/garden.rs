//! The garden scene: plants placed by position, plus visiting wildlife

use garden_core::{Garden, PlantStage, Wildlife};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::ui::layout::percent_to_cell;
use crate::ui::theme::GardenTheme;

/// Height of the horizon, in percent of the scene.
const HORIZON_PERCENT: f64 = 30.0;

/// Glyph drawn for a plant at `stage`.
pub fn stage_glyph(stage: PlantStage) -> &'static str {
    match stage {
        PlantStage::Seed => ".",
        PlantStage::Seedling => ",",
        PlantStage::Sprout => "♣",
        PlantStage::Bloom => "✿",
        PlantStage::Mature => "❀",
    }
}

/// Small ascii portrait and horizontal position of a resident.
fn wildlife_sprite(wildlife: Wildlife, frame: u8) -> (&'static str, f64, f64) {
    match wildlife {
        Wildlife::Owl => ("{o,o}", 4.0, 8.0),
        Wildlife::Butterflies if frame % 10 < 5 => ("}{  }{", 34.0, 20.0),
        Wildlife::Butterflies => ("><  ><", 34.0, 18.0),
        Wildlife::Toucan => (">=(o)", 70.0, 10.0),
        Wildlife::Tiger => ("=^.^=", 84.0, 88.0),
    }
}

/// Widget rendering every plant at its stored position
pub struct GardenWidget<'a> {
    garden: &'a Garden,
    selected: Option<usize>,
    theme: &'a GardenTheme,
    frame: u8,
    focused: bool,
}

impl<'a> GardenWidget<'a> {
    pub fn new(garden: &'a Garden, theme: &'a GardenTheme) -> Self {
        Self {
            garden,
            selected: None,
            theme,
            frame: 0,
            focused: true,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn frame(mut self, frame: u8) -> Self {
        self.frame = frame;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn render_ground(&self, inner: Rect, buf: &mut Buffer) {
        let Some((_, horizon)) = percent_to_cell(0.0, HORIZON_PERCENT, inner) else {
            return;
        };
        let ground = self.theme.ground_style();
        for x in inner.left()..inner.right() {
            let ch = if (x + u16::from(self.frame / 8)) % 7 == 0 { '^' } else { '~' };
            buf[(x, horizon)].set_char(ch).set_style(ground);
        }
    }

    fn render_wildlife(&self, inner: Rect, buf: &mut Buffer) {
        for resident in self.garden.wildlife() {
            let (sprite, x, y) = wildlife_sprite(resident, self.frame);
            if let Some((cx, cy)) = percent_to_cell(x, y, inner) {
                let width = inner.right().saturating_sub(cx) as usize;
                buf.set_stringn(cx, cy, sprite, width, self.theme.wildlife_style());
            }
        }
    }

    fn render_empty(&self, inner: Rect, buf: &mut Buffer) {
        let lines = [
            ("The Ground is Fertile", self.theme.question_style()),
            ("", Style::default()),
            (
                "\"Every blade of grass has its angel that bends over it",
                self.theme.system_style(),
            ),
            ("and whispers, 'Grow, grow.'\"", self.theme.system_style()),
            ("", Style::default()),
            ("Press n to plant a seed", self.theme.answer_style()),
        ];

        let top = inner.y + inner.height.saturating_sub(lines.len() as u16) / 2;
        for (i, (text, style)) in lines.iter().enumerate() {
            let y = top + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let len = text.chars().count() as u16;
            let x = inner.x + inner.width.saturating_sub(len) / 2;
            buf.set_stringn(x, y, text, inner.width as usize, *style);
        }
    }

    fn render_plants(&self, inner: Rect, buf: &mut Buffer) {
        for (i, plant) in self.garden.plants().iter().enumerate() {
            let Some((x, y)) = percent_to_cell(plant.position_x, plant.position_y, inner) else {
                continue;
            };
            let selected = self.focused && self.selected == Some(i);
            let style = self.theme.plant_style(plant.category, plant.stage, selected);
            buf.set_stringn(x, y, stage_glyph(plant.stage), 1, style);
        }

        // Label the selected plant last so other glyphs never cover it.
        let Some(plant) = self.selected.and_then(|i| self.garden.plants().get(i)) else {
            return;
        };
        if let Some((x, y)) = percent_to_cell(plant.position_x, plant.position_y, inner) {
            let label_y = y + 1;
            if label_y < inner.bottom() {
                let label = plant.category.name();
                let start = x
                    .saturating_sub(label.len() as u16 / 2)
                    .max(inner.x);
                let width = inner.right().saturating_sub(start) as usize;
                buf.set_stringn(
                    start,
                    label_y,
                    label,
                    width,
                    self.theme
                        .category_style(plant.category)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
        }
    }
}

impl Widget for GardenWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Yalom's Garden ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        self.render_ground(inner, buf);
        self.render_wildlife(inner, buf);

        if self.garden.is_empty() {
            self.render_empty(inner, buf);
        } else {
            self.render_plants(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::testing::seeded_rng;
    use garden_core::Category;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_every_stage_has_a_glyph() {
        let glyphs: std::collections::HashSet<_> =
            PlantStage::ALL.into_iter().map(stage_glyph).collect();
        assert_eq!(glyphs.len(), PlantStage::ALL.len());
    }

    #[test]
    fn test_empty_garden_invites_planting() {
        let theme = GardenTheme::default();
        let garden = Garden::new();
        let area = Rect::new(0, 0, 70, 20);
        let mut buf = Buffer::empty(area);

        GardenWidget::new(&garden, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("The Ground is Fertile"));
        assert!(text.contains("{o,o}"), "the owl is always home");
    }

    #[test]
    fn test_plants_and_selection_label() {
        let theme = GardenTheme::default();
        let mut garden = Garden::new();
        let mut rng = seeded_rng(1);
        garden.plant(Category::Cohesion, "choir", &mut rng, 0);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        GardenWidget::new(&garden, &theme)
            .selected(Some(0))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains(stage_glyph(PlantStage::Seed)));
        assert!(text.contains("Cohesion"));
        assert!(text.contains("}{"), "butterflies arrive with the first plant");
    }
}
