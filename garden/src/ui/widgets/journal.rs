//! Reflection history of a single plant

use garden_core::PlantEntry;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::ui::theme::GardenTheme;

/// Shows every question and answer, newest at the bottom
pub struct JournalWidget<'a> {
    plant: &'a PlantEntry,
    theme: &'a GardenTheme,
}

impl<'a> JournalWidget<'a> {
    pub fn new(plant: &'a PlantEntry, theme: &'a GardenTheme) -> Self {
        Self { plant, theme }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let plant = self.plant;
        let mut lines = Vec::new();
        for reflection in &plant.reflections {
            lines.push(Line::from(Span::styled(
                reflection.question.as_str(),
                self.theme.question_style(),
            )));
            lines.push(Line::from(Span::styled(
                format!("\"{}\"", reflection.answer),
                self.theme.answer_style(),
            )));
            lines.push(Line::from(""));
        }
        lines.pop();
        lines
    }
}

/// Rows a line takes once wrapped to `width`.
fn wrapped_height(line: &Line, width: u16) -> usize {
    let width = width.max(1) as usize;
    line.width().max(1).div_ceil(width)
}

impl Widget for JournalWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            " Roots & Growth · {} · {} ",
            self.plant.category, self.plant.stage
        );
        let block = Block::default()
            .title(Span::styled(title, self.theme.category_style(self.plant.category)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines();
        let total: usize = lines.iter().map(|l| wrapped_height(l, inner.width)).sum();
        let visible = inner.height as usize;

        // Keep the newest reflection in view.
        let scroll = total.saturating_sub(visible);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(inner, buf);

        if scroll > 0 && inner.width > 2 {
            let hint = format!(" ↑{scroll} earlier ");
            buf.set_stringn(
                inner.x,
                inner.y,
                hint,
                inner.width as usize,
                Style::default().add_modifier(Modifier::DIM),
            );
        }
    }
}
