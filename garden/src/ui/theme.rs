//! Color theme and styling for the garden TUI

use garden_core::catalog::hex_to_rgb;
use garden_core::{Category, PlantStage};
use ratatui::style::{Color, Modifier, Style};

/// Garden UI color theme
#[derive(Debug, Clone)]
pub struct GardenTheme {
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    pub forest: Color,
    pub earth: Color,
    pub terracotta: Color,
    pub mustard: Color,
    pub paper: Color,

    pub system_text: Color,
}

impl Default for GardenTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Rgb(0xE8, 0xB9, 0x23),

            forest: Color::Rgb(0x2D, 0x50, 0x16),
            earth: Color::Rgb(0x5C, 0x40, 0x33),
            terracotta: Color::Rgb(0xC6, 0x5D, 0x3B),
            mustard: Color::Rgb(0xE8, 0xB9, 0x23),
            paper: Color::Rgb(0xF4, 0xEB, 0xD9),

            system_text: Color::DarkGray,
        }
    }
}

fn hex_color(hex: &str, fallback: Color) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(fallback)
}

impl GardenTheme {
    /// Accent colour for a category's labels
    pub fn category_color(&self, category: Category) -> Color {
        hex_color(category.prompt().color, self.foreground)
    }

    /// Colour of a category's flowers
    pub fn flower_color(&self, category: Category) -> Color {
        hex_color(category.prompt().flower_color, self.foreground)
    }

    /// Style for a plant glyph at its current stage
    pub fn plant_style(&self, category: Category, stage: PlantStage, selected: bool) -> Style {
        let color = match stage {
            PlantStage::Seed => self.earth,
            PlantStage::Seedling | PlantStage::Sprout => self.category_color(category),
            PlantStage::Bloom | PlantStage::Mature => self.flower_color(category),
        };

        let style = Style::default().fg(color);
        if selected {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn category_style(&self, category: Category) -> Style {
        Style::default()
            .fg(self.category_color(category))
            .add_modifier(Modifier::BOLD)
    }

    /// Style for prompt and follow-up questions
    pub fn question_style(&self) -> Style {
        Style::default()
            .fg(self.mustard)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    pub fn answer_style(&self) -> Style {
        Style::default().fg(self.paper)
    }

    pub fn ground_style(&self) -> Style {
        Style::default().fg(self.forest)
    }

    pub fn wildlife_style(&self) -> Style {
        Style::default().fg(self.terracotta)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.paper)
            .bg(self.forest)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_colors_are_rgb() {
        let theme = GardenTheme::default();
        for category in Category::ALL {
            assert!(matches!(theme.category_color(category), Color::Rgb(..)));
            assert!(matches!(theme.flower_color(category), Color::Rgb(..)));
        }
    }

    #[test]
    fn test_bad_hex_falls_back() {
        assert_eq!(hex_color("teal", Color::Red), Color::Red);
    }

    #[test]
    fn test_selected_plant_is_reversed() {
        let theme = GardenTheme::default();
        let style = theme.plant_style(Category::Hope, PlantStage::Bloom, true);
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }
}
