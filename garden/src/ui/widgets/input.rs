//! Answer input widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::GardenTheme;

/// Single-line answer field with a visible cursor
pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a GardenTheme,
    placeholder: &'a str,
    enabled: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a GardenTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "Root your thoughts here...",
            enabled: true,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// A disabled field shows its placeholder and no cursor.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Characters before the cursor, scrolled so the cursor stays visible.
    fn visible_window(&self, width: usize) -> (String, String, String) {
        let chars: Vec<char> = self.content.chars().collect();
        let cursor = self.cursor_position.min(chars.len());
        let start = (cursor + 1).saturating_sub(width);

        let before: String = chars[start..cursor].iter().collect();
        let at: String = chars
            .get(cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = chars
            .iter()
            .skip(cursor + 1)
            .take(width.saturating_sub(cursor - start + 1))
            .collect();
        (before, at, after)
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.enabled));

        let inner = block.inner(area);
        block.render(area, buf);

        let prefix = Span::styled("> ", self.theme.question_style());

        let line = if !self.enabled || self.content.is_empty() {
            let mut spans = vec![prefix];
            if self.enabled {
                spans.push(Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ));
            }
            spans.push(Span::styled(
                self.placeholder,
                Style::default().add_modifier(Modifier::DIM),
            ));
            Line::from(spans)
        } else {
            let width = (inner.width as usize).saturating_sub(2).max(1);
            let (before, at, after) = self.visible_window(width);

            Line::from(vec![
                prefix,
                Span::styled(before, self.theme.answer_style()),
                Span::styled(
                    at,
                    self.theme
                        .answer_style()
                        .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
                ),
                Span::styled(after, self.theme.answer_style()),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_keeps_cursor_visible() {
        let theme = GardenTheme::default();
        let widget = InputWidget::new("abcdefghij", &theme).cursor_position(10);
        let (before, at, after) = widget.visible_window(4);
        assert_eq!(before, "hij");
        assert_eq!(at, " ");
        assert_eq!(after, "");

        let widget = InputWidget::new("abcdefghij", &theme).cursor_position(1);
        let (before, at, after) = widget.visible_window(4);
        assert_eq!(before, "a");
        assert_eq!(at, "b");
        assert_eq!(after, "cd");
    }

    #[test]
    fn test_window_is_unicode_safe() {
        let theme = GardenTheme::default();
        let widget = InputWidget::new("héllo", &theme).cursor_position(2);
        let (before, at, after) = widget.visible_window(10);
        assert_eq!(before, "hé");
        assert_eq!(at, "l");
        assert_eq!(after, "lo");
    }
}
