//! Layout calculations for the garden TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Calculate the main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub garden_area: Rect,
    pub sidebar_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(10),   // Garden + sidebar
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(main_chunks[1]);

        Self {
            title_area: main_chunks[0],
            garden_area: content_chunks[0],
            sidebar_area: content_chunks[1],
            status_bar: main_chunks[2],
            hotkey_bar: main_chunks[3],
        }
    }
}

/// Layout inside a planting or reflecting dialog
pub struct DialogLayout {
    pub body_area: Rect,
    pub input_area: Rect,
}

impl DialogLayout {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);

        Self {
            body_area: chunks[0],
            input_area: chunks[1],
        }
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Map a percentage position onto a cell inside `area`.
pub fn percent_to_cell(x_percent: f64, y_percent: f64, area: Rect) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let fx = (x_percent.clamp(0.0, 100.0) / 100.0 * f64::from(area.width)) as u16;
    let fy = (y_percent.clamp(0.0, 100.0) / 100.0 * f64::from(area.height)) as u16;

    Some((
        area.x + fx.min(area.width - 1),
        area.y + fy.min(area.height - 1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_area() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = AppLayout::calculate(area);

        assert_eq!(layout.title_area.height, 1);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.hotkey_bar.y, 29);
        assert_eq!(layout.garden_area.width + layout.sidebar_area.width, 100);
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered_rect_fixed(40, 5, area);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.y, 2);
    }

    #[test]
    fn test_percent_to_cell_stays_inside() {
        let area = Rect::new(2, 3, 50, 20);
        assert_eq!(percent_to_cell(0.0, 0.0, area), Some((2, 3)));
        assert_eq!(percent_to_cell(100.0, 100.0, area), Some((51, 22)));
        assert_eq!(percent_to_cell(50.0, 50.0, area), Some((27, 13)));
        assert_eq!(percent_to_cell(50.0, 50.0, Rect::new(0, 0, 0, 5)), None);
    }
}
