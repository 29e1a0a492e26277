//! Shared utilities for TUI views

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate_str("Essay", 10), "Essay");
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate_str("Grocery shopping", 8), "Groce...");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_str("Café au lait", 7), "Café...");
    }

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = centered_rect(40, 10, area);

        assert_eq!(rect, Rect::new(30, 10, 40, 10));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(40, 10, area);

        assert_eq!(rect, area);
    }
}
