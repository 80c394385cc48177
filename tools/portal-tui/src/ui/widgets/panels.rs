//! Shared building blocks.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;

/// Bordered block with a bold accent title.
pub fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
}

/// `[K] label` pair for footers.
pub fn key_hint<'a>(key: &'a str, label: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}

/// Text progress bar.
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = ((percent.min(100) as f32 / 100.0) * width as f32).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "░░░░");
        assert_eq!(progress_bar(50, 4), "██░░");
        assert_eq!(progress_bar(250, 4), "████");
    }
}
