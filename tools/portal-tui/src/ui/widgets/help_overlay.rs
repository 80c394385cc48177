//! Help overlay widget.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::panels::{centered_rect, ACCENT, MUTED};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
}

fn binding<'a>(key: &'a str, what: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<9}", key), Style::default().fg(Color::Yellow)),
        Span::raw(what),
    ])
}

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 75, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "UNIVERSITY PORTAL HELP",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        section("Dashboard"),
        binding("↑/↓", "Move through the menu"),
        binding("Enter", "Open the highlighted page"),
        binding("1-9", "Open menu entry directly"),
        binding("B", "Back to your dashboard"),
        binding("R", "Refresh session and records"),
        binding("O", "Sign out"),
        Line::raw(""),
        section("Sign in"),
        binding("Tab", "Next field"),
        binding("F2", "Switch between sign in and sign up"),
        binding("←/→", "Pick a role (sign up)"),
        binding("Enter", "Submit"),
        binding("Esc", "Back to the landing page"),
        Line::raw(""),
        section("Public pages"),
        binding("L", "Sign in"),
        binding("A", "About"),
        binding("H", "Home"),
        Line::raw(""),
        binding("Q / Esc", "Quit"),
        binding("Ctrl-C", "Quit from anywhere"),
        binding("?", "Toggle this help"),
        Line::raw(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(MUTED))),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );

    frame.render_widget(paragraph, popup_area);
}
