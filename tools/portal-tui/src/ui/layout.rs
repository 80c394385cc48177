//! Main layout orchestration.
//!
//! Shell pages:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ UNIVERSITY PORTAL      Student Dashboard      (S) Sam · Student │
//! ├────────────────────────┬────────────────────────────────────────┤
//! │  MENU                  │  CONTENT                               │
//! │  [1] ◆ Dashboard       │                                        │
//! │  [2] ✓ Attendance      │                                        │
//! └────────────────────────┴────────────────────────────────────────┘
//! │  [↑↓] Navigate   [Enter] Open   [O] Sign out   [?] Help         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//! Public pages and the login form take the whole screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{App, AppState, Page, View};

use super::widgets::{self, key_hint, ACCENT, MUTED};
use super::{nav_panel, pages};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer (keybinds)
        ])
        .split(size);

    match &app.view {
        View::Loading => {
            render_header(frame, main_chunks[0], app, "");
            pages::render_loading(frame, main_chunks[1]);
            render_footer(frame, main_chunks[2], &[("[Q]", " Quit  ")]);
        }
        View::Page(page) if page.in_shell() => {
            render_header(frame, main_chunks[0], app, &page.title());
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(28), Constraint::Min(40)])
                .split(main_chunks[1]);
            nav_panel::render(frame, body[0], app);
            pages::render(frame, body[1], page, app);
            render_footer(
                frame,
                main_chunks[2],
                &[
                    ("[↑↓]", " Navigate  "),
                    ("[Enter]", " Open  "),
                    ("[B]", " Back  "),
                    ("[R]", " Refresh  "),
                    ("[O]", " Sign out  "),
                    ("[?]", " Help  "),
                ],
            );
        }
        View::Page(page) => {
            render_header(frame, main_chunks[0], app, &page.title());
            pages::render(frame, main_chunks[1], page, app);
            let hints: &[(&str, &str)] = match page {
                Page::Login => &[
                    ("[Tab]", " Next field  "),
                    ("[F2]", " Sign in / Sign up  "),
                    ("[Enter]", " Submit  "),
                    ("[Esc]", " Back  "),
                ],
                _ => &[
                    ("[L]", " Sign in  "),
                    ("[A]", " About  "),
                    ("[H]", " Home  "),
                    ("[Q]", " Quit  "),
                ],
            };
            render_footer(frame, main_chunks[2], hints);
        }
    }

    if app.state == AppState::Help {
        widgets::render_help_overlay(frame);
    }
}

/// Title, page name and the signed-in user.
fn render_header(frame: &mut Frame, area: Rect, app: &App, title: &str) {
    let brand = Span::styled(
        " UNIVERSITY PORTAL ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    );

    let mut user: Vec<Span> = match &app.session.identity {
        Some(identity) => vec![
            Span::styled(
                format!("({}) ", identity.initial()),
                Style::default().fg(Color::Black).bg(ACCENT),
            ),
            Span::styled(
                format!(" {} ", identity.full_name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{} ", identity.role.label()), Style::default().fg(MUTED)),
        ],
        None => Vec::new(),
    };
    if let Some(status) = &app.status {
        user.insert(0, Span::styled(format!("{}  ", status), Style::default().fg(Color::Yellow)));
    }

    let brand_len = brand.content.chars().count();
    let title_len = title.chars().count();
    let user_len: usize = user.iter().map(|s| s.content.chars().count()).sum();
    let inner = area.width.saturating_sub(2) as usize;
    let left_pad = (inner / 2).saturating_sub(brand_len + title_len / 2);
    let right_pad = inner.saturating_sub(brand_len + left_pad + title_len + user_len);

    let mut spans = vec![
        brand,
        Span::raw(" ".repeat(left_pad)),
        Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(right_pad)),
    ];
    spans.extend(user);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED)),
    );
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| key_hint(key, label))
        .collect();

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED)),
        )
        .centered();
    frame.render_widget(footer, area);
}
