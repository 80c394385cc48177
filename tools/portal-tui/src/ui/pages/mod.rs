//! Per-page content renderers.

mod dashboard;
mod login;
mod public;
mod student;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use portal_records::FetchState;

use crate::domain::{App, Page};

use super::widgets::{panel, MUTED};

/// Dispatch to the page renderer.
pub fn render(frame: &mut Frame, area: Rect, page: &Page, app: &App) {
    match page {
        Page::Landing => public::render_landing(frame, area),
        Page::About => public::render_about(frame, area),
        Page::NotFound(path) => public::render_not_found(frame, area, path),
        Page::Login => login::render(frame, area, &app.login),
        Page::Dashboard(role) => dashboard::render(frame, area, *role, app),
        Page::Attendance => student::render_attendance(frame, area, app),
        Page::Schedule => student::render_schedule(frame, area, app),
        Page::Exams => student::render_exams(frame, area, app),
        Page::Unavailable(_) => render_unavailable(frame, area, page),
    }
}

/// Session not settled yet.
pub fn render_loading(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::raw(""),
        Line::raw(""),
        Line::from(Span::styled("Loading…", Style::default().fg(MUTED))),
    ];
    frame.render_widget(Paragraph::new(text).centered(), area);
}

/// Menu entries without a page behind them.
fn render_unavailable(frame: &mut Frame, area: Rect, page: &Page) {
    let text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "This section is not available yet.",
            Style::default().fg(Color::Yellow),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Use the menu to pick another page.",
            Style::default().fg(MUTED),
        )),
    ];
    let paragraph = Paragraph::new(text).centered().block(panel(&page.title()));
    frame.render_widget(paragraph, area);
}

/// Render a page fetch: loading and error states, or the data.
fn render_fetch<T>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    state: Option<&FetchState<T>>,
    ready: impl FnOnce(&mut Frame, Rect, &T),
) {
    match state {
        Some(FetchState::Ready(data)) => ready(frame, area, data),
        Some(FetchState::Failed(message)) => {
            let text = vec![
                Line::raw(""),
                Line::from(Span::styled(
                    format!("Error: {}", message),
                    Style::default().fg(Color::Red),
                )),
                Line::raw(""),
                Line::from(Span::styled("Press R to retry", Style::default().fg(MUTED))),
            ];
            frame.render_widget(Paragraph::new(text).centered().block(panel(title)), area);
        }
        Some(FetchState::Loading) | None => {
            let text = vec![
                Line::raw(""),
                Line::from(Span::styled("Loading…", Style::default().fg(MUTED))),
            ];
            frame.render_widget(Paragraph::new(text).centered().block(panel(title)), area);
        }
    }
}
