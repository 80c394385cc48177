//! Role dashboards: a welcome line and one tile per menu entry.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use portal_session::Role;

use crate::domain::{menu_for, App};
use crate::ui::widgets::{panel, progress_bar, ACCENT, MUTED};

const TILE_COLUMNS: usize = 2;

pub fn render(frame: &mut Frame, area: Rect, role: Role, app: &App) {
    let name = app
        .session
        .identity
        .as_ref()
        .map(|i| i.full_name.as_str())
        .unwrap_or("");

    let [welcome_area, tiles_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(6)]).areas(area);

    let mut welcome = vec![Line::from(Span::styled(
        format!("Welcome back, {}!", name),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if role == Role::Student {
        welcome.push(attendance_summary(app));
    }
    frame.render_widget(
        Paragraph::new(welcome).block(panel(&format!("{} Dashboard", role.label()))),
        welcome_area,
    );

    render_tiles(frame, tiles_area, role);
}

/// Overall attendance, once the attendance page has been loaded.
fn attendance_summary(app: &App) -> Line<'static> {
    match app.data.attendance.as_ref().and_then(|s| s.ready()) {
        Some(report) => Line::from(vec![
            Span::styled("Overall attendance ", Style::default().fg(MUTED)),
            Span::styled(progress_bar(report.stats.percentage, 12), Style::default().fg(ACCENT)),
            Span::raw(format!(" {}%", report.stats.percentage)),
        ]),
        None => Line::from(Span::styled(
            "Here's what's happening with your academics",
            Style::default().fg(MUTED),
        )),
    }
}

fn render_tiles(frame: &mut Frame, area: Rect, role: Role) {
    // The first entry is this dashboard
    let tiles: Vec<_> = menu_for(role).iter().enumerate().skip(1).collect();
    let rows = tiles.len().div_ceil(TILE_COLUMNS).max(1);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, rows as u32); rows]).split(area);

    for (row, chunk) in tiles.chunks(TILE_COLUMNS).enumerate() {
        let cols = Layout::horizontal(vec![
            Constraint::Ratio(1, TILE_COLUMNS as u32);
            TILE_COLUMNS
        ])
        .split(row_areas[row]);

        for (col, (idx, item)) in chunk.iter().enumerate() {
            let text = vec![
                Line::from(vec![
                    Span::styled(format!("{} ", item.icon), Style::default().fg(ACCENT)),
                    Span::styled(item.label, Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(Span::styled(item.description, Style::default().fg(MUTED))),
            ];
            let tile = Paragraph::new(text).block(panel(&format!("{}", idx + 1)));
            frame.render_widget(tile, cols[col]);
        }
    }
}
