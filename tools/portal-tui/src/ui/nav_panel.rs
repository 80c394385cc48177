//! Left panel: the signed-in role's menu.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::domain::{menu_for, App};

use super::widgets::{panel, ACCENT, MUTED};

/// Render the navigation menu.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let menu = app.role().map(menu_for).unwrap_or(&[]);

    let items: Vec<ListItem> = menu
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let is_current = app.router.current() == item.path;
            let is_selected = idx == app.nav_selected;

            let line_style = if is_selected {
                Style::default().bg(MUTED).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let label_style = if is_current {
                Style::default().fg(ACCENT)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", idx + 1), Style::default().fg(MUTED)),
                Span::styled(format!("{} ", item.icon), Style::default().fg(ACCENT)),
                Span::styled(item.label, label_style),
            ]))
            .style(line_style)
        })
        .collect();

    frame.render_widget(List::new(items).block(panel("MENU")), area);
}
