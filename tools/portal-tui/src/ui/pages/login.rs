//! Sign-in / sign-up form.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use portal_session::Role;

use crate::domain::{Field, LoginForm, LoginTab, Notice};
use crate::ui::widgets::{centered_rect, panel, ACCENT, MUTED};

fn tab_span(label: &'static str, active: bool) -> Span<'static> {
    if active {
        Span::styled(
            format!(" {} ", label),
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {} ", label), Style::default().fg(MUTED))
    }
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let value_style = if focused {
        Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(ACCENT)),
        Span::styled(format!("{:<10}", label), Style::default().fg(MUTED)),
        Span::styled(value, value_style),
        Span::raw(if focused { "_" } else { "" }),
    ])
}

fn role_line(selected: Role, focused: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled(if focused { "▶ " } else { "  " }, Style::default().fg(ACCENT)),
        Span::styled(format!("{:<10}", "Role"), Style::default().fg(MUTED)),
    ];
    for role in Role::ALL {
        spans.push(tab_span(role.label(), role == selected));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

pub fn render(frame: &mut Frame, area: Rect, form: &LoginForm) {
    let area = centered_rect(70, 90, area);
    let [form_area, notice_area] =
        Layout::vertical([Constraint::Min(10), Constraint::Length(4)]).areas(area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Sign in or create an account to continue",
            Style::default().fg(MUTED),
        )),
        Line::raw(""),
        Line::from(vec![
            tab_span("Sign In", form.tab == LoginTab::SignIn),
            Span::raw("  "),
            tab_span("Sign Up", form.tab == LoginTab::SignUp),
        ]),
        Line::raw(""),
    ];

    if form.tab == LoginTab::SignUp {
        lines.push(field_line("Full Name", form.full_name.clone(), form.focus == Field::FullName));
    }
    lines.push(field_line("Email", form.email.clone(), form.focus == Field::Email));
    lines.push(field_line(
        "Password",
        "•".repeat(form.password.chars().count()),
        form.focus == Field::Password,
    ));
    if form.tab == LoginTab::SignUp {
        lines.push(role_line(form.role, form.focus == Field::Role));
    }
    lines.push(Line::raw(""));

    let action = match (form.tab, form.busy) {
        (LoginTab::SignIn, false) => "[Enter] Sign In",
        (LoginTab::SignIn, true) => "Signing in...",
        (LoginTab::SignUp, false) => "[Enter] Create Account",
        (LoginTab::SignUp, true) => "Creating account...",
    };
    lines.push(Line::from(Span::styled(action, Style::default().fg(Color::Yellow))));

    frame.render_widget(Paragraph::new(lines).block(panel("UNIVERSITY PORTAL")), form_area);

    if let Some(notice) = &form.notice {
        let (text, color) = match notice {
            Notice::Error(message) => (format!("Error: {}", message), Color::Red),
            Notice::Info(message) => (message.clone(), Color::Green),
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, notice_area);
    }
}
