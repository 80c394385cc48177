//! Landing, about and not-found pages.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use portal_session::RoutePath;

use crate::ui::widgets::{panel, ACCENT, MUTED};

const FEATURES: [(&str, &str); 3] = [
    (
        "Student Management",
        "Enrollment, attendance tracking and academic records.",
    ),
    (
        "Course Administration",
        "Courses, schedules, notes and assignments.",
    ),
    (
        "Performance Analytics",
        "Attendance, exam results and overall academic performance.",
    ),
];

pub fn render_landing(frame: &mut Frame, area: Rect) {
    let mut text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "University Management Portal",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Academic administration for students, teachers and staff.",
            Style::default().fg(MUTED),
        )),
        Line::raw(""),
    ];
    for (title, description) in FEATURES {
        text.push(Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))));
        text.push(Line::from(Span::styled(description, Style::default().fg(MUTED))));
        text.push(Line::raw(""));
    }
    text.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("L", Style::default().fg(Color::Yellow)),
        Span::raw(" to sign in"),
    ]));

    frame.render_widget(Paragraph::new(text).centered().block(panel("WELCOME")), area);
}

pub fn render_about(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "About the portal",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(
            "Students check attendance, weekly timetables and exam results. \
             Teachers and administrators reach their own dashboards after signing in.",
        ),
        Line::raw(""),
        Line::raw("Each account has exactly one role: student, teacher or admin."),
    ];
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(panel("ABOUT"));
    frame.render_widget(paragraph, area);
}

pub fn render_not_found(frame: &mut Frame, area: Rect, path: &RoutePath) {
    let text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "404",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!("No page at {}", path),
            Style::default().fg(MUTED),
        )),
        Line::raw(""),
        Line::raw("Press H to return home"),
    ];
    frame.render_widget(Paragraph::new(text).centered().block(panel("NOT FOUND")), area);
}
