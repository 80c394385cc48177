//! Student attendance, schedule and exams pages.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
    Frame,
};

use portal_records::{
    weekday_full_name, AttendanceReport, AttendanceStatus, CourseRef, ExamsOverview, Grade,
    Timetable,
};

use super::render_fetch;
use crate::domain::App;
use crate::ui::widgets::{panel, progress_bar, ACCENT, MUTED};

fn course_label(course: Option<&CourseRef>) -> String {
    course.map_or_else(|| "—".to_string(), |c| format!("{} {}", c.code, c.name))
}

fn header_row(cells: &[&'static str]) -> Row<'static> {
    Row::new(cells.to_vec()).style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
}

fn empty(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(MUTED),
    )))
    .centered()
    .block(panel(title));
    frame.render_widget(paragraph, area);
}

pub fn render_attendance(frame: &mut Frame, area: Rect, app: &App) {
    render_fetch(frame, area, "ATTENDANCE", app.data.attendance.as_ref(), attendance);
}

fn attendance(frame: &mut Frame, area: Rect, report: &AttendanceReport) {
    let [stats_area, table_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(4)]).areas(area);

    let stats = report.stats;
    let text = vec![
        Line::from(vec![
            Span::raw("Overall  "),
            Span::styled(progress_bar(stats.percentage, 20), Style::default().fg(ACCENT)),
            Span::styled(
                format!(" {}%", stats.percentage),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("Total {}   ", stats.total), Style::default().fg(MUTED)),
            Span::styled(format!("Present {}   ", stats.present), Style::default().fg(Color::Green)),
            Span::styled(format!("Late {}   ", stats.late), Style::default().fg(Color::Yellow)),
            Span::styled(format!("Absent {}", stats.absent), Style::default().fg(Color::Red)),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).block(panel("ATTENDANCE")), stats_area);

    if report.records.is_empty() {
        empty(frame, table_area, "RECORDS", "No attendance records yet");
        return;
    }

    let rows = report.records.iter().map(|record| {
        let color = match record.status {
            AttendanceStatus::Present => Color::Green,
            AttendanceStatus::Late => Color::Yellow,
            AttendanceStatus::Absent => Color::Red,
        };
        Row::new(vec![
            Span::raw(record.date.format("%a %d %b %Y").to_string()),
            Span::raw(course_label(record.course.as_ref())),
            Span::styled(record.status.as_str(), Style::default().fg(color)),
        ])
    });
    let table = Table::new(
        rows,
        [Constraint::Length(16), Constraint::Min(20), Constraint::Length(8)],
    )
    .header(header_row(&["Date", "Course", "Status"]))
    .block(panel("RECORDS"));
    frame.render_widget(table, table_area);
}

pub fn render_schedule(frame: &mut Frame, area: Rect, app: &App) {
    render_fetch(frame, area, "CLASS SCHEDULE", app.data.timetable.as_ref(), schedule);
}

fn schedule(frame: &mut Frame, area: Rect, timetable: &Timetable) {
    if timetable.is_empty() {
        empty(frame, area, "CLASS SCHEDULE", "No classes scheduled");
        return;
    }

    let mut lines = Vec::new();
    for day in &timetable.days {
        lines.push(Line::from(Span::styled(
            weekday_full_name(day.day),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        for lecture in &day.lectures {
            lines.push(Line::from(vec![
                Span::raw(format!(
                    "  {}–{}  ",
                    lecture.start_time.format("%H:%M"),
                    lecture.end_time.format("%H:%M")
                )),
                Span::styled(
                    course_label(lecture.course.as_ref()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  {} · {}{}",
                        lecture.room.as_deref().unwrap_or("Room TBA"),
                        lecture.teacher_name(),
                        lecture
                            .batch_name()
                            .map(|b| format!(" · {}", b))
                            .unwrap_or_default()
                    ),
                    Style::default().fg(MUTED),
                ),
            ]));
        }
        lines.push(Line::raw(""));
    }

    let title = format!("CLASS SCHEDULE · {} lectures", timetable.lecture_count());
    frame.render_widget(Paragraph::new(lines).block(panel(&title)), area);
}

pub fn render_exams(frame: &mut Frame, area: Rect, app: &App) {
    render_fetch(frame, area, "EXAMS & RESULTS", app.data.exams.as_ref(), exams);
}

fn exams(frame: &mut Frame, area: Rect, overview: &ExamsOverview) {
    let [results_area, upcoming_area] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    if overview.results.is_empty() {
        empty(frame, results_area, "RESULTS", "No results published yet");
    } else {
        let rows = overview.results.iter().map(|graded| {
            let exam = &graded.result.exam;
            let grade_color = match graded.grade {
                Grade::APlus | Grade::A => Color::Green,
                Grade::F => Color::Red,
                _ => Color::Yellow,
            };
            Row::new(vec![
                Span::raw(exam.title.clone()),
                Span::raw(course_label(exam.course.as_ref())),
                Span::raw(format!("{}/{}", graded.result.marks_obtained, exam.total_marks)),
                Span::raw(
                    graded
                        .percentage
                        .map(|p| format!("{:.1}%", p))
                        .unwrap_or_else(|| "—".to_string()),
                ),
                Span::styled(graded.grade.label(), Style::default().fg(grade_color)),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Min(12),
                Constraint::Min(16),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(5),
            ],
        )
        .header(header_row(&["Exam", "Course", "Marks", "%", "Grade"]))
        .block(panel("RESULTS"));
        frame.render_widget(table, results_area);
    }

    if overview.upcoming.is_empty() {
        empty(frame, upcoming_area, "UPCOMING EXAMS", "No upcoming exams");
        return;
    }
    let rows = overview.upcoming.iter().map(|exam| {
        Row::new(vec![
            exam.title.clone(),
            course_label(exam.course.as_ref()),
            exam.exam_date.format("%a %d %b %H:%M").to_string(),
            exam.duration_minutes
                .map(|m| format!("{} min", m))
                .unwrap_or_default(),
            exam.room.clone().unwrap_or_default(),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Min(16),
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Exam", "Course", "Date", "Duration", "Room"]))
    .block(panel("UPCOMING EXAMS"));
    frame.render_widget(table, upcoming_area);
}
