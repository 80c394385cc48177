//! Derived views over record rows

use super::entities::{AttendanceRecord, Exam, ExamResult, LectureSchedule};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Loading / failed / ready state of a page fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FetchState<T> {
    /// Request in flight
    #[default]
    Loading,
    /// Request failed; message is shown to the user
    Failed(String),
    /// Data arrived
    Ready(T),
}

impl<T> FetchState<T> {
    /// Settle from a fetch result.
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Data, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Failed(message) => FetchState::Failed(message),
            FetchState::Ready(data) => FetchState::Ready(f(data)),
        }
    }
}

/// Attendance counts and overall percentage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub total: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
    /// `round(present / total * 100)`, 0 with no records
    pub percentage: u8,
}

/// Attendance page data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttendanceReport {
    /// Newest first
    pub records: Vec<AttendanceRecord>,
    pub stats: AttendanceStats,
}

/// Letter grade band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    F,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }

    /// Whether the grade is a pass.
    pub fn is_pass(&self) -> bool {
        *self != Grade::F
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A result with its percentage and grade worked out.
#[derive(Clone, Debug, PartialEq)]
pub struct GradedResult {
    pub result: ExamResult,
    /// `None` when the exam has no positive total
    pub percentage: Option<f64>,
    pub grade: Grade,
}

/// Exams page data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExamsOverview {
    /// Newest first
    pub results: Vec<GradedResult>,
    /// Soonest first
    pub upcoming: Vec<Exam>,
}

/// Lectures on one weekday, sorted by start time.
#[derive(Clone, Debug, PartialEq)]
pub struct DaySchedule {
    pub day: Weekday,
    pub lectures: Vec<LectureSchedule>,
}

/// Weekly timetable, Monday first, days without lectures left out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timetable {
    pub days: Vec<DaySchedule>,
}

impl Timetable {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn lecture_count(&self) -> usize {
        self.days.iter().map(|d| d.lectures.len()).sum()
    }
}
