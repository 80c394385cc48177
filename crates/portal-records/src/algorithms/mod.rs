//! Algorithms module for student records
//!
//! Contains:
//! - Attendance statistics
//! - Grade bands
//! - Weekly timetable grouping

pub mod attendance;
pub mod grades;
pub mod schedule;

pub use attendance::{attendance_percentage, attendance_stats};
pub use grades::{grade_for, grade_result, score_percentage};
pub use schedule::{group_by_weekday, WEEK};
