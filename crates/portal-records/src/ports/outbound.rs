//! Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::{AttendanceRecord, Enrollment, Exam, ExamResult, LectureSchedule};
use crate::domain::errors::RecordsError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use portal_session::UserId;
use uuid::Uuid;

/// Read access to the record tables.
///
/// Orderings are part of the contract; callers do not re-sort.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Attendance marks of a student, newest date first.
    async fn attendance(&self, student: UserId) -> Result<Vec<AttendanceRecord>, RecordsError>;

    /// Exam results of a student, newest first.
    async fn results(&self, student: UserId) -> Result<Vec<ExamResult>, RecordsError>;

    /// Exams on or after `from`, soonest first.
    async fn upcoming_exams(&self, from: DateTime<Utc>) -> Result<Vec<Exam>, RecordsError>;

    /// Batches a student is enrolled in.
    async fn enrollments(&self, student: UserId) -> Result<Vec<Enrollment>, RecordsError>;

    /// Lectures of the given batches.
    async fn lecture_schedules(&self, batches: &[Uuid]) -> Result<Vec<LectureSchedule>, RecordsError>;
}
