//! Records Service
//!
//! Fetches the signed-in student's records and derives the page views:
//! attendance statistics, graded results and the weekly timetable.

use crate::algorithms::{attendance_stats, grade_result, group_by_weekday};
use crate::domain::errors::RecordsError;
use crate::domain::value_objects::{AttendanceReport, ExamsOverview, Timetable};
use crate::ports::outbound::RecordSource;
use chrono::{DateTime, Utc};
use portal_session::{SessionStore, UserId};
use portal_telemetry::record_fetch;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Records service for the student pages.
pub struct RecordsService {
    source: Arc<dyn RecordSource>,
    sessions: Arc<SessionStore>,
}

impl RecordsService {
    pub fn new(source: Arc<dyn RecordSource>, sessions: Arc<SessionStore>) -> Self {
        Self { source, sessions }
    }

    fn current_student(&self) -> Result<UserId, RecordsError> {
        self.sessions
            .session()
            .user_id()
            .ok_or(RecordsError::Unauthenticated)
    }

    async fn observe<T>(
        kind: &'static str,
        fetch: impl Future<Output = Result<T, RecordsError>>,
    ) -> Result<T, RecordsError> {
        let result = fetch.await;
        record_fetch(kind, result.is_ok());
        if let Err(e) = &result {
            warn!(kind, error = %e, "Record fetch failed");
        }
        result
    }

    /// Attendance marks, newest first, with overall statistics.
    pub async fn attendance(&self) -> Result<AttendanceReport, RecordsError> {
        let student = self.current_student()?;
        let records = Self::observe("attendance", self.source.attendance(student)).await?;
        let stats = attendance_stats(&records);
        debug!(user_id = %student, total = stats.total, percentage = stats.percentage, "Attendance loaded");
        Ok(AttendanceReport { records, stats })
    }

    /// Graded results and exams still to come.
    pub async fn exams(&self) -> Result<ExamsOverview, RecordsError> {
        self.exams_as_of(Utc::now()).await
    }

    /// Like [`RecordsService::exams`] with an explicit "now".
    pub async fn exams_as_of(&self, now: DateTime<Utc>) -> Result<ExamsOverview, RecordsError> {
        let student = self.current_student()?;
        let results = Self::observe("results", self.source.results(student)).await?;
        let upcoming = Self::observe("exams", self.source.upcoming_exams(now)).await?;

        let results: Vec<_> = results.into_iter().map(grade_result).collect();
        debug!(user_id = %student, results = results.len(), upcoming = upcoming.len(), "Exams loaded");
        Ok(ExamsOverview { results, upcoming })
    }

    /// Weekly timetable for the student's batches.
    ///
    /// A student with no enrollments gets an empty timetable and no
    /// schedule query is made.
    pub async fn timetable(&self) -> Result<Timetable, RecordsError> {
        let student = self.current_student()?;
        let enrollments = Self::observe("enrollments", self.source.enrollments(student)).await?;

        let mut batches: Vec<Uuid> = enrollments.iter().map(|e| e.batch_id).collect();
        batches.sort();
        batches.dedup();
        if batches.is_empty() {
            debug!(user_id = %student, "No enrollments, empty timetable");
            return Ok(Timetable::default());
        }

        let lectures = Self::observe("lecture_schedules", self.source.lecture_schedules(&batches)).await?;
        let timetable = group_by_weekday(lectures);
        debug!(user_id = %student, lectures = timetable.lecture_count(), "Timetable loaded");
        Ok(timetable)
    }
}
