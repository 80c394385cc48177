//! Record source over the data API.

use super::RestBackend;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use portal_records::{
    AttendanceRecord, Enrollment, Exam, ExamResult, LectureSchedule, RecordSource, RecordsError,
};
use portal_session::UserId;
use uuid::Uuid;

const COURSE: &str = "courses(name,code)";

fn student_filter(student: UserId) -> (&'static str, String) {
    ("student_id", format!("eq.{}", student))
}

#[async_trait]
impl RecordSource for RestBackend {
    async fn attendance(&self, student: UserId) -> Result<Vec<AttendanceRecord>, RecordsError> {
        let query = vec![
            ("select", format!("*,{COURSE}")),
            student_filter(student),
            ("order", "date.desc".to_string()),
        ];
        Ok(self
            .authorized(|token| self.select("attendance", query.clone(), token))
            .await?)
    }

    async fn results(&self, student: UserId) -> Result<Vec<ExamResult>, RecordsError> {
        let query = vec![
            ("select", format!("*,exams(title,total_marks,{COURSE})")),
            student_filter(student),
            ("order", "created_at.desc".to_string()),
        ];
        Ok(self
            .authorized(|token| self.select("results", query.clone(), token))
            .await?)
    }

    async fn upcoming_exams(&self, from: DateTime<Utc>) -> Result<Vec<Exam>, RecordsError> {
        let query = vec![
            ("select", format!("*,{COURSE}")),
            (
                "exam_date",
                format!("gte.{}", from.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ),
            ("order", "exam_date.asc".to_string()),
        ];
        Ok(self
            .authorized(|token| self.select("exams", query.clone(), token))
            .await?)
    }

    async fn enrollments(&self, student: UserId) -> Result<Vec<Enrollment>, RecordsError> {
        let query = vec![("select", "batch_id".to_string()), student_filter(student)];
        Ok(self
            .authorized(|token| self.select("enrollments", query.clone(), token))
            .await?)
    }

    async fn lecture_schedules(&self, batches: &[Uuid]) -> Result<Vec<LectureSchedule>, RecordsError> {
        if batches.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = batches.iter().map(Uuid::to_string).collect();
        let query = vec![
            (
                "select",
                format!("*,{COURSE},batches(name),profiles:teacher_id(full_name)"),
            ),
            ("batch_id", format!("in.({})", ids.join(","))),
            ("order", "day_of_week,start_time".to_string()),
        ];
        Ok(self
            .authorized(|token| self.select("lecture_schedules", query.clone(), token))
            .await?)
    }
}
