//! Record rows as the data store returns them.
//!
//! Field names follow the table columns. Embedded relations keep their
//! table names on the wire (`courses`, `exams`, `batches`, `profiles`).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Course a record belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub name: String,
    pub code: String,
}

/// Attendance mark for one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl From<String> for AttendanceStatus {
    /// Anything unrecognized counts as absent.
    fn from(value: String) -> Self {
        match value.as_str() {
            "present" => AttendanceStatus::Present,
            "late" => AttendanceStatus::Late,
            _ => AttendanceStatus::Absent,
        }
    }
}

/// Row of `attendance`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(rename = "courses", default)]
    pub course: Option<CourseRef>,
}

/// The exam a result refers to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamSummary {
    pub title: String,
    pub total_marks: f64,
    #[serde(rename = "courses", default)]
    pub course: Option<CourseRef>,
}

/// Row of `results` with its exam embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: Uuid,
    pub marks_obtained: f64,
    #[serde(default)]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "exams")]
    pub exam: ExamSummary,
}

/// Row of `exams`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub title: String,
    pub exam_date: DateTime<Utc>,
    pub total_marks: f64,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(rename = "courses", default)]
    pub course: Option<CourseRef>,
}

/// Row of `enrollments`, reduced to the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    pub batch_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRef {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub full_name: String,
}

/// Row of `lecture_schedules` with course, batch and teacher embedded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LectureSchedule {
    pub id: Uuid,
    pub batch_id: Uuid,
    #[serde(with = "weekday_name")]
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(rename = "courses", default)]
    pub course: Option<CourseRef>,
    #[serde(rename = "batches", default)]
    pub batch: Option<BatchRef>,
    #[serde(rename = "profiles", default)]
    pub teacher: Option<TeacherRef>,
}

impl LectureSchedule {
    /// Instructor name, `TBA` when unassigned.
    pub fn teacher_name(&self) -> &str {
        self.teacher.as_ref().map_or("TBA", |t| t.full_name.as_str())
    }

    pub fn batch_name(&self) -> Option<&str> {
        self.batch.as_ref().map(|b| b.name.as_str())
    }
}

/// `day_of_week` is stored as a full English day name.
mod weekday_name {
    use chrono::Weekday;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(full_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<Weekday>()
            .map_err(|_| D::Error::custom(format!("invalid day_of_week: {raw}")))
    }

    pub fn full_name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

pub use weekday_name::full_name as weekday_full_name;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attendance_status_is_absent() {
        let record: AttendanceRecord = serde_json::from_str(
            r#"{"id":"6f1c1d1e-0000-4000-8000-000000000001","date":"2024-03-01","status":"excused","student_id":"x"}"#,
        )
        .expect("record");
        assert_eq!(record.status, AttendanceStatus::Absent);
        assert_eq!(record.course, None);
    }

    #[test]
    fn test_lecture_schedule_from_embedded_select() {
        let json = r#"{
            "id":"6f1c1d1e-0000-4000-8000-000000000002",
            "batch_id":"6f1c1d1e-0000-4000-8000-000000000003",
            "day_of_week":"Wednesday",
            "start_time":"09:30:00",
            "end_time":"11:00:00",
            "room":null,
            "courses":{"name":"Compilers","code":"CS401"},
            "batches":{"name":"CS-2024-A"},
            "profiles":null
        }"#;
        let lecture: LectureSchedule = serde_json::from_str(json).expect("lecture");
        assert_eq!(lecture.day_of_week, Weekday::Wed);
        assert_eq!(lecture.teacher_name(), "TBA");
        assert_eq!(lecture.batch_name(), Some("CS-2024-A"));

        let back = serde_json::to_value(&lecture).expect("serialize");
        assert_eq!(back["day_of_week"], "Wednesday");
    }

    #[test]
    fn test_result_with_embedded_exam() {
        let json = r#"{
            "id":"6f1c1d1e-0000-4000-8000-000000000004",
            "marks_obtained":42.5,
            "created_at":"2024-04-02T10:00:00+00:00",
            "exams":{"title":"Midterm","total_marks":50,"courses":{"name":"Algebra","code":"MA101"}}
        }"#;
        let result: ExamResult = serde_json::from_str(json).expect("result");
        assert_eq!(result.exam.total_marks, 50.0);
        assert_eq!(result.remarks, None);
    }
}
