//! # Student Records
//!
//! The attendance, schedule and exams pages end to end: sign in, fetch
//! through the records service, check what the pages would render.

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
    use portal_backend::InMemoryBackend;
    use portal_records::{
        AttendanceRecord, AttendanceStatus, CourseRef, Exam, ExamResult, ExamSummary, Grade,
        LectureSchedule, RecordsError, TeacherRef,
    };
    use portal_session::{Role, SessionApi, UserId};
    use uuid::Uuid;

    use crate::fixtures::{Portal, PASSWORD};

    fn course() -> Option<CourseRef> {
        Some(CourseRef {
            name: "Algorithms".to_string(),
            code: "CS201".to_string(),
        })
    }

    fn mark(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).expect("date"),
            status,
            course: course(),
        }
    }

    fn result(marks: f64, total: f64, days_ago: i64) -> ExamResult {
        ExamResult {
            id: Uuid::new_v4(),
            marks_obtained: marks,
            remarks: None,
            created_at: Utc::now() - Duration::days(days_ago),
            exam: ExamSummary {
                title: format!("Quiz {}", days_ago),
                total_marks: total,
                course: course(),
            },
        }
    }

    fn lecture(batch_id: Uuid, day: Weekday, hour: u32, teacher: Option<&str>) -> LectureSchedule {
        LectureSchedule {
            id: Uuid::new_v4(),
            batch_id,
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).expect("time"),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).expect("time"),
            room: Some("B-12".to_string()),
            course: course(),
            batch: None,
            teacher: teacher.map(|name| TeacherRef {
                full_name: name.to_string(),
            }),
        }
    }

    async fn signed_in_student() -> (Portal, UserId) {
        let portal = Portal::new(InMemoryBackend::new());
        let sam = portal.user("sam", Role::Student);
        portal.store.initialize().await;
        portal.store.sign_in("sam@uni.edu", PASSWORD).await.expect("sign in");
        (portal, sam.id)
    }

    #[tokio::test]
    async fn test_records_need_a_session() {
        let portal = Portal::new(InMemoryBackend::new());
        portal.store.initialize().await;

        assert_eq!(portal.records.attendance().await, Err(RecordsError::Unauthenticated));
        assert_eq!(portal.records.timetable().await, Err(RecordsError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_attendance_percentage_counts_present_only() {
        let (portal, sam) = signed_in_student().await;
        portal.backend.insert_attendance(sam, mark(3, AttendanceStatus::Present));
        portal.backend.insert_attendance(sam, mark(4, AttendanceStatus::Late));
        portal.backend.insert_attendance(sam, mark(5, AttendanceStatus::Absent));
        portal.backend.insert_attendance(sam, mark(6, AttendanceStatus::Present));

        let report = portal.records.attendance().await.expect("attendance");
        assert_eq!(report.stats.total, 4);
        assert_eq!(report.stats.present, 2);
        assert_eq!(report.stats.late, 1);
        assert_eq!(report.stats.absent, 1);
        assert_eq!(report.stats.percentage, 50);

        let days: Vec<u32> = report.records.iter().map(|r| r.date.day()).collect();
        assert_eq!(days, vec![6, 5, 4, 3]);
    }

    #[tokio::test]
    async fn test_empty_attendance_is_zero_percent() {
        let (portal, _) = signed_in_student().await;
        let report = portal.records.attendance().await.expect("attendance");
        assert_eq!(report.stats.total, 0);
        assert_eq!(report.stats.percentage, 0);
    }

    #[tokio::test]
    async fn test_attendance_is_per_student() {
        let (portal, sam) = signed_in_student().await;
        let other = portal.user("ola", Role::Student);
        portal.backend.insert_attendance(other.id, mark(1, AttendanceStatus::Present));
        portal.backend.insert_attendance(sam, mark(2, AttendanceStatus::Absent));

        let report = portal.records.attendance().await.expect("attendance");
        assert_eq!(report.stats.total, 1);
        assert_eq!(report.stats.percentage, 0);
    }

    #[tokio::test]
    async fn test_results_are_graded_newest_first() {
        let (portal, sam) = signed_in_student().await;
        portal.backend.insert_result(sam, result(45.0, 50.0, 10));
        portal.backend.insert_result(sam, result(24.0, 50.0, 1));
        portal.backend.insert_result(sam, result(7.0, 0.0, 5));

        let overview = portal.records.exams().await.expect("exams");
        let grades: Vec<Grade> = overview.results.iter().map(|r| r.grade).collect();
        assert_eq!(grades, vec![Grade::F, Grade::F, Grade::APlus]);
        let close = |p: Option<f64>, want: f64| p.is_some_and(|p| (p - want).abs() < 1e-9);
        assert!(close(overview.results[0].percentage, 48.0));
        assert_eq!(overview.results[1].percentage, None);
        assert!(close(overview.results[2].percentage, 90.0));
    }

    #[tokio::test]
    async fn test_only_future_exams_are_upcoming() {
        let (portal, _) = signed_in_student().await;
        let exam = |title: &str, days: i64| Exam {
            id: Uuid::new_v4(),
            title: title.to_string(),
            exam_date: Utc::now() + Duration::days(days),
            total_marks: 100.0,
            duration_minutes: Some(90),
            room: None,
            course: course(),
        };
        portal.backend.insert_exam(exam("Final", 20));
        portal.backend.insert_exam(exam("Past", -3));
        portal.backend.insert_exam(exam("Midterm", 4));

        let overview = portal.records.exams().await.expect("exams");
        let titles: Vec<&str> = overview.upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Midterm", "Final"]);
    }

    #[tokio::test]
    async fn test_timetable_groups_enrolled_batches() {
        let (portal, sam) = signed_in_student().await;
        let batch = Uuid::new_v4();
        let other_batch = Uuid::new_v4();
        portal.backend.enroll(sam, batch);
        portal.backend.insert_lecture(lecture(batch, Weekday::Wed, 14, Some("Dr. Tess Moreau")));
        portal.backend.insert_lecture(lecture(batch, Weekday::Mon, 11, None));
        portal.backend.insert_lecture(lecture(batch, Weekday::Mon, 9, Some("Dr. Tess Moreau")));
        portal.backend.insert_lecture(lecture(other_batch, Weekday::Tue, 9, None));

        let timetable = portal.records.timetable().await.expect("timetable");
        let days: Vec<Weekday> = timetable.days.iter().map(|d| d.day).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(timetable.lecture_count(), 3);

        let monday = &timetable.days[0].lectures;
        assert_eq!(monday[0].start_time, NaiveTime::from_hms_opt(9, 0, 0).expect("time"));
        assert_eq!(monday[1].teacher_name(), "TBA");
        assert_eq!(portal.backend.schedule_queries(), 1);
    }

    #[tokio::test]
    async fn test_no_enrollments_means_no_schedule_query() {
        let (portal, _) = signed_in_student().await;
        portal.backend.insert_lecture(lecture(Uuid::new_v4(), Weekday::Mon, 9, None));

        let timetable = portal.records.timetable().await.expect("timetable");
        assert!(timetable.is_empty());
        assert_eq!(portal.backend.schedule_queries(), 0);
    }

    #[tokio::test]
    async fn test_demo_student_pages() {
        let backend = InMemoryBackend::demo();
        let portal = Portal::new(backend);
        portal.store.initialize().await;
        portal
            .store
            .sign_in(portal_backend::DEMO_ACCOUNTS[0].email, portal_backend::DEMO_PASSWORD)
            .await
            .expect("sign in");

        let report = portal.records.attendance().await.expect("attendance");
        assert_eq!(report.stats.total, 12);
        assert!(report.stats.percentage < 100);

        let timetable = portal.records.timetable().await.expect("timetable");
        assert_eq!(timetable.lecture_count(), 5);
    }
}
