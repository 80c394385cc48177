//! Demo dataset: one account per role, plus a term of student records.

use super::InMemoryBackend;
use chrono::{Duration, NaiveTime, Utc, Weekday};
use portal_records::{
    AttendanceRecord, AttendanceStatus, BatchRef, CourseRef, Exam, ExamResult, ExamSummary,
    LectureSchedule, TeacherRef,
};
use portal_session::Role;
use uuid::Uuid;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "portal123";

#[derive(Debug, Clone, Copy)]
pub struct DemoAccount {
    pub email: &'static str,
    pub full_name: &'static str,
    pub role: Role,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 3] = [
    DemoAccount {
        email: "student@university.edu",
        full_name: "Sam Rivera",
        role: Role::Student,
    },
    DemoAccount {
        email: "teacher@university.edu",
        full_name: "Dr. Tess Moreau",
        role: Role::Teacher,
    },
    DemoAccount {
        email: "admin@university.edu",
        full_name: "Alex Okafor",
        role: Role::Admin,
    },
];

fn course(name: &str, code: &str) -> Option<CourseRef> {
    Some(CourseRef {
        name: name.to_string(),
        code: code.to_string(),
    })
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

impl InMemoryBackend {
    /// Backend preloaded with [`DEMO_ACCOUNTS`] and records for the student.
    pub fn demo() -> Self {
        let backend = Self::new();
        backend.seed_demo();
        backend
    }

    /// Add the demo accounts and records.
    pub fn seed_demo(&self) {
        let ids: Vec<_> = DEMO_ACCOUNTS
            .iter()
            .map(|a| self.add_user(a.email, DEMO_PASSWORD, a.full_name, a.role).id)
            .collect();
        let student = ids[0];

        let courses = [
            ("Data Structures", "CS201"),
            ("Linear Algebra", "MA204"),
            ("Operating Systems", "CS310"),
        ];
        let teacher_name = DEMO_ACCOUNTS[1].full_name;

        let today = Utc::now().date_naive();
        for day in 0..12i64 {
            let (name, code) = courses[(day % 3) as usize];
            let status = match day % 5 {
                3 => AttendanceStatus::Absent,
                4 => AttendanceStatus::Late,
                _ => AttendanceStatus::Present,
            };
            self.insert_attendance(
                student,
                AttendanceRecord {
                    id: Uuid::new_v4(),
                    date: today - Duration::days(day + 1),
                    status,
                    course: course(name, code),
                },
            );
        }

        let now = Utc::now();
        let marks = [(46.0, 50.0), (71.0, 100.0), (38.0, 60.0)];
        for (i, ((name, code), (obtained, total))) in courses.iter().zip(marks).enumerate() {
            self.insert_result(
                student,
                ExamResult {
                    id: Uuid::new_v4(),
                    marks_obtained: obtained,
                    remarks: (obtained / total >= 0.9).then(|| "Excellent work".to_string()),
                    created_at: now - Duration::days(30 - i as i64 * 7),
                    exam: ExamSummary {
                        title: "Midterm".to_string(),
                        total_marks: total,
                        course: course(name, code),
                    },
                },
            );
            self.insert_exam(Exam {
                id: Uuid::new_v4(),
                title: "Final".to_string(),
                exam_date: now + Duration::days(14 + i as i64 * 3),
                total_marks: 100.0,
                duration_minutes: Some(120),
                room: Some(format!("Hall {}", i + 1)),
                course: course(name, code),
            });
        }

        let batch_id = Uuid::new_v4();
        self.enroll(student, batch_id);
        let slots = [
            (Weekday::Mon, time(9, 0), time(10, 30), 0),
            (Weekday::Mon, time(11, 0), time(12, 30), 1),
            (Weekday::Wed, time(9, 0), time(10, 30), 2),
            (Weekday::Thu, time(14, 0), time(15, 30), 0),
            (Weekday::Fri, time(10, 0), time(11, 30), 1),
        ];
        for (day, start, end, c) in slots {
            let (name, code) = courses[c];
            self.insert_lecture(LectureSchedule {
                id: Uuid::new_v4(),
                batch_id,
                day_of_week: day,
                start_time: start,
                end_time: end,
                room: Some(format!("Room {}", 101 + c)),
                course: course(name, code),
                batch: Some(BatchRef {
                    name: "CS-2025-A".to_string(),
                }),
                teacher: (c != 2).then(|| TeacherRef {
                    full_name: teacher_name.to_string(),
                }),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_records::RecordSource;
    use portal_session::{AuthGateway, Credentials};

    #[tokio::test]
    async fn test_demo_accounts_sign_in() {
        let backend = InMemoryBackend::demo();
        for account in DEMO_ACCOUNTS {
            backend
                .submit_credentials(&Credentials::new(account.email, DEMO_PASSWORD))
                .await
                .expect("demo sign in");
            let identity = backend.resolve_current_identity().await.expect("identity");
            assert_eq!(identity.role, account.role);
        }
    }

    #[tokio::test]
    async fn test_demo_student_has_records() {
        let backend = InMemoryBackend::demo();
        let user = backend
            .submit_credentials(&Credentials::new(DEMO_ACCOUNTS[0].email, DEMO_PASSWORD))
            .await
            .expect("sign in");

        assert_eq!(backend.attendance(user.id).await.expect("attendance").len(), 12);
        assert_eq!(backend.results(user.id).await.expect("results").len(), 3);
        let batches: Vec<Uuid> = backend
            .enrollments(user.id)
            .await
            .expect("enrollments")
            .into_iter()
            .map(|e| e.batch_id)
            .collect();
        assert_eq!(backend.lecture_schedules(&batches).await.expect("lectures").len(), 5);
    }
}
