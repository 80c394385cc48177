//! Grade computation

use crate::domain::entities::ExamResult;
use crate::domain::value_objects::{Grade, GradedResult};

/// Band a percentage: 90 A+, 80 A, 70 B+, 60 B, 50 C, below that F.
pub fn grade_for(percentage: f64) -> Grade {
    match percentage {
        p if p >= 90.0 => Grade::APlus,
        p if p >= 80.0 => Grade::A,
        p if p >= 70.0 => Grade::BPlus,
        p if p >= 60.0 => Grade::B,
        p if p >= 50.0 => Grade::C,
        _ => Grade::F,
    }
}

/// Marks as a percentage of the total; `None` unless `total` is positive.
pub fn score_percentage(marks: f64, total: f64) -> Option<f64> {
    (total > 0.0 && marks.is_finite()).then(|| marks / total * 100.0)
}

/// Attach percentage and grade to a result. Unscorable results grade F.
pub fn grade_result(result: ExamResult) -> GradedResult {
    let percentage = score_percentage(result.marks_obtained, result.exam.total_marks);
    let grade = percentage.map_or(Grade::F, grade_for);
    GradedResult {
        result,
        percentage,
        grade,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ExamSummary;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    #[test]
    fn test_band_edges() {
        assert_eq!(grade_for(100.0), Grade::APlus);
        assert_eq!(grade_for(90.0), Grade::APlus);
        assert_eq!(grade_for(89.99), Grade::A);
        assert_eq!(grade_for(80.0), Grade::A);
        assert_eq!(grade_for(70.0), Grade::BPlus);
        assert_eq!(grade_for(60.0), Grade::B);
        assert_eq!(grade_for(50.0), Grade::C);
        assert_eq!(grade_for(49.9), Grade::F);
        assert_eq!(grade_for(0.0), Grade::F);
    }

    #[test]
    fn test_grade_result() {
        let result = ExamResult {
            id: Uuid::new_v4(),
            marks_obtained: 42.0,
            remarks: None,
            created_at: Utc::now(),
            exam: ExamSummary {
                title: "Midterm".to_string(),
                total_marks: 50.0,
                course: None,
            },
        };
        let graded = grade_result(result.clone());
        assert_eq!(graded.percentage, Some(84.0));
        assert_eq!(graded.grade, Grade::A);

        let broken = ExamResult {
            exam: ExamSummary {
                total_marks: 0.0,
                ..result.exam.clone()
            },
            ..result
        };
        let graded = grade_result(broken);
        assert_eq!(graded.percentage, None);
        assert_eq!(graded.grade, Grade::F);
    }

    proptest! {
        #[test]
        fn prop_grade_is_monotonic(a in 0.0f64..120.0, b in 0.0f64..120.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            // Grade ordering puts better grades first
            prop_assert!(grade_for(hi) <= grade_for(lo));
        }
    }
}
