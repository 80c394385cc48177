//! Attendance statistics

use crate::domain::entities::{AttendanceRecord, AttendanceStatus};
use crate::domain::value_objects::AttendanceStats;

/// Count marks and compute the overall percentage.
///
/// Only `present` counts toward the percentage; `late` does not.
pub fn attendance_stats(records: &[AttendanceRecord]) -> AttendanceStats {
    let mut stats = AttendanceStats {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.status {
            AttendanceStatus::Present => stats.present += 1,
            AttendanceStatus::Late => stats.late += 1,
            AttendanceStatus::Absent => stats.absent += 1,
        }
    }

    stats.percentage = attendance_percentage(stats.present, stats.total);
    stats
}

/// `round(present / total * 100)`, 0 when `total` is 0.
pub fn attendance_percentage(present: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let present = present.min(total);
    ((present as f64 / total as f64) * 100.0).round() as u8
}
