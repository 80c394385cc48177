//! # Portal Records
//!
//! Student records behind the attendance, schedule and exams pages.
//!
//! ## Components
//!
//! - **Rows** ([`domain::entities`]): typed rows of `attendance`, `results`,
//!   `exams`, `enrollments` and `lecture_schedules`
//! - **Record source** ([`RecordSource`]): outbound port to the data store
//! - **Algorithms**: attendance percentage, grade bands, weekday grouping
//! - **Service** ([`RecordsService`]): fetches for the signed-in student
//!
//! ## Grade bands
//!
//! | Percentage | Grade |
//! |------------|-------|
//! | ≥ 90 | A+ |
//! | ≥ 80 | A |
//! | ≥ 70 | B+ |
//! | ≥ 60 | B |
//! | ≥ 50 | C |
//! | otherwise | F |

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

pub use algorithms::{attendance_stats, grade_for, group_by_weekday};
pub use domain::*;
pub use ports::RecordSource;
pub use service::RecordsService;
