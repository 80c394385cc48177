//! Weekly timetable grouping

use crate::domain::entities::LectureSchedule;
use crate::domain::value_objects::{DaySchedule, Timetable};
use chrono::Weekday;

/// Monday to Sunday.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Group lectures by weekday, Monday first.
///
/// Days with no lectures are omitted. Within a day lectures are sorted by
/// start time, then end time; the sort is stable for identical slots.
pub fn group_by_weekday(lectures: Vec<LectureSchedule>) -> Timetable {
    let mut buckets: [Vec<LectureSchedule>; 7] = Default::default();
    for lecture in lectures {
        let index = lecture.day_of_week.num_days_from_monday() as usize;
        buckets[index].push(lecture);
    }

    let days = WEEK
        .iter()
        .zip(buckets)
        .filter(|(_, lectures)| !lectures.is_empty())
        .map(|(day, mut lectures)| {
            lectures.sort_by_key(|l| (l.start_time, l.end_time));
            DaySchedule { day: *day, lectures }
        })
        .collect();

    Timetable { days }
}
