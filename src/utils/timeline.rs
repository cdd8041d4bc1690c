//! Course timeline derivation.
//!
//! All duration math uses fixed-length periods: 365 days per year and 183
//! days per semester (half-year convention). The legacy system mixed 180 and
//! 183 in different paths; 183 is used everywhere here.

use chrono::{Days, NaiveDate};

use crate::entities::sea_orm_active_enums::DurationUnit;

pub const DAYS_PER_YEAR: u64 = 365;
pub const DAYS_PER_SEMESTER: u64 = 183;

pub fn max_period(duration: i32, unit: DurationUnit) -> i32 {
    match unit {
        DurationUnit::Year => duration,
        DurationUnit::Semester => duration * 2,
    }
}

pub fn days_per_period(unit: DurationUnit) -> u64 {
    match unit {
        DurationUnit::Year => DAYS_PER_YEAR,
        DurationUnit::Semester => DAYS_PER_SEMESTER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub expected_end: NaiveDate,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Derive the full timeline for a course enrollment.
///
/// `current_period` is 1-based and must already be validated against
/// `max_period`.
pub fn derive(
    start: NaiveDate,
    current_period: i32,
    duration: i32,
    unit: DurationUnit,
) -> Timeline {
    let step = days_per_period(unit);
    let total = step * max_period(duration, unit) as u64;
    let before = step * (current_period.max(1) as u64 - 1);

    let period_start = start + Days::new(before);
    Timeline {
        expected_end: start + Days::new(total),
        period_start,
        period_end: period_start + Days::new(step),
    }
}

pub fn remaining_days(expected_end: NaiveDate, today: NaiveDate) -> i64 {
    (expected_end - today).num_days().max(0)
}

/// Elapsed share of the enrollment window, floored to whole percent and
/// clamped to [0, 100]. Zero before the start date, 100 on or after the
/// expected end.
pub fn completion_percentage(start: NaiveDate, expected_end: NaiveDate, today: NaiveDate) -> i32 {
    if today < start {
        return 0;
    }
    if today >= expected_end {
        return 100;
    }
    let total = (expected_end - start).num_days();
    if total <= 0 {
        return 100;
    }
    let elapsed = (today - start).num_days();
    ((100 * elapsed) / total).clamp(0, 100) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn year_based_four_year_course() {
        let start = d(2024, 1, 1);
        let timeline = derive(start, 1, 4, DurationUnit::Year);

        assert_eq!(timeline.expected_end, start + Days::new(4 * 365));
        assert_eq!(timeline.period_start, start);
        assert_eq!(timeline.period_end, start + Days::new(365));

        // 182 elapsed days of a 1460-day window.
        let today = d(2024, 7, 1);
        assert_eq!(completion_percentage(start, timeline.expected_end, today), 12);
    }

    #[test]
    fn semester_based_course_period_window() {
        let start = d(2023, 8, 1);
        assert_eq!(max_period(3, DurationUnit::Semester), 6);

        let timeline = derive(start, 5, 3, DurationUnit::Semester);
        assert_eq!(timeline.period_start, start + Days::new(4 * 183));
        assert_eq!(timeline.period_end, start + Days::new(5 * 183));
        assert_eq!(timeline.expected_end, start + Days::new(6 * 183));

        // 578 elapsed days of a 1098-day window.
        let today = d(2025, 3, 1);
        assert_eq!((today - start).num_days(), 578);
        assert_eq!(completion_percentage(start, timeline.expected_end, today), 52);
    }

    #[test]
    fn completion_clamps_at_the_edges() {
        let start = d(2024, 1, 1);
        let end = d(2025, 1, 1);

        assert_eq!(completion_percentage(start, end, d(2023, 12, 31)), 0);
        assert_eq!(completion_percentage(start, end, start), 0);
        assert_eq!(completion_percentage(start, end, end), 100);
        assert_eq!(completion_percentage(start, end, d(2026, 6, 1)), 100);
    }

    #[test]
    fn remaining_days_never_negative() {
        let end = d(2024, 6, 1);
        assert_eq!(remaining_days(end, d(2024, 5, 30)), 2);
        assert_eq!(remaining_days(end, end), 0);
        assert_eq!(remaining_days(end, d(2024, 7, 1)), 0);
    }
}
