//! Attendance streak derivation for student dashboards.
//!
//! Streaks count attendance records, ordered by session date. Days without
//! any record never break a streak; a record with `present = false` does.

use chrono::{Days, NaiveDate};

/// Length of the present-run at the end of the record sequence, considering
/// only records dated on or before `today`.
pub fn current_streak(records: &[(NaiveDate, bool)], today: NaiveDate) -> u32 {
    records
        .iter()
        .rev()
        .filter(|(date, _)| *date <= today)
        .take_while(|(_, present)| *present)
        .count() as u32
}

/// Longest present-run among records within the last 90 days.
pub fn longest_streak(records: &[(NaiveDate, bool)], today: NaiveDate) -> u32 {
    let window_start = today - Days::new(90);

    let mut longest = 0u32;
    let mut run = 0u32;
    for (date, present) in records {
        if *date < window_start || *date > today {
            continue;
        }
        if *present {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn current_streak_counts_trailing_presents() {
        let records = vec![(d(1), true), (d(2), false), (d(4), true), (d(5), true)];
        assert_eq!(current_streak(&records, d(5)), 2);
    }

    #[test]
    fn absence_resets_current_streak() {
        let records = vec![(d(1), true), (d(2), true), (d(3), false)];
        assert_eq!(current_streak(&records, d(3)), 0);
    }

    #[test]
    fn gap_days_do_not_break_streaks() {
        // No record on the 3rd; the run keeps going.
        let records = vec![(d(1), true), (d(2), true), (d(4), true)];
        assert_eq!(current_streak(&records, d(4)), 3);
        assert_eq!(longest_streak(&records, d(4)), 3);
    }

    #[test]
    fn future_records_are_ignored() {
        let records = vec![(d(1), true), (d(2), true), (d(9), true)];
        assert_eq!(current_streak(&records, d(2)), 2);
    }

    #[test]
    fn longest_streak_is_windowed_to_ninety_days() {
        let old = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let records = vec![
            (old, true),
            (old + Days::new(1), true),
            (old + Days::new(2), true),
            (d(1), true),
            (d(2), false),
            (d(3), true),
            (d(4), true),
        ];
        assert_eq!(longest_streak(&records, d(4)), 2);
    }

    #[test]
    fn empty_history_has_no_streaks() {
        assert_eq!(current_streak(&[], d(1)), 0);
        assert_eq!(longest_streak(&[], d(1)), 0);
    }
}
