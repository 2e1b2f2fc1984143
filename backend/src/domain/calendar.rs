//! Calendar and week arithmetic for the canvass tracker.
//!
//! A canvassing week is six consecutive working days starting on Sunday;
//! Saturday is the rest day and is excluded from aggregation and from
//! missing-report scans. The week locks at 18:00 on its last working day
//! (Friday evening). All functions here are pure: dates are compared as
//! calendar dates (year-month-day), never as instants, so a report saved
//! near midnight can never drift into the neighbouring week.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// First day of the canvassing week.
pub const WEEK_START_DAY: Weekday = Weekday::Sun;

/// Number of working days in a canvassing week (the 7th day is rest).
pub const WORKING_DAYS_PER_WEEK: i64 = 6;

/// Hour of day (local time) at which a finished week locks.
pub const LOCK_CUTOFF_HOUR: u32 = 18;

/// The start of the week containing `date`: the most recent Sunday on or
/// before it.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_start = date.weekday().num_days_from_sunday() as i64;
    date - Duration::days(days_since_start)
}

/// The week's cutoff instant: 18:00 on the last working day
/// (`week_start + 5` days, a Friday).
pub fn week_end(week_start: NaiveDate) -> NaiveDateTime {
    let last_working_day = week_start + Duration::days(WORKING_DAYS_PER_WEEK - 1);
    last_working_day
        .and_hms_opt(LOCK_CUTOFF_HOUR, 0, 0)
        .expect("cutoff hour is a valid time of day")
}

/// Whether the week starting at `week_start` is locked at `now`.
///
/// Monotonic in `now`: false strictly before the cutoff instant, true at
/// and after it, never flipping back.
pub fn is_locked(week_start: NaiveDate, now: NaiveDateTime) -> bool {
    now >= week_end(week_start)
}

/// Deterministic week number within the calendar year, derived from
/// day-of-year arithmetic on the week's start date.
///
/// Two weekly reports for the same calendar week always compute the same
/// number regardless of creation order; nothing is persisted or counted.
pub fn week_number(week_start: NaiveDate) -> u32 {
    week_start.ordinal0() / 7 + 1
}

/// The 6 working dates of the week, ordered, Sunday through Friday.
pub fn working_dates_in_week(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..WORKING_DAYS_PER_WEEK)
        .map(|offset| week_start + Duration::days(offset))
        .collect()
}

/// Whether `date` is one of the six working weekdays.
pub fn is_working_day(date: NaiveDate) -> bool {
    date.weekday() != Weekday::Sat
}

/// Deterministic daily report id: `daily_<YYYY-MM-DD>`.
pub fn daily_report_id(date: NaiveDate) -> String {
    format!("daily_{}", date.format("%Y-%m-%d"))
}

/// Deterministic weekly report id: `week_<YYYY-MM-DD>` of the start date.
pub fn weekly_report_id(week_start: NaiveDate) -> String {
    format!("week_{}", week_start.format("%Y-%m-%d"))
}

/// Deterministic monthly report id: `month_<year>_<month>` (1-based month).
pub fn monthly_report_id(year: i32, month: u32) -> String {
    format!("month_{}_{}", year, month)
}

/// Human-readable name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Invalid Month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_on_each_weekday() {
        // Sunday 2025-01-05 starts the week containing Jan 5..11
        let sunday = date(2025, 1, 5);
        assert_eq!(week_start(sunday), sunday);
        assert_eq!(week_start(date(2025, 1, 6)), sunday); // Monday
        assert_eq!(week_start(date(2025, 1, 8)), sunday); // Wednesday
        assert_eq!(week_start(date(2025, 1, 10)), sunday); // Friday
        assert_eq!(week_start(date(2025, 1, 11)), sunday); // Saturday (rest)

        // The next Sunday starts a fresh week
        assert_eq!(week_start(date(2025, 1, 12)), date(2025, 1, 12));
    }

    #[test]
    fn test_week_attribution_boundaries() {
        let start = date(2025, 1, 5);
        // Start day and start + 5 (last working day) share a week
        assert_eq!(week_start(start), week_start(start + Duration::days(5)));
        // Start + 7 belongs to the next week
        assert_ne!(week_start(start), week_start(start + Duration::days(7)));
    }

    #[test]
    fn test_week_start_across_month_and_year_boundary() {
        // Thursday 2025-01-02 belongs to the week starting Sunday 2024-12-29
        assert_eq!(week_start(date(2025, 1, 2)), date(2024, 12, 29));
    }

    #[test]
    fn test_week_end_is_friday_evening() {
        let end = week_end(date(2025, 1, 5));
        assert_eq!(end.date(), date(2025, 1, 10));
        assert_eq!(end.date().weekday(), Weekday::Fri);
        assert_eq!(end.time(), chrono::NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn test_is_locked_monotonic_around_cutoff() {
        let start = date(2025, 1, 5);
        let cutoff = week_end(start);

        assert!(!is_locked(start, cutoff - Duration::seconds(1)));
        assert!(!is_locked(start, start.and_hms_opt(0, 0, 0).unwrap()));
        assert!(is_locked(start, cutoff));
        assert!(is_locked(start, cutoff + Duration::seconds(1)));
        assert!(is_locked(start, cutoff + Duration::days(365)));
    }

    #[test]
    fn test_week_number_deterministic() {
        let start = date(2025, 1, 5);
        assert_eq!(week_number(start), week_number(start));
        // Every date in the week maps through week_start to the same number
        for d in working_dates_in_week(start) {
            assert_eq!(week_number(week_start(d)), week_number(start));
        }
    }

    #[test]
    fn test_week_number_increases_through_year() {
        // 2025-01-05 has ordinal0 4 -> week 1; a week later -> week 2
        assert_eq!(week_number(date(2025, 1, 5)), 1);
        assert_eq!(week_number(date(2025, 1, 12)), 2);
        assert!(week_number(date(2025, 12, 28)) > 50);
    }

    #[test]
    fn test_working_dates_in_week() {
        let dates = working_dates_in_week(date(2025, 1, 5));
        assert_eq!(dates.len(), 6);
        assert_eq!(dates.first().copied(), Some(date(2025, 1, 5)));
        assert_eq!(dates.last().copied(), Some(date(2025, 1, 10)));
        // Saturday never appears
        assert!(dates.iter().all(|d| d.weekday() != Weekday::Sat));
    }

    #[test]
    fn test_is_working_day() {
        assert!(is_working_day(date(2025, 1, 5))); // Sunday
        assert!(is_working_day(date(2025, 1, 10))); // Friday
        assert!(!is_working_day(date(2025, 1, 11))); // Saturday
    }

    #[test]
    fn test_report_ids() {
        assert_eq!(daily_report_id(date(2025, 1, 6)), "daily_2025-01-06");
        assert_eq!(weekly_report_id(date(2025, 1, 5)), "week_2025-01-05");
        assert_eq!(monthly_report_id(2025, 1), "month_2025_1");
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Invalid Month");
    }
}
