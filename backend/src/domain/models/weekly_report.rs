//! Domain model for a weekly report.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::daily_report::DailyReport;
use super::totals::ReportTotals;

/// Aggregate of daily reports for one 6-day working week.
///
/// Entirely derived state: the rebuild pass destroys and regenerates the
/// whole weekly collection from the daily store whenever any daily report
/// changes, so the totals are always exactly a function of current daily
/// data. Only `created_at` survives a rebuild (first-seen creation time
/// for the same id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// Deterministic id: `week_<start:YYYY-MM-DD>`
    pub id: String,
    /// Calendar-derived week number, never a persisted counter
    pub week_number: u32,
    pub start_date: NaiveDate,
    /// Last working day of the week (start + 5 days)
    pub end_date: NaiveDate,
    pub canvasser_name: String,
    pub canvasser_phone: String,
    #[serde(flatten)]
    pub totals: ReportTotals,
    /// Constituent daily reports, ordered by date ascending
    pub daily_reports: Vec<DailyReport>,
    /// True once the week's cutoff instant has passed; a pure function of
    /// current time vs the cutoff, never independently mutable
    pub locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
