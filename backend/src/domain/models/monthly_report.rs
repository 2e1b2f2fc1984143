//! Domain model for a monthly report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::totals::ReportTotals;
use super::weekly_report::WeeklyReport;

/// Aggregate of the weekly reports whose start date falls in one month.
///
/// Generated on explicit request, not automatically, and replaced outright
/// when regenerated for the same month/year. A week spanning a month
/// boundary is attributed to the month containing its start date only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Deterministic id: `month_<year>_<month>` (1-based month)
    pub id: String,
    pub month: u32,
    pub year: i32,
    pub canvasser_name: String,
    pub canvasser_phone: String,
    #[serde(flatten)]
    pub totals: ReportTotals,
    /// Constituent weekly reports, ordered by week number ascending
    pub weekly_reports: Vec<WeeklyReport>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
