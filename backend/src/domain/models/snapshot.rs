//! Export snapshot format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::daily_report::DailyReport;
use super::monthly_report::MonthlyReport;
use super::profile::UserProfile;
use super::settings::AppSettings;
use super::weekly_report::WeeklyReport;

/// Current snapshot format version. Import rejects snapshots whose version
/// marker is missing or newer than this.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A complete serialized snapshot of the store: profile, all three report
/// collections, settings and timestamps.
///
/// `version` and `user_profile` are mandatory on import; a snapshot missing
/// either is rejected before any collection is touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub user_profile: Option<UserProfile>,
    #[serde(default)]
    pub daily_reports: Vec<DailyReport>,
    #[serde(default)]
    pub weekly_reports: Vec<WeeklyReport>,
    #[serde(default)]
    pub monthly_reports: Vec<MonthlyReport>,
    pub settings: Option<AppSettings>,
    pub last_sync: Option<DateTime<Utc>>,
    pub export_date: DateTime<Utc>,
    pub version: Option<u32>,
}
