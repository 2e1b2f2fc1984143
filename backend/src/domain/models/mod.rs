//! Domain models for the canvass tracker backend.

pub mod daily_report;
pub mod monthly_report;
pub mod profile;
pub mod settings;
pub mod snapshot;
pub mod totals;
pub mod weekly_report;

pub use daily_report::{BookSaleLine, DailyReport};
pub use monthly_report::MonthlyReport;
pub use profile::UserProfile;
pub use settings::{AppSettings, AuthMethod, Language, Theme};
pub use snapshot::{ExportSnapshot, SNAPSHOT_VERSION};
pub use totals::ReportTotals;
pub use weekly_report::WeeklyReport;
