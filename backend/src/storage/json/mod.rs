//! # JSON Storage Module
//!
//! File-based storage for the canvass tracker: one JSON-serialized value
//! per key, matching the opaque key/value layout the app persists.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── store_meta.json       ← data-format version marker
//! ├── daily_reports.json    ← single array, one entry per distinct date
//! ├── weekly_reports.json   ← single array, ids `week_<YYYY-MM-DD>`
//! ├── monthly_reports.json  ← single array, ids `month_<year>_<month>`
//! ├── user_profile.json     ← single object
//! └── settings.json         ← single object
//! ```
//!
//! ## Features
//!
//! - Whole-value reads and writes only (no partial updates)
//! - Atomic writes with temp files then rename
//! - Data format versioning with a migration hook checked at startup

pub mod connection;
pub mod daily_repository;
pub mod monthly_repository;
pub mod profile_repository;
pub mod settings_repository;
pub mod weekly_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::{JsonConnection, StoreMeta};
pub use daily_repository::DailyReportRepository;
pub use monthly_repository::MonthlyReportRepository;
pub use profile_repository::ProfileRepository;
pub use settings_repository::SettingsRepository;
pub use weekly_repository::WeeklyReportRepository;
