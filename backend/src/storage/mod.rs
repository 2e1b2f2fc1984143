//! # Storage Traits
//!
//! Storage abstraction for the canvass tracker. The domain layer works
//! against these traits so the JSON file backend can be swapped for any
//! other whole-value store without touching the aggregation engine.
//!
//! Every write is whole-collection: read the full collection, compute the
//! full replacement, write the full collection. There is no row-level
//! update anywhere, which is what makes the replace step usable as the
//! transaction boundary.

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::models::{AppSettings, DailyReport, MonthlyReport, UserProfile, WeeklyReport};

pub mod json;

pub use json::JsonConnection;

/// Storage for daily reports, the source of truth for all aggregation.
pub trait DailyReportStorage: Send + Sync {
    /// List all daily reports ordered by date ascending.
    fn list_daily_reports(&self) -> Result<Vec<DailyReport>>;

    /// Retrieve the daily report for a specific calendar date.
    fn get_daily_report(&self, date: NaiveDate) -> Result<Option<DailyReport>>;

    /// Insert or overwrite the report for its date (at most one per date).
    fn upsert_daily_report(&self, report: &DailyReport) -> Result<()>;

    /// Replace the entire collection (bulk import).
    fn replace_daily_reports(&self, reports: &[DailyReport]) -> Result<()>;

    /// Remove the entire collection.
    fn clear_daily_reports(&self) -> Result<()>;
}

/// Storage for the derived weekly collection.
pub trait WeeklyReportStorage: Send + Sync {
    /// List all weekly reports in stored order (chronological by start
    /// date).
    fn list_weekly_reports(&self) -> Result<Vec<WeeklyReport>>;

    /// Retrieve a weekly report by its deterministic id.
    fn get_weekly_report(&self, id: &str) -> Result<Option<WeeklyReport>>;

    /// Replace the entire collection; the rebuild pass always writes the
    /// full new set, never patches.
    fn replace_weekly_reports(&self, reports: &[WeeklyReport]) -> Result<()>;

    /// Remove the entire collection.
    fn clear_weekly_reports(&self) -> Result<()>;
}

/// Storage for generated monthly reports.
pub trait MonthlyReportStorage: Send + Sync {
    /// List all monthly reports in stored order.
    fn list_monthly_reports(&self) -> Result<Vec<MonthlyReport>>;

    /// Retrieve a monthly report by its deterministic id.
    fn get_monthly_report(&self, id: &str) -> Result<Option<MonthlyReport>>;

    /// Insert or replace the report with the same id.
    fn upsert_monthly_report(&self, report: &MonthlyReport) -> Result<()>;

    /// Replace the entire collection (bulk import).
    fn replace_monthly_reports(&self, reports: &[MonthlyReport]) -> Result<()>;

    /// Remove the entire collection.
    fn clear_monthly_reports(&self) -> Result<()>;
}

/// Storage for the single user profile record.
pub trait ProfileStorage: Send + Sync {
    fn get_profile(&self) -> Result<Option<UserProfile>>;
    fn save_profile(&self, profile: &UserProfile) -> Result<()>;
}

/// Storage for the single settings record.
pub trait SettingsStorage: Send + Sync {
    /// Load the persisted settings, falling back to defaults when none
    /// have been saved yet.
    fn get_settings(&self) -> Result<AppSettings>;
    fn save_settings(&self, settings: &AppSettings) -> Result<()>;
}

/// Factory trait for storage connections.
///
/// Abstracts the concrete connection type so the domain layer can be
/// constructed over any backend; each test builds services over a fresh
/// connection in a temporary directory.
pub trait Connection: Send + Sync + Clone + 'static {
    type DailyRepository: DailyReportStorage + Clone;
    type WeeklyRepository: WeeklyReportStorage + Clone;
    type MonthlyRepository: MonthlyReportStorage + Clone;
    type ProfileRepository: ProfileStorage + Clone;
    type SettingsRepository: SettingsStorage + Clone;

    fn create_daily_repository(&self) -> Self::DailyRepository;
    fn create_weekly_repository(&self) -> Self::WeeklyRepository;
    fn create_monthly_repository(&self) -> Self::MonthlyRepository;
    fn create_profile_repository(&self) -> Self::ProfileRepository;
    fn create_settings_repository(&self) -> Self::SettingsRepository;
}
