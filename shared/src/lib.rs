//! Shared DTO types for the canvass tracker.
//!
//! These are the plain data types exchanged between the backend engine and
//! presentation layers (forms, lists, dashboards). They carry no business
//! logic: every numeric aggregate a UI renders is sourced from the backend's
//! weekly/monthly summaries, never computed on the presentation side.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One book sale entry on a daily report form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSaleLineDto {
    pub title: String,
    /// Unit price in the local currency
    pub unit_price: f64,
    pub quantity: u32,
}

/// Request to create or overwrite the daily report for one calendar date.
///
/// All counters default to zero when absent. When `book_sales` is non-empty
/// the backend derives `books_sold` and `amount` from the lines and ignores
/// the explicit values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDailyReportRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub books_sold: u32,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub free_literature: u32,
    #[serde(default)]
    pub contacts: u32,
    #[serde(default)]
    pub home_visits: u32,
    #[serde(default)]
    pub bible_studies: u32,
    #[serde(default)]
    pub prayers_offered: u32,
    #[serde(default)]
    pub baptisms: u32,
    #[serde(default)]
    pub church_attendance: u32,
    #[serde(default)]
    pub book_sales: Vec<BookSaleLineDto>,
}

/// A daily report as rendered in lists and the weekly detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub id: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub books_sold: u32,
    pub amount: f64,
    pub free_literature: u32,
    pub contacts: u32,
    pub home_visits: u32,
    pub bible_studies: u32,
    pub prayers_offered: u32,
    pub baptisms: u32,
    pub church_attendance: u32,
    pub book_sales: Vec<BookSaleLineDto>,
}

/// A weekly report summary for dashboards and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub id: String,
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub canvasser_name: String,
    pub canvasser_phone: String,
    pub total_hours: f64,
    pub total_books_sold: u32,
    pub total_amount: f64,
    pub total_free_literature: u32,
    pub total_contacts: u32,
    pub total_home_visits: u32,
    pub total_bible_studies: u32,
    pub total_prayers_offered: u32,
    pub total_baptisms: u32,
    pub total_church_attendance: u32,
    /// True once the week's end-of-day cutoff has passed
    pub locked: bool,
    pub daily_reports: Vec<DailySummary>,
}

/// Request to generate (or regenerate) the monthly report for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateMonthlyRequest {
    /// 1-based month
    pub month: u32,
    pub year: i32,
}

/// A monthly report summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub id: String,
    /// 1-based month
    pub month: u32,
    pub year: i32,
    /// Human-readable month name ("January", ...)
    pub month_name: String,
    pub canvasser_name: String,
    pub canvasser_phone: String,
    pub total_hours: f64,
    pub total_books_sold: u32,
    pub total_amount: f64,
    pub total_free_literature: u32,
    pub total_contacts: u32,
    pub total_home_visits: u32,
    pub total_bible_studies: u32,
    pub total_prayers_offered: u32,
    pub total_baptisms: u32,
    pub total_church_attendance: u32,
    pub weekly_reports: Vec<WeeklySummary>,
}

/// Working dates since first use that have no daily report yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingReportsResponse {
    pub dates: Vec<NaiveDate>,
}

/// Request to create or update the user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveProfileRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub school: String,
}

/// How the user unlocks the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethodDto {
    Password,
    Pin,
    Pattern,
    Biometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeDto {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageDto {
    Sw,
    En,
}

/// Partial settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub biometric_enabled: Option<bool>,
    pub auto_lock_weeks: Option<bool>,
    pub reminder_notifications: Option<bool>,
    pub auth_method: Option<AuthMethodDto>,
    pub theme: Option<ThemeDto>,
    pub language: Option<LanguageDto>,
}

/// Request to export a full data snapshot to a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Custom destination directory; the Documents folder is used when absent
    pub custom_path: Option<String>,
}

/// Result of an export-to-path operation.
///
/// File-system problems surface here as `success = false` with a message,
/// not as an error, so the UI can show the outcome directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub daily_report_count: usize,
    pub canvasser_name: String,
}

/// Current-date information for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeekInfo {
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// The cutoff instant after which the week locks
    pub locks_at: NaiveDateTime,
    pub locked: bool,
}
