//! # Canvass Tracker Backend
//!
//! Report aggregation engine for a student canvassing tracker. Daily
//! field reports are the source of truth; weekly reports are derived from
//! them by full rebuild, and monthly reports are generated on demand from
//! the weeklies. All operations are synchronous over a local JSON store.
//!
//! `Backend` wires the services over one storage connection and exposes a
//! facade in terms of the `shared` crate's DTO types, which is the surface
//! presentation layers are expected to use.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod events;
pub mod storage;

pub use events::{AppEvent, EventBus, Subscription};
pub use storage::JsonConnection;

use domain::mappers::ReportMapper;
use domain::models::{AppSettings, ExportSnapshot};
use domain::{ExportService, ProfileService, ReportResult, ReportService};
use shared::{
    CurrentWeekInfo, DailySummary, ExportToPathRequest, ExportToPathResponse,
    GenerateMonthlyRequest, MissingReportsResponse, MonthlySummary, SaveDailyReportRequest,
    SaveProfileRequest, UpdateSettingsRequest, WeeklySummary,
};

/// Main backend struct that orchestrates all services.
pub struct Backend {
    pub profile_service: ProfileService<JsonConnection>,
    pub report_service: ReportService<JsonConnection>,
    pub export_service: ExportService<JsonConnection>,
    pub events: EventBus,
}

impl Backend {
    /// Create a backend over a JSON store rooted at `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(data_dir)?);
        Ok(Self::with_connection(connection))
    }

    /// Create a backend over the platform default data directory.
    pub fn new_default() -> Result<Self> {
        let connection = Arc::new(JsonConnection::new_default()?);
        Ok(Self::with_connection(connection))
    }

    fn with_connection(connection: Arc<JsonConnection>) -> Self {
        let events = EventBus::new();
        let profile_service = ProfileService::new(connection.clone(), events.clone());
        let report_service =
            ReportService::new(connection, profile_service.clone(), events.clone());
        let export_service = ExportService::new(profile_service.clone(), report_service.clone());
        Backend {
            profile_service,
            report_service,
            export_service,
            events,
        }
    }

    // ---- daily reports ----

    pub fn save_daily_report(&self, request: SaveDailyReportRequest) -> ReportResult<DailySummary> {
        let report = self
            .report_service
            .save_daily_report(ReportMapper::to_save_daily_command(request))?;
        Ok(ReportMapper::to_daily_dto(&report))
    }

    pub fn get_daily_report(&self, date: NaiveDate) -> ReportResult<Option<DailySummary>> {
        Ok(self
            .report_service
            .get_daily_report(date)?
            .map(|r| ReportMapper::to_daily_dto(&r)))
    }

    pub fn list_daily_reports(&self) -> ReportResult<Vec<DailySummary>> {
        Ok(self
            .report_service
            .list_daily_reports()?
            .iter()
            .map(ReportMapper::to_daily_dto)
            .collect())
    }

    // ---- weekly reports ----

    pub fn list_weekly_reports(&self) -> ReportResult<Vec<WeeklySummary>> {
        Ok(self
            .report_service
            .list_weekly_reports()?
            .iter()
            .map(ReportMapper::to_weekly_dto)
            .collect())
    }

    pub fn get_weekly_report(&self, id: &str) -> ReportResult<Option<WeeklySummary>> {
        Ok(self
            .report_service
            .get_weekly_report(id)?
            .map(|r| ReportMapper::to_weekly_dto(&r)))
    }

    pub fn current_week_report(&self) -> ReportResult<Option<WeeklySummary>> {
        Ok(self
            .report_service
            .current_week_report()?
            .map(|r| ReportMapper::to_weekly_dto(&r)))
    }

    /// Calendar facts about the week containing today, for the dashboard
    /// header. Derived from the clock alone, present even before any
    /// report exists.
    pub fn current_week_info(&self) -> CurrentWeekInfo {
        let now = Local::now().naive_local();
        let start_date = domain::calendar::week_start(now.date());
        let locks_at = domain::calendar::week_end(start_date);
        CurrentWeekInfo {
            week_number: domain::calendar::week_number(start_date),
            start_date,
            end_date: locks_at.date(),
            locked: domain::calendar::is_locked(start_date, now),
            locks_at,
        }
    }

    // ---- monthly reports ----

    pub fn generate_monthly_report(
        &self,
        request: GenerateMonthlyRequest,
    ) -> ReportResult<MonthlySummary> {
        let report = self
            .report_service
            .generate_monthly_report(request.month, request.year)?;
        Ok(ReportMapper::to_monthly_dto(&report))
    }

    pub fn list_monthly_reports(&self) -> ReportResult<Vec<MonthlySummary>> {
        Ok(self
            .report_service
            .list_monthly_reports()?
            .iter()
            .map(ReportMapper::to_monthly_dto)
            .collect())
    }

    // ---- profile, settings, maintenance ----

    pub fn save_profile(&self, request: SaveProfileRequest) -> ReportResult<()> {
        self.profile_service
            .save_profile(ReportMapper::to_save_profile_command(request))?;
        Ok(())
    }

    pub fn update_settings(&self, request: UpdateSettingsRequest) -> ReportResult<AppSettings> {
        self.profile_service
            .update_settings(ReportMapper::to_update_settings_command(request))
    }

    pub fn missing_report_dates(&self) -> ReportResult<MissingReportsResponse> {
        Ok(MissingReportsResponse {
            dates: self.report_service.missing_report_dates()?,
        })
    }

    pub fn clear_all_reports(&self) -> ReportResult<()> {
        self.report_service.clear_all_reports()
    }

    // ---- backup ----

    pub fn export_all(&self) -> ReportResult<ExportSnapshot> {
        self.export_service.export_all()
    }

    pub fn export_to_path(&self, request: ExportToPathRequest) -> ReportResult<ExportToPathResponse> {
        self.export_service.export_to_path(request)
    }

    pub fn import_all(&self, snapshot: ExportSnapshot) -> ReportResult<usize> {
        self.export_service.import_all(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_backend() -> (Backend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = Backend::new(temp_dir.path()).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn test_facade_save_and_list_through_dtos() {
        let (backend, _dir) = create_backend();
        backend
            .save_profile(SaveProfileRequest {
                name: "Neema Joseph".to_string(),
                phone: "+255700000001".to_string(),
                school: "University of Arusha".to_string(),
            })
            .unwrap();

        let saved = backend
            .save_daily_report(SaveDailyReportRequest {
                date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                hours: 8.0,
                books_sold: 0,
                amount: 0.0,
                free_literature: 1,
                contacts: 2,
                home_visits: 0,
                bible_studies: 0,
                prayers_offered: 0,
                baptisms: 0,
                church_attendance: 0,
                book_sales: Vec::new(),
            })
            .unwrap();
        assert_eq!(saved.id, "daily_2025-01-06");

        let weeklies = backend.list_weekly_reports().unwrap();
        assert_eq!(weeklies.len(), 1);
        assert_eq!(weeklies[0].total_hours, 8.0);
        assert_eq!(weeklies[0].canvasser_name, "Neema Joseph");

        let monthly = backend
            .generate_monthly_report(GenerateMonthlyRequest {
                month: 1,
                year: 2025,
            })
            .unwrap();
        assert_eq!(monthly.month_name, "January");
        assert_eq!(monthly.total_hours, 8.0);
    }

    #[test]
    fn test_current_week_info_shape() {
        let (backend, _dir) = create_backend();
        let info = backend.current_week_info();

        assert!(info.week_number >= 1);
        assert_eq!(
            info.end_date,
            info.start_date + chrono::Duration::days(5)
        );
        assert_eq!(info.locks_at.date(), info.end_date);
        use chrono::Timelike;
        assert_eq!(info.locks_at.hour(), 18);
    }

    #[test]
    fn test_backend_reopens_existing_store() {
        let temp_dir = TempDir::new().unwrap();
        {
            let backend = Backend::new(temp_dir.path()).unwrap();
            backend
                .save_profile(SaveProfileRequest {
                    name: "Neema".to_string(),
                    phone: "+255".to_string(),
                    school: String::new(),
                })
                .unwrap();
        }

        let reopened = Backend::new(temp_dir.path()).unwrap();
        let profile = reopened.profile_service.get_profile().unwrap().unwrap();
        assert_eq!(profile.name, "Neema");
    }
}
