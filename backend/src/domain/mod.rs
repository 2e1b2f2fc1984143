//! Domain layer: calendar rules, aggregation, profile/settings and backup.

pub mod calendar;
pub mod errors;
pub mod mappers;
pub mod models;

pub mod export_service;
pub mod profile_service;
pub mod report_service;

pub use errors::{ReportError, ReportResult};
pub use export_service::ExportService;
pub use profile_service::{ProfileService, SaveProfileCommand, UpdateSettingsCommand};
pub use report_service::{ReportService, SaveDailyReportCommand};
