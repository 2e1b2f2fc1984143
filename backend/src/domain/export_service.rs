//! Snapshot export and import.
//!
//! The whole store serializes to one JSON document: profile, the three
//! report collections, settings and a version marker. Export is a pure
//! read; import validates the snapshot up front, then overwrites the
//! store and rebuilds the weekly collection from the imported dailies so
//! derived data is regenerated rather than trusted.

use chrono::{Local, Utc};
use log::{error, info, warn};
use std::fs;
use std::path::PathBuf;

use shared::{ExportToPathRequest, ExportToPathResponse};

use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{ExportSnapshot, SNAPSHOT_VERSION};
use crate::domain::profile_service::ProfileService;
use crate::domain::report_service::ReportService;
use crate::storage::Connection;

/// Service for full-store backup and restore.
#[derive(Clone)]
pub struct ExportService<C: Connection> {
    profile_service: ProfileService<C>,
    report_service: ReportService<C>,
}

impl<C: Connection> ExportService<C> {
    pub fn new(profile_service: ProfileService<C>, report_service: ReportService<C>) -> Self {
        Self {
            profile_service,
            report_service,
        }
    }

    /// Assemble a snapshot of the entire store. Requires a profile; an
    /// empty store has nothing worth backing up.
    pub fn export_all(&self) -> ReportResult<ExportSnapshot> {
        let profile = self.profile_service.require_profile()?;
        let settings = self.profile_service.get_settings()?;

        let snapshot = ExportSnapshot {
            user_profile: Some(profile),
            daily_reports: self.report_service.list_daily_reports()?,
            weekly_reports: self.report_service.list_weekly_reports()?,
            monthly_reports: self.report_service.list_monthly_reports()?,
            settings: Some(settings),
            last_sync: None,
            export_date: Utc::now(),
            version: Some(SNAPSHOT_VERSION),
        };

        info!(
            "📄 EXPORT: Assembled snapshot with {} daily reports",
            snapshot.daily_reports.len()
        );
        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON to a file in the requested
    /// directory, defaulting to the Documents folder.
    ///
    /// File-system problems are reported in the response rather than as
    /// errors, so the UI can show the outcome directly. A missing profile
    /// is still an error: there was nothing to export.
    pub fn export_to_path(&self, request: ExportToPathRequest) -> ReportResult<ExportToPathResponse> {
        info!("📁 EXPORT: Exporting to path - custom_path: {:?}", request.custom_path);

        let snapshot = self.export_all()?;
        let canvasser_name = snapshot
            .user_profile
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default();

        let export_dir = match request.custom_path {
            Some(custom_path) if !custom_path.trim().is_empty() => {
                PathBuf::from(sanitize_path(&custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("❌ EXPORT: Could not determine default export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        daily_report_count: 0,
                        canvasser_name: String::new(),
                    });
                }
            },
        };

        let filename = format!(
            "{}_canvass_reports_{}.json",
            canvasser_name.replace(' ', "_").to_lowercase(),
            Utc::now().format("%Y%m%d")
        );
        let file_path = export_dir.join(filename);

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("❌ EXPORT: Failed to create export directory {:?}: {}", export_dir, e);
            return Ok(ExportToPathResponse {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
                daily_report_count: 0,
                canvasser_name: String::new(),
            });
        }

        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ReportError::storage("serialize export snapshot", e.into()))?;

        match fs::write(&file_path, json) {
            Ok(()) => {
                let file_path_str = file_path.to_string_lossy().to_string();
                info!(
                    "✅ EXPORT: Wrote {} daily reports for {} to: {}",
                    snapshot.daily_reports.len(),
                    canvasser_name,
                    file_path_str
                );
                if let Err(e) = self.profile_service.record_backup(Local::now().date_naive()) {
                    warn!("Export succeeded but backup date was not recorded: {}", e);
                }
                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("File exported successfully to: {}", file_path_str),
                    file_path: file_path_str,
                    daily_report_count: snapshot.daily_reports.len(),
                    canvasser_name,
                })
            }
            Err(e) => {
                error!("❌ EXPORT: Failed to write export file to {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                    daily_report_count: 0,
                    canvasser_name: String::new(),
                })
            }
        }
    }

    /// Replace the entire store with a snapshot's contents.
    ///
    /// Validation happens before any write: a snapshot without a version
    /// marker, with a version newer than this build understands, or
    /// without a profile is rejected while the store is still intact. The
    /// snapshot's weekly collection is ignored; weeklies are rebuilt from
    /// the imported dailies, and here the rebuild is mandatory.
    pub fn import_all(&self, snapshot: ExportSnapshot) -> ReportResult<usize> {
        match snapshot.version {
            None => {
                return Err(ReportError::InvalidSnapshot(
                    "missing version marker".to_string(),
                ))
            }
            Some(v) if v > SNAPSHOT_VERSION => {
                return Err(ReportError::InvalidSnapshot(format!(
                    "unsupported version {} (newest supported is {})",
                    v, SNAPSHOT_VERSION
                )))
            }
            Some(_) => {}
        }
        let profile = snapshot
            .user_profile
            .ok_or_else(|| ReportError::InvalidSnapshot("missing user profile".to_string()))?;

        info!(
            "📥 IMPORT: Restoring snapshot for {} ({} daily reports)",
            profile.name,
            snapshot.daily_reports.len()
        );

        self.profile_service.restore_profile(&profile)?;
        if let Some(settings) = snapshot.settings {
            self.profile_service.restore_settings(&settings)?;
        }

        let daily_count = snapshot.daily_reports.len();
        self.report_service
            .restore_collections(&snapshot.daily_reports, &snapshot.monthly_reports)?;

        if let Err(e) = self.profile_service.record_backup(Local::now().date_naive()) {
            warn!("Import succeeded but backup date was not recorded: {}", e);
        }

        info!("✅ IMPORT: Restored {} daily reports", daily_count);
        Ok(daily_count)
    }
}

/// Basic path sanitization to handle common user input issues.
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    // Remove surrounding quotes (single or double)
    if (cleaned.starts_with('"') && cleaned.ends_with('"'))
        || (cleaned.starts_with('\'') && cleaned.ends_with('\''))
    {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }
    cleaned = cleaned.trim().to_string();

    // Handle escaped spaces (common on some systems)
    cleaned = cleaned.replace("\\ ", " ");

    while cleaned.ends_with('/') || cleaned.ends_with('\\') {
        cleaned.pop();
    }

    // Tilde expansion for the home directory
    if cleaned.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            if cleaned == "~" {
                cleaned = home.to_string_lossy().to_string();
            } else if cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
                cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
            }
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile_service::SaveProfileCommand;
    use crate::domain::report_service::SaveDailyReportCommand;
    use crate::events::EventBus;
    use crate::storage::json::test_utils::TestEnvironment;
    use crate::storage::JsonConnection;
    use chrono::NaiveDate;
    use std::sync::Arc;

    struct TestBackend {
        export_service: ExportService<JsonConnection>,
        report_service: ReportService<JsonConnection>,
        profile_service: ProfileService<JsonConnection>,
        _env: TestEnvironment,
    }

    fn create_test_backend() -> TestBackend {
        let env = TestEnvironment::new().unwrap();
        let events = EventBus::new();
        let connection = Arc::new(env.connection.clone());
        let profile_service = ProfileService::new(connection.clone(), events.clone());
        let report_service =
            ReportService::new(connection, profile_service.clone(), events.clone());
        let export_service =
            ExportService::new(profile_service.clone(), report_service.clone());
        TestBackend {
            export_service,
            report_service,
            profile_service,
            _env: env,
        }
    }

    fn create_populated_backend() -> TestBackend {
        let backend = create_test_backend();
        backend
            .profile_service
            .save_profile(SaveProfileCommand {
                name: "Neema Joseph".to_string(),
                phone: "+255700000001".to_string(),
                school: "University of Arusha".to_string(),
            })
            .unwrap();
        for (d, hours) in [(6, 8.0), (7, 4.0), (14, 6.0)] {
            backend
                .report_service
                .save_daily_report(SaveDailyReportCommand {
                    date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
                    hours,
                    ..Default::default()
                })
                .unwrap();
        }
        backend
            .report_service
            .generate_monthly_report(1, 2025)
            .unwrap();
        backend
    }

    #[test]
    fn test_export_all_requires_profile() {
        let backend = create_test_backend();
        assert!(matches!(
            backend.export_service.export_all(),
            Err(ReportError::MissingProfile)
        ));
    }

    #[test]
    fn test_export_import_round_trip() {
        let source = create_populated_backend();
        let snapshot = source.export_service.export_all().unwrap();
        assert_eq!(snapshot.version, Some(SNAPSHOT_VERSION));
        assert_eq!(snapshot.daily_reports.len(), 3);
        assert_eq!(snapshot.monthly_reports.len(), 1);

        let target = create_test_backend();
        let imported = target.export_service.import_all(snapshot).unwrap();
        assert_eq!(imported, 3);

        assert_eq!(
            target.report_service.list_daily_reports().unwrap(),
            source.report_service.list_daily_reports().unwrap()
        );
        let weeklies = target.report_service.list_weekly_reports().unwrap();
        assert_eq!(weeklies.len(), 2);
        assert_eq!(weeklies[0].totals.total_hours, 12.0);
        assert_eq!(
            target.profile_service.require_profile().unwrap().name,
            "Neema Joseph"
        );
        assert_eq!(
            target.report_service.list_monthly_reports().unwrap().len(),
            1
        );
    }

    #[test]
    fn test_import_rejects_missing_version_without_mutation() {
        let source = create_populated_backend();
        let mut snapshot = source.export_service.export_all().unwrap();
        snapshot.version = None;

        let target = create_test_backend();
        assert!(matches!(
            target.export_service.import_all(snapshot),
            Err(ReportError::InvalidSnapshot(_))
        ));
        assert!(target.report_service.list_daily_reports().unwrap().is_empty());
        assert!(target.profile_service.get_profile().unwrap().is_none());
    }

    #[test]
    fn test_import_rejects_newer_version() {
        let source = create_populated_backend();
        let mut snapshot = source.export_service.export_all().unwrap();
        snapshot.version = Some(SNAPSHOT_VERSION + 1);

        let target = create_test_backend();
        assert!(matches!(
            target.export_service.import_all(snapshot),
            Err(ReportError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_import_rejects_missing_profile_without_mutation() {
        let source = create_populated_backend();
        let mut snapshot = source.export_service.export_all().unwrap();
        snapshot.user_profile = None;

        let target = create_test_backend();
        assert!(matches!(
            target.export_service.import_all(snapshot),
            Err(ReportError::InvalidSnapshot(_))
        ));
        assert!(target.report_service.list_daily_reports().unwrap().is_empty());
    }

    #[test]
    fn test_export_to_path_writes_parseable_snapshot() {
        let backend = create_populated_backend();
        let dir = tempfile::TempDir::new().unwrap();

        let response = backend
            .export_service
            .export_to_path(ExportToPathRequest {
                custom_path: Some(dir.path().to_string_lossy().to_string()),
            })
            .unwrap();

        assert!(response.success);
        assert_eq!(response.daily_report_count, 3);
        assert_eq!(response.canvasser_name, "Neema Joseph");
        assert!(response.file_path.ends_with(".json"));
        assert!(response.file_path.contains("neema_joseph_canvass_reports_"));

        let contents = fs::read_to_string(&response.file_path).unwrap();
        let parsed: ExportSnapshot = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.daily_reports.len(), 3);
        assert_eq!(parsed.version, Some(SNAPSHOT_VERSION));

        // A successful export records the backup date
        let settings = backend.profile_service.get_settings().unwrap();
        assert!(settings.last_backup.is_some());
    }

    #[test]
    fn test_sanitize_path() {
        let home_dir = dirs::home_dir().unwrap().to_string_lossy().to_string();
        let expected_documents = PathBuf::from(&home_dir)
            .join("Documents")
            .to_string_lossy()
            .to_string();

        assert_eq!(sanitize_path("\"~/Documents\""), expected_documents);
        assert_eq!(sanitize_path("'~/Documents'"), expected_documents);
        assert_eq!(sanitize_path("  /path/to/dir  "), "/path/to/dir");
        assert_eq!(sanitize_path("/path\\ to\\ dir"), "/path to dir");
        assert_eq!(sanitize_path("/path/to/dir/"), "/path/to/dir");
    }
}
