//! Connection type for the JSON file store.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::Connection;

/// Current on-disk data format version.
pub const DATA_FORMAT_VERSION: &str = "1.0";

pub const STORE_META_FILE: &str = "store_meta.json";
pub const DAILY_REPORTS_FILE: &str = "daily_reports.json";
pub const WEEKLY_REPORTS_FILE: &str = "weekly_reports.json";
pub const MONTHLY_REPORTS_FILE: &str = "monthly_reports.json";
pub const USER_PROFILE_FILE: &str = "user_profile.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Store metadata: the data-format version marker checked at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for StoreMeta {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// JsonConnection manages the data directory and whole-value JSON reads
/// and writes for every repository.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection over a base directory, creating the directory
    /// and the store metadata on first use and running the migration check.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("creating data directory {:?}", base_path))?;
            info!("Created data directory: {:?}", base_path);
        }

        let connection = Self {
            base_directory: base_path,
        };
        connection.check_data_format()?;
        Ok(connection)
    }

    /// Create a connection in the default data directory
    /// (`<Documents>/Canvass Tracker`, falling back to the home directory).
    pub fn new_default() -> Result<Self> {
        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("could not determine a data directory"))?;
        Self::new(base.join("Canvass Tracker"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Load store metadata, creating it on first use, and invoke the
    /// migration hook when the stored version differs from the current one.
    fn check_data_format(&self) -> Result<()> {
        let meta: StoreMeta = match self.read_value(STORE_META_FILE)? {
            Some(meta) => meta,
            None => {
                let meta = StoreMeta::default();
                self.write_value(STORE_META_FILE, &meta)?;
                info!("Initialized store metadata (format {})", meta.data_format_version);
                meta
            }
        };

        if meta.data_format_version != DATA_FORMAT_VERSION {
            self.migrate(&meta)?;
        }
        Ok(())
    }

    /// Migration hook for future data-format changes. Currently a no-op
    /// that records the version bump.
    fn migrate(&self, meta: &StoreMeta) -> Result<()> {
        warn!(
            "Data format version mismatch (stored {}, current {}); no migration steps defined",
            meta.data_format_version, DATA_FORMAT_VERSION
        );
        let updated = StoreMeta {
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: meta.created_at.clone(),
            updated_at: Utc::now().to_rfc3339(),
        };
        self.write_value(STORE_META_FILE, &updated)
    }

    /// Read a whole collection from a file; a missing file is an empty
    /// collection, not an error.
    pub(crate) fn read_collection<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>> {
        let path = self.file_path(file_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        let collection =
            serde_json::from_str(&content).with_context(|| format!("parsing {:?}", path))?;
        Ok(collection)
    }

    /// Replace a whole collection atomically: serialize to a temp file,
    /// then rename over the target.
    pub(crate) fn write_collection<T: Serialize>(
        &self,
        file_name: &str,
        collection: &[T],
    ) -> Result<()> {
        let content = serde_json::to_string_pretty(collection)?;
        self.write_atomic(file_name, &content)
    }

    /// Read a single JSON value; a missing file yields `None`.
    pub(crate) fn read_value<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>> {
        let path = self.file_path(file_name);
        if !path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        let value =
            serde_json::from_str(&content).with_context(|| format!("parsing {:?}", path))?;
        Ok(Some(value))
    }

    /// Write a single JSON value atomically.
    pub(crate) fn write_value<T: Serialize>(&self, file_name: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        self.write_atomic(file_name, &content)
    }

    /// Remove a stored value; a missing file is not an error.
    pub(crate) fn remove_value(&self, file_name: &str) -> Result<()> {
        let path = self.file_path(file_name);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("removing {:?}", path))?;
        }
        Ok(())
    }

    fn write_atomic(&self, file_name: &str, content: &str) -> Result<()> {
        let path = self.file_path(file_name);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).with_context(|| format!("writing {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("renaming {:?} into place", temp_path))?;
        debug!("Wrote {:?} ({} bytes)", path, content.len());
        Ok(())
    }
}

impl Connection for JsonConnection {
    type DailyRepository = super::daily_repository::DailyReportRepository;
    type WeeklyRepository = super::weekly_repository::WeeklyReportRepository;
    type MonthlyRepository = super::monthly_repository::MonthlyReportRepository;
    type ProfileRepository = super::profile_repository::ProfileRepository;
    type SettingsRepository = super::settings_repository::SettingsRepository;

    fn create_daily_repository(&self) -> Self::DailyRepository {
        super::daily_repository::DailyReportRepository::new(self.clone())
    }

    fn create_weekly_repository(&self) -> Self::WeeklyRepository {
        super::weekly_repository::WeeklyReportRepository::new(self.clone())
    }

    fn create_monthly_repository(&self) -> Self::MonthlyRepository {
        super::monthly_repository::MonthlyReportRepository::new(self.clone())
    }

    fn create_profile_repository(&self) -> Self::ProfileRepository {
        super::profile_repository::ProfileRepository::new(self.clone())
    }

    fn create_settings_repository(&self) -> Self::SettingsRepository {
        super::settings_repository::SettingsRepository::new(self.clone())
    }
}
