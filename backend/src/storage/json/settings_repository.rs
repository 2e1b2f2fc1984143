//! JSON-backed settings repository.

use anyhow::Result;
use log::debug;

use super::connection::{JsonConnection, SETTINGS_FILE};
use crate::domain::models::AppSettings;
use crate::storage::SettingsStorage;

/// Persists the single settings record as one JSON object.
#[derive(Clone)]
pub struct SettingsRepository {
    connection: JsonConnection,
}

impl SettingsRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl SettingsStorage for SettingsRepository {
    fn get_settings(&self) -> Result<AppSettings> {
        Ok(self
            .connection
            .read_value(SETTINGS_FILE)?
            .unwrap_or_default())
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        self.connection.write_value(SETTINGS_FILE, settings)?;
        debug!("Saved settings");
        Ok(())
    }
}
