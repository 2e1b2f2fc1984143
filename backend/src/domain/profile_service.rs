//! Profile and settings service.
//!
//! Owns the two configuration records the aggregation engine consumes:
//! the user profile (whose name and phone are copied into every generated
//! report) and the app settings. The engine itself never writes either,
//! apart from the first-use-date and last-backup bookkeeping done here.

use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{AppSettings, AuthMethod, Language, Theme, UserProfile};
use crate::events::{AppEvent, EventBus};
use crate::storage::{Connection, ProfileStorage, SettingsStorage};

/// Create or update the user profile.
#[derive(Debug, Clone)]
pub struct SaveProfileCommand {
    pub name: String,
    pub phone: String,
    pub school: String,
}

/// Partial settings update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateSettingsCommand {
    pub biometric_enabled: Option<bool>,
    pub auto_lock_weeks: Option<bool>,
    pub reminder_notifications: Option<bool>,
    pub auth_method: Option<AuthMethod>,
    pub theme: Option<Theme>,
    pub language: Option<Language>,
}

/// Service for the profile and settings records.
#[derive(Clone)]
pub struct ProfileService<C: Connection> {
    profile_repository: C::ProfileRepository,
    settings_repository: C::SettingsRepository,
    events: EventBus,
}

impl<C: Connection> ProfileService<C> {
    pub fn new(connection: Arc<C>, events: EventBus) -> Self {
        Self {
            profile_repository: connection.create_profile_repository(),
            settings_repository: connection.create_settings_repository(),
            events,
        }
    }

    pub fn get_profile(&self) -> ReportResult<Option<UserProfile>> {
        self.profile_repository
            .get_profile()
            .map_err(|e| ReportError::storage("load user profile", e))
    }

    /// The missing-precondition guard used by the aggregation engine: an
    /// aggregation must have an owner.
    pub fn require_profile(&self) -> ReportResult<UserProfile> {
        self.get_profile()?.ok_or(ReportError::MissingProfile)
    }

    /// Create the profile, or update it in place keeping id and creation
    /// time. Publishes `ProfileUpdated`.
    pub fn save_profile(&self, command: SaveProfileCommand) -> ReportResult<UserProfile> {
        let profile = match self.get_profile()? {
            Some(existing) => UserProfile {
                name: command.name,
                phone: command.phone,
                school: command.school,
                updated_at: chrono::Utc::now(),
                ..existing
            },
            None => UserProfile::new(command.name, command.phone, command.school),
        };

        self.profile_repository
            .save_profile(&profile)
            .map_err(|e| ReportError::storage("save user profile", e))?;

        info!("Saved profile for {}", profile.name);
        self.events.publish(AppEvent::ProfileUpdated);
        Ok(profile)
    }

    pub fn get_settings(&self) -> ReportResult<AppSettings> {
        self.settings_repository
            .get_settings()
            .map_err(|e| ReportError::storage("load settings", e))
    }

    /// Apply a partial settings update. Publishes `SettingsUpdated`, plus
    /// `AuthUpdated` when the unlock configuration changed.
    pub fn update_settings(&self, command: UpdateSettingsCommand) -> ReportResult<AppSettings> {
        let mut settings = self.get_settings()?;
        let previous_auth = (settings.auth_method, settings.biometric_enabled);

        if let Some(v) = command.biometric_enabled {
            settings.biometric_enabled = v;
        }
        if let Some(v) = command.auto_lock_weeks {
            settings.auto_lock_weeks = v;
        }
        if let Some(v) = command.reminder_notifications {
            settings.reminder_notifications = v;
        }
        if let Some(v) = command.auth_method {
            settings.auth_method = v;
        }
        if let Some(v) = command.theme {
            settings.theme = v;
        }
        if let Some(v) = command.language {
            settings.language = v;
        }

        self.save_settings(&settings)?;
        self.events.publish(AppEvent::SettingsUpdated);
        if (settings.auth_method, settings.biometric_enabled) != previous_auth {
            self.events.publish(AppEvent::AuthUpdated);
        }
        Ok(settings)
    }

    /// Record the first date the tracker was used. Set once; later calls
    /// are no-ops. Anchors the missing-report scan.
    pub fn mark_first_use(&self, date: NaiveDate) -> ReportResult<()> {
        let mut settings = self.get_settings()?;
        if settings.first_use_date.is_some() {
            return Ok(());
        }
        settings.first_use_date = Some(date);
        self.save_settings(&settings)?;
        info!("Recorded first use date: {}", date);
        Ok(())
    }

    /// Record a successful backup (export or import) date.
    pub fn record_backup(&self, date: NaiveDate) -> ReportResult<()> {
        let mut settings = self.get_settings()?;
        settings.last_backup = Some(date);
        self.save_settings(&settings)?;
        self.events.publish(AppEvent::SettingsUpdated);
        Ok(())
    }

    /// Overwrite the profile record verbatim (import path), keeping the
    /// snapshot's id and timestamps. Publishes `ProfileUpdated`.
    pub(crate) fn restore_profile(&self, profile: &UserProfile) -> ReportResult<()> {
        self.profile_repository
            .save_profile(profile)
            .map_err(|e| ReportError::storage("restore user profile", e))?;
        self.events.publish(AppEvent::ProfileUpdated);
        Ok(())
    }

    /// Overwrite the settings record verbatim (import path).
    pub(crate) fn restore_settings(&self, settings: &AppSettings) -> ReportResult<()> {
        self.save_settings(settings)?;
        self.events.publish(AppEvent::SettingsUpdated);
        Ok(())
    }

    fn save_settings(&self, settings: &AppSettings) -> ReportResult<()> {
        self.settings_repository
            .save_settings(settings)
            .map_err(|e| ReportError::storage("save settings", e))
    }
}
