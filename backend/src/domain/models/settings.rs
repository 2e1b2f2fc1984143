//! Domain model for persisted application settings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Password,
    Pin,
    Pattern,
    Biometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Sw,
    En,
}

/// Persisted configuration consumed by the engine but not derived from it.
///
/// `first_use_date` anchors the missing-report scan; `last_backup` records
/// the most recent successful export or import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub biometric_enabled: bool,
    pub auto_lock_weeks: bool,
    pub reminder_notifications: bool,
    pub last_backup: Option<NaiveDate>,
    pub auth_method: AuthMethod,
    pub theme: Theme,
    pub language: Language,
    pub first_use_date: Option<NaiveDate>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            biometric_enabled: false,
            auto_lock_weeks: true,
            reminder_notifications: false,
            last_backup: None,
            auth_method: AuthMethod::Password,
            theme: Theme::Light,
            language: Language::Sw,
            first_use_date: None,
        }
    }
}
