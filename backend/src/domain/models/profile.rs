//! Domain model for the user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The canvasser's profile.
///
/// Name and phone are copied into every generated weekly/monthly report;
/// the aggregation engine reads this record but never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub school: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(name: String, phone: String, school: String) -> Self {
        let now = Utc::now();
        Self {
            id: format!("profile_{}", uuid::Uuid::new_v4()),
            name,
            phone,
            school,
            created_at: now,
            updated_at: now,
        }
    }
}
