//! JSON-backed user profile repository.

use anyhow::Result;
use log::debug;

use super::connection::{JsonConnection, USER_PROFILE_FILE};
use crate::domain::models::UserProfile;
use crate::storage::ProfileStorage;

/// Persists the single user profile record as one JSON object.
#[derive(Clone)]
pub struct ProfileRepository {
    connection: JsonConnection,
}

impl ProfileRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ProfileStorage for ProfileRepository {
    fn get_profile(&self) -> Result<Option<UserProfile>> {
        self.connection.read_value(USER_PROFILE_FILE)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.connection.write_value(USER_PROFILE_FILE, profile)?;
        debug!("Saved profile for {}", profile.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;

    #[test]
    fn test_profile_round_trip() {
        let env = TestEnvironment::new().unwrap();
        let repo = ProfileRepository::new(env.connection.clone());

        assert!(repo.get_profile().unwrap().is_none());

        let profile = UserProfile::new(
            "Neema Joseph".to_string(),
            "+255700000001".to_string(),
            "University of Arusha".to_string(),
        );
        repo.save_profile(&profile).unwrap();

        let loaded = repo.get_profile().unwrap().unwrap();
        assert_eq!(loaded, profile);
    }
}
