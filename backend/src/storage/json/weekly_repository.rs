//! JSON-backed weekly report repository.

use anyhow::Result;
use log::debug;

use super::connection::{JsonConnection, WEEKLY_REPORTS_FILE};
use crate::domain::models::WeeklyReport;
use crate::storage::WeeklyReportStorage;

/// Persists the derived weekly collection as a single JSON array.
///
/// The only write operation is full replacement: the rebuild pass always
/// computes the complete new set.
#[derive(Clone)]
pub struct WeeklyReportRepository {
    connection: JsonConnection,
}

impl WeeklyReportRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl WeeklyReportStorage for WeeklyReportRepository {
    fn list_weekly_reports(&self) -> Result<Vec<WeeklyReport>> {
        self.connection.read_collection(WEEKLY_REPORTS_FILE)
    }

    fn get_weekly_report(&self, id: &str) -> Result<Option<WeeklyReport>> {
        Ok(self
            .list_weekly_reports()?
            .into_iter()
            .find(|r| r.id == id))
    }

    fn replace_weekly_reports(&self, reports: &[WeeklyReport]) -> Result<()> {
        self.connection.write_collection(WEEKLY_REPORTS_FILE, reports)?;
        debug!("Replaced weekly collection ({} reports)", reports.len());
        Ok(())
    }

    fn clear_weekly_reports(&self) -> Result<()> {
        self.connection.remove_value(WEEKLY_REPORTS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::{sample_weekly_report, TestEnvironment};
    use chrono::NaiveDate;

    #[test]
    fn test_replace_and_get_by_id() {
        let env = TestEnvironment::new().unwrap();
        let repo = WeeklyReportRepository::new(env.connection.clone());

        let week = sample_weekly_report(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        repo.replace_weekly_reports(std::slice::from_ref(&week)).unwrap();

        let loaded = repo.get_weekly_report("week_2025-01-05").unwrap();
        assert_eq!(loaded.as_ref().map(|w| w.id.as_str()), Some("week_2025-01-05"));
        assert!(repo.get_weekly_report("week_2030-01-06").unwrap().is_none());
    }

    #[test]
    fn test_replace_overwrites_previous_set() {
        let env = TestEnvironment::new().unwrap();
        let repo = WeeklyReportRepository::new(env.connection.clone());

        let first = sample_weekly_report(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        let second = sample_weekly_report(NaiveDate::from_ymd_opt(2025, 1, 12).unwrap());
        repo.replace_weekly_reports(&[first.clone(), second]).unwrap();
        assert_eq!(repo.list_weekly_reports().unwrap().len(), 2);

        repo.replace_weekly_reports(std::slice::from_ref(&first)).unwrap();
        assert_eq!(repo.list_weekly_reports().unwrap().len(), 1);
    }
}
