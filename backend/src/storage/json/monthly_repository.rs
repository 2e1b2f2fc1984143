//! JSON-backed monthly report repository.

use anyhow::Result;
use log::debug;

use super::connection::{JsonConnection, MONTHLY_REPORTS_FILE};
use crate::domain::models::MonthlyReport;
use crate::storage::MonthlyReportStorage;

/// Persists generated monthly reports as a single JSON array.
#[derive(Clone)]
pub struct MonthlyReportRepository {
    connection: JsonConnection,
}

impl MonthlyReportRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn load(&self) -> Result<Vec<MonthlyReport>> {
        let mut reports: Vec<MonthlyReport> =
            self.connection.read_collection(MONTHLY_REPORTS_FILE)?;
        reports.sort_by_key(|r| (r.year, r.month));
        Ok(reports)
    }
}

impl MonthlyReportStorage for MonthlyReportRepository {
    fn list_monthly_reports(&self) -> Result<Vec<MonthlyReport>> {
        self.load()
    }

    fn get_monthly_report(&self, id: &str) -> Result<Option<MonthlyReport>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    fn upsert_monthly_report(&self, report: &MonthlyReport) -> Result<()> {
        let mut reports = self.load()?;
        // Regeneration replaces, never merges
        reports.retain(|r| r.id != report.id);
        reports.push(report.clone());
        reports.sort_by_key(|r| (r.year, r.month));
        self.connection.write_collection(MONTHLY_REPORTS_FILE, &reports)?;
        debug!("Upserted monthly report {} ({} total)", report.id, reports.len());
        Ok(())
    }

    fn replace_monthly_reports(&self, reports: &[MonthlyReport]) -> Result<()> {
        let mut sorted = reports.to_vec();
        sorted.sort_by_key(|r| (r.year, r.month));
        self.connection.write_collection(MONTHLY_REPORTS_FILE, &sorted)
    }

    fn clear_monthly_reports(&self) -> Result<()> {
        self.connection.remove_value(MONTHLY_REPORTS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::{sample_monthly_report, TestEnvironment};

    #[test]
    fn test_upsert_replaces_same_month() {
        let env = TestEnvironment::new().unwrap();
        let repo = MonthlyReportRepository::new(env.connection.clone());

        let mut report = sample_monthly_report(2025, 1);
        repo.upsert_monthly_report(&report).unwrap();

        report.totals.total_hours = 42.0;
        repo.upsert_monthly_report(&report).unwrap();

        let reports = repo.list_monthly_reports().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].totals.total_hours, 42.0);
    }

    #[test]
    fn test_list_sorted_by_year_then_month() {
        let env = TestEnvironment::new().unwrap();
        let repo = MonthlyReportRepository::new(env.connection.clone());

        repo.upsert_monthly_report(&sample_monthly_report(2025, 2)).unwrap();
        repo.upsert_monthly_report(&sample_monthly_report(2024, 12)).unwrap();
        repo.upsert_monthly_report(&sample_monthly_report(2025, 1)).unwrap();

        let keys: Vec<(i32, u32)> = repo
            .list_monthly_reports()
            .unwrap()
            .iter()
            .map(|r| (r.year, r.month))
            .collect();
        assert_eq!(keys, vec![(2024, 12), (2025, 1), (2025, 2)]);
    }
}
