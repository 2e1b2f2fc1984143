//! JSON-backed daily report repository.

use anyhow::Result;
use chrono::NaiveDate;
use log::debug;

use super::connection::{JsonConnection, DAILY_REPORTS_FILE};
use crate::domain::models::DailyReport;
use crate::storage::DailyReportStorage;

/// Persists the daily report collection as a single JSON array, one entry
/// per distinct calendar date.
#[derive(Clone)]
pub struct DailyReportRepository {
    connection: JsonConnection,
}

impl DailyReportRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn load(&self) -> Result<Vec<DailyReport>> {
        let mut reports: Vec<DailyReport> =
            self.connection.read_collection(DAILY_REPORTS_FILE)?;
        reports.sort_by_key(|r| r.date);
        Ok(reports)
    }
}

impl DailyReportStorage for DailyReportRepository {
    fn list_daily_reports(&self) -> Result<Vec<DailyReport>> {
        self.load()
    }

    fn get_daily_report(&self, date: NaiveDate) -> Result<Option<DailyReport>> {
        Ok(self.load()?.into_iter().find(|r| r.date == date))
    }

    fn upsert_daily_report(&self, report: &DailyReport) -> Result<()> {
        let mut reports = self.load()?;
        // At most one report per distinct date
        reports.retain(|r| r.date != report.date);
        reports.push(report.clone());
        reports.sort_by_key(|r| r.date);
        self.connection.write_collection(DAILY_REPORTS_FILE, &reports)?;
        debug!("Upserted daily report for {} ({} total)", report.date, reports.len());
        Ok(())
    }

    fn replace_daily_reports(&self, reports: &[DailyReport]) -> Result<()> {
        let mut sorted = reports.to_vec();
        sorted.sort_by_key(|r| r.date);
        self.connection.write_collection(DAILY_REPORTS_FILE, &sorted)
    }

    fn clear_daily_reports(&self) -> Result<()> {
        self.connection.remove_value(DAILY_REPORTS_FILE)
    }
}
