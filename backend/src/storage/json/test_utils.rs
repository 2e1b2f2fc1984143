/// Test utilities for the JSON storage layer and the services built on it.
///
/// `TestEnvironment` owns a `TempDir` so test data is removed automatically
/// when the environment drops, even if a test panics.
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use super::connection::JsonConnection;
use crate::domain::calendar;
use crate::domain::models::{DailyReport, MonthlyReport, ReportTotals, WeeklyReport};

/// A fresh JSON store in a temporary directory.
pub struct TestEnvironment {
    pub connection: JsonConnection,
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // keep alive so the directory survives the test body
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        // Honors RUST_LOG; idempotent across tests in one process
        let _ = env_logger::builder().is_test(true).try_init();

        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// A daily report with one worked hour per metric slot and no book lines.
pub fn sample_daily_report(date: NaiveDate) -> DailyReport {
    let now = Utc::now();
    DailyReport {
        id: calendar::daily_report_id(date),
        date,
        hours: 8.0,
        books_sold: 1,
        amount: 1000.0,
        free_literature: 2,
        contacts: 3,
        home_visits: 1,
        bible_studies: 1,
        prayers_offered: 2,
        baptisms: 0,
        church_attendance: 0,
        book_sales: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_weekly_report(start_date: NaiveDate) -> WeeklyReport {
    let now = Utc::now();
    WeeklyReport {
        id: calendar::weekly_report_id(start_date),
        week_number: calendar::week_number(start_date),
        start_date,
        end_date: start_date + chrono::Duration::days(5),
        canvasser_name: "Test Canvasser".to_string(),
        canvasser_phone: "+255700000000".to_string(),
        totals: ReportTotals::default(),
        daily_reports: Vec::new(),
        locked: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_monthly_report(year: i32, month: u32) -> MonthlyReport {
    let now = Utc::now();
    MonthlyReport {
        id: calendar::monthly_report_id(year, month),
        month,
        year,
        canvasser_name: "Test Canvasser".to_string(),
        canvasser_phone: "+255700000000".to_string(),
        totals: ReportTotals::default(),
        weekly_reports: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}
