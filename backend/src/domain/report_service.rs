//! Report aggregation engine.
//!
//! Derives weekly reports from daily reports and monthly reports from
//! weekly ones. Consistency comes from full rebuild rather than
//! incremental patching: canvassers can edit or delete any past daily
//! entry, and a patch-based approach risks drift between stored aggregates
//! and source records. Rebuilding makes the weekly collection always
//! exactly a function of current daily data, at O(n) cost per write,
//! which is fine for per-device record counts in the hundreds.
//!
//! Every read-modify-write mutation runs behind one mutex, so two rapid
//! saves cannot interleave their read and replace steps. Change events are
//! published only after the mutex is released, so a subscriber is free to
//! call back into any service method, mutating ones included.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Utc};
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::domain::calendar;
use crate::domain::errors::{ReportError, ReportResult};
use crate::domain::models::{
    BookSaleLine, DailyReport, MonthlyReport, ReportTotals, WeeklyReport,
};
use crate::domain::profile_service::ProfileService;
use crate::events::{AppEvent, EventBus};
use crate::storage::{
    Connection, DailyReportStorage, MonthlyReportStorage, WeeklyReportStorage,
};

/// Create or overwrite the daily report for one calendar date.
///
/// Counters default to zero. When `book_sales` is non-empty, `books_sold`
/// and `amount` are derived from the lines and the explicit values are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct SaveDailyReportCommand {
    pub date: NaiveDate,
    pub hours: f64,
    pub books_sold: u32,
    pub amount: f64,
    pub free_literature: u32,
    pub contacts: u32,
    pub home_visits: u32,
    pub bible_studies: u32,
    pub prayers_offered: u32,
    pub baptisms: u32,
    pub church_attendance: u32,
    pub book_sales: Vec<BookSaleLine>,
}

/// The aggregation engine and report repository facade.
///
/// Owns no persistent state of its own; it reads the daily store (the
/// source of truth) and replace-writes the derived weekly and monthly
/// collections.
#[derive(Clone)]
pub struct ReportService<C: Connection> {
    daily_repository: C::DailyRepository,
    weekly_repository: C::WeeklyRepository,
    monthly_repository: C::MonthlyRepository,
    profile_service: ProfileService<C>,
    events: EventBus,
    /// Serializes every read-modify-write mutation (save, rebuild,
    /// generate, import, clear).
    mutation_lock: Arc<Mutex<()>>,
}

impl<C: Connection> ReportService<C> {
    pub fn new(connection: Arc<C>, profile_service: ProfileService<C>, events: EventBus) -> Self {
        Self {
            daily_repository: connection.create_daily_repository(),
            weekly_repository: connection.create_weekly_repository(),
            monthly_repository: connection.create_monthly_repository(),
            profile_service,
            events,
            mutation_lock: Arc::new(Mutex::new(())),
        }
    }

    // ---- daily reports ----

    /// Save the daily report for `command.date`, overwriting any existing
    /// entry for that date, then rebuild the weekly collection.
    ///
    /// The rebuild is best-effort: if it fails, the save still succeeds
    /// and the weekly data stays stale until the next successful write.
    pub fn save_daily_report(&self, command: SaveDailyReportCommand) -> ReportResult<DailyReport> {
        let (report, rebuilt) = self.save_and_rebuild(command)?;
        // Publish with the mutation lock released so a subscriber may call
        // back into any service method, including mutating ones.
        if rebuilt {
            self.events.publish(AppEvent::ReportsUpdated);
        }
        Ok(report)
    }

    fn save_and_rebuild(
        &self,
        command: SaveDailyReportCommand,
    ) -> ReportResult<(DailyReport, bool)> {
        let _guard = self.mutation_lock.lock().unwrap();

        let (books_sold, amount) = if command.book_sales.is_empty() {
            (command.books_sold, command.amount)
        } else {
            let books: u32 = command.book_sales.iter().map(|l| l.quantity).sum();
            let amount: f64 = command.book_sales.iter().map(|l| l.subtotal()).sum();
            (books, amount)
        };

        let existing = self
            .daily_repository
            .get_daily_report(command.date)
            .map_err(|e| ReportError::storage("load daily report", e))?;

        let now = Utc::now();
        let report = DailyReport {
            id: calendar::daily_report_id(command.date),
            date: command.date,
            hours: command.hours,
            books_sold,
            amount,
            free_literature: command.free_literature,
            contacts: command.contacts,
            home_visits: command.home_visits,
            bible_studies: command.bible_studies,
            prayers_offered: command.prayers_offered,
            baptisms: command.baptisms,
            church_attendance: command.church_attendance,
            book_sales: command.book_sales,
            created_at: existing.as_ref().map(|r| r.created_at).unwrap_or(now),
            updated_at: now,
        };

        self.daily_repository
            .upsert_daily_report(&report)
            .map_err(|e| ReportError::storage("save daily report", e))?;
        info!("💾 DAILY: Saved report for {} ({} h, {} books)", report.date, report.hours, report.books_sold);

        if let Err(e) = self.profile_service.mark_first_use(command.date) {
            warn!("Could not record first use date: {}", e);
        }

        // The caller's intent was to persist the entry; a failed rebuild
        // leaves weekly data stale, not the save failed.
        let rebuilt = match self.rebuild_weekly_collection(Local::now().naive_local()) {
            Ok(_) => true,
            Err(e) => {
                warn!("Daily report saved but weekly rebuild failed: {}", e);
                false
            }
        };

        Ok((report, rebuilt))
    }

    pub fn get_daily_report(&self, date: NaiveDate) -> ReportResult<Option<DailyReport>> {
        self.daily_repository
            .get_daily_report(date)
            .map_err(|e| ReportError::storage("load daily report", e))
    }

    pub fn list_daily_reports(&self) -> ReportResult<Vec<DailyReport>> {
        self.daily_repository
            .list_daily_reports()
            .map_err(|e| ReportError::storage("load daily reports", e))
    }

    // ---- weekly reports ----

    /// Rebuild the entire weekly collection from the daily store.
    pub fn rebuild_weekly_reports(&self) -> ReportResult<Vec<WeeklyReport>> {
        self.rebuild_weekly_reports_at(Local::now().naive_local())
    }

    /// Rebuild with an explicit "now", which decides each week's locked
    /// flag. Exposed for callers that already hold a clock reading.
    pub fn rebuild_weekly_reports_at(&self, now: NaiveDateTime) -> ReportResult<Vec<WeeklyReport>> {
        let weeklies = {
            let _guard = self.mutation_lock.lock().unwrap();
            self.rebuild_weekly_collection(now)?
        };
        self.events.publish(AppEvent::ReportsUpdated);
        Ok(weeklies)
    }

    // Caller must hold `mutation_lock`. Does not publish; notification
    // happens after the lock is released.
    fn rebuild_weekly_collection(&self, now: NaiveDateTime) -> ReportResult<Vec<WeeklyReport>> {
        let profile = self.profile_service.require_profile()?;

        let dailies = self
            .daily_repository
            .list_daily_reports()
            .map_err(|e| ReportError::storage("load daily reports", e))?;
        let previous = self
            .weekly_repository
            .list_weekly_reports()
            .map_err(|e| ReportError::storage("load weekly reports", e))?;

        // Partition by week start. Saturday entries are excluded: the rest
        // day is not part of any 6-day working week.
        let mut partitions: BTreeMap<NaiveDate, Vec<DailyReport>> = BTreeMap::new();
        for daily in dailies {
            if !calendar::is_working_day(daily.date) {
                debug!("📊 REBUILD: Skipping rest-day report for {}", daily.date);
                continue;
            }
            partitions
                .entry(calendar::week_start(daily.date))
                .or_default()
                .push(daily);
        }

        let generated_at = Utc::now();
        let mut weeklies: Vec<WeeklyReport> = partitions
            .into_iter()
            .map(|(start_date, mut reports)| {
                reports.sort_by_key(|r| r.date);
                let id = calendar::weekly_report_id(start_date);
                // First-seen creation time survives the rebuild
                let created_at = previous
                    .iter()
                    .find(|w| w.id == id)
                    .map(|w| w.created_at)
                    .unwrap_or(generated_at);
                WeeklyReport {
                    week_number: calendar::week_number(start_date),
                    start_date,
                    end_date: start_date + chrono::Duration::days(5),
                    canvasser_name: profile.name.clone(),
                    canvasser_phone: profile.phone.clone(),
                    totals: ReportTotals::from_dailies(reports.iter()),
                    daily_reports: reports,
                    locked: calendar::is_locked(start_date, now),
                    created_at,
                    updated_at: generated_at,
                    id,
                }
            })
            .collect();

        // Chronological by start date. Week numbers reset each January, so
        // across a year boundary they are not themselves ordered.
        weeklies.sort_by_key(|w| w.start_date);

        self.weekly_repository
            .replace_weekly_reports(&weeklies)
            .map_err(|e| ReportError::storage("save weekly reports", e))?;

        info!("📊 REBUILD: Regenerated {} weekly reports", weeklies.len());
        Ok(weeklies)
    }

    /// All weekly reports in chronological order (ascending start date;
    /// equivalently ascending week number within a calendar year).
    pub fn list_weekly_reports(&self) -> ReportResult<Vec<WeeklyReport>> {
        self.weekly_repository
            .list_weekly_reports()
            .map_err(|e| ReportError::storage("load weekly reports", e))
    }

    pub fn get_weekly_report(&self, id: &str) -> ReportResult<Option<WeeklyReport>> {
        self.weekly_repository
            .get_weekly_report(id)
            .map_err(|e| ReportError::storage("load weekly report", e))
    }

    /// The weekly report for the week containing today, if any.
    pub fn current_week_report(&self) -> ReportResult<Option<WeeklyReport>> {
        let start = calendar::week_start(Local::now().date_naive());
        self.get_weekly_report(&calendar::weekly_report_id(start))
    }

    // ---- monthly reports ----

    /// Generate (or regenerate) the monthly report for one month/year from
    /// the weekly reports whose start date falls in that month.
    ///
    /// A week spanning a month boundary counts only toward the month of
    /// its start date. A month with no weeks yields an all-zero report.
    pub fn generate_monthly_report(&self, month: u32, year: i32) -> ReportResult<MonthlyReport> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidMonth(month));
        }
        let report = self.generate_monthly_locked(month, year)?;
        self.events.publish(AppEvent::ReportsUpdated);
        Ok(report)
    }

    fn generate_monthly_locked(&self, month: u32, year: i32) -> ReportResult<MonthlyReport> {
        let _guard = self.mutation_lock.lock().unwrap();

        let profile = self.profile_service.require_profile()?;

        let mut weeklies: Vec<WeeklyReport> = self
            .weekly_repository
            .list_weekly_reports()
            .map_err(|e| ReportError::storage("load weekly reports", e))?
            .into_iter()
            .filter(|w| w.start_date.month() == month && w.start_date.year() == year)
            .collect();
        weeklies.sort_by_key(|w| w.start_date);

        let id = calendar::monthly_report_id(year, month);
        let existing = self
            .monthly_repository
            .get_monthly_report(&id)
            .map_err(|e| ReportError::storage("load monthly report", e))?;

        let now = Utc::now();
        let report = MonthlyReport {
            month,
            year,
            canvasser_name: profile.name,
            canvasser_phone: profile.phone,
            totals: ReportTotals::from_weeklies(weeklies.iter()),
            weekly_reports: weeklies,
            created_at: existing.map(|r| r.created_at).unwrap_or(now),
            updated_at: now,
            id,
        };

        self.monthly_repository
            .upsert_monthly_report(&report)
            .map_err(|e| ReportError::storage("save monthly report", e))?;

        info!(
            "📊 MONTHLY: Generated {} {} from {} weeks",
            calendar::month_name(month),
            year,
            report.weekly_reports.len()
        );
        Ok(report)
    }

    pub fn list_monthly_reports(&self) -> ReportResult<Vec<MonthlyReport>> {
        self.monthly_repository
            .list_monthly_reports()
            .map_err(|e| ReportError::storage("load monthly reports", e))
    }

    // ---- maintenance ----

    /// Working dates from the recorded first-use date (or today, when
    /// unset) through today that have no daily report, ascending.
    pub fn missing_report_dates(&self) -> ReportResult<Vec<NaiveDate>> {
        let settings = self.profile_service.get_settings()?;
        let today = Local::now().date_naive();
        let since = settings.first_use_date.unwrap_or(today);

        let recorded: HashSet<NaiveDate> = self
            .list_daily_reports()?
            .into_iter()
            .map(|r| r.date)
            .collect();

        Ok(Self::missing_dates_between(since, today, &recorded))
    }

    fn missing_dates_between(
        since: NaiveDate,
        until: NaiveDate,
        recorded: &HashSet<NaiveDate>,
    ) -> Vec<NaiveDate> {
        since
            .iter_days()
            .take_while(|d| *d <= until)
            .filter(|d| calendar::is_working_day(*d) && !recorded.contains(d))
            .collect()
    }

    /// Remove the daily, weekly and monthly collections. Profile and
    /// settings survive. Publishes `DataCleared`.
    pub fn clear_all_reports(&self) -> ReportResult<()> {
        {
            let _guard = self.mutation_lock.lock().unwrap();

            self.daily_repository
                .clear_daily_reports()
                .map_err(|e| ReportError::storage("clear daily reports", e))?;
            self.weekly_repository
                .clear_weekly_reports()
                .map_err(|e| ReportError::storage("clear weekly reports", e))?;
            self.monthly_repository
                .clear_monthly_reports()
                .map_err(|e| ReportError::storage("clear monthly reports", e))?;
        }

        info!("🧹 CLEAR: Removed all report collections");
        self.events.publish(AppEvent::DataCleared);
        Ok(())
    }

    /// Replace the daily and monthly collections wholesale (import path),
    /// then rebuild the weekly collection from the new dailies. Unlike the
    /// save path the rebuild here is mandatory: a half-imported store is
    /// worse than a failed import.
    pub(crate) fn restore_collections(
        &self,
        dailies: &[DailyReport],
        monthlies: &[MonthlyReport],
    ) -> ReportResult<Vec<WeeklyReport>> {
        let weeklies = {
            let _guard = self.mutation_lock.lock().unwrap();

            self.daily_repository
                .replace_daily_reports(dailies)
                .map_err(|e| ReportError::storage("restore daily reports", e))?;
            self.monthly_repository
                .replace_monthly_reports(monthlies)
                .map_err(|e| ReportError::storage("restore monthly reports", e))?;

            self.rebuild_weekly_collection(Local::now().naive_local())?
        };
        self.events.publish(AppEvent::ReportsUpdated);
        Ok(weeklies)
    }
}
