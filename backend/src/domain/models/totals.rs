//! Summed metric totals shared by weekly and monthly reports.

use serde::{Deserialize, Serialize};

use super::daily_report::DailyReport;
use super::weekly_report::WeeklyReport;

/// The summed counters of a weekly or monthly report.
///
/// Flattened into the owning report's serialized form so the stored JSON
/// keeps flat `total_*` keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub total_hours: f64,
    pub total_books_sold: u32,
    pub total_amount: f64,
    pub total_free_literature: u32,
    pub total_contacts: u32,
    pub total_home_visits: u32,
    pub total_bible_studies: u32,
    pub total_prayers_offered: u32,
    pub total_baptisms: u32,
    pub total_church_attendance: u32,
}

impl ReportTotals {
    pub fn add_daily(&mut self, report: &DailyReport) {
        self.total_hours += report.hours;
        self.total_books_sold += report.books_sold;
        self.total_amount += report.amount;
        self.total_free_literature += report.free_literature;
        self.total_contacts += report.contacts;
        self.total_home_visits += report.home_visits;
        self.total_bible_studies += report.bible_studies;
        self.total_prayers_offered += report.prayers_offered;
        self.total_baptisms += report.baptisms;
        self.total_church_attendance += report.church_attendance;
    }

    pub fn add_weekly(&mut self, report: &WeeklyReport) {
        self.total_hours += report.totals.total_hours;
        self.total_books_sold += report.totals.total_books_sold;
        self.total_amount += report.totals.total_amount;
        self.total_free_literature += report.totals.total_free_literature;
        self.total_contacts += report.totals.total_contacts;
        self.total_home_visits += report.totals.total_home_visits;
        self.total_bible_studies += report.totals.total_bible_studies;
        self.total_prayers_offered += report.totals.total_prayers_offered;
        self.total_baptisms += report.totals.total_baptisms;
        self.total_church_attendance += report.totals.total_church_attendance;
    }

    pub fn from_dailies<'a, I: IntoIterator<Item = &'a DailyReport>>(reports: I) -> Self {
        let mut totals = Self::default();
        for report in reports {
            totals.add_daily(report);
        }
        totals
    }

    pub fn from_weeklies<'a, I: IntoIterator<Item = &'a WeeklyReport>>(reports: I) -> Self {
        let mut totals = Self::default();
        for report in reports {
            totals.add_weekly(report);
        }
        totals
    }
}
