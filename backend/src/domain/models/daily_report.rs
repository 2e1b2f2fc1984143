//! Domain model for a daily canvassing report.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One book sale entry: title, unit price and quantity.
///
/// Each line contributes `quantity` to the day's books-sold total and
/// `unit_price * quantity` to the day's amount total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSaleLine {
    pub title: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl BookSaleLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// One canvasser-day's raw metrics and book sale lines.
///
/// At most one report exists per calendar date; saving again for the same
/// date overwrites the previous entry. When `book_sales` is non-empty the
/// `books_sold` and `amount` fields always equal the sums over the lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Deterministic id: `daily_<YYYY-MM-DD>`
    pub id: String,
    /// Calendar date, no time component
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyReport {
    /// Books-sold and amount totals over the book sale lines.
    pub fn line_totals(&self) -> (u32, f64) {
        let books: u32 = self.book_sales.iter().map(|l| l.quantity).sum();
        let amount: f64 = self.book_sales.iter().map(|l| l.subtotal()).sum();
        (books, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report_with_lines(lines: Vec<BookSaleLine>) -> DailyReport {
        let now = Utc::now();
        DailyReport {
            id: "daily_2025-01-06".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            hours: 8.0,
            books_sold: 0,
            amount: 0.0,
            free_literature: 0,
            contacts: 0,
            home_visits: 0,
            bible_studies: 0,
            prayers_offered: 0,
            baptisms: 0,
            church_attendance: 0,
            book_sales: lines,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_line_totals() {
        let report = report_with_lines(vec![
            BookSaleLine {
                title: "The Great Controversy".to_string(),
                unit_price: 1000.0,
                quantity: 2,
            },
            BookSaleLine {
                title: "Steps to Christ".to_string(),
                unit_price: 500.0,
                quantity: 3,
            },
        ]);

        let (books, amount) = report.line_totals();
        assert_eq!(books, 5);
        assert_eq!(amount, 3500.0);
    }

    #[test]
    fn test_line_totals_empty() {
        let report = report_with_lines(vec![]);
        assert_eq!(report.line_totals(), (0, 0.0));
    }
}
