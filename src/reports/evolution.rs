//! Trailing-month evolution aggregation
//!
//! One monthly summary per trailing calendar month, oldest first.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{FintrackError, FintrackResult};
use crate::models::period::month_range;
use crate::models::Transaction;

use super::summary::{summarize, MonthlySummary};

/// Default number of trailing months
pub const DEFAULT_MONTHS: u32 = 6;
/// Largest accepted trailing window
pub const MAX_MONTHS: u32 = 24;

/// One month of the evolution series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionPoint {
    pub year: i32,
    pub month: u32,
    pub summary: MonthlySummary,
}

impl EvolutionPoint {
    /// "YYYY-MM" label for display and rendering
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Check an evolution window size against the accepted bounds
pub fn validate_months(months: u32) -> FintrackResult<u32> {
    if !(1..=MAX_MONTHS).contains(&months) {
        return Err(FintrackError::Validation(format!(
            "Evolution window must be between 1 and {} months, got {}",
            MAX_MONTHS, months
        )));
    }
    Ok(months)
}

/// Compute one summary per trailing calendar month ending at `today`'s month
///
/// The result always has exactly `months` entries, ordered oldest first;
/// months with no transactions contribute a zeroed summary.
pub fn evolution_series(
    transactions: &[Transaction],
    months: u32,
    today: NaiveDate,
) -> FintrackResult<Vec<EvolutionPoint>> {
    let months = validate_months(months)?;
    let current = today.with_day(1).unwrap();

    let mut points = Vec::with_capacity(months as usize);
    for back in (0..months).rev() {
        let first = current.checked_sub_months(Months::new(back)).unwrap();
        let range = month_range(first.year(), first.month());

        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| range.contains(t.date))
            .cloned()
            .collect();

        points.push(EvolutionPoint {
            year: first.year(),
            month: first.month(),
            summary: summarize(&in_month),
        });
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(d: NaiveDate, cents: i64) -> Transaction {
        Transaction::new(d, TransactionKind::Income, Money::from_cents(cents), "Pay", "Work")
    }

    #[test]
    fn test_series_length_and_order() {
        let series = evolution_series(&[], 6, date(2025, 6, 15)).unwrap();
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].label(), "2025-01");
        assert_eq!(series[5].label(), "2025-06");
    }

    #[test]
    fn test_series_crosses_year_boundary() {
        let series = evolution_series(&[], 4, date(2025, 2, 10)).unwrap();
        let labels: Vec<_> = series.iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_transactions_land_in_their_month() {
        let txns = vec![
            income(date(2025, 4, 10), 1000),
            income(date(2025, 5, 20), 2500),
        ];

        let series = evolution_series(&txns, 3, date(2025, 5, 31)).unwrap();
        assert_eq!(series[0].summary.count, 0); // March
        assert_eq!(series[1].summary.total_income, Money::from_cents(1000));
        assert_eq!(series[2].summary.total_income, Money::from_cents(2500));
    }

    #[test]
    fn test_window_bounds() {
        assert!(validate_months(1).is_ok());
        assert!(validate_months(24).is_ok());
        assert!(validate_months(0).unwrap_err().is_validation());
        assert!(validate_months(25).unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_input_yields_zeroed_months() {
        let series = evolution_series(&[], 2, date(2025, 1, 15)).unwrap();
        assert!(series.iter().all(|p| p.summary.count == 0));
        assert!(series.iter().all(|p| p.summary.balance.is_zero()));
    }
}
