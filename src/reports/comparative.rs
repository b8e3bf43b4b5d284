//! Period-over-period comparison
//!
//! Summarizes the selected range and the adjacent equal-length range before
//! it, with percentage deltas per metric.

use crate::models::{DateRange, Transaction};

use super::summary::{summarize, MonthlySummary};

/// A summary bound to the range it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSummary {
    pub range: DateRange,
    pub summary: MonthlySummary,
}

/// Two adjacent period summaries plus their percentage deltas
///
/// A delta is `None` when the previous metric is zero; the division is
/// never performed in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparativeReport {
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
    pub income_delta: Option<f64>,
    pub expense_delta: Option<f64>,
    pub balance_delta: Option<f64>,
}

/// Compare `current` against the equal-length range immediately before it
///
/// `transactions` must cover both windows; entries outside either window are
/// ignored.
pub fn comparative_report(transactions: &[Transaction], current: DateRange) -> ComparativeReport {
    let previous = current.preceding();

    let in_range = |range: DateRange| -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| range.contains(t.date))
            .cloned()
            .collect()
    };

    let current_summary = summarize(&in_range(current));
    let previous_summary = summarize(&in_range(previous));

    ComparativeReport {
        income_delta: percentage_delta(
            current_summary.total_income.cents(),
            previous_summary.total_income.cents(),
        ),
        expense_delta: percentage_delta(
            current_summary.total_expense.cents(),
            previous_summary.total_expense.cents(),
        ),
        balance_delta: percentage_delta(
            current_summary.balance.cents(),
            previous_summary.balance.cents(),
        ),
        current: PeriodSummary {
            range: current,
            summary: current_summary,
        },
        previous: PeriodSummary {
            range: previous,
            summary: previous_summary,
        },
    }
}

fn percentage_delta(current: i64, previous: i64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    Some((current - previous) as f64 / previous as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(d: NaiveDate, kind: TransactionKind, cents: i64) -> Transaction {
        Transaction::new(d, kind, Money::from_cents(cents), "Entry", "General")
    }

    #[test]
    fn test_deltas_against_previous_window() {
        let txns = vec![
            // previous window: February
            txn(date(2025, 2, 10), TransactionKind::Income, 100000),
            txn(date(2025, 2, 15), TransactionKind::Expense, 40000),
            // current window: March
            txn(date(2025, 3, 10), TransactionKind::Income, 150000),
            txn(date(2025, 3, 15), TransactionKind::Expense, 20000),
        ];

        let current = DateRange::new(date(2025, 3, 1), date(2025, 3, 28)).unwrap();
        let report = comparative_report(&txns, current);

        assert_eq!(report.current.summary.total_income, Money::from_cents(150000));
        assert_eq!(report.previous.summary.total_income, Money::from_cents(100000));
        assert!((report.income_delta.unwrap() - 50.0).abs() < 1e-9);
        assert!((report.expense_delta.unwrap() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_is_none_when_previous_is_zero() {
        let txns = vec![txn(date(2025, 3, 10), TransactionKind::Income, 150000)];

        let current = DateRange::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap();
        let report = comparative_report(&txns, current);

        assert!(report.income_delta.is_none());
        assert!(report.expense_delta.is_none());
        assert!(report.balance_delta.is_none());
    }

    #[test]
    fn test_windows_are_adjacent_and_equal_length() {
        let current = DateRange::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap();
        let report = comparative_report(&[], current);

        assert_eq!(report.previous.range.end, date(2025, 2, 28));
        assert_eq!(report.previous.range.days(), current.days());
    }

    #[test]
    fn test_empty_input_is_total() {
        let current = DateRange::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap();
        let report = comparative_report(&[], current);
        assert_eq!(report.current.summary.count, 0);
        assert_eq!(report.previous.summary.count, 0);
    }
}
