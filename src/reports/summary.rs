//! Monthly summary aggregation
//!
//! The basic income/expense/balance rollup used on its own and as the
//! building block of the evolution and comparative reports.

use crate::models::{Money, Transaction};

/// Income, expense and balance totals over a transaction subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlySummary {
    pub total_income: Money,
    pub total_expense: Money,
    /// income minus expense
    pub balance: Money,
    pub count: usize,
}

/// Summarize a transaction slice
///
/// Total over any input; all fields are zero for an empty slice.
pub fn summarize(transactions: &[Transaction]) -> MonthlySummary {
    let mut summary = MonthlySummary::default();

    for txn in transactions {
        if txn.is_income() {
            summary.total_income += txn.amount;
        } else {
            summary.total_expense += txn.amount;
        }
        summary.count += 1;
    }

    summary.balance = summary.total_income - summary.total_expense;
    summary
}
