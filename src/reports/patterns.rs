//! Spending pattern detection
//!
//! The detection heuristic is a pluggable strategy behind the
//! `PatternDetector` trait; the aggregator contract only fixes that the
//! output is bounded and deterministic for a given input.

use std::collections::BTreeMap;

use crate::models::{Money, Transaction};

/// A detected pattern with its supporting evidence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSignal {
    pub signal: String,
    pub evidence: String,
}

/// Strategy interface for pattern detection
pub trait PatternDetector {
    /// Derive a bounded, deterministic list of signals from a ledger slice
    fn detect(&self, transactions: &[Transaction]) -> Vec<PatternSignal>;
}

/// Default heuristic detector
///
/// Flags recurring expenses, a dominant spending category, outlier single
/// expenses and spending exceeding income, in that order, capped at
/// `max_signals`.
#[derive(Debug, Clone)]
pub struct SpendingPatternDetector {
    max_signals: usize,
}

/// Share of total expenses above which a category counts as dominant
const DOMINANT_CATEGORY_SHARE: f64 = 40.0;
/// Multiple of the mean expense above which a single expense is an outlier
const OUTLIER_FACTOR: f64 = 3.0;
/// Occurrences of the same description that count as recurring
const RECURRING_MIN_COUNT: usize = 3;

impl SpendingPatternDetector {
    pub fn new(max_signals: usize) -> Self {
        Self { max_signals }
    }
}

impl Default for SpendingPatternDetector {
    fn default() -> Self {
        Self::new(5)
    }
}

impl PatternDetector for SpendingPatternDetector {
    fn detect(&self, transactions: &[Transaction]) -> Vec<PatternSignal> {
        let mut signals = Vec::new();

        let expenses: Vec<&Transaction> =
            transactions.iter().filter(|t| t.is_expense()).collect();

        // Recurring expenses: same description seen repeatedly.
        // BTreeMap keeps the scan order deterministic.
        let mut by_description: BTreeMap<&str, (usize, Money)> = BTreeMap::new();
        for txn in &expenses {
            let entry = by_description
                .entry(txn.description.as_str())
                .or_insert((0, Money::zero()));
            entry.0 += 1;
            entry.1 += txn.amount;
        }
        for (description, (count, total)) in &by_description {
            if *count >= RECURRING_MIN_COUNT {
                signals.push(PatternSignal {
                    signal: "Recurring expense".to_string(),
                    evidence: format!(
                        "'{}' appeared {} times totalling {}",
                        description, count, total
                    ),
                });
            }
        }

        // Dominant category: one category takes an outsized share.
        let total_expense: Money = expenses.iter().map(|t| t.amount).sum();
        let mut by_category: BTreeMap<&str, Money> = BTreeMap::new();
        for txn in &expenses {
            *by_category
                .entry(txn.category.as_str())
                .or_insert(Money::zero()) += txn.amount;
        }
        if let Some((category, amount)) = by_category
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        {
            let share = amount.percent_of(total_expense);
            if share > DOMINANT_CATEGORY_SHARE {
                signals.push(PatternSignal {
                    signal: "Dominant spending category".to_string(),
                    evidence: format!(
                        "'{}' accounts for {:.1}% of expenses ({})",
                        category, share, amount
                    ),
                });
            }
        }

        // Outlier expense: a single entry far above the mean.
        if !expenses.is_empty() {
            let mean = total_expense.cents() as f64 / expenses.len() as f64;
            if let Some(largest) = expenses
                .iter()
                .max_by(|a, b| a.amount.cmp(&b.amount).then_with(|| a.date.cmp(&b.date)))
            {
                if largest.amount.cents() as f64 > mean * OUTLIER_FACTOR {
                    signals.push(PatternSignal {
                        signal: "Outlier expense".to_string(),
                        evidence: format!(
                            "'{}' ({}) is more than {}x the average expense",
                            largest.description, largest.amount, OUTLIER_FACTOR as i64
                        ),
                    });
                }
            }
        }

        // Spending exceeding income over the slice.
        let total_income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        if total_expense > total_income {
            signals.push(PatternSignal {
                signal: "Spending exceeds income".to_string(),
                evidence: format!(
                    "Expenses {} against income {}",
                    total_expense, total_income
                ),
            });
        }

        signals.truncate(self.max_signals);
        signals
    }
}
