//! Ledger access and filtering
//!
//! The reporting engine never talks to storage directly; it consumes the
//! `Ledger` trait, which returns a user's transactions ascending by date.
//! Filtering is a pure function over a ledger slice.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{DateRange, Transaction, TransactionKind, UserId};

/// Options for filtering a ledger view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Inclusive lower date bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end_date: Option<NaiveDate>,
    /// Restrict to a single transaction kind
    pub kind: Option<TransactionKind>,
}

impl LedgerFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive date range
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.start_date = Some(range.start);
        self.end_date = Some(range.end);
        self
    }

    /// Restrict to a single kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Check whether a transaction passes this filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(start) = self.start_date {
            if txn.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if txn.date > end {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        true
    }
}

/// Apply a filter to a ledger slice, preserving input order
///
/// Pure and total: the source is never mutated and an empty ledger yields an
/// empty sequence.
pub fn apply(transactions: &[Transaction], filter: &LedgerFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| filter.matches(txn))
        .cloned()
        .collect()
}

/// Read access to a user's transaction ledger
pub trait Ledger {
    /// Fetch a user's transactions matching `filter`, ascending by date
    fn fetch(&self, user: UserId, filter: &LedgerFilter) -> FintrackResult<Vec<Transaction>>;
}

/// In-memory ledger, used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    entries: HashMap<UserId, Vec<Transaction>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user's ledger
    pub fn with_transactions(mut self, user: UserId, transactions: Vec<Transaction>) -> Self {
        self.entries.insert(user, transactions);
        self
    }

    /// Append a transaction to a user's ledger
    pub fn insert(&mut self, user: UserId, transaction: Transaction) {
        self.entries.entry(user).or_default().push(transaction);
    }
}

impl Ledger for MemoryLedger {
    fn fetch(&self, user: UserId, filter: &LedgerFilter) -> FintrackResult<Vec<Transaction>> {
        let transactions = self
            .entries
            .get(&user)
            .ok_or_else(|| FintrackError::ledger_not_found(user.to_string()))?;

        let mut result = apply(transactions, filter);
        result.sort_by_key(|txn| txn.date);
        Ok(result)
    }
}
