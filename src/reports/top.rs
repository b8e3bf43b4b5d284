//! Top-N transaction selection

use crate::error::{FintrackError, FintrackResult};
use crate::models::Transaction;

/// Default number of transactions returned
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest accepted limit
pub const MAX_LIMIT: u32 = 50;

/// Check a top-N limit against the accepted bounds
pub fn validate_limit(limit: u32) -> FintrackResult<u32> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(FintrackError::Validation(format!(
            "Top transaction limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }
    Ok(limit)
}

/// Select the `limit` largest transactions by absolute amount
///
/// Ties are broken by date descending. The result length is
/// min(limit, available).
pub fn top_transactions(
    transactions: &[Transaction],
    limit: u32,
) -> FintrackResult<Vec<Transaction>> {
    let limit = validate_limit(limit)?;

    let mut sorted: Vec<Transaction> = transactions.to_vec();
    sorted.sort_by(|a, b| {
        b.amount
            .abs()
            .cmp(&a.amount.abs())
            .then_with(|| b.date.cmp(&a.date))
    });
    sorted.truncate(limit as usize);
    Ok(sorted)
}
