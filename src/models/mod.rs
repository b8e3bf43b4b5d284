//! Core data models for fintrack
//!
//! This module contains the data structures that represent the finance
//! domain: transactions, money, reporting periods and savings goals.

pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use goal::{Goal, GoalStatus, GoalValidationError};
pub use ids::{GoalId, TransactionId, UserId};
pub use money::Money;
pub use period::{parse_date, DateRange, ReportPeriod};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
