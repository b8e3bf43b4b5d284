//! CLI command handlers
//!
//! Thin adapters bridging clap argument parsing with the storage, report and
//! export layers.

pub mod export;
pub mod goal;
pub mod transaction;

pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
