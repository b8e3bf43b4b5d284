//! fintrack - Terminal-based personal finance tracker
//!
//! This library provides the core functionality for the fintrack
//! application: a per-user transaction ledger with statistical reporting
//! (monthly summaries, category breakdowns, trailing-month evolution, top
//! transactions, period comparisons, spending patterns) and validated PDF
//! exports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, periods, goals)
//! - `ledger`: Ledger access trait and the pure filter engine
//! - `storage`: Atomic JSON file storage
//! - `reports`: Report aggregation functions
//! - `export`: Export configuration, renderer contract and pipeline
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::export::{ExportService, PdfRenderer, RawExportFilters};
//! use fintrack::storage::JsonLedger;
//!
//! let ledger = JsonLedger::load("ledger.json")?;
//! let service = ExportService::new(ledger, PdfRenderer::new("exports"));
//! let artifact = service.export_transactions(user, &RawExportFilters::default(), true)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
