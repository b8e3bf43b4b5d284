//! Document renderer contract
//!
//! The export pipeline hands an aggregate (or the raw transaction list) and
//! a validated config to a renderer, which either produces a fully written
//! artifact or fails — never a partial file reported as success. Renderers
//! must honor the chart/summary flags and report true page counts and byte
//! sizes.

use std::path::PathBuf;

use crate::error::FintrackResult;
use crate::models::Transaction;
use crate::reports::{MonthlySummary, ReportData};

use super::config::ExportConfig;

/// What a renderer is asked to lay out
#[derive(Debug, Clone, Copy)]
pub enum ExportContent<'a> {
    /// The filtered transaction list
    Transactions(&'a [Transaction]),
    /// A computed report aggregate
    Report(&'a ReportData),
}

impl ExportContent<'_> {
    /// Number of transactions carried, when the content is a raw list
    pub fn transaction_count(&self) -> Option<usize> {
        match self {
            Self::Transactions(txns) => Some(txns.len()),
            Self::Report(_) => None,
        }
    }
}

/// Descriptor of a rendered export document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub filepath: PathBuf,
    pub pages: u32,
    pub size_bytes: u64,
    pub transaction_count: Option<usize>,
    pub summary: Option<MonthlySummary>,
}

/// Renders an export into a document file
pub trait DocumentRenderer {
    /// Produce the document for `content` under `config`
    ///
    /// Errors are reported as `FintrackError::Render` and propagate to the
    /// caller without retry.
    fn render(
        &self,
        content: ExportContent<'_>,
        config: &ExportConfig,
    ) -> FintrackResult<ExportArtifact>;
}
