//! Export request configuration
//!
//! An `ExportConfig` is only obtainable through validating factories, so no
//! instance can exist with an invalid kind/format/report-kind combination.
//! Filter normalization is permissive on optional fields and strict on
//! structural ones.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FintrackError, FintrackResult};
use crate::ledger::LedgerFilter;
use crate::models::{parse_date, TransactionKind};
use crate::reports::ReportKind;

/// What is being exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// The raw (filtered) transaction list
    Transactions,
    /// A computed report aggregate
    Report,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = FintrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transactions" => Ok(Self::Transactions),
            "report" => Ok(Self::Report),
            other => Err(FintrackError::Config(format!(
                "Unknown export kind: {}",
                other
            ))),
        }
    }
}

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FintrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            other => Err(FintrackError::Config(format!(
                "Unsupported export format: {}",
                other
            ))),
        }
    }
}

/// Caller-supplied filter strings, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExportFilters {
    /// `DD/MM/YYYY`
    pub start_date: Option<String>,
    /// `DD/MM/YYYY`
    pub end_date: Option<String>,
    /// "income" or "expense"; anything else is dropped
    pub kind: Option<String>,
}

/// Normalized export filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
}

impl ExportFilters {
    /// Parse raw filter strings
    ///
    /// Malformed dates are validation errors; an unrecognized kind token is
    /// silently dropped (the only deliberate silent behavior in the engine).
    pub fn normalize(raw: &RawExportFilters) -> FintrackResult<Self> {
        let start_date = raw.start_date.as_deref().map(parse_date).transpose()?;
        let end_date = raw.end_date.as_deref().map(parse_date).transpose()?;
        let kind = raw
            .kind
            .as_deref()
            .and_then(|s| s.parse::<TransactionKind>().ok());

        Ok(Self {
            start_date,
            end_date,
            kind,
        })
    }

    /// The equivalent ledger filter
    pub fn ledger_filter(&self) -> LedgerFilter {
        LedgerFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            kind: self.kind,
        }
    }
}

/// Presentation flags and title override for an export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportDocumentOptions {
    pub include_charts: bool,
    pub include_summary: bool,
    pub title: Option<String>,
}

/// A fully validated export request
#[derive(Debug, Clone)]
pub struct ExportConfig {
    kind: ExportKind,
    report_kind: Option<ReportKind>,
    filters: ExportFilters,
    format: ExportFormat,
    include_charts: bool,
    include_summary: bool,
    title_override: Option<String>,
    created_at: DateTime<Utc>,
}

impl ExportConfig {
    /// Validating factory; the only way to obtain an `ExportConfig`
    ///
    /// A report export without a report kind is a configuration error; a
    /// transactions export discards any supplied report kind.
    pub fn new(
        kind: ExportKind,
        report_kind: Option<ReportKind>,
        filters: ExportFilters,
        options: ExportDocumentOptions,
    ) -> FintrackResult<Self> {
        let format = ExportFormat::default();
        Self::validate(kind, format, report_kind)?;

        let report_kind = match kind {
            ExportKind::Report => report_kind,
            ExportKind::Transactions => None,
        };

        Ok(Self {
            kind,
            report_kind,
            filters,
            format,
            include_charts: options.include_charts,
            include_summary: options.include_summary,
            title_override: options.title,
            created_at: Utc::now(),
        })
    }

    /// Shorthand for a transactions export from raw caller filters
    pub fn transactions(
        raw_filters: &RawExportFilters,
        include_summary: bool,
    ) -> FintrackResult<Self> {
        Self::new(
            ExportKind::Transactions,
            None,
            ExportFilters::normalize(raw_filters)?,
            ExportDocumentOptions {
                include_summary,
                ..Default::default()
            },
        )
    }

    /// Shorthand for a report export
    pub fn report(
        report_kind: Option<ReportKind>,
        filters: ExportFilters,
        options: ExportDocumentOptions,
    ) -> FintrackResult<Self> {
        Self::new(ExportKind::Report, report_kind, filters, options)
    }

    fn validate(
        kind: ExportKind,
        format: ExportFormat,
        report_kind: Option<ReportKind>,
    ) -> FintrackResult<()> {
        // The closed enums already exclude unknown kinds and formats at the
        // string boundary; the cross-field rule is checked here.
        match format {
            ExportFormat::Pdf => {}
        }

        if kind == ExportKind::Report && report_kind.is_none() {
            return Err(FintrackError::Config(
                "Report exports require a report kind".to_string(),
            ));
        }

        Ok(())
    }

    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    pub fn report_kind(&self) -> Option<ReportKind> {
        self.report_kind
    }

    pub fn filters(&self) -> &ExportFilters {
        &self.filters
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn include_charts(&self) -> bool {
        self.include_charts
    }

    pub fn include_summary(&self) -> bool {
        self.include_summary
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Document title: explicit override, else a report-kind lookup, else a
    /// generic fallback
    pub fn title(&self) -> String {
        if let Some(title) = &self.title_override {
            return title.clone();
        }

        match self.report_kind {
            Some(kind) => kind.display_title().to_string(),
            None => match self.kind {
                ExportKind::Transactions => "Transaction Export".to_string(),
                ExportKind::Report => "Financial Report".to_string(),
            },
        }
    }

    /// Deterministic output filename
    ///
    /// `<kind>_<discriminator>_<iso-date>_<epoch-millis>.<ext>`; the
    /// millisecond component keeps rapid repeated exports distinct.
    pub fn filename(&self) -> String {
        let discriminator = match self.report_kind {
            Some(kind) => kind.as_str(),
            None => self
                .filters
                .kind
                .map(|k| k.as_str())
                .unwrap_or("all"),
        };

        format!(
            "{}_{}_{}_{}.{}",
            self.kind.as_str(),
            discriminator,
            self.created_at.format("%Y-%m-%d"),
            self.created_at.timestamp_millis(),
            self.format.extension()
        )
    }
}
