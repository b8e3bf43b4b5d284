//! Export module for fintrack
//!
//! Validates and normalizes export requests, aggregates report data and
//! hands the result to a document renderer.

pub mod config;
pub mod pdf;
pub mod renderer;
pub mod service;

pub use config::{
    ExportConfig, ExportDocumentOptions, ExportFilters, ExportFormat, ExportKind,
    RawExportFilters,
};
pub use pdf::PdfRenderer;
pub use renderer::{DocumentRenderer, ExportArtifact, ExportContent};
pub use service::{ExportService, ReportExportOptions};
