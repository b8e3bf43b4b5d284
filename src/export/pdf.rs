//! Bundled PDF renderer
//!
//! Writes a minimal text-based PDF (Courier pages, `#` bars when charts are
//! enabled) without an external rendering library, in the same
//! hand-emitted style as the rest of the export layer. The document is
//! written to a temp file and renamed into place, so a failed render never
//! leaves a partial artifact behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{FintrackError, FintrackResult};
use crate::models::Transaction;
use crate::reports::{summarize, ReportData};

use super::config::ExportConfig;
use super::renderer::{DocumentRenderer, ExportArtifact, ExportContent};

/// Text lines per rendered page
const LINES_PER_PAGE: usize = 54;
/// Width of the `#` bars drawn when charts are enabled
const CHART_WIDTH: usize = 30;

/// Renders exports as minimal text PDFs under an output directory
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    output_dir: PathBuf,
}

impl PdfRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(
        &self,
        content: ExportContent<'_>,
        config: &ExportConfig,
    ) -> FintrackResult<ExportArtifact> {
        let lines = build_lines(&content, config);
        let (document, pages) = build_pdf(&lines);

        let filename = config.filename();
        let filepath = self.output_dir.join(&filename);
        write_atomic(&filepath, &document)?;

        let size_bytes = fs::metadata(&filepath)
            .map_err(|e| FintrackError::Render(format!("Failed to stat {}: {}", filename, e)))?
            .len();

        let summary = match (config.include_summary(), &content) {
            (true, ExportContent::Transactions(txns)) => Some(summarize(txns)),
            _ => None,
        };

        Ok(ExportArtifact {
            filename,
            filepath,
            pages,
            size_bytes,
            transaction_count: content.transaction_count(),
            summary,
        })
    }
}

fn build_lines(content: &ExportContent<'_>, config: &ExportConfig) -> Vec<String> {
    let mut lines = vec![
        config.title(),
        format!(
            "Generated {}",
            config.created_at().format("%Y-%m-%d %H:%M UTC")
        ),
    ];

    let filters = config.filters();
    if let (Some(start), Some(end)) = (filters.start_date, filters.end_date) {
        lines.push(format!(
            "Period: {} to {}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        ));
    }
    if let Some(kind) = filters.kind {
        lines.push(format!("Kind: {}", kind));
    }
    lines.push(String::new());

    match content {
        ExportContent::Transactions(txns) => {
            push_transaction_lines(&mut lines, txns, config);
        }
        ExportContent::Report(data) => push_report_lines(&mut lines, data, config),
    }

    lines
}

fn push_transaction_lines(lines: &mut Vec<String>, txns: &[Transaction], config: &ExportConfig) {
    lines.push(format!(
        "{:<12} {:<8} {:<28} {:<16} {:>12}",
        "Date", "Kind", "Description", "Category", "Amount"
    ));
    lines.push("-".repeat(80));

    for txn in txns {
        lines.push(format!(
            "{:<12} {:<8} {:<28.28} {:<16.16} {:>12}",
            txn.date.format("%Y-%m-%d").to_string(),
            txn.kind.to_string(),
            txn.description,
            txn.category,
            txn.signed_amount().to_string()
        ));
    }

    if txns.is_empty() {
        lines.push("No transactions in the selected range.".to_string());
    }

    if config.include_summary() {
        let summary = summarize(txns);
        lines.push(String::new());
        lines.push("-".repeat(80));
        lines.push(format!("Total income:  {:>12}", summary.total_income.to_string()));
        lines.push(format!("Total expense: {:>12}", summary.total_expense.to_string()));
        lines.push(format!("Balance:       {:>12}", summary.balance.to_string()));
        lines.push(format!("Transactions:  {:>12}", summary.count));
    }
}

fn push_report_lines(lines: &mut Vec<String>, data: &ReportData, config: &ExportConfig) {
    match data {
        ReportData::Monthly(summary) => {
            lines.push(format!("Total income:  {:>12}", summary.total_income.to_string()));
            lines.push(format!("Total expense: {:>12}", summary.total_expense.to_string()));
            lines.push(format!("Balance:       {:>12}", summary.balance.to_string()));
            lines.push(format!("Transactions:  {:>12}", summary.count));
        }
        ReportData::Category(slices) => {
            if slices.is_empty() {
                lines.push("No transactions in the selected range.".to_string());
            }
            for slice in slices {
                let mut line = format!(
                    "{:<24.24} {:>12} {:>6.1}%",
                    slice.category,
                    slice.total.to_string(),
                    slice.percentage
                );
                if config.include_charts() {
                    line.push(' ');
                    line.push_str(&bar(slice.percentage, 100.0));
                }
                lines.push(line);
            }
        }
        ReportData::Evolution(points) => {
            let max_expense = points
                .iter()
                .map(|p| p.summary.total_expense.cents())
                .max()
                .unwrap_or(0) as f64;
            for point in points {
                let mut line = format!(
                    "{}  income {:>12}  expense {:>12}  balance {:>12}",
                    point.label(),
                    point.summary.total_income.to_string(),
                    point.summary.total_expense.to_string(),
                    point.summary.balance.to_string()
                );
                if config.include_charts() {
                    line.push(' ');
                    line.push_str(&bar(point.summary.total_expense.cents() as f64, max_expense));
                }
                lines.push(line);
            }
        }
        ReportData::Top(txns) => {
            for (i, txn) in txns.iter().enumerate() {
                lines.push(format!(
                    "{:>2}. {} {:<28.28} {:>12}",
                    i + 1,
                    txn.date.format("%Y-%m-%d"),
                    txn.description,
                    txn.signed_amount().to_string()
                ));
            }
            if txns.is_empty() {
                lines.push("No transactions in the selected range.".to_string());
            }
        }
        ReportData::Comparative(report) => {
            lines.push(format!("Current period:  {}", report.current.range));
            lines.push(format!(
                "  income {:>12}  expense {:>12}  balance {:>12}",
                report.current.summary.total_income.to_string(),
                report.current.summary.total_expense.to_string(),
                report.current.summary.balance.to_string()
            ));
            lines.push(format!("Previous period: {}", report.previous.range));
            lines.push(format!(
                "  income {:>12}  expense {:>12}  balance {:>12}",
                report.previous.summary.total_income.to_string(),
                report.previous.summary.total_expense.to_string(),
                report.previous.summary.balance.to_string()
            ));
            lines.push(String::new());
            lines.push(format!("Income change:  {}", fmt_delta(report.income_delta)));
            lines.push(format!("Expense change: {}", fmt_delta(report.expense_delta)));
            lines.push(format!("Balance change: {}", fmt_delta(report.balance_delta)));
        }
        ReportData::Patterns(signals) => {
            if signals.is_empty() {
                lines.push("No notable patterns detected.".to_string());
            }
            for signal in signals {
                lines.push(format!("- {}: {}", signal.signal, signal.evidence));
            }
        }
    }
}

fn bar(value: f64, max_value: f64) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max_value) * CHART_WIDTH as f64).round() as usize;
    "#".repeat(filled.clamp(1, CHART_WIDTH))
}

fn fmt_delta(delta: Option<f64>) -> String {
    match delta {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    }
}

/// Assemble a single-font PDF from text lines; returns bytes and page count
fn build_pdf(lines: &[String]) -> (Vec<u8>, u32) {
    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![&[]]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };
    let page_count = chunks.len();

    // Object layout: 1 catalog, 2 page tree, 3 font, then one page object
    // and one content stream per page.
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Courier >>".to_vec(),
    ];

    for (i, chunk) in chunks.iter().enumerate() {
        let content_id = 5 + i * 2;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                content_id
            )
            .into_bytes(),
        );

        let mut stream = String::from("BT /F1 10 Tf 40 760 Td 13 TL\n");
        for line in chunk.iter() {
            stream.push_str(&format!("({}) Tj T*\n", escape_text(line)));
        }
        stream.push_str("ET");

        objects.push(
            format!("<< /Length {} >>\nstream\n{}\nendstream", stream.len(), stream)
                .into_bytes(),
        );
    }

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    (out, page_count as u32)
}

/// Escape a string for a PDF literal
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Write bytes to a temp file, then rename into place
fn write_atomic(path: &Path, bytes: &[u8]) -> FintrackResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FintrackError::Render(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = path.with_extension("pdf.tmp");

    let result = (|| -> std::io::Result<()> {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        fs::rename(&temp_path, path)
    })();

    result.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FintrackError::Render(format!("Failed to write {}: {}", path.display(), e))
    })
}
