//! CLI commands for PDF exports

use clap::Subcommand;

use crate::config::{FintrackPaths, Settings};
use crate::error::{FintrackError, FintrackResult};
use crate::export::{ExportArtifact, ExportService, PdfRenderer, RawExportFilters, ReportExportOptions};
use crate::models::ReportPeriod;
use crate::reports::ReportKind;
use crate::storage::JsonLedger;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the (filtered) transaction list as a PDF
    Transactions {
        /// Start date (DD/MM/YYYY)
        #[arg(long)]
        from: Option<String>,
        /// End date (DD/MM/YYYY)
        #[arg(long)]
        to: Option<String>,
        /// Filter by kind (income or expense)
        #[arg(short, long)]
        kind: Option<String>,
        /// Append an income/expense/balance summary
        #[arg(long)]
        summary: bool,
    },
    /// Export a computed report as a PDF
    Report {
        /// monthly, category, evolution, top, comparative or patterns
        kind: String,
        /// Symbolic period: current-month, last-month, last-3-months,
        /// last-6-months or current-year
        #[arg(short, long)]
        period: Option<String>,
        /// Custom period start (DD/MM/YYYY); requires --to
        #[arg(long)]
        from: Option<String>,
        /// Custom period end (DD/MM/YYYY); requires --from
        #[arg(long)]
        to: Option<String>,
        /// Restrict to one kind (income or expense)
        #[arg(long)]
        only: Option<String>,
        /// Trailing months for evolution reports
        #[arg(short, long)]
        months: Option<u32>,
        /// Limit for top-transaction reports
        #[arg(short, long)]
        limit: Option<u32>,
        /// Draw text bar charts
        #[arg(long)]
        charts: bool,
        /// Append a summary section
        #[arg(long)]
        summary: bool,
        /// Override the document title
        #[arg(short, long)]
        title: Option<String>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    paths: &FintrackPaths,
    settings: &Settings,
    cmd: ExportCommands,
) -> FintrackResult<()> {
    let mut ledger = JsonLedger::load(paths.ledger_file())?;
    ledger.ensure_user(settings.user_id);
    let renderer = PdfRenderer::new(paths.exports_dir());
    let service = ExportService::new(ledger, renderer);

    match cmd {
        ExportCommands::Transactions {
            from,
            to,
            kind,
            summary,
        } => {
            let raw = RawExportFilters {
                start_date: from,
                end_date: to,
                kind,
            };
            let artifact = service.export_transactions(settings.user_id, &raw, summary)?;
            print_artifact(&artifact, &settings.currency_symbol);
            Ok(())
        }
        ExportCommands::Report {
            kind,
            period,
            from,
            to,
            only,
            months,
            limit,
            charts,
            summary,
            title,
        } => {
            let report_kind: ReportKind =
                kind.parse().map_err(FintrackError::Config)?;

            let period = match (from, to, period) {
                (Some(from), Some(to), _) => Some(ReportPeriod::custom(&from, &to)?),
                (Some(_), None, _) | (None, Some(_), _) => {
                    return Err(FintrackError::Validation(
                        "Custom periods need both --from and --to".to_string(),
                    ))
                }
                (None, None, Some(key)) => Some(ReportPeriod::from_key(&key)?),
                (None, None, None) => None,
            };

            let options = ReportExportOptions {
                period,
                // An unrecognized kind token is dropped, matching filter
                // normalization
                kind: only.and_then(|s| s.parse().ok()),
                months: months.or(Some(settings.default_evolution_months)),
                limit: limit.or(Some(settings.default_top_limit)),
                include_charts: charts,
                include_summary: summary,
                title,
            };

            let artifact = service.export_report(settings.user_id, report_kind, &options)?;
            print_artifact(&artifact, &settings.currency_symbol);
            Ok(())
        }
    }
}

fn print_artifact(artifact: &ExportArtifact, currency_symbol: &str) {
    println!(
        "Exported {} page(s), {} bytes: {}",
        artifact.pages,
        artifact.size_bytes,
        artifact.filepath.display()
    );
    if let Some(count) = artifact.transaction_count {
        println!("Transactions included: {}", count);
    }
    if let Some(summary) = &artifact.summary {
        println!(
            "Income {}  Expense {}  Balance {}",
            summary.total_income.format_with_symbol(currency_symbol),
            summary.total_expense.format_with_symbol(currency_symbol),
            summary.balance.format_with_symbol(currency_symbol)
        );
    }
}
