//! CLI commands for transaction management

use clap::Subcommand;

use crate::config::{FintrackPaths, Settings};
use crate::display::transaction_table;
use crate::error::{FintrackError, FintrackResult};
use crate::export::{ExportFilters, RawExportFilters};
use crate::ledger::Ledger;
use crate::models::{parse_date, Money, Transaction, TransactionKind};
use crate::storage::JsonLedger;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Amount, e.g. "12.50"
        amount: String,
        /// Description
        description: String,
        /// income or expense
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Category name
        #[arg(short, long, default_value = "General")]
        category: String,
        /// Transaction date (DD/MM/YYYY), today when omitted
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions
    List {
        /// Start date (DD/MM/YYYY)
        #[arg(long)]
        from: Option<String>,
        /// End date (DD/MM/YYYY)
        #[arg(long)]
        to: Option<String>,
        /// Filter by kind (income or expense)
        #[arg(short, long)]
        kind: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle transaction commands
pub fn handle_transaction_command(
    paths: &FintrackPaths,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FintrackResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            description,
            kind,
            category,
            date,
        } => {
            let amount = Money::parse(&amount)
                .map_err(|e| FintrackError::Validation(e.to_string()))?;
            let kind: TransactionKind = kind
                .parse()
                .map_err(FintrackError::Validation)?;
            let date = match date {
                Some(s) => parse_date(&s)?,
                None => chrono::Local::now().date_naive(),
            };

            let txn = Transaction::new(date, kind, amount.abs(), description, category);
            txn.validate()
                .map_err(|e| FintrackError::Validation(e.to_string()))?;

            let mut ledger = JsonLedger::load(paths.ledger_file())?;
            ledger.ensure_user(settings.user_id);
            let recorded = txn.to_string();
            ledger.insert(settings.user_id, txn);
            ledger.save()?;
            println!("Recorded {}", recorded);
            Ok(())
        }
        TransactionCommands::List {
            from,
            to,
            kind,
            limit,
        } => {
            let raw = RawExportFilters {
                start_date: from,
                end_date: to,
                kind,
            };
            let filters = ExportFilters::normalize(&raw)?;

            let mut ledger = JsonLedger::load(paths.ledger_file())?;
            ledger.ensure_user(settings.user_id);
            let mut transactions = ledger.fetch(settings.user_id, &filters.ledger_filter())?;
            transactions.truncate(limit);

            println!(
                "{}",
                transaction_table(&transactions, &settings.currency_symbol)
            );
            Ok(())
        }
    }
}
