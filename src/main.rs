use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_export_command, handle_goal_command, handle_transaction_command, ExportCommands,
    GoalCommands, TransactionCommands,
};
use fintrack::config::{FintrackPaths, Settings};

#[derive(Parser)]
#[command(
    name = "fintrack",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "fintrack keeps a personal transaction ledger and savings goals in \
                  plain JSON files and exports filtered transaction lists and \
                  statistical reports as PDF documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// PDF export commands
    #[command(subcommand)]
    Export(ExportCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FintrackPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Commands::Transaction(cmd) => handle_transaction_command(&paths, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&paths, &settings, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&paths, &settings, cmd)?,
        Commands::Config => {
            println!("Profile:  {}", settings.user_id);
            println!("Data:     {}", paths.base_dir().display());
            println!("Exports:  {}", paths.exports_dir().display());
            println!("Currency: {}", settings.currency_symbol);
        }
    }

    Ok(())
}
