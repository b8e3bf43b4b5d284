//! CLI commands for savings goals

use clap::Subcommand;

use crate::config::{FintrackPaths, Settings};
use crate::display::goal_table;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{parse_date, Goal, Money};
use crate::storage::GoalStore;

/// Goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Create a savings goal
    Add {
        /// Description, e.g. "Vacation"
        description: String,
        /// Target amount, e.g. "1500"
        target: String,
        /// Deadline (DD/MM/YYYY), must be in the future
        deadline: String,
        /// Planned monthly contribution
        #[arg(short, long)]
        monthly: Option<String>,
    },
    /// List goals with derived progress
    List,
    /// Record a contribution against a goal
    Contribute {
        /// Goal id (as shown by `goal list`, e.g. goal-1a2b3c4d)
        id: String,
        /// Amount to add
        amount: String,
    },
}

/// Handle goal commands
pub fn handle_goal_command(
    paths: &FintrackPaths,
    settings: &Settings,
    cmd: GoalCommands,
) -> FintrackResult<()> {
    let mut store = GoalStore::load(paths.goals_file())?;

    match cmd {
        GoalCommands::Add {
            description,
            target,
            deadline,
            monthly,
        } => {
            let target = Money::parse(&target)
                .map_err(|e| FintrackError::Validation(e.to_string()))?;
            let deadline = parse_date(&deadline)?;

            let mut goal = Goal::new(description, target, deadline)
                .map_err(|e| FintrackError::Validation(e.to_string()))?;
            if let Some(monthly) = monthly {
                let contribution = Money::parse(&monthly)
                    .map_err(|e| FintrackError::Validation(e.to_string()))?;
                goal = goal
                    .with_monthly_contribution(contribution)
                    .map_err(|e| FintrackError::Validation(e.to_string()))?;
            }

            println!("Created goal {} ({})", goal.description, goal.id);
            store.add(goal);
            store.save()
        }
        GoalCommands::List => {
            println!("{}", goal_table(store.list(), &settings.currency_symbol));
            Ok(())
        }
        GoalCommands::Contribute { id, amount } => {
            let amount = Money::parse(&amount)
                .map_err(|e| FintrackError::Validation(e.to_string()))?;

            let goal_id = store
                .list()
                .iter()
                .find(|g| g.id.to_string() == id || g.id.as_uuid().to_string() == id)
                .map(|g| g.id)
                .ok_or_else(|| FintrackError::goal_not_found(id.clone()))?;

            let goal = store.contribute(goal_id, amount)?;
            println!("{}", goal);
            store.save()
        }
    }
}
