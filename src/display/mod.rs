//! Terminal display formatting
//!
//! Table and chart helpers for the CLI command handlers.

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Goal, Transaction};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Render transactions as a terminal table
pub fn transaction_table(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|txn| TransactionRow {
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            description: txn.description.clone(),
            category: txn.category.clone(),
            amount: txn.signed_amount().format_with_symbol(currency_symbol),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    description: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Render goals as a terminal table with derived progress
pub fn goal_table(goals: &[Goal], currency_symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals yet.".to_string();
    }

    let today = Local::now().date_naive();
    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|goal| GoalRow {
            description: goal.description.clone(),
            target: goal.target_amount.format_with_symbol(currency_symbol),
            saved: goal.current_amount.format_with_symbol(currency_symbol),
            progress: format!(
                "{} {}",
                format_bar(goal.progress(), 100.0, 10),
                format_percentage(goal.progress())
            ),
            deadline: match goal.projected_completion(today) {
                Some(projected) => format!(
                    "{} (proj. {})",
                    goal.deadline.format("%Y-%m-%d"),
                    projected.format("%Y-%m-%d")
                ),
                None => goal.deadline.format("%Y-%m-%d").to_string(),
            },
            status: goal.status.to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.25), "5.2%");
        assert_eq!(format_percentage(42.6), "43%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 100.0, 10), "█████░░░░░");
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_transaction_table_contains_rows() {
        let txns = vec![Transaction::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            TransactionKind::Expense,
            Money::from_cents(5000),
            "Groceries",
            "Food",
        )];
        let table = transaction_table(&txns, "$");
        assert!(table.contains("Groceries"));
        assert!(table.contains("-$50.00"));
    }

    #[test]
    fn test_empty_tables_have_placeholder() {
        assert_eq!(transaction_table(&[], "$"), "No transactions found.");
        assert_eq!(goal_table(&[], "$"), "No goals yet.");
    }
}
