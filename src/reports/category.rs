//! Category breakdown aggregation
//!
//! Groups transactions by category and reports each group's total and share
//! of the overall amount.

use std::collections::HashMap;

use crate::models::{Money, Transaction};

/// One category's share of the filtered total
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub total: Money,
    pub percentage: f64,
}

/// Group transactions by category, largest total first
///
/// Percentages are relative to the overall total of the input; ties are
/// broken by category name ascending. Empty input yields an empty list.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let mut totals: HashMap<&str, Money> = HashMap::new();
    for txn in transactions {
        *totals.entry(txn.category.as_str()).or_insert(Money::zero()) += txn.amount;
    }

    let overall: Money = totals.values().copied().sum();

    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(category, total)| CategorySlice {
            category: category.to_string(),
            total,
            percentage: total.percent_of(overall),
        })
        .collect();

    slices.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn expense(cents: i64, category: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            TransactionKind::Expense,
            Money::from_cents(cents),
            "Something",
            category,
        )
    }

    #[test]
    fn test_groups_and_sorts_descending() {
        let txns = vec![
            expense(1000, "Food"),
            expense(5000, "Rent"),
            expense(2000, "Food"),
        ];

        let slices = category_breakdown(&txns);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, "Rent");
        assert_eq!(slices[0].total, Money::from_cents(5000));
        assert_eq!(slices[1].category, "Food");
        assert_eq!(slices[1].total, Money::from_cents(3000));
    }

    #[test]
    fn test_group_totals_sum_to_overall() {
        let txns = vec![
            expense(1250, "Food"),
            expense(3750, "Rent"),
            expense(5000, "Travel"),
        ];

        let slices = category_breakdown(&txns);
        let total: Money = slices.iter().map(|s| s.total).sum();
        assert_eq!(total, Money::from_cents(10000));
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let txns = vec![
            expense(999, "A"),
            expense(1501, "B"),
            expense(7500, "C"),
        ];

        let slices = category_breakdown(&txns);
        let pct_sum: f64 = slices.iter().map(|s| s.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_broken_by_name_ascending() {
        let txns = vec![
            expense(1000, "Zoo"),
            expense(1000, "Aquarium"),
        ];

        let slices = category_breakdown(&txns);
        assert_eq!(slices[0].category, "Aquarium");
        assert_eq!(slices[1].category, "Zoo");
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(category_breakdown(&[]).is_empty());
    }
}
