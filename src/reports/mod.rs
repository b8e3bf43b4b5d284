//! Reports module for fintrack
//!
//! The aggregation engine: one pure function per report kind, dispatched
//! once at the API boundary over the closed `ReportKind` enum.

pub mod category;
pub mod comparative;
pub mod evolution;
pub mod patterns;
pub mod summary;
pub mod top;

pub use category::{category_breakdown, CategorySlice};
pub use comparative::{comparative_report, ComparativeReport, PeriodSummary};
pub use evolution::{evolution_series, EvolutionPoint};
pub use patterns::{PatternDetector, PatternSignal, SpendingPatternDetector};
pub use summary::{summarize, MonthlySummary};
pub use top::top_transactions;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::FintrackResult;
use crate::models::{DateRange, Transaction};

/// The closed set of report kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Monthly,
    Category,
    Evolution,
    Top,
    Comparative,
    Patterns,
}

impl ReportKind {
    /// All kinds, in menu order
    pub const ALL: [ReportKind; 6] = [
        Self::Monthly,
        Self::Category,
        Self::Evolution,
        Self::Top,
        Self::Comparative,
        Self::Patterns,
    ];

    /// The lowercase token used in filenames and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Category => "category",
            Self::Evolution => "evolution",
            Self::Top => "top",
            Self::Comparative => "comparative",
            Self::Patterns => "patterns",
        }
    }

    /// Human-readable document title for this kind
    pub fn display_title(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly Summary",
            Self::Category => "Spending by Category",
            Self::Evolution => "Monthly Evolution",
            Self::Top => "Top Transactions",
            Self::Comparative => "Period Comparison",
            Self::Patterns => "Spending Patterns",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "category" => Ok(Self::Category),
            "evolution" => Ok(Self::Evolution),
            "top" => Ok(Self::Top),
            "comparative" => Ok(Self::Comparative),
            "patterns" => Ok(Self::Patterns),
            other => Err(format!("unknown report kind: {}", other)),
        }
    }
}

/// Numeric knobs for the aggregation functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Evolution window, defaults to [`evolution::DEFAULT_MONTHS`]
    pub months: Option<u32>,
    /// Top-N limit, defaults to [`top::DEFAULT_LIMIT`]
    pub limit: Option<u32>,
}

impl ReportOptions {
    /// Validate the numeric options for `kind` without computing anything
    pub fn validate(&self, kind: ReportKind) -> FintrackResult<()> {
        match kind {
            ReportKind::Evolution => {
                evolution::validate_months(self.months.unwrap_or(evolution::DEFAULT_MONTHS))?;
            }
            ReportKind::Top => {
                top::validate_limit(self.limit.unwrap_or(top::DEFAULT_LIMIT))?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// The aggregate of one report, keyed by its kind
#[derive(Debug, Clone)]
pub enum ReportData {
    Monthly(MonthlySummary),
    Category(Vec<CategorySlice>),
    Evolution(Vec<EvolutionPoint>),
    Top(Vec<Transaction>),
    Comparative(ComparativeReport),
    Patterns(Vec<PatternSignal>),
}

impl ReportData {
    /// The kind this aggregate belongs to
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Monthly(_) => ReportKind::Monthly,
            Self::Category(_) => ReportKind::Category,
            Self::Evolution(_) => ReportKind::Evolution,
            Self::Top(_) => ReportKind::Top,
            Self::Comparative(_) => ReportKind::Comparative,
            Self::Patterns(_) => ReportKind::Patterns,
        }
    }
}

/// Build the aggregate for `kind` from an already-filtered ledger slice
///
/// `range` is the resolved reporting period (used by the comparative
/// report); `today` anchors the evolution series. Deterministic and
/// side-effect-free; defined for empty input.
pub fn build_report(
    kind: ReportKind,
    transactions: &[Transaction],
    range: DateRange,
    today: NaiveDate,
    options: &ReportOptions,
    detector: &dyn PatternDetector,
) -> FintrackResult<ReportData> {
    let report = match kind {
        ReportKind::Monthly => ReportData::Monthly(summarize(transactions)),
        ReportKind::Category => ReportData::Category(category_breakdown(transactions)),
        ReportKind::Evolution => ReportData::Evolution(evolution_series(
            transactions,
            options.months.unwrap_or(evolution::DEFAULT_MONTHS),
            today,
        )?),
        ReportKind::Top => ReportData::Top(top_transactions(
            transactions,
            options.limit.unwrap_or(top::DEFAULT_LIMIT),
        )?),
        ReportKind::Comparative => {
            ReportData::Comparative(comparative_report(transactions, range))
        }
        ReportKind::Patterns => ReportData::Patterns(detector.detect(transactions)),
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(
                date(2025, 3, 1),
                TransactionKind::Income,
                Money::from_cents(500000),
                "Salary",
                "Work",
            ),
            Transaction::new(
                date(2025, 3, 2),
                TransactionKind::Expense,
                Money::from_cents(15000),
                "Groceries",
                "Food",
            ),
        ]
    }

    fn build(kind: ReportKind, options: &ReportOptions) -> FintrackResult<ReportData> {
        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap();
        build_report(
            kind,
            &sample(),
            range,
            date(2025, 3, 31),
            options,
            &SpendingPatternDetector::default(),
        )
    }

    #[test]
    fn test_dispatch_matches_kind() {
        for kind in ReportKind::ALL {
            let report = build(kind, &ReportOptions::default()).unwrap();
            assert_eq!(report.kind(), kind);
        }
    }

    #[test]
    fn test_every_kind_is_total_for_empty_input() {
        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap();
        for kind in ReportKind::ALL {
            let report = build_report(
                kind,
                &[],
                range,
                date(2025, 3, 31),
                &ReportOptions::default(),
                &SpendingPatternDetector::default(),
            );
            assert!(report.is_ok(), "{:?}", kind);
        }
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in ReportKind::ALL {
            assert_eq!(kind.as_str().parse::<ReportKind>().unwrap(), kind);
        }
        assert!("weekly".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_options_validate_eagerly() {
        let options = ReportOptions {
            months: Some(99),
            limit: None,
        };
        assert!(options.validate(ReportKind::Evolution).is_err());
        // Out-of-range months are irrelevant to other kinds
        assert!(options.validate(ReportKind::Monthly).is_ok());
    }
}
