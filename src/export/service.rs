//! Export pipeline
//!
//! One sequential pipeline per request: validate the config, resolve the
//! period, fetch and filter the ledger, aggregate, render. Validation and
//! config checks run before any ledger or renderer work; services hold no
//! mutable state and are reentrant.

use chrono::{Datelike, Local, Months, NaiveDate};

use crate::error::FintrackResult;
use crate::ledger::{Ledger, LedgerFilter};
use crate::models::period::month_range;
use crate::models::{DateRange, ReportPeriod, TransactionKind, UserId};
use crate::reports::{
    build_report, evolution, PatternDetector, ReportKind, ReportOptions, SpendingPatternDetector,
};

use super::config::{ExportConfig, ExportDocumentOptions, ExportFilters, RawExportFilters};
use super::renderer::{DocumentRenderer, ExportArtifact, ExportContent};

/// Options for a report export
#[derive(Debug, Clone, Default)]
pub struct ReportExportOptions {
    /// Reporting period; defaults to the current month
    pub period: Option<ReportPeriod>,
    /// Restrict the ledger view to one transaction kind
    pub kind: Option<TransactionKind>,
    /// Evolution window override
    pub months: Option<u32>,
    /// Top-N limit override
    pub limit: Option<u32>,
    pub include_charts: bool,
    pub include_summary: bool,
    /// Document title override
    pub title: Option<String>,
}

/// Drives exports over a ledger and a document renderer
pub struct ExportService<L, R> {
    ledger: L,
    renderer: R,
    detector: Box<dyn PatternDetector>,
}

impl<L: Ledger, R: DocumentRenderer> ExportService<L, R> {
    /// Create a service with the default pattern detector
    pub fn new(ledger: L, renderer: R) -> Self {
        Self {
            ledger,
            renderer,
            detector: Box::new(SpendingPatternDetector::default()),
        }
    }

    /// Swap in a custom pattern detection strategy
    pub fn with_detector(mut self, detector: Box<dyn PatternDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Export a user's filtered transaction list
    pub fn export_transactions(
        &self,
        user: UserId,
        raw_filters: &RawExportFilters,
        include_summary: bool,
    ) -> FintrackResult<ExportArtifact> {
        let config = ExportConfig::transactions(raw_filters, include_summary)?;

        let transactions = self
            .ledger
            .fetch(user, &config.filters().ledger_filter())?;

        self.renderer
            .render(ExportContent::Transactions(&transactions), &config)
    }

    /// Export a computed report for a user
    pub fn export_report(
        &self,
        user: UserId,
        kind: ReportKind,
        options: &ReportExportOptions,
    ) -> FintrackResult<ExportArtifact> {
        let report_options = ReportOptions {
            months: options.months,
            limit: options.limit,
        };
        report_options.validate(kind)?;

        let today = Local::now().date_naive();
        let period = options.period.unwrap_or(ReportPeriod::CurrentMonth);
        let range = period.resolve(today);

        let config = ExportConfig::report(
            Some(kind),
            ExportFilters {
                start_date: Some(range.start),
                end_date: Some(range.end),
                kind: options.kind,
            },
            ExportDocumentOptions {
                include_charts: options.include_charts,
                include_summary: options.include_summary,
                title: options.title.clone(),
            },
        )?;

        let mut filter =
            LedgerFilter::new().date_range(fetch_window(kind, range, today, options.months));
        if let Some(txn_kind) = options.kind {
            filter = filter.kind(txn_kind);
        }
        let transactions = self.ledger.fetch(user, &filter)?;

        let data = build_report(
            kind,
            &transactions,
            range,
            today,
            &report_options,
            self.detector.as_ref(),
        )?;

        self.renderer.render(ExportContent::Report(&data), &config)
    }
}

/// The ledger window a report kind actually needs
///
/// Comparative reports read the preceding window too; evolution reads the
/// whole trailing-month span. Everything else sticks to the resolved period.
fn fetch_window(
    kind: ReportKind,
    range: DateRange,
    today: NaiveDate,
    months: Option<u32>,
) -> DateRange {
    match kind {
        ReportKind::Comparative => DateRange {
            start: range.preceding().start,
            end: range.end,
        },
        ReportKind::Evolution => {
            let months = months.unwrap_or(evolution::DEFAULT_MONTHS);
            let first = today
                .with_day(1)
                .unwrap()
                .checked_sub_months(Months::new(months - 1))
                .unwrap();
            DateRange {
                start: month_range(first.year(), first.month()).start,
                end: today,
            }
        }
        _ => range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FintrackError;
    use crate::ledger::MemoryLedger;
    use crate::models::{Money, Transaction};
    use crate::reports::ReportData;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    /// Renderer that records the aggregate it was handed
    #[derive(Clone, Default)]
    struct CapturingRenderer {
        seen: Rc<RefCell<Option<ReportData>>>,
    }

    impl DocumentRenderer for CapturingRenderer {
        fn render(
            &self,
            content: ExportContent<'_>,
            config: &ExportConfig,
        ) -> FintrackResult<ExportArtifact> {
            if let ExportContent::Report(data) = content {
                *self.seen.borrow_mut() = Some(data.clone());
            }
            Ok(ExportArtifact {
                filename: config.filename(),
                filepath: PathBuf::from("/dev/null"),
                pages: 1,
                size_bytes: 0,
                transaction_count: content.transaction_count(),
                summary: None,
            })
        }
    }

    struct FailingRenderer;

    impl DocumentRenderer for FailingRenderer {
        fn render(
            &self,
            _content: ExportContent<'_>,
            _config: &ExportConfig,
        ) -> FintrackResult<ExportArtifact> {
            Err(FintrackError::Render("disk full".to_string()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(d: chrono::NaiveDate, kind: TransactionKind, cents: i64) -> Transaction {
        Transaction::new(d, kind, Money::from_cents(cents), "Entry", "General")
    }

    fn seeded_ledger(user: UserId) -> MemoryLedger {
        let today = Local::now().date_naive();
        MemoryLedger::new().with_transactions(
            user,
            vec![
                txn(today, TransactionKind::Income, 500000),
                txn(today, TransactionKind::Expense, 43000),
            ],
        )
    }

    #[test]
    fn test_export_transactions_counts_entries() {
        let user = UserId::new();
        let service = ExportService::new(seeded_ledger(user), CapturingRenderer::default());

        let artifact = service
            .export_transactions(user, &RawExportFilters::default(), true)
            .unwrap();
        assert_eq!(artifact.transaction_count, Some(2));
        assert!(artifact.filename.starts_with("transactions_all_"));
    }

    #[test]
    fn test_invalid_options_fail_before_ledger_access() {
        // The ledger has no entry for this user; a NotFound here would mean
        // the fetch ran before validation.
        let service = ExportService::new(MemoryLedger::new(), CapturingRenderer::default());

        let err = service
            .export_report(
                UserId::new(),
                ReportKind::Evolution,
                &ReportExportOptions {
                    months: Some(99),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_monthly_report_aggregates_fetched_ledger() {
        let user = UserId::new();
        let renderer = CapturingRenderer::default();
        let seen = renderer.seen.clone();
        let service = ExportService::new(seeded_ledger(user), renderer);

        service
            .export_report(user, ReportKind::Monthly, &ReportExportOptions::default())
            .unwrap();

        let seen_ref = seen.borrow();
        match seen_ref.as_ref().unwrap() {
            ReportData::Monthly(summary) => {
                assert_eq!(summary.total_income, Money::from_cents(500000));
                assert_eq!(summary.total_expense, Money::from_cents(43000));
                assert_eq!(summary.balance, Money::from_cents(457000));
            }
            other => panic!("expected monthly data, got {:?}", other),
        }
    }

    #[test]
    fn test_comparative_report_sees_previous_window() {
        let user = UserId::new();
        let current = DateRange {
            start: date(2025, 3, 1),
            end: date(2025, 3, 31),
        };
        let ledger = MemoryLedger::new().with_transactions(
            user,
            vec![
                // Only the previous window holds data
                txn(date(2025, 2, 10), TransactionKind::Income, 80000),
            ],
        );

        let renderer = CapturingRenderer::default();
        let seen = renderer.seen.clone();
        let service = ExportService::new(ledger, renderer);

        service
            .export_report(
                user,
                ReportKind::Comparative,
                &ReportExportOptions {
                    period: Some(ReportPeriod::Custom {
                        start: current.start,
                        end: current.end,
                    }),
                    ..Default::default()
                },
            )
            .unwrap();

        let seen_ref = seen.borrow();
        match seen_ref.as_ref().unwrap() {
            ReportData::Comparative(report) => {
                assert_eq!(
                    report.previous.summary.total_income,
                    Money::from_cents(80000)
                );
                assert_eq!(report.current.summary.count, 0);
            }
            other => panic!("expected comparative data, got {:?}", other),
        }
    }

    #[test]
    fn test_evolution_report_has_requested_months() {
        let user = UserId::new();
        let renderer = CapturingRenderer::default();
        let seen = renderer.seen.clone();
        let service = ExportService::new(seeded_ledger(user), renderer);

        service
            .export_report(
                user,
                ReportKind::Evolution,
                &ReportExportOptions {
                    months: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();

        let seen_ref = seen.borrow();
        match seen_ref.as_ref().unwrap() {
            ReportData::Evolution(points) => assert_eq!(points.len(), 3),
            other => panic!("expected evolution data, got {:?}", other),
        }
    }

    #[test]
    fn test_render_errors_propagate_without_artifact() {
        let user = UserId::new();
        let service = ExportService::new(seeded_ledger(user), FailingRenderer);

        let err = service
            .export_transactions(user, &RawExportFilters::default(), false)
            .unwrap_err();
        assert!(matches!(err, FintrackError::Render(_)));
    }

    #[test]
    fn test_unknown_user_propagates_not_found() {
        let service = ExportService::new(MemoryLedger::new(), CapturingRenderer::default());
        let err = service
            .export_transactions(UserId::new(), &RawExportFilters::default(), false)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
