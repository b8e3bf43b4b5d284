//! Report period representation
//!
//! Resolves a symbolic period selection (current month, last month, trailing
//! windows, current year) or an explicit custom range into a concrete
//! inclusive date range.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FintrackError, FintrackResult};

/// A concrete inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting inverted bounds
    pub fn new(start: NaiveDate, end: NaiveDate) -> FintrackResult<Self> {
        if end < start {
            return Err(FintrackError::Validation(format!(
                "End date {} is before start date {}",
                end.format("%Y-%m-%d"),
                start.format("%Y-%m-%d")
            )));
        }
        Ok(Self { start, end })
    }

    /// Check if a date falls within this range (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, inclusive
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The adjacent range of equal length immediately before this one
    pub fn preceding(&self) -> Self {
        let span = self.end - self.start;
        let end = self.start - Duration::days(1);
        Self { start: end - span, end }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// A user-selected reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum ReportPeriod {
    /// From the 1st of the current month through today
    CurrentMonth,
    /// The full previous calendar month
    LastMonth,
    /// Rolling three-month window ending today
    Last3Months,
    /// Rolling six-month window ending today
    Last6Months,
    /// From January 1st through today
    CurrentYear,
    /// Explicit inclusive range
    Custom { start: NaiveDate, end: NaiveDate },
}

impl ReportPeriod {
    /// Parse a symbolic period key
    pub fn from_key(key: &str) -> FintrackResult<Self> {
        match key.trim().to_lowercase().as_str() {
            "current-month" => Ok(Self::CurrentMonth),
            "last-month" => Ok(Self::LastMonth),
            "last-3-months" => Ok(Self::Last3Months),
            "last-6-months" => Ok(Self::Last6Months),
            "current-year" => Ok(Self::CurrentYear),
            other => Err(FintrackError::Validation(format!(
                "Unknown period key: {}",
                other
            ))),
        }
    }

    /// Build a custom period from day/month/year strings
    ///
    /// Both endpoints are required and must be valid calendar dates;
    /// the end date must not precede the start date.
    pub fn custom(start: &str, end: &str) -> FintrackResult<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        let range = DateRange::new(start, end)?;
        Ok(Self::Custom {
            start: range.start,
            end: range.end,
        })
    }

    /// Resolve this period into a concrete inclusive range, relative to `today`
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::CurrentMonth => DateRange {
                start: today.with_day(1).unwrap(),
                end: today,
            },
            Self::LastMonth => {
                let (year, month) = if today.month() == 1 {
                    (today.year() - 1, 12)
                } else {
                    (today.year(), today.month() - 1)
                };
                DateRange {
                    start: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
                    end: today.with_day(1).unwrap() - Duration::days(1),
                }
            }
            Self::Last3Months => rolling_window(today, 3),
            Self::Last6Months => rolling_window(today, 6),
            Self::CurrentYear => DateRange {
                start: NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap(),
                end: today,
            },
            Self::Custom { start, end } => DateRange {
                start: *start,
                end: *end,
            },
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentMonth => write!(f, "current month"),
            Self::LastMonth => write!(f, "last month"),
            Self::Last3Months => write!(f, "last 3 months"),
            Self::Last6Months => write!(f, "last 6 months"),
            Self::CurrentYear => write!(f, "current year"),
            Self::Custom { start, end } => write!(
                f,
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

fn rolling_window(today: NaiveDate, months: u32) -> DateRange {
    DateRange {
        start: today.checked_sub_months(Months::new(months)).unwrap(),
        end: today,
    }
}

/// Parse a `DD/MM/YYYY` date string
///
/// The day/month/year combination must survive an exact round trip through
/// calendar construction, so e.g. 30/02/2025 is rejected.
pub fn parse_date(s: &str) -> FintrackResult<NaiveDate> {
    let invalid = || FintrackError::Validation(format!("Invalid date: {}", s));

    let parts: Vec<&str> = s.trim().split('/').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let day: u32 = parts[0].parse().map_err(|_| invalid())?;
    let month: u32 = parts[1].parse().map_err(|_| invalid())?;
    let year: i32 = parts[2].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        FintrackError::Validation(format!("Invalid calendar date: {}", s.trim()))
    })
}

/// The inclusive range covering a single calendar month
pub fn month_range(year: i32, month: u32) -> DateRange {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    DateRange {
        start,
        end: next.unwrap() - Duration::days(1),
    }
}
