//! Savings goal model
//!
//! Tracks a savings target with an optional monthly contribution plan.
//! Progress and projected completion are always derived from the stored
//! amounts, never persisted.

use chrono::{DateTime, Local, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// Lifecycle status of a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub description: String,
    pub target_amount: Money,
    pub current_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_contribution: Option<Money>,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal, validating eagerly
    ///
    /// The target must be positive and the deadline strictly in the future.
    pub fn new(
        description: impl Into<String>,
        target_amount: Money,
        deadline: NaiveDate,
    ) -> Result<Self, GoalValidationError> {
        let today = Local::now().date_naive();
        Self::validate_new(target_amount, Money::zero(), deadline, today)?;

        let now = Utc::now();
        Ok(Self {
            id: GoalId::new(),
            description: description.into(),
            target_amount,
            current_amount: Money::zero(),
            monthly_contribution: None,
            deadline,
            status: GoalStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attach a monthly contribution plan
    pub fn with_monthly_contribution(
        mut self,
        contribution: Money,
    ) -> Result<Self, GoalValidationError> {
        if !contribution.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution);
        }
        self.monthly_contribution = Some(contribution);
        Ok(self)
    }

    fn validate_new(
        target: Money,
        current: Money,
        deadline: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), GoalValidationError> {
        if !target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if current.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        if deadline <= today {
            return Err(GoalValidationError::DeadlineNotFuture(deadline));
        }
        Ok(())
    }

    /// Fraction of the target reached, as a percentage in [0, 100]
    pub fn progress(&self) -> f64 {
        self.current_amount.percent_of(self.target_amount).min(100.0)
    }

    /// Amount still missing (zero once the target is reached)
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// Projected completion date under the monthly contribution plan
    ///
    /// `None` when no positive contribution is configured; `Some(today)` once
    /// the target has already been reached.
    pub fn projected_completion(&self, today: NaiveDate) -> Option<NaiveDate> {
        if self.remaining().is_zero() {
            return Some(today);
        }

        let contribution = self.monthly_contribution.filter(|c| c.is_positive())?;
        let months =
            (self.remaining().cents() as f64 / contribution.cents() as f64).ceil() as u32;
        today.checked_add_months(Months::new(months))
    }

    /// Record a contribution; the goal completes when the target is reached
    pub fn add_contribution(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution);
        }
        if self.status != GoalStatus::Active {
            return Err(GoalValidationError::NotActive(self.status));
        }

        self.current_amount += amount;
        if self.current_amount >= self.target_amount {
            self.status = GoalStatus::Completed;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancel the goal
    pub fn cancel(&mut self) {
        self.status = GoalStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Whether the deadline has passed without completion
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == GoalStatus::Active && today > self.deadline
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} ({:.1}%)",
            self.description,
            self.current_amount,
            self.target_amount,
            self.progress()
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    NonPositiveTarget,
    NegativeCurrent,
    DeadlineNotFuture(NaiveDate),
    NonPositiveContribution,
    NotActive(GoalStatus),
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveTarget => write!(f, "Goal target amount must be positive"),
            Self::NegativeCurrent => write!(f, "Goal current amount cannot be negative"),
            Self::DeadlineNotFuture(d) => {
                write!(f, "Goal deadline {} must be in the future", d.format("%Y-%m-%d"))
            }
            Self::NonPositiveContribution => write!(f, "Contribution must be positive"),
            Self::NotActive(status) => {
                write!(f, "Goal is {} and no longer accepts contributions", status)
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn future_deadline() -> NaiveDate {
        Local::now().date_naive() + Duration::days(90)
    }

    #[test]
    fn test_new_goal() {
        let goal = Goal::new("Vacation", Money::from_cents(100000), future_deadline()).unwrap();
        assert_eq!(goal.status, GoalStatus::Active);
        assert!(goal.current_amount.is_zero());
        assert_eq!(goal.progress(), 0.0);
    }

    #[test]
    fn test_rejects_past_deadline() {
        let yesterday = Local::now().date_naive() - Duration::days(1);
        assert!(matches!(
            Goal::new("Too late", Money::from_cents(1000), yesterday),
            Err(GoalValidationError::DeadlineNotFuture(_))
        ));

        // Today is not strictly future either
        let today = Local::now().date_naive();
        assert!(Goal::new("Today", Money::from_cents(1000), today).is_err());
    }

    #[test]
    fn test_rejects_non_positive_target() {
        assert_eq!(
            Goal::new("Empty", Money::zero(), future_deadline()).unwrap_err(),
            GoalValidationError::NonPositiveTarget
        );
    }

    #[test]
    fn test_contribution_completes_goal() {
        let mut goal = Goal::new("Bike", Money::from_cents(50000), future_deadline()).unwrap();

        goal.add_contribution(Money::from_cents(20000)).unwrap();
        assert_eq!(goal.status, GoalStatus::Active);
        assert!((goal.progress() - 40.0).abs() < 1e-9);

        goal.add_contribution(Money::from_cents(30000)).unwrap();
        assert_eq!(goal.status, GoalStatus::Completed);
        assert_eq!(goal.progress(), 100.0);
        assert!(goal.remaining().is_zero());
    }

    #[test]
    fn test_cancelled_goal_rejects_contributions() {
        let mut goal = Goal::new("Car", Money::from_cents(100000), future_deadline()).unwrap();
        goal.cancel();
        assert!(matches!(
            goal.add_contribution(Money::from_cents(100)),
            Err(GoalValidationError::NotActive(GoalStatus::Cancelled))
        ));
    }

    #[test]
    fn test_projected_completion() {
        let today = Local::now().date_naive();
        let goal = Goal::new("Laptop", Money::from_cents(120000), today + Duration::days(400))
            .unwrap()
            .with_monthly_contribution(Money::from_cents(50000))
            .unwrap();

        // 120000 / 50000 rounds up to 3 months
        let projected = goal.projected_completion(today).unwrap();
        assert_eq!(projected, today.checked_add_months(Months::new(3)).unwrap());
    }

    #[test]
    fn test_projection_requires_contribution_plan() {
        let goal = Goal::new("No plan", Money::from_cents(1000), future_deadline()).unwrap();
        assert!(goal
            .projected_completion(Local::now().date_naive())
            .is_none());
    }

    #[test]
    fn test_progress_caps_at_100() {
        let mut goal = Goal::new("Small", Money::from_cents(1000), future_deadline()).unwrap();
        goal.add_contribution(Money::from_cents(2500)).unwrap();
        assert_eq!(goal.progress(), 100.0);
    }

    #[test]
    fn test_serialization() {
        let goal = Goal::new("Vacation", Money::from_cents(100000), future_deadline()).unwrap();
        let json = serde_json::to_string(&goal).unwrap();
        let deserialized: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(goal.id, deserialized.id);
        assert_eq!(goal.target_amount, deserialized.target_amount);
        assert_eq!(goal.status, deserialized.status);
    }
}
