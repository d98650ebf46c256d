//! Savings goals and the contributions recorded against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

/// Target amount the user is saving toward, with its contribution history.
///
/// `progress` always equals the sum of `contributions[*].amount`; use
/// [`SavingsGoal::append_contribution`] to keep the two in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub item_name: String,
    pub cost: f64,
    pub target_months: u32,
    /// Locked in at creation; contributions never change it.
    pub monthly_saving_required: f64,
    pub progress: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub contributions: Vec<SavingsContribution>,
}

impl SavingsGoal {
    pub fn is_completed(&self) -> bool {
        self.progress >= self.cost
    }

    /// Sum of every recorded contribution.
    pub fn contributed_total(&self) -> f64 {
        self.contributions.iter().map(|entry| entry.amount).sum()
    }

    pub fn append_contribution(&mut self, contribution: SavingsContribution) {
        self.contributions.push(contribution);
        self.progress = self.contributed_total();
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for SavingsGoal {
    fn display_label(&self) -> String {
        format!("{} ({} months)", self.item_name, self.target_months)
    }
}

/// A single deposit toward a savings goal. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsContribution {
    pub id: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl SavingsContribution {
    pub fn new(id: String, amount: f64, date: DateTime<Utc>) -> Self {
        Self { id, amount, date }
    }
}

impl Amounted for SavingsContribution {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// User-supplied goal fields, before the store assigns `id`, `createdAt`, `progress`
/// and `contributions`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    pub item_name: String,
    pub cost: f64,
    pub target_months: u32,
    pub monthly_saving_required: f64,
}

impl NewSavingsGoal {
    /// Builds a goal request, deriving `monthly_saving_required = cost / target_months`.
    ///
    /// A zero month count is treated as one month so the derived value stays finite.
    pub fn new(item_name: impl Into<String>, cost: f64, target_months: u32) -> Self {
        Self {
            item_name: item_name.into(),
            cost,
            target_months,
            monthly_saving_required: cost / f64::from(target_months.max(1)),
        }
    }

    pub fn into_goal(self, id: String, created_at: DateTime<Utc>) -> SavingsGoal {
        SavingsGoal {
            id,
            item_name: self.item_name,
            cost: self.cost,
            target_months: self.target_months,
            monthly_saving_required: self.monthly_saving_required,
            progress: 0.0,
            created_at,
            contributions: Vec::new(),
        }
    }
}

/// Partial update merged into an existing goal.
///
/// Progress and contributions are deliberately absent: they only change through
/// contributions. Changing `cost` or `target_months` leaves the locked-in monthly
/// target alone unless `monthly_saving_required` is also supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsGoalPatch {
    pub item_name: Option<String>,
    pub cost: Option<f64>,
    pub target_months: Option<u32>,
    pub monthly_saving_required: Option<f64>,
}

impl SavingsGoalPatch {
    pub fn apply(self, goal: &mut SavingsGoal) {
        if let Some(name) = self.item_name {
            goal.item_name = name;
        }
        if let Some(cost) = self.cost {
            goal.cost = cost;
        }
        if let Some(months) = self.target_months {
            goal.target_months = months;
        }
        if let Some(monthly) = self.monthly_saving_required {
            goal.monthly_saving_required = monthly;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> SavingsGoal {
        NewSavingsGoal::new("Laptop", 1200.0, 6).into_goal("goal-1".into(), Utc::now())
    }

    #[test]
    fn new_goal_derives_monthly_target() {
        let goal = laptop();
        assert_eq!(goal.monthly_saving_required, 200.0);
        assert_eq!(goal.progress, 0.0);
        assert!(goal.contributions.is_empty());
        assert!(!goal.is_completed());
    }

    #[test]
    fn appending_contribution_updates_progress() {
        let mut goal = laptop();
        goal.append_contribution(SavingsContribution::new("c1".into(), 700.0, Utc::now()));
        goal.append_contribution(SavingsContribution::new("c2".into(), 500.0, Utc::now()));
        assert_eq!(goal.progress, goal.contributed_total());
        assert_eq!(goal.progress, 1200.0);
        assert!(goal.is_completed());
        assert_eq!(goal.monthly_saving_required, 200.0);
    }

    #[test]
    fn zero_months_does_not_divide_by_zero() {
        let request = NewSavingsGoal::new("Bike", 300.0, 0);
        assert_eq!(request.monthly_saving_required, 300.0);
    }

    #[test]
    fn serialized_goal_uses_camel_case() {
        let json = serde_json::to_value(laptop()).unwrap();
        assert_eq!(json["itemName"], "Laptop");
        assert_eq!(json["targetMonths"], 6);
        assert_eq!(json["monthlySavingRequired"], 200.0);
        assert!(json["contributions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn patch_keeps_locked_monthly_target() {
        let mut goal = laptop();
        SavingsGoalPatch {
            cost: Some(1800.0),
            ..SavingsGoalPatch::default()
        }
        .apply(&mut goal);
        assert_eq!(goal.cost, 1800.0);
        assert_eq!(goal.monthly_saving_required, 200.0);
    }
}
