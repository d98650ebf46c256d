//! Derived progress figures for savings goals.

use ftrack_domain::SavingsGoal;

/// Display-ready progress of one goal. Recomputed on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// `100 * progress / cost`, clamped to `[0, 100]`.
    pub percentage: f64,
    /// `cost - progress`; negative once the goal is over-funded.
    pub remaining: f64,
    pub is_completed: bool,
}

/// Aggregate view over all goals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SavingsOverview {
    pub goals: usize,
    pub completed: usize,
    pub total_target: f64,
    pub total_saved: f64,
}

pub struct SavingsService;

impl SavingsService {
    pub fn progress(goal: &SavingsGoal) -> GoalProgress {
        let raw = if goal.cost > 0.0 {
            100.0 * goal.progress / goal.cost
        } else {
            100.0
        };
        GoalProgress {
            percentage: raw.clamp(0.0, 100.0),
            remaining: goal.cost - goal.progress,
            is_completed: goal.is_completed(),
        }
    }

    pub fn overview(goals: &[SavingsGoal]) -> SavingsOverview {
        SavingsOverview {
            goals: goals.len(),
            completed: goals.iter().filter(|goal| goal.is_completed()).count(),
            total_target: goals.iter().map(|goal| goal.cost).sum(),
            total_saved: goals.iter().map(|goal| goal.progress).sum(),
        }
    }
}
