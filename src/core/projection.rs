use serde::Serialize;

use crate::core::trend::{KCAL_PER_KG, MaintenanceEstimate};
use crate::models::goal::Goal;

/// Fraction of the way from `start` to `goal`, clamped to `[0, 1]`.
///
/// Works for both loss and gain goals. Moving away from the goal reports 0,
/// overshooting reports 1. A goal equal to the start weight counts as done.
pub fn progress_fraction(start_weight: f64, current_weight: f64, goal_weight: f64) -> f64 {
    if current_weight == goal_weight || start_weight == goal_weight {
        return 1.0;
    }
    ((start_weight - current_weight) / (start_weight - goal_weight)).clamp(0.0, 1.0)
}

/// Outcome of a time-to-goal projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "days", rename_all = "snake_case")]
pub enum Projection {
    /// Days remaining at the given daily deficit. Never negative.
    Days(f64),
    /// Zero deficit: weight is not moving, so no estimate exists.
    Undefined,
}

impl Projection {
    pub fn days(&self) -> Option<f64> {
        match self {
            Self::Days(d) => Some(*d),
            Self::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

/// Days until `goal_weight` at a constant `daily_deficit` (kcal/day,
/// positive = deficit). A projection pointing backwards reports 0 days.
pub fn days_to_goal(current_weight: f64, goal_weight: f64, daily_deficit: f64) -> Projection {
    if daily_deficit == 0.0 {
        return Projection::Undefined;
    }
    let kg_remaining = current_weight - goal_weight;
    let days = kg_remaining * KCAL_PER_KG / daily_deficit;
    Projection::Days(days.max(0.0))
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub label: String,
    pub target_weight_kg: f64,
    pub start_weight_kg: f64,
    pub current_weight_kg: f64,
    pub progress: f64,
    pub is_met: bool,
    pub daily_deficit: f64,
    pub days_to_goal: Projection,
}

/// Progress toward each goal, measured over the estimate's recent sub-window.
///
/// `daily_deficit` overrides the deficit used for the projection; by default
/// it is the deficit implied by the recent average intake.
pub fn goal_progress(
    estimate: &MaintenanceEstimate,
    goals: &[Goal],
    daily_deficit: Option<f64>,
) -> Vec<GoalProgress> {
    let deficit = daily_deficit.unwrap_or_else(|| estimate.average_daily_deficit());
    goals
        .iter()
        .map(|g| {
            let progress = progress_fraction(
                estimate.start_weight_kg,
                estimate.current_weight_kg,
                g.target_weight_kg,
            );
            GoalProgress {
                label: g.label.clone(),
                target_weight_kg: g.target_weight_kg,
                start_weight_kg: estimate.start_weight_kg,
                current_weight_kg: estimate.current_weight_kg,
                progress,
                is_met: progress >= 1.0,
                daily_deficit: deficit,
                days_to_goal: days_to_goal(estimate.current_weight_kg, g.target_weight_kg, deficit),
            }
        })
        .collect()
}
