//! Weight trend smoothing and the adaptive maintenance-calorie estimate.
//!
//! Everything here is a pure function over a slice of observations that is
//! already sorted by date. Recency is always measured from the last date in
//! the slice, never from the wall clock.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::EngineError;
use crate::models::config::EngineSettings;
use crate::models::observation::Observation;

/// Energy equivalent of one kilogram of body-mass change.
pub const KCAL_PER_KG: f64 = 7700.0;

/// Default number of points in the trailing weight average.
pub const DEFAULT_TREND_WINDOW: usize = 7;

/// Default length of the recent sub-window, in days.
pub const RECENT_WINDOW_DAYS: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub trend_kg: f64,
}

/// Trailing mean of each point and up to `window_size - 1` predecessors.
/// Partial windows at the start are kept. A size of 0 behaves like 1.
pub fn trend_series(window: &[Observation], window_size: usize) -> Vec<TrendPoint> {
    let size = window_size.max(1);
    window
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let start = (i + 1).saturating_sub(size);
            let trailing = &window[start..=i];
            let sum: f64 = trailing.iter().map(|p| p.weight_kg()).sum();
            TrendPoint {
                date: o.date(),
                weight_kg: o.weight_kg(),
                trend_kg: sum / trailing.len() as f64,
            }
        })
        .collect()
}

/// The smoothed weight at the last point of `window`. Like every estimate,
/// it refuses a window of fewer than two observations.
pub fn rolling_trend(window: &[Observation], window_size: usize) -> Result<f64, EngineError> {
    if window.len() < 2 {
        return Err(EngineError::too_few_observations(2, window.len()));
    }
    let start = window.len().saturating_sub(window_size.max(1));
    let trailing = &window[start..];
    Ok(trailing.iter().map(|o| o.weight_kg()).sum::<f64>() / trailing.len() as f64)
}

/// The trailing `days`-day slice ending at the window's last date, or the
/// whole window when that slice would be empty.
pub fn recent_subwindow(window: &[Observation], days: u32) -> &[Observation] {
    let Some(last) = window.last() else {
        return window;
    };
    let Some(cutoff) = last
        .date()
        .checked_sub_signed(Duration::days(i64::from(days.max(1)) - 1))
    else {
        log::debug!("{}-day span reaches past the calendar, using full window", days);
        return window;
    };
    let start = window.partition_point(|o| o.date() < cutoff);
    let recent = &window[start..];
    if recent.is_empty() {
        log::debug!("no observations since {}, using full window", cutoff);
        window
    } else {
        recent
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceEstimate {
    /// Smoothed weight at the end of the full window.
    pub trend_weight: f64,
    /// Estimated intake at which weight would hold steady.
    pub maintenance_kcal: f64,
    /// Mean logged intake over the recent sub-window.
    pub avg_kcal: f64,
    pub weight_delta_kg: f64,
    pub days: i64,
    /// Daily energy balance implied by the weight change (negative = deficit).
    pub implied_daily_kcal_effect: f64,
    pub start_weight_kg: f64,
    pub current_weight_kg: f64,
    pub recent_from: NaiveDate,
    pub recent_to: NaiveDate,
    pub recent_count: usize,
}

impl MaintenanceEstimate {
    /// Positive for a deficit, negative for a surplus.
    pub fn deficit_for(&self, kcal: f64) -> f64 {
        self.maintenance_kcal - kcal
    }

    pub fn classify(&self, kcal: f64) -> DayBalance {
        if kcal < self.maintenance_kcal {
            DayBalance::Deficit
        } else if kcal > self.maintenance_kcal {
            DayBalance::Surplus
        } else {
            DayBalance::Neutral
        }
    }

    /// The deficit the recent average intake represents, used to project
    /// time to goal at the current pace.
    pub fn average_daily_deficit(&self) -> f64 {
        self.deficit_for(self.avg_kcal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBalance {
    Deficit,
    Surplus,
    Neutral,
}

impl std::fmt::Display for DayBalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deficit => write!(f, "deficit"),
            Self::Surplus => write!(f, "surplus"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayClassification {
    pub date: NaiveDate,
    pub kcal: f64,
    pub deficit: f64,
    pub balance: DayBalance,
}

/// Estimate maintenance calories with the default engine settings.
pub fn estimate_maintenance(window: &[Observation]) -> Result<MaintenanceEstimate, EngineError> {
    estimate_maintenance_with(window, &EngineSettings::default())
}

pub fn estimate_maintenance_with(
    window: &[Observation],
    settings: &EngineSettings,
) -> Result<MaintenanceEstimate, EngineError> {
    if window.len() < 2 {
        return Err(EngineError::too_few_observations(2, window.len()));
    }

    let recent = recent_subwindow(window, settings.recent_days);
    // recent is never empty: it falls back to the non-empty window.
    let (first, last) = match (recent.first(), recent.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(EngineError::too_few_observations(2, 0)),
    };

    let weight_delta_kg = last.weight_kg() - first.weight_kg();
    let days = (last.date() - first.date()).num_days().max(1);
    let avg_kcal = recent.iter().map(|o| o.kcal()).sum::<f64>() / recent.len() as f64;
    let implied_daily_kcal_effect = weight_delta_kg * KCAL_PER_KG / days as f64;
    let maintenance_kcal = avg_kcal - implied_daily_kcal_effect;
    let trend_weight = rolling_trend(window, settings.trend_window)?;

    log::debug!(
        "maintenance {:.0} kcal from {} observations ({} to {})",
        maintenance_kcal,
        recent.len(),
        first.date(),
        last.date()
    );

    Ok(MaintenanceEstimate {
        trend_weight,
        maintenance_kcal,
        avg_kcal,
        weight_delta_kg,
        days,
        implied_daily_kcal_effect,
        start_weight_kg: first.weight_kg(),
        current_weight_kg: last.weight_kg(),
        recent_from: first.date(),
        recent_to: last.date(),
        recent_count: recent.len(),
    })
}

/// Classify every day of `window` against a maintenance estimate.
pub fn classify_days(
    window: &[Observation],
    estimate: &MaintenanceEstimate,
) -> Vec<DayClassification> {
    window
        .iter()
        .map(|o| DayClassification {
            date: o.date(),
            kcal: o.kcal(),
            deficit: estimate.deficit_for(o.kcal()),
            balance: estimate.classify(o.kcal()),
        })
        .collect()
}
