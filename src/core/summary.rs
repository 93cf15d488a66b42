use chrono::NaiveDate;
use serde::Serialize;

use crate::core::monthly::{self, MonthlyComparison};
use crate::core::projection::{self, GoalProgress};
use crate::core::trend::{self, DayClassification, MaintenanceEstimate, TrendPoint};
use crate::error::EngineError;
use crate::models::config::EngineSettings;
use crate::models::goal::Goal;
use crate::models::observation::ObservationSeries;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub observations: usize,
    pub trend_weight: f64,
    pub maintenance: MaintenanceEstimate,
    /// The last day in range, classified against the estimate.
    pub latest: DayClassification,
    /// `None` when the range covers fewer than two months.
    pub monthly: Option<MonthlyComparison>,
    pub goals: Vec<GoalProgress>,
    pub trend: Vec<TrendPoint>,
    pub days: Vec<DayClassification>,
}

/// Everything the progress view needs for one date range.
///
/// The whole series must hold at least two observations, and so must the
/// selected range. Open bounds default to the first/last observed dates.
pub fn summarize(
    series: &ObservationSeries,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    goals: &[Goal],
    settings: &EngineSettings,
) -> Result<Summary, EngineError> {
    let (Some(series_first), Some(series_last)) = (series.first(), series.last()) else {
        return Err(EngineError::too_few_observations(2, 0));
    };
    if series.len() < 2 {
        return Err(EngineError::too_few_observations(2, series.len()));
    }
    let window = series.window(from, to);
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return Err(EngineError::EmptyWindow {
            from: from.unwrap_or(series_first.date()),
            to: to.unwrap_or(series_last.date()),
        });
    };

    let estimate = trend::estimate_maintenance_with(window, settings)?;
    let days = trend::classify_days(window, &estimate);
    let latest = DayClassification {
        date: last.date(),
        kcal: last.kcal(),
        deficit: estimate.deficit_for(last.kcal()),
        balance: estimate.classify(last.kcal()),
    };
    let monthly = match monthly::monthly_comparison(window) {
        Ok(m) => Some(m),
        Err(e) if e.is_insufficient_data() => None,
        Err(e) => return Err(e),
    };
    let goals = projection::goal_progress(&estimate, goals, None);

    Ok(Summary {
        from: from.unwrap_or(first.date()),
        to: to.unwrap_or(last.date()),
        observations: window.len(),
        trend_weight: estimate.trend_weight,
        maintenance: estimate,
        latest,
        monthly,
        goals,
        trend: trend::trend_series(window, settings.trend_window),
        days,
    })
}
