use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::units::round2;
use crate::error::EngineError;
use crate::models::observation::Observation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    /// `YYYY-MM`
    pub label: String,
    pub mean_weight: f64,
    pub mean_kcal: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyDelta {
    pub from: String,
    pub to: String,
    pub weight_delta: f64,
    pub kcal_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyComparison {
    pub buckets: Vec<MonthlyBucket>,
    pub deltas: Vec<MonthlyDelta>,
}

/// Group by calendar month of each observation's own date. Means are rounded
/// to 2 decimals; buckets come out in chronological order.
pub fn monthly_buckets(window: &[Observation]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<(i32, u32), (f64, f64, u32)> = BTreeMap::new();
    for o in window {
        let key = (o.date().year(), o.date().month());
        let entry = buckets.entry(key).or_insert((0.0, 0.0, 0));
        entry.0 += o.weight_kg();
        entry.1 += o.kcal();
        entry.2 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), (weight_sum, kcal_sum, count))| MonthlyBucket {
            year,
            month,
            label: format!("{:04}-{:02}", year, month),
            mean_weight: round2(weight_sum / count as f64),
            mean_kcal: round2(kcal_sum / count as f64),
            count,
        })
        .collect()
}

/// Month-over-month deltas between consecutive buckets. Needs at least two
/// months with data.
pub fn monthly_comparison(window: &[Observation]) -> Result<MonthlyComparison, EngineError> {
    let buckets = monthly_buckets(window);
    if buckets.len() < 2 {
        return Err(EngineError::InsufficientData {
            what: "months with data",
            needed: 2,
            found: buckets.len(),
        });
    }

    let deltas = buckets
        .windows(2)
        .map(|pair| MonthlyDelta {
            from: pair[0].label.clone(),
            to: pair[1].label.clone(),
            // Both sides already carry 2 decimals; rounding drops float noise.
            weight_delta: round2(pair[1].mean_weight - pair[0].mean_weight),
            kcal_delta: round2(pair[1].mean_kcal - pair[0].mean_kcal),
        })
        .collect();

    Ok(MonthlyComparison { buckets, deltas })
}
