use chrono::NaiveDate;

use crate::models::observation::{Observation, ObservationSeries};

/// Observations in `from..=to`, optionally limited to the most recent `last`.
pub fn history(
    series: &ObservationSeries,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    last: Option<usize>,
) -> Vec<Observation> {
    let window = series.window(from, to);
    let start = match last {
        Some(n) => window.len().saturating_sub(n),
        None => 0,
    };
    window[start..].to_vec()
}
