use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::EngineError;

/// One day's weigh-in and logged intake.
///
/// Fields are private so every value in circulation has passed through
/// [`Observation::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    date: NaiveDate,
    weight_kg: f64,
    kcal: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, weight_kg: f64, kcal: f64) -> Result<Self, EngineError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(EngineError::InvalidObservation(format!(
                "weight must be positive, got {} on {}",
                weight_kg, date
            )));
        }
        if !kcal.is_finite() || kcal < 0.0 {
            return Err(EngineError::InvalidObservation(format!(
                "kcal must be non-negative, got {} on {}",
                kcal, date
            )));
        }
        Ok(Self {
            date,
            weight_kg,
            kcal,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn kcal(&self) -> f64 {
        self.kcal
    }
}

/// Observations sorted ascending by date with at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Build a series from arbitrary input. When the input holds several
    /// observations for one date, the last one wins.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut by_date: BTreeMap<NaiveDate, Observation> = BTreeMap::new();
        for o in observations {
            by_date.insert(o.date, o);
        }
        Self {
            observations: by_date.into_values().collect(),
        }
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Observation> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|i| &self.observations[i])
    }

    /// The contiguous slice whose dates fall in `from..=to`. Open bounds
    /// extend to the ends of the series.
    pub fn window(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> &[Observation] {
        let start = match from {
            Some(f) => self.observations.partition_point(|o| o.date < f),
            None => 0,
        };
        let end = match to {
            Some(t) => self.observations.partition_point(|o| o.date <= t),
            None => self.observations.len(),
        };
        if start >= end {
            return &[];
        }
        &self.observations[start..end]
    }
}

impl<'a> IntoIterator for &'a ObservationSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
