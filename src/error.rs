//! Typed errors raised by the estimation engine.
//!
//! Application code wraps these in `anyhow::Error`; commands that want to
//! degrade gracefully match on [`EngineError::is_insufficient_data`] first.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("insufficient data: need at least {needed} {what}, found {found}")]
    InsufficientData {
        what: &'static str,
        needed: usize,
        found: usize,
    },

    #[error("no observations between {from} and {to}")]
    EmptyWindow { from: NaiveDate, to: NaiveDate },

    #[error("invalid observation: {0}")]
    InvalidObservation(String),
}

impl EngineError {
    pub(crate) fn too_few_observations(needed: usize, found: usize) -> Self {
        Self::InsufficientData {
            what: "observations",
            needed,
            found,
        }
    }

    /// True for the non-fatal "not enough data yet" family of errors.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::EmptyWindow { .. }
        )
    }
}
