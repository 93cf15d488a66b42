use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A target body weight. Goals are query parameters: they come from the
/// config file or the command line and are never stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub label: String,
    pub target_weight_kg: f64,
}

impl Goal {
    pub fn new(label: impl Into<String>, target_weight_kg: f64) -> Self {
        Self {
            label: label.into(),
            target_weight_kg,
        }
    }

    /// An intermediate milestone and a final target.
    pub fn default_goals() -> Vec<Goal> {
        vec![Goal::new("intermediate", 80.0), Goal::new("final", 70.0)]
    }
}

/// Parses `LABEL=KG`, or a bare `KG` which gets the label "goal".
impl FromStr for Goal {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (label, value) = match s.split_once('=') {
            Some((l, v)) => (l.trim(), v.trim()),
            None => ("goal", s.trim()),
        };
        if label.is_empty() {
            anyhow::bail!("goal label must not be empty: {}", s);
        }
        let target: f64 = value
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid goal weight: {} (expected LABEL=KG)", s))?;
        if !target.is_finite() || target <= 0.0 {
            anyhow::bail!("goal weight must be positive: {}", s);
        }
        Ok(Goal::new(label, target))
    }
}
