use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::core::units;
use crate::db::Database;
use crate::models::config::Config;
use crate::models::observation::Observation;

/// Upper bounds for interactive entry. Imports are not capped.
pub const MAX_WEIGHT_KG: f64 = 300.0;
pub const MAX_KCAL: f64 = 10000.0;

/// One day's entry as typed by the user, weight in their display units.
pub struct LogEntry {
    pub date: NaiveDate,
    pub weight: f64,
    pub kcal: f64,
}

#[derive(Debug, Serialize)]
pub struct Logged {
    pub observation: Observation,
    /// The record this entry overwrote, if the date already had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<Observation>,
}

/// Validate and upsert one observation.
pub fn log_observation(db: &Database, config: &Config, entry: LogEntry) -> Result<Logged> {
    let weight_kg = units::weight_from_input(entry.weight, &config.units);
    if weight_kg > MAX_WEIGHT_KG {
        anyhow::bail!("weight must be at most {} kg, got {:.1}", MAX_WEIGHT_KG, weight_kg);
    }
    if entry.kcal > MAX_KCAL {
        anyhow::bail!("kcal must be at most {}, got {}", MAX_KCAL, entry.kcal);
    }
    let observation = Observation::new(entry.date, weight_kg, entry.kcal)?;

    let replaced = db.get_observation(entry.date)?;
    if replaced.is_some() {
        log::info!("overwriting existing observation for {}", entry.date);
    }
    db.upsert_observation(&observation)?;
    Ok(Logged {
        observation,
        replaced,
    })
}

/// Parse simple batch format: `"2024-01-01 90.0 2200, 2024-01-02 89.8 2150"`.
/// Entries are separated by commas or newlines; fields by whitespace.
pub fn parse_simple_batch(input: &str) -> Result<Vec<(NaiveDate, f64, f64)>> {
    let mut entries = Vec::new();
    for part in input.split([',', '\n']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let fields: Vec<&str> = part.split_whitespace().collect();
        if fields.len() != 3 {
            anyhow::bail!(
                "invalid batch entry: '{}' (expected 'YYYY-MM-DD WEIGHT KCAL')",
                part
            );
        }
        let date: NaiveDate = fields[0]
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid date in batch entry: '{}'", part))?;
        let weight: f64 = fields[1]
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid weight in batch entry: '{}'", part))?;
        let kcal: f64 = fields[2]
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid kcal in batch entry: '{}'", part))?;
        entries.push((date, weight, kcal));
    }
    if entries.is_empty() {
        anyhow::bail!("batch is empty");
    }
    Ok(entries)
}

/// Log every entry of a simple batch. Stops at the first invalid entry;
/// entries before it stay logged.
pub fn log_batch(db: &Database, config: &Config, input: &str) -> Result<Vec<Logged>> {
    let mut results = Vec::new();
    for (date, weight, kcal) in parse_simple_batch(input)? {
        results.push(log_observation(db, config, LogEntry { date, weight, kcal })?);
    }
    Ok(results)
}
