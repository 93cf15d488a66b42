use anyhow::Result;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::LazyLock;

use crate::db::Database;
use crate::models::observation::{Observation, ObservationSeries};

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})(?:[T ][0-9:.]*)?$").expect("date pattern is valid")
});

const DATE_HEADERS: &[&str] = &["fecha", "date"];
const WEIGHT_HEADERS: &[&str] = &["peso", "weight", "weight_kg"];
const KCAL_HEADERS: &[&str] = &["kcal", "calories"];

/// Rows that survived validation, plus how many were dropped.
#[derive(Debug, Default)]
pub struct Ingested {
    pub observations: Vec<Observation>,
    pub dropped: usize,
}

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub dropped: usize,
}

/// Parse `YYYY-MM-DD`, tolerating a trailing time such as `00:00:00`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(s.trim())?;
    NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

fn parse_row(
    record: &csv::StringRecord,
    date_col: usize,
    weight_col: usize,
    kcal_col: usize,
) -> std::result::Result<Observation, String> {
    let raw_date = record.get(date_col).unwrap_or("");
    let date = parse_date(raw_date).ok_or_else(|| format!("unparseable date '{}'", raw_date))?;
    let raw_weight = record.get(weight_col).unwrap_or("");
    let weight: f64 = raw_weight
        .trim()
        .parse()
        .map_err(|_| format!("unparseable weight '{}'", raw_weight))?;
    let raw_kcal = record.get(kcal_col).unwrap_or("");
    let kcal: f64 = raw_kcal
        .trim()
        .parse()
        .map_err(|_| format!("unparseable kcal '{}'", raw_kcal))?;
    Observation::new(date, weight, kcal).map_err(|e| e.to_string())
}

/// Leniently read observations from CSV.
///
/// Accepts the legacy `Fecha,Peso,Kcal` layout as well as
/// `date,weight_kg,kcal` (headers are matched case-insensitively). Invalid
/// rows are dropped and counted rather than failing the import; only a
/// missing required column is an error.
pub fn ingest_csv<R: Read>(reader: R) -> Result<Ingested> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let date_col = find_column(&headers, DATE_HEADERS)
        .ok_or_else(|| anyhow::anyhow!("missing date column (expected Fecha or date)"))?;
    let weight_col = find_column(&headers, WEIGHT_HEADERS)
        .ok_or_else(|| anyhow::anyhow!("missing weight column (expected Peso or weight_kg)"))?;
    let kcal_col = find_column(&headers, KCAL_HEADERS)
        .ok_or_else(|| anyhow::anyhow!("missing kcal column (expected Kcal or kcal)"))?;

    let mut out = Ingested::default();
    for (i, result) in rdr.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("line {}: dropped unreadable row: {}", line, e);
                out.dropped += 1;
                continue;
            }
        };
        match parse_row(&record, date_col, weight_col, kcal_col) {
            Ok(o) => out.observations.push(o),
            Err(reason) => {
                log::warn!("line {}: dropped row: {}", line, reason);
                out.dropped += 1;
            }
        }
    }

    if out.dropped > 0 {
        log::warn!(
            "ingested {} row(s), dropped {}",
            out.observations.len(),
            out.dropped
        );
    }
    Ok(out)
}

/// Import CSV into the store. Later rows for the same date win, and every
/// imported row overwrites what the store held for its date.
pub fn import_csv<R: Read>(db: &Database, reader: R) -> Result<ImportReport> {
    let ingested = ingest_csv(reader)?;
    let series = ObservationSeries::from_observations(ingested.observations);
    let imported = db.upsert_observations(series.as_slice())?;
    Ok(ImportReport {
        imported,
        dropped: ingested.dropped,
    })
}

#[derive(Deserialize)]
struct ImportEntry {
    date: String,
    weight_kg: f64,
    #[serde(default)]
    kcal: f64,
}

/// Import a JSON array of `{date, weight_kg, kcal}` objects, with the same
/// drop-and-count policy as CSV.
pub fn import_json(db: &Database, json_str: &str) -> Result<ImportReport> {
    let entries: Vec<ImportEntry> = serde_json::from_str(json_str)?;
    let mut observations = Vec::new();
    let mut dropped = 0;
    for e in entries {
        let parsed = parse_date(&e.date)
            .ok_or_else(|| format!("unparseable date '{}'", e.date))
            .and_then(|d| Observation::new(d, e.weight_kg, e.kcal).map_err(|err| err.to_string()));
        match parsed {
            Ok(o) => observations.push(o),
            Err(reason) => {
                log::warn!("dropped entry: {}", reason);
                dropped += 1;
            }
        }
    }
    let series = ObservationSeries::from_observations(observations);
    let imported = db.upsert_observations(series.as_slice())?;
    Ok(ImportReport { imported, dropped })
}

/// Export observations as `date,weight_kg,kcal` CSV.
pub fn to_csv(observations: &[Observation]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for o in observations {
        wtr.serialize(o)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush csv: {}", e.error()))?;
    let mut out = String::from_utf8(bytes)?;
    if observations.is_empty() {
        out.push_str("date,weight_kg,kcal\n");
    }
    Ok(out)
}

/// Export observations as a JSON array.
pub fn to_json(observations: &[Observation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(observations)?)
}
