#![allow(dead_code)]

use chrono::NaiveDate;
use pocketdiet::db::Database;
use pocketdiet::models::observation::{Observation, ObservationSeries};
use tempfile::TempDir;

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn obs(d: NaiveDate, weight_kg: f64, kcal: f64) -> Observation {
    Observation::new(d, weight_kg, kcal).unwrap()
}

/// Build a series from `(date, weight, kcal)` tuples.
pub fn series(rows: &[(NaiveDate, f64, f64)]) -> ObservationSeries {
    ObservationSeries::from_observations(rows.iter().map(|&(d, w, k)| obs(d, w, k)))
}

/// One observation per day starting at `start`, weight from `weights`,
/// constant intake.
pub fn daily(start: NaiveDate, weights: &[f64], kcal: f64) -> ObservationSeries {
    ObservationSeries::from_observations(
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| obs(start + chrono::Duration::days(i as i64), w, kcal)),
    )
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
