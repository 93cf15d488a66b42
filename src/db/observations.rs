use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

use crate::models::observation::{Observation, ObservationSeries};

use super::Database;

struct ObservationRow {
    date: String,
    weight_kg: Option<f64>,
    kcal: Option<f64>,
}

fn row_to_observation(r: &ObservationRow) -> Option<Observation> {
    let date: NaiveDate = r.date.parse().ok()?;
    Observation::new(date, r.weight_kg?, r.kcal?).ok()
}

impl Database {
    /// Insert an observation, replacing any existing record for the same date.
    pub fn upsert_observation(&self, o: &Observation) -> Result<()> {
        self.conn.execute(
            "INSERT INTO observations (date, weight_kg, kcal) VALUES (?1, ?2, ?3)
             ON CONFLICT(date) DO UPDATE SET weight_kg = excluded.weight_kg, kcal = excluded.kcal",
            params![o.date().to_string(), o.weight_kg(), o.kcal()],
        )?;
        log::debug!(
            "upserted observation {} ({} kg, {} kcal)",
            o.date(),
            o.weight_kg(),
            o.kcal()
        );
        Ok(())
    }

    /// Upsert many observations in one transaction. Later entries win.
    pub fn upsert_observations(&self, observations: &[Observation]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO observations (date, weight_kg, kcal) VALUES (?1, ?2, ?3)
                 ON CONFLICT(date) DO UPDATE SET weight_kg = excluded.weight_kg, kcal = excluded.kcal",
            )?;
            for o in observations {
                stmt.execute(params![o.date().to_string(), o.weight_kg(), o.kcal()])?;
            }
        }
        tx.commit()?;
        Ok(observations.len())
    }

    pub fn get_observation(&self, date: NaiveDate) -> Result<Option<Observation>> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, weight_kg, kcal FROM observations WHERE date = ?1")?;
        let mut rows = stmt.query_map(params![date.to_string()], |row| {
            Ok(ObservationRow {
                date: row.get(0)?,
                weight_kg: row.get(1)?,
                kcal: row.get(2)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(row_to_observation(&row?)),
            None => Ok(None),
        }
    }

    /// Read the whole store as a series. A missing or empty store yields an
    /// empty series; rows that fail validation are skipped and counted.
    pub fn load_observations(&self) -> Result<ObservationSeries> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, weight_kg, kcal FROM observations ORDER BY date")?;
        let rows = stmt.query_map([], |row| {
            Ok(ObservationRow {
                date: row.get(0)?,
                weight_kg: row.get(1)?,
                kcal: row.get(2)?,
            })
        })?;

        let mut observations = Vec::new();
        let mut dropped = 0usize;
        for row in rows {
            let r = row?;
            match row_to_observation(&r) {
                Some(o) => observations.push(o),
                None => {
                    log::warn!("skipping invalid stored observation for '{}'", r.date);
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            log::warn!("dropped {} invalid observation row(s) while loading", dropped);
        }
        Ok(ObservationSeries::from_observations(observations))
    }

    pub fn count_observations(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
