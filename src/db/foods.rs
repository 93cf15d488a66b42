use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

use crate::models::food::{FoodEntry, Macros};

use super::Database;

const FOOD_COLUMNS: &str =
    "id, date, meal, name, brand, grams, kcal, protein_g, carbs_g, fat_g";

struct FoodRow {
    id: String,
    date: String,
    meal: String,
    name: String,
    brand: String,
    grams: f64,
    kcal: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FoodRow> {
    Ok(FoodRow {
        id: row.get(0)?,
        date: row.get(1)?,
        meal: row.get(2)?,
        name: row.get(3)?,
        brand: row.get(4)?,
        grams: row.get(5)?,
        kcal: row.get(6)?,
        protein_g: row.get(7)?,
        carbs_g: row.get(8)?,
        fat_g: row.get(9)?,
    })
}

fn row_to_food(r: FoodRow) -> Result<FoodEntry> {
    Ok(FoodEntry {
        id: r.id,
        date: r.date.parse()?,
        meal: r.meal.parse()?,
        name: r.name,
        brand: r.brand,
        grams: r.grams,
        totals: Macros::new(r.kcal, r.protein_g, r.carbs_g, r.fat_g),
    })
}

impl Database {
    pub fn insert_food(&self, f: &FoodEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO food_entries (id, date, meal, name, brand, grams, kcal, protein_g, carbs_g, fat_g)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                f.id,
                f.date.to_string(),
                f.meal.to_string(),
                f.name,
                f.brand,
                f.grams,
                f.totals.kcal,
                f.totals.protein_g,
                f.totals.carbs_g,
                f.totals.fat_g,
            ],
        )?;
        Ok(())
    }

    /// Overwrite every field of an existing entry. Returns false for an unknown id.
    pub fn update_food(&self, f: &FoodEntry) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE food_entries SET date = ?2, meal = ?3, name = ?4, brand = ?5, grams = ?6,
                    kcal = ?7, protein_g = ?8, carbs_g = ?9, fat_g = ?10
             WHERE id = ?1",
            params![
                f.id,
                f.date.to_string(),
                f.meal.to_string(),
                f.name,
                f.brand,
                f.grams,
                f.totals.kcal,
                f.totals.protein_g,
                f.totals.carbs_g,
                f.totals.fat_g,
            ],
        )?;
        Ok(count > 0)
    }

    pub fn delete_food(&self, id: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM food_entries WHERE id = ?1", params![id])?;
        Ok(count > 0)
    }

    pub fn get_food(&self, id: &str) -> Result<Option<FoodEntry>> {
        let sql = format!("SELECT {} FROM food_entries WHERE id = ?1", FOOD_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![id], map_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_food(row?)?)),
            None => Ok(None),
        }
    }

    /// Entries for one day in insertion order.
    pub fn foods_by_date(&self, date: NaiveDate) -> Result<Vec<FoodEntry>> {
        let sql = format!(
            "SELECT {} FROM food_entries WHERE date = ?1 ORDER BY rowid",
            FOOD_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![date.to_string()], map_row)?;

        let mut foods = Vec::new();
        for row in rows {
            foods.push(row_to_food(row?)?);
        }
        Ok(foods)
    }

    /// Entries with `from <= date <= to`, ordered by date then insertion.
    pub fn foods_in_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<FoodEntry>> {
        let sql = format!(
            "SELECT {} FROM food_entries WHERE date >= ?1 AND date <= ?2 ORDER BY date, rowid",
            FOOD_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![from.to_string(), to.to_string()], map_row)?;

        let mut foods = Vec::new();
        for row in rows {
            foods.push(row_to_food(row?)?);
        }
        Ok(foods)
    }
}
