use anyhow::Result;
use rusqlite::params;

use crate::models::food::{CatalogItem, Macros};

use super::Database;

struct CatalogRow {
    name: String,
    brand: String,
    kcal: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CatalogRow> {
    Ok(CatalogRow {
        name: row.get(0)?,
        brand: row.get(1)?,
        kcal: row.get(2)?,
        protein_g: row.get(3)?,
        carbs_g: row.get(4)?,
        fat_g: row.get(5)?,
    })
}

fn row_to_item(r: CatalogRow) -> CatalogItem {
    CatalogItem {
        name: r.name,
        brand: r.brand,
        per_100g: Macros::new(r.kcal, r.protein_g, r.carbs_g, r.fat_g),
    }
}

impl Database {
    /// Add an item unless `(name, brand)` is already present. Returns whether
    /// a row was inserted.
    pub fn insert_catalog_item(&self, item: &CatalogItem) -> Result<bool> {
        let count = self.conn.execute(
            "INSERT OR IGNORE INTO catalog (name, brand, kcal_100g, protein_100g, carbs_100g, fat_100g)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.name,
                item.brand,
                item.per_100g.kcal,
                item.per_100g.protein_g,
                item.per_100g.carbs_g,
                item.per_100g.fat_g,
            ],
        )?;
        Ok(count > 0)
    }

    pub fn get_catalog_item(&self, name: &str, brand: &str) -> Result<Option<CatalogItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, brand, kcal_100g, protein_100g, carbs_100g, fat_100g
             FROM catalog WHERE name = ?1 AND brand = ?2",
        )?;
        let mut rows = stmt.query_map(params![name, brand], map_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row_to_item(row?))),
            None => Ok(None),
        }
    }

    pub fn list_catalog(&self) -> Result<Vec<CatalogItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, brand, kcal_100g, protein_100g, carbs_100g, fat_100g
             FROM catalog ORDER BY name, brand",
        )?;
        let rows = stmt.query_map([], map_row)?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row_to_item(row?));
        }
        Ok(items)
    }
}
