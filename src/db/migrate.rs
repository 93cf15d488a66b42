use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS observations (
            date       TEXT PRIMARY KEY,
            weight_kg  REAL NOT NULL,
            kcal       REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS food_entries (
            id         TEXT PRIMARY KEY,
            date       TEXT NOT NULL,
            meal       TEXT NOT NULL,
            name       TEXT NOT NULL,
            brand      TEXT NOT NULL DEFAULT '',
            grams      REAL NOT NULL,
            kcal       REAL NOT NULL,
            protein_g  REAL NOT NULL,
            carbs_g    REAL NOT NULL,
            fat_g      REAL NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_food_entries_date ON food_entries(date);

        CREATE TABLE IF NOT EXISTS catalog (
            name            TEXT NOT NULL,
            brand           TEXT NOT NULL DEFAULT '',
            kcal_100g       REAL NOT NULL,
            protein_100g    REAL NOT NULL,
            carbs_100g      REAL NOT NULL,
            fat_100g        REAL NOT NULL,
            PRIMARY KEY (name, brand)
        );",
    )?;
    Ok(())
}
