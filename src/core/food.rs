use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::db::Database;
use crate::models::food::{CatalogItem, FoodEdit, FoodEntry, Macros, MealType, NewFood};

#[derive(Debug, Serialize)]
pub struct Added {
    pub entry: FoodEntry,
    /// True when the food was newly added to the catalog.
    pub saved_to_catalog: bool,
}

/// Log a portion of food, optionally remembering it as a favourite.
pub fn add_food(db: &Database, food: NewFood, save_to_catalog: bool) -> Result<Added> {
    food.validate()?;
    let item = CatalogItem {
        name: food.name.clone(),
        brand: food.brand.clone(),
        per_100g: food.per_100g,
    };
    let entry = food.into_entry();
    db.insert_food(&entry)?;

    let saved_to_catalog = if save_to_catalog {
        let inserted = db.insert_catalog_item(&item)?;
        if !inserted {
            log::debug!("'{}' already in catalog", item.label());
        }
        inserted
    } else {
        false
    };
    Ok(Added {
        entry,
        saved_to_catalog,
    })
}

#[derive(Debug, Serialize)]
pub struct MealGroup {
    pub meal: MealType,
    pub entries: Vec<FoodEntry>,
    pub totals: Macros,
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub meals: Vec<MealGroup>,
    pub totals: Macros,
    pub targets: Macros,
    /// Targets minus totals; negative when a target was exceeded.
    pub remaining: Macros,
}

impl DaySummary {
    pub fn is_empty(&self) -> bool {
        self.meals.iter().all(|m| m.entries.is_empty())
    }
}

/// A day's entries grouped by meal (always all four, in meal order) with
/// totals and what is left of the daily targets.
pub fn day_summary(db: &Database, date: NaiveDate, targets: &Macros) -> Result<DaySummary> {
    let entries = db.foods_by_date(date)?;
    let mut meals: Vec<MealGroup> = MealType::ALL
        .iter()
        .map(|&meal| MealGroup {
            meal,
            entries: Vec::new(),
            totals: Macros::default(),
        })
        .collect();

    let mut totals = Macros::default();
    for e in entries {
        totals += e.totals;
        if let Some(group) = meals.iter_mut().find(|g| g.meal == e.meal) {
            group.totals += e.totals;
            group.entries.push(e);
        }
    }

    Ok(DaySummary {
        date,
        meals,
        totals,
        targets: *targets,
        remaining: *targets - totals,
    })
}

/// Duplicate every entry of `from` onto `to`. Returns how many were copied.
pub fn copy_day(db: &Database, from: NaiveDate, to: NaiveDate) -> Result<usize> {
    if from == to {
        anyhow::bail!("source and target day are the same: {}", from);
    }
    let entries = db.foods_by_date(from)?;
    for e in &entries {
        let copy = FoodEntry {
            id: Uuid::new_v4().to_string(),
            date: to,
            ..e.clone()
        };
        db.insert_food(&copy)?;
    }
    log::debug!("copied {} entries from {} to {}", entries.len(), from, to);
    Ok(entries.len())
}

pub fn update_food(db: &Database, id: &str, edit: &FoodEdit) -> Result<FoodEntry> {
    if edit.is_empty() {
        anyhow::bail!("nothing to update");
    }
    let existing = db
        .get_food(id)?
        .ok_or_else(|| anyhow::anyhow!("food entry not found: {}", id))?;
    let updated = edit.apply(&existing)?;
    db.update_food(&updated)?;
    Ok(updated)
}

pub fn delete_food(db: &Database, id: &str) -> Result<()> {
    if !db.delete_food(id)? {
        anyhow::bail!("food entry not found: {}", id);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct WeeklyAverage {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days_logged: usize,
    /// Mean per-day totals over the days that have entries.
    pub daily_average: Macros,
}

/// Average daily totals over the 7 days ending at `end`. Days without
/// entries are left out of the mean. `None` when the week is empty.
pub fn weekly_average(db: &Database, end: NaiveDate) -> Result<Option<WeeklyAverage>> {
    let from = end - Duration::days(6);
    let entries = db.foods_in_range(from, end)?;

    let mut per_day: BTreeMap<NaiveDate, Macros> = BTreeMap::new();
    for e in &entries {
        *per_day.entry(e.date).or_default() += e.totals;
    }
    if per_day.is_empty() {
        return Ok(None);
    }

    let days_logged = per_day.len();
    let sum = per_day
        .into_values()
        .fold(Macros::default(), |acc, m| acc + m);
    Ok(Some(WeeklyAverage {
        from,
        to: end,
        days_logged,
        daily_average: sum.scale(1.0 / days_logged as f64),
    }))
}

/// Catalog items whose name contains `text`, ignoring case. An empty filter
/// returns the whole catalog.
pub fn search_catalog(db: &Database, text: Option<&str>) -> Result<Vec<CatalogItem>> {
    let items = db.list_catalog()?;
    let Some(needle) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(items);
    };
    let needle = needle.to_lowercase();
    Ok(items
        .into_iter()
        .filter(|i| i.name.to_lowercase().contains(&needle))
        .collect())
}
