use anyhow::Result;
use chrono::{Duration, NaiveDate};
use serde_json::json;

use pocketdiet::core::food;
use pocketdiet::db::Database;
use pocketdiet::models::config::Config;
use pocketdiet::models::food::{FoodEdit, Macros, MealType, NewFood};
use pocketdiet::output;
use pocketdiet::output::human;

/// Everything `food add` was given on the command line.
pub struct AddArgs {
    pub date: NaiveDate,
    pub name: String,
    pub grams: f64,
    pub meal: String,
    pub brand: Option<String>,
    pub from_catalog: bool,
    pub kcal: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub save: bool,
}

pub fn run_add(args: AddArgs, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let meal: MealType = args.meal.parse()?;
    let brand = args.brand.unwrap_or_default();

    let request = if args.from_catalog {
        let item = db
            .get_catalog_item(&args.name, &brand)?
            .ok_or_else(|| anyhow::anyhow!("not in catalog: {}", args.name))?;
        NewFood::from_catalog(&item, args.date, meal, args.grams)
    } else {
        let Some(kcal) = args.kcal else {
            anyhow::bail!("--kcal is required unless --from-catalog is given");
        };
        NewFood {
            date: args.date,
            meal,
            name: args.name,
            brand,
            grams: args.grams,
            per_100g: Macros::new(
                kcal,
                args.protein.unwrap_or(0.0),
                args.carbs.unwrap_or(0.0),
                args.fat.unwrap_or(0.0),
            ),
        }
    };
    let added = food::add_food(&db, request, args.save)?;

    if human_flag {
        println!("Added: {}", human::format_food(&added.entry));
        if added.saved_to_catalog {
            println!("Saved '{}' to the catalog.", added.entry.label());
        }
    } else {
        let out = output::success("food", serde_json::to_value(&added)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_day(date: NaiveDate, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let summary = food::day_summary(&db, date, &config.targets)?;

    if human_flag {
        println!("{}", human::format_day_summary(&summary));
    } else {
        let out = output::success("food", serde_json::to_value(&summary)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_copy(from: Option<NaiveDate>, to: NaiveDate, human_flag: bool) -> Result<()> {
    let from = from.unwrap_or(to - Duration::days(1));
    let db = Database::open(&Config::db_path())?;
    let copied = food::copy_day(&db, from, to)?;

    if human_flag {
        println!("Copied {} entries from {} to {}", copied, from, to);
    } else {
        let out = output::success(
            "food",
            json!({ "copied": copied, "from": from, "to": to }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_edit(id: &str, meal: Option<&str>, mut edit: FoodEdit, human_flag: bool) -> Result<()> {
    if let Some(m) = meal {
        edit.meal = Some(m.parse()?);
    }
    let db = Database::open(&Config::db_path())?;
    let updated = food::update_food(&db, id, &edit)?;

    if human_flag {
        println!("Updated: {}", human::format_food(&updated));
    } else {
        let out = output::success("food", json!({ "entry": updated }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_rm(id: &str, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    food::delete_food(&db, id)?;

    if human_flag {
        println!("Deleted: {}", id);
    } else {
        let out = output::success("food", json!({ "deleted": id }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_week(end: NaiveDate, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let week = food::weekly_average(&db, end)?;

    if human_flag {
        match &week {
            Some(w) => println!("{}", human::format_weekly(w)),
            None => println!("No food logged in the 7 days up to {}.", end),
        }
    } else {
        let out = output::success("food", json!({ "week": week }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_catalog(search: Option<&str>, human_flag: bool) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let items = food::search_catalog(&db, search)?;

    if human_flag {
        if items.is_empty() {
            println!("No catalog items found.");
        } else {
            println!("{}", human::format_catalog(&items));
        }
    } else {
        let out = output::success(
            "food",
            json!({ "count": items.len(), "items": items }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
