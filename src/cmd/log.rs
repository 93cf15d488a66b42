use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use pocketdiet::core::logging::{self, LogEntry, Logged};
use pocketdiet::db::Database;
use pocketdiet::models::config::{Config, Units};
use pocketdiet::output;
use pocketdiet::output::human;

pub fn run(date: NaiveDate, weight: f64, kcal: f64, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let logged = logging::log_observation(&db, &config, LogEntry { date, weight, kcal })?;

    if human_flag {
        print_logged(&logged, &config.units);
    } else {
        let out = output::success("log", json!({ "entry": logged }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_batch(batch_input: &str, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let logged = logging::log_batch(&db, &config, batch_input)?;

    if human_flag {
        for l in &logged {
            print_logged(l, &config.units);
        }
    } else {
        let out = output::success("log", json!({ "entries": logged }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

fn print_logged(logged: &Logged, units: &Units) {
    let line = human::format_observation(&logged.observation, units);
    match &logged.replaced {
        Some(_) => println!("Updated: {}", line),
        None => println!("Logged: {}", line),
    }
}
