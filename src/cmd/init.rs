use anyhow::Result;
use chrono::NaiveDate;
use std::io::{self, Write};

use pocketdiet::core::logging::{self, LogEntry};
use pocketdiet::core::units::weight_unit;
use pocketdiet::db::Database;
use pocketdiet::models::config::{Config, Units};
use pocketdiet::models::goal::Goal;

pub fn run(skip: bool, today: NaiveDate) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    if skip {
        config.save()?;
        Database::open(&Config::db_path())?;
        println!("Config initialized with defaults at {:?}", Config::path());
        return Ok(());
    }

    println!("Pocket Diet - Initial Setup\n");

    let system = prompt_string("Unit system (metric/imperial) [metric]")?;
    if system.eq_ignore_ascii_case("imperial") {
        config.units = Units::imperial();
    }
    let unit = weight_unit(&config.units);

    config.targets.kcal = prompt_f64_or("Daily kcal target", config.targets.kcal)?;
    config.targets.protein_g = prompt_f64_or("Daily protein target (g)", config.targets.protein_g)?;
    config.targets.carbs_g = prompt_f64_or("Daily carbs target (g)", config.targets.carbs_g)?;
    config.targets.fat_g = prompt_f64_or("Daily fat target (g)", config.targets.fat_g)?;

    let goal = prompt_string(&format!("Goal weight ({}, empty to keep defaults)", unit))?;
    if !goal.is_empty() {
        let target: f64 = goal
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid goal weight: {}", goal))?;
        let target_kg = pocketdiet::core::units::weight_from_input(target, &config.units);
        config.goals = vec![Goal::new("final", target_kg)];
    }

    config.save()?;
    let db = Database::open(&Config::db_path())?;

    let weight = prompt_string(&format!("Today's weight ({}, empty to skip)", unit))?;
    if !weight.is_empty() {
        let weight: f64 = weight
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid weight: {}", weight))?;
        let kcal = prompt_f64_or("Today's kcal", 0.0)?;
        logging::log_observation(
            &db,
            &config,
            LogEntry {
                date: today,
                weight,
                kcal,
            },
        )?;
    }

    println!("\nSetup complete. Data stored in {:?}", Config::data_dir());
    Ok(())
}

fn prompt_string(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// Empty input keeps `default`.
fn prompt_f64_or(label: &str, default: f64) -> Result<f64> {
    loop {
        let s = prompt_string(&format!("{} [{}]", label, default))?;
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) if v >= 0.0 => return Ok(v),
            _ => println!("Please enter a non-negative number."),
        }
    }
}
