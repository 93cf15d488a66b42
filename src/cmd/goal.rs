use anyhow::Result;
use serde_json::json;

use super::{degrade, resolve_goals};
use crate::cli::RangeArgs;
use pocketdiet::core::{projection, trend};
use pocketdiet::db::Database;
use pocketdiet::models::config::Config;
use pocketdiet::output;
use pocketdiet::output::human;

pub fn run_progress(
    range: RangeArgs,
    goal_args: &[String],
    plan_kcal: Option<f64>,
    human_flag: bool,
) -> Result<()> {
    let config = Config::load()?;
    let goals = resolve_goals(&config, goal_args)?;
    let db = Database::open(&Config::db_path())?;
    let series = db.load_observations()?;
    let window = series.window(range.from, range.to);

    let estimate = match trend::estimate_maintenance_with(window, &config.engine) {
        Ok(e) => e,
        Err(e) => return degrade("goal", e, human_flag),
    };
    let deficit = plan_kcal.map(|kcal| estimate.deficit_for(kcal));
    let progress = projection::goal_progress(&estimate, &goals, deficit);

    if human_flag {
        if progress.is_empty() {
            println!("No goals configured.");
        }
        for g in &progress {
            println!("{}", human::format_goal(g, &config.units));
        }
    } else {
        let out = output::success(
            "goal",
            json!({
                "maintenance_kcal": estimate.maintenance_kcal,
                "goals": progress
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_days(current: f64, target: f64, deficit: f64, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let current_kg = pocketdiet::core::units::weight_from_input(current, &config.units);
    let target_kg = pocketdiet::core::units::weight_from_input(target, &config.units);
    let projected = projection::days_to_goal(current_kg, target_kg, deficit);

    if human_flag {
        println!("{}", human::format_projection(&projected));
    } else {
        let out = output::success(
            "goal",
            json!({
                "current_weight_kg": current_kg,
                "target_weight_kg": target_kg,
                "daily_deficit": deficit,
                "projection": projected
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
