use anyhow::Result;
use serde_json::json;

use super::degrade;
use crate::cli::RangeArgs;
use pocketdiet::core::{monthly, trend};
use pocketdiet::db::Database;
use pocketdiet::models::config::Config;
use pocketdiet::output;
use pocketdiet::output::human;

pub fn run(range: RangeArgs, window_size: Option<usize>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let series = db.load_observations()?;
    let window = series.window(range.from, range.to);
    let size = window_size.unwrap_or(config.engine.trend_window);

    let current = match trend::rolling_trend(window, size) {
        Ok(t) => t,
        Err(e) => return degrade("trend", e, human_flag),
    };
    let points = trend::trend_series(window, size);

    if human_flag {
        println!("{}", human::format_trend(&points, &config.units));
        let (w, unit) = pocketdiet::core::units::display_weight(current, &config.units);
        println!("Current trend: {:.1} {} ({}-point average)", w, unit, size.max(1));
    } else {
        let out = output::success(
            "trend",
            json!({
                "window": size.max(1),
                "trend_weight": current,
                "points": points
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_maintenance(range: RangeArgs, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let series = db.load_observations()?;
    let window = series.window(range.from, range.to);

    let estimate = match trend::estimate_maintenance_with(window, &config.engine) {
        Ok(e) => e,
        Err(e) => return degrade("maintenance", e, human_flag),
    };
    let days = trend::classify_days(window, &estimate);

    if human_flag {
        println!("{}\n", human::format_estimate(&estimate, &config.units));
        println!("{}", human::format_days(&days));
    } else {
        let out = output::success(
            "maintenance",
            json!({ "estimate": estimate, "days": days }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_monthly(range: RangeArgs, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let series = db.load_observations()?;
    let window = series.window(range.from, range.to);

    let comparison = match monthly::monthly_comparison(window) {
        Ok(c) => c,
        Err(e) => return degrade("monthly", e, human_flag),
    };

    if human_flag {
        println!("{}", human::format_monthly(&comparison, &config.units));
    } else {
        let out = output::success("monthly", serde_json::to_value(&comparison)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
