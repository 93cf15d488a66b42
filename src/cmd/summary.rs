use anyhow::Result;

use super::{degrade, resolve_goals};
use crate::cli::RangeArgs;
use pocketdiet::core::summary;
use pocketdiet::db::Database;
use pocketdiet::models::config::Config;
use pocketdiet::output;
use pocketdiet::output::human;

pub fn run(range: RangeArgs, goal_args: &[String], human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let goals = resolve_goals(&config, goal_args)?;
    let db = Database::open(&Config::db_path())?;
    let series = db.load_observations()?;

    let summary = match summary::summarize(&series, range.from, range.to, &goals, &config.engine) {
        Ok(s) => s,
        Err(e) => return degrade("summary", e, human_flag),
    };

    if human_flag {
        println!("{}", human::format_summary(&summary, &config.units));
    } else {
        let out = output::success("summary", serde_json::to_value(&summary)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
