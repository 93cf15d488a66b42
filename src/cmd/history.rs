use anyhow::Result;
use serde_json::json;

use crate::cli::RangeArgs;
use pocketdiet::core::query;
use pocketdiet::db::Database;
use pocketdiet::models::config::Config;
use pocketdiet::output;
use pocketdiet::output::human;

pub fn run(range: RangeArgs, last: Option<usize>, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let series = db.load_observations()?;
    let entries = query::history(&series, range.from, range.to, last);

    if human_flag {
        if entries.is_empty() {
            println!("No entries found.");
        }
        for o in &entries {
            println!("{}", human::format_observation(o, &config.units));
        }
    } else {
        let out = output::success(
            "history",
            json!({ "count": entries.len(), "entries": entries }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
