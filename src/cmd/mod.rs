pub mod completions;
pub mod config;
pub mod export;
pub mod food;
pub mod goal;
pub mod history;
pub mod init;
pub mod log;
pub mod summary;
pub mod trend;

use anyhow::Result;

use pocketdiet::error::EngineError;
use pocketdiet::models::config::Config;
use pocketdiet::models::goal::Goal;
use pocketdiet::output;

/// Report a "not enough data yet" state and succeed; anything else is a
/// real failure and is passed back to the caller.
pub fn degrade(command: &str, err: EngineError, human: bool) -> Result<()> {
    if !err.is_insufficient_data() {
        return Err(err.into());
    }
    if human {
        println!("Not enough data yet: {}", err);
    } else {
        let out = output::insufficient(command, &err);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

/// Goals from `--goal` flags if any were given, otherwise from config.
pub fn resolve_goals(config: &Config, overrides: &[String]) -> Result<Vec<Goal>> {
    if overrides.is_empty() {
        return Ok(config.goals.clone());
    }
    overrides
        .iter()
        .map(|s| s.parse::<Goal>())
        .collect()
}
