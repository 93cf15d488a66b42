use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::food::Macros;
use crate::models::goal::Goal;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub units: Units,
    #[serde(default = "default_targets")]
    pub targets: Macros,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default = "Goal::default_goals")]
    pub goals: Vec<Goal>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            units: Units::default(),
            targets: default_targets(),
            engine: EngineSettings::default(),
            goals: Goal::default_goals(),
        }
    }
}

fn default_targets() -> Macros {
    Macros::new(2000.0, 120.0, 220.0, 70.0)
}

/// Display unit system. Storage is always metric.
#[derive(Debug, Serialize, Deserialize)]
pub struct Units {
    #[serde(default = "default_system")]
    pub system: String,
    #[serde(default = "default_weight_unit")]
    pub weight: String,
}

fn default_system() -> String {
    "metric".to_string()
}
fn default_weight_unit() -> String {
    "kg".to_string()
}

impl Default for Units {
    fn default() -> Self {
        Self {
            system: "metric".to_string(),
            weight: "kg".to_string(),
        }
    }
}

impl Units {
    pub fn imperial() -> Self {
        Self {
            system: "imperial".to_string(),
            weight: "lbs".to_string(),
        }
    }

    pub fn is_imperial(&self) -> bool {
        self.system == "imperial"
    }
}

/// Tunables for the trend and maintenance estimator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSettings {
    /// Points in the trailing weight average.
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
    /// Length of the recent sub-window used for the maintenance estimate.
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,
}

/// Longest recent sub-window accepted, ten years of days.
pub const MAX_RECENT_DAYS: u32 = 3650;

impl EngineSettings {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trend_window == 0 {
            anyhow::bail!("engine.trend_window must be at least 1");
        }
        if self.recent_days == 0 || self.recent_days > MAX_RECENT_DAYS {
            anyhow::bail!(
                "engine.recent_days must be between 1 and {}, got {}",
                MAX_RECENT_DAYS,
                self.recent_days
            );
        }
        Ok(())
    }
}

fn default_trend_window() -> usize {
    7
}
fn default_recent_days() -> u32 {
    28
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            trend_window: default_trend_window(),
            recent_days: default_recent_days(),
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let config: Self = toml::from_str(&contents)?;
            config
                .engine
                .validate()
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;

            file.write_all(contents.as_bytes())?;

            // Pre-existing files keep their old mode through open(); fix it up.
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        log::debug!("config written to {}", path.display());
        Ok(())
    }

    /// Apply a `key = value` assignment from `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "units.system" => match value {
                "metric" => self.units = Units::default(),
                "imperial" => self.units = Units::imperial(),
                _ => anyhow::bail!("units.system must be 'metric' or 'imperial'"),
            },
            "targets.kcal" => self.targets.kcal = parse_non_negative(key, value)?,
            "targets.protein" => self.targets.protein_g = parse_non_negative(key, value)?,
            "targets.carbs" => self.targets.carbs_g = parse_non_negative(key, value)?,
            "targets.fat" => self.targets.fat_g = parse_non_negative(key, value)?,
            "engine.trend_window" => {
                let engine = EngineSettings {
                    trend_window: value.parse()?,
                    ..self.engine.clone()
                };
                engine.validate()?;
                self.engine = engine;
            }
            "engine.recent_days" => {
                let engine = EngineSettings {
                    recent_days: value.parse()?,
                    ..self.engine.clone()
                };
                engine.validate()?;
                self.engine = engine;
            }
            k if k.starts_with("goal.") => {
                let label = k.strip_prefix("goal.").unwrap_or_default();
                let goal: Goal = format!("{}={}", label, value).parse()?;
                match self.goals.iter_mut().find(|g| g.label == goal.label) {
                    Some(existing) => *existing = goal,
                    None => self.goals.push(goal),
                }
            }
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("POCKETDIET_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .expect("cannot resolve home directory")
            .join(".pocketdiet")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}

fn parse_non_negative(key: &str, value: &str) -> anyhow::Result<f64> {
    let v: f64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid number for {}: {}", key, value))?;
    if !v.is_finite() || v < 0.0 {
        anyhow::bail!("{} must be non-negative", key);
    }
    Ok(v)
}
