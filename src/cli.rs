use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pocketdiet",
    version,
    about = "Track weight and intake, estimate maintenance calories, project time to goal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and data directory
    Init {
        /// Skip interactive setup, use defaults
        #[arg(long)]
        skip: bool,
    },

    /// Record weight and kcal for a day (replaces that day's entry)
    Log {
        /// Body weight in the configured unit system
        #[arg(required_unless_present = "batch")]
        weight: Option<f64>,

        /// Calories eaten that day
        #[arg(required_unless_present = "batch")]
        kcal: Option<f64>,

        /// Several days at once: "YYYY-MM-DD WEIGHT KCAL, ..."
        #[arg(long)]
        batch: Option<String>,
    },

    /// List recorded days
    History {
        #[command(flatten)]
        range: RangeArgs,

        /// Only the most recent N days
        #[arg(long)]
        last: Option<usize>,
    },

    /// Smoothed weight trend
    Trend {
        #[command(flatten)]
        range: RangeArgs,

        /// Points in the trailing average (default from config)
        #[arg(long)]
        window: Option<usize>,
    },

    /// Estimated maintenance calories and per-day deficit/surplus
    Maintenance {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Month-over-month averages and deltas
    Monthly {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Goal progress and time-to-goal projections
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Full progress summary for a date range
    Summary {
        #[command(flatten)]
        range: RangeArgs,

        /// Goal as LABEL=KG (repeatable; replaces configured goals)
        #[arg(long = "goal")]
        goals: Vec<String>,
    },

    /// Import days from a CSV (Fecha,Peso,Kcal or date,weight_kg,kcal) or JSON file
    Import {
        file: PathBuf,

        /// Input format: csv or json (default: from file extension)
        #[arg(long)]
        format: Option<String>,
    },

    /// Export recorded days
    Export {
        /// Output format: csv or json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Food log
    Food {
        #[command(subcommand)]
        action: FoodAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Clone, Copy)]
pub struct RangeArgs {
    /// First day of the range (inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the range (inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Progress toward each goal over the recent window
    Progress {
        #[command(flatten)]
        range: RangeArgs,

        /// Goal as LABEL=KG (repeatable; replaces configured goals)
        #[arg(long = "goal")]
        goals: Vec<String>,

        /// Project with this planned daily intake instead of the recent average
        #[arg(long)]
        plan_kcal: Option<f64>,
    },

    /// Project days to a target weight at a fixed daily deficit
    Days {
        /// Current weight
        #[arg(long)]
        current: f64,

        /// Target weight
        #[arg(long)]
        target: f64,

        /// Daily deficit in kcal (negative for a surplus)
        #[arg(long, allow_negative_numbers = true)]
        deficit: f64,
    },
}

#[derive(Subcommand)]
pub enum FoodAction {
    /// Log a portion of food
    Add {
        /// Food name
        name: String,

        /// Grams eaten
        grams: f64,

        /// breakfast, lunch, dinner or snack
        #[arg(long, default_value = "snack")]
        meal: String,

        #[arg(long)]
        brand: Option<String>,

        /// Take per-100g values from the catalog entry with this name/brand
        #[arg(long)]
        from_catalog: bool,

        /// Kcal per 100 g
        #[arg(long)]
        kcal: Option<f64>,

        /// Protein per 100 g
        #[arg(long)]
        protein: Option<f64>,

        /// Carbs per 100 g
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat per 100 g
        #[arg(long)]
        fat: Option<f64>,

        /// Also save to the favourites catalog
        #[arg(long)]
        save: bool,
    },

    /// Show a day's food, totals and remaining targets
    Day,

    /// Copy all food from another day (default: the previous day)
    Copy {
        #[arg(long)]
        from: Option<NaiveDate>,
    },

    /// Edit a logged entry (totals are set directly)
    Edit {
        id: String,
        #[arg(long)]
        meal: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        grams: Option<f64>,
        #[arg(long)]
        kcal: Option<f64>,
        #[arg(long)]
        protein: Option<f64>,
        #[arg(long)]
        carbs: Option<f64>,
        #[arg(long)]
        fat: Option<f64>,
    },

    /// Delete a logged entry
    Rm { id: String },

    /// Average daily totals over the last 7 days
    Week,

    /// List or search the favourites catalog
    Catalog {
        /// Case-insensitive name filter
        search: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. targets.kcal, units.system, goal.final)
        key: String,
        /// Config value
        value: String,
    },
}
