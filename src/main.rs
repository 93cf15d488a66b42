mod cli;
mod cmd;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, FoodAction, GoalAction};
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let today = cli
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let human = cli.human;

    let (command, result) = match cli.command {
        Commands::Init { skip } => ("init", cmd::init::run(skip, today)),
        Commands::Log { weight, kcal, batch } => (
            "log",
            match (batch, weight, kcal) {
                (Some(b), _, _) => cmd::log::run_batch(&b, human),
                (None, Some(w), Some(k)) => cmd::log::run(today, w, k, human),
                _ => Err(anyhow::anyhow!("weight and kcal are required")),
            },
        ),
        Commands::History { range, last } => ("history", cmd::history::run(range, last, human)),
        Commands::Trend { range, window } => ("trend", cmd::trend::run(range, window, human)),
        Commands::Maintenance { range } => ("maintenance", cmd::trend::run_maintenance(range, human)),
        Commands::Monthly { range } => ("monthly", cmd::trend::run_monthly(range, human)),
        Commands::Goal { action } => (
            "goal",
            match action {
                GoalAction::Progress {
                    range,
                    goals,
                    plan_kcal,
                } => cmd::goal::run_progress(range, &goals, plan_kcal, human),
                GoalAction::Days {
                    current,
                    target,
                    deficit,
                } => cmd::goal::run_days(current, target, deficit, human),
            },
        ),
        Commands::Summary { range, goals } => ("summary", cmd::summary::run(range, &goals, human)),
        Commands::Import { file, format } => (
            "import",
            cmd::export::run_import(&file, format.as_deref(), human),
        ),
        Commands::Export {
            format,
            output,
            range,
        } => (
            "export",
            cmd::export::run_export(&format, output.as_deref(), range, human),
        ),
        Commands::Food { action } => (
            "food",
            match action {
                FoodAction::Add {
                    name,
                    grams,
                    meal,
                    brand,
                    from_catalog,
                    kcal,
                    protein,
                    carbs,
                    fat,
                    save,
                } => cmd::food::run_add(
                    cmd::food::AddArgs {
                        date: today,
                        name,
                        grams,
                        meal,
                        brand,
                        from_catalog,
                        kcal,
                        protein,
                        carbs,
                        fat,
                        save,
                    },
                    human,
                ),
                FoodAction::Day => cmd::food::run_day(today, human),
                FoodAction::Copy { from } => cmd::food::run_copy(from, today, human),
                FoodAction::Edit {
                    id,
                    meal,
                    name,
                    brand,
                    grams,
                    kcal,
                    protein,
                    carbs,
                    fat,
                } => cmd::food::run_edit(
                    &id,
                    meal.as_deref(),
                    pocketdiet::models::food::FoodEdit {
                        meal: None,
                        name,
                        brand,
                        grams,
                        kcal,
                        protein_g: protein,
                        carbs_g: carbs,
                        fat_g: fat,
                    },
                    human,
                ),
                FoodAction::Rm { id } => cmd::food::run_rm(&id, human),
                FoodAction::Week => cmd::food::run_week(today, human),
                FoodAction::Catalog { search } => cmd::food::run_catalog(search.as_deref(), human),
            },
        ),
        Commands::Config { action } => (
            "config",
            match action {
                ConfigAction::Show => cmd::config::run_show(human),
                ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
            },
        ),
        Commands::Completions { shell } => ("completions", cmd::completions::run(shell)),
    };

    if let Err(e) = result {
        log::debug!("{} failed: {:?}", command, e);
        let err = pocketdiet::output::error(command, "general_error", &e.to_string());
        eprintln!(
            "{}",
            serde_json::to_string(&err).unwrap_or_else(|_| e.to_string())
        );
        process::exit(1);
    }
}
