use anyhow::Result;
use std::fs::File;
use std::path::Path;

use crate::cli::RangeArgs;
use pocketdiet::core::export;
use pocketdiet::db::Database;
use pocketdiet::models::config::Config;
use pocketdiet::output;

pub fn run_export(
    format: &str,
    output_path: Option<&Path>,
    range: RangeArgs,
    human: bool,
) -> Result<()> {
    let db = Database::open(&Config::db_path())?;
    let series = db.load_observations()?;
    let window = series.window(range.from, range.to);

    let content = match format {
        "csv" => export::to_csv(window)?,
        "json" => export::to_json(window)?,
        other => anyhow::bail!("unsupported format: {} (expected csv/json)", other),
    };

    if let Some(path) = output_path {
        std::fs::write(path, &content)?;
        if human {
            println!("Exported {} entries to {}", window.len(), path.display());
        } else {
            let out = output::success(
                "export",
                serde_json::json!({
                    "path": path.display().to_string(),
                    "format": format,
                    "count": window.len()
                }),
            );
            println!("{}", serde_json::to_string(&out)?);
        }
    } else {
        print!("{}", content);
    }
    Ok(())
}

pub fn run_import(file_path: &Path, format: Option<&str>, human: bool) -> Result<()> {
    let format = match format {
        Some(f) => f.to_lowercase(),
        None => file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_else(|| "csv".to_string()),
    };
    let db = Database::open(&Config::db_path())?;

    let report = match format.as_str() {
        "csv" => export::import_csv(&db, File::open(file_path)?)?,
        "json" => export::import_json(&db, &std::fs::read_to_string(file_path)?)?,
        other => anyhow::bail!("unsupported import format: {} (expected csv/json)", other),
    };

    if human {
        println!(
            "Imported {} entries from {} ({} dropped)",
            report.imported,
            file_path.display(),
            report.dropped
        );
    } else {
        let out = output::success(
            "import",
            serde_json::json!({
                "imported": report.imported,
                "dropped": report.dropped,
                "format": format,
                "file": file_path.display().to_string()
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
