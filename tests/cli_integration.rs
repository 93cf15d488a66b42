/// CLI integration tests for pocketdiet.
///
/// Each test spawns the compiled binary via the `assert_cmd::cargo_bin_cmd!`
/// macro and sets `POCKETDIET_HOME` to a fresh `TempDir` so tests are fully
/// isolated from the developer's real `~/.pocketdiet` data.
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("pocketdiet");
    c.env("POCKETDIET_HOME", dir.path());
    c
}

fn init_dir(dir: &TempDir) {
    cmd_in(dir).args(["init", "--skip"]).assert().success();
}

fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    serde_json::from_slice(&bytes).expect("stderr is not valid JSON")
}

fn log_day(dir: &TempDir, date: &str, weight: &str, kcal: &str) {
    cmd_in(dir)
        .args(["log", weight, kcal, "--date", date])
        .assert()
        .success();
}

fn seed_three_weeks(dir: &TempDir) {
    log_day(dir, "2024-01-01", "90", "2200");
    log_day(dir, "2024-01-08", "89", "2100");
    log_day(dir, "2024-01-15", "88", "2000");
}

// ── init / config ────────────────────────────────────────────────────────────

#[test]
fn test_init_skip_creates_config_and_db() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["init", "--skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config initialized"));
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("data.db").exists());
}

#[test]
fn test_config_set_and_show() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["config", "set", "targets.kcal", "1800"])
        .assert()
        .success();
    let out = cmd_in(&dir).args(["config", "show"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["config"]["targets"]["kcal"], 1800.0);
}

#[test]
fn test_config_set_unknown_key_fails_with_error_envelope() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure();
    let json = parse_stderr_json(&out);
    assert_eq!(json["status"], "error");
    assert_eq!(json["command"], "config");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("unknown config key")
    );
}

#[test]
fn test_oversized_recent_days_is_rejected() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["config", "set", "engine.recent_days", "200000000"])
        .assert()
        .failure();
    seed_three_weeks(&dir);

    fs::write(
        dir.path().join("config.toml"),
        "[engine]\ntrend_window = 7\nrecent_days = 200000000\n",
    )
    .unwrap();
    let out = cmd_in(&dir).args(["maintenance"]).assert().failure();
    let json = parse_stderr_json(&out);
    assert_eq!(json["status"], "error");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("engine.recent_days")
    );
}

// ── log / history ────────────────────────────────────────────────────────────

#[test]
fn test_log_and_overwrite_same_day() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    log_day(&dir, "2024-01-01", "90", "2200");
    let out = cmd_in(&dir)
        .args(["log", "89.5", "2000", "--date", "2024-01-01"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["entry"]["observation"]["weight_kg"], 89.5);
    assert_eq!(json["data"]["entry"]["replaced"]["weight_kg"], 90.0);

    let out = cmd_in(&dir).args(["history"]).assert().success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["count"], 1);
}

#[test]
fn test_log_rejects_negative_kcal() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["log", "90", "--date", "2024-01-01", "--", "-5"])
        .assert()
        .failure();
}

#[test]
fn test_log_batch_and_history_last() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args([
            "log",
            "--batch",
            "2024-01-01 90 2200, 2024-01-02 89.8 2150, 2024-01-03 89.6 2100",
        ])
        .assert()
        .success();
    let out = cmd_in(&dir)
        .args(["history", "--last", "2"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["count"], 2);
    assert_eq!(json["data"]["entries"][0]["date"], "2024-01-02");
}

#[test]
fn test_history_human_on_empty_store() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["history", "--human"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
}

// ── engine ───────────────────────────────────────────────────────────────────

#[test]
fn test_maintenance_three_week_scenario() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    seed_three_weeks(&dir);
    let out = cmd_in(&dir).args(["maintenance"]).assert().success();
    let json = parse_json(&out);
    let kcal = json["data"]["estimate"]["maintenance_kcal"].as_f64().unwrap();
    assert!((kcal - 3200.0).abs() < 1e-6);
    assert_eq!(json["data"]["days"].as_array().unwrap().len(), 3);
    assert_eq!(json["data"]["days"][0]["balance"], "deficit");
}

#[test]
fn test_single_observation_reports_insufficient_data() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    log_day(&dir, "2024-01-01", "90", "2200");
    for command in ["maintenance", "trend", "summary", "monthly"] {
        let out = cmd_in(&dir).arg(command).assert().success();
        let json = parse_json(&out);
        assert_eq!(json["status"], "ok", "{}", command);
        assert_eq!(json["data"]["insufficient_data"], true, "{}", command);
    }
    cmd_in(&dir)
        .args(["maintenance", "--human"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not enough data"));
}

#[test]
fn test_trend_command() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    seed_three_weeks(&dir);
    let out = cmd_in(&dir)
        .args(["trend", "--window", "2"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["trend_weight"], 88.5);
    assert_eq!(json["data"]["points"].as_array().unwrap().len(), 3);
}

#[test]
fn test_summary_with_goal_override() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    seed_three_weeks(&dir);
    let out = cmd_in(&dir)
        .args(["summary", "--goal", "final=80"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["observations"], 3);
    assert_eq!(json["data"]["goals"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["goals"][0]["label"], "final");
    assert_eq!(json["data"]["goals"][0]["days_to_goal"]["status"], "days");
    assert!(json["data"]["monthly"].is_null());
}

#[test]
fn test_goal_progress_uses_configured_goals() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    seed_three_weeks(&dir);
    let out = cmd_in(&dir).args(["goal", "progress"]).assert().success();
    let json = parse_json(&out);
    let goals = json["data"]["goals"].as_array().unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0]["label"], "intermediate");
}

#[test]
fn test_goal_days_projection() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args(["goal", "days", "--current", "81", "--target", "80", "--deficit", "770"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["projection"]["days"], 10.0);

    let out = cmd_in(&dir)
        .args(["goal", "days", "--current", "81", "--target", "80", "--deficit", "0"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["projection"]["status"], "undefined");

    let out = cmd_in(&dir)
        .args(["goal", "days", "--current", "81", "--target", "80", "--deficit", "-500"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["projection"]["days"], 0.0);
}

// ── import / export ──────────────────────────────────────────────────────────

#[test]
fn test_import_legacy_csv_and_export() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let file = dir.path().join("legacy.csv");
    fs::write(
        &file,
        "Fecha,Peso,Kcal\n2024-01-01 00:00:00,90,2200\nbad,89,2100\n2024-01-15,88,2000\n",
    )
    .unwrap();

    let out = cmd_in(&dir)
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["imported"], 2);
    assert_eq!(json["data"]["dropped"], 1);

    cmd_in(&dir)
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("date,weight_kg,kcal\n2024-01-01,"));

    let target = dir.path().join("out.json");
    cmd_in(&dir)
        .args([
            "export",
            "--format",
            "json",
            "--output",
            target.to_str().unwrap(),
            "--from",
            "2024-01-10",
        ])
        .assert()
        .success();
    let exported: Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 1);
    assert_eq!(exported[0]["date"], "2024-01-15");
}

#[test]
fn test_export_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["export", "--format", "xml"])
        .assert()
        .failure();
}

// ── food ─────────────────────────────────────────────────────────────────────

#[test]
fn test_food_add_day_and_catalog() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    let out = cmd_in(&dir)
        .args([
            "food", "add", "Oats", "50", "--meal", "breakfast", "--kcal", "380", "--protein",
            "13", "--save", "--date", "2024-01-01",
        ])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["entry"]["kcal"], 190.0);
    assert_eq!(json["data"]["saved_to_catalog"], true);

    cmd_in(&dir)
        .args([
            "food",
            "add",
            "Oats",
            "100",
            "--from-catalog",
            "--date",
            "2024-01-01",
        ])
        .assert()
        .success();

    let out = cmd_in(&dir)
        .args(["food", "day", "--date", "2024-01-01"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["totals"]["kcal"], 570.0);
    assert_eq!(json["data"]["meals"].as_array().unwrap().len(), 4);

    let out = cmd_in(&dir)
        .args(["food", "catalog", "oat"])
        .assert()
        .success();
    let json = parse_json(&out);
    assert_eq!(json["data"]["count"], 1);
}

#[test]
fn test_food_add_requires_kcal() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["food", "add", "Mystery", "50"])
        .assert()
        .failure();
}

#[test]
fn test_food_rm_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    init_dir(&dir);
    cmd_in(&dir)
        .args(["food", "rm", "no-such-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ── completions ──────────────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pocketdiet"));
}
