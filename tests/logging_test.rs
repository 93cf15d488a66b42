mod common;

use common::{approx, date};
use pocketdiet::core::logging::{self, LogEntry};
use pocketdiet::models::config::{Config, Units};

#[test]
fn test_log_then_overwrite() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let d = date(2024, 1, 1);

    let first = logging::log_observation(&db, &config, LogEntry { date: d, weight: 90.0, kcal: 2000.0 }).unwrap();
    assert!(first.replaced.is_none());

    let second = logging::log_observation(&db, &config, LogEntry { date: d, weight: 89.0, kcal: 1800.0 }).unwrap();
    assert_eq!(second.replaced, Some(first.observation));
    assert_eq!(db.count_observations().unwrap(), 1);
    assert!(approx(db.get_observation(d).unwrap().unwrap().weight_kg(), 89.0));
}

#[test]
fn test_log_converts_imperial_input() {
    let (_dir, db) = common::setup_db();
    let config = Config {
        units: Units::imperial(),
        ..Config::default()
    };
    let logged = logging::log_observation(
        &db,
        &config,
        LogEntry {
            date: date(2024, 1, 1),
            weight: 220.462,
            kcal: 2000.0,
        },
    )
    .unwrap();
    assert!((logged.observation.weight_kg() - 100.0).abs() < 1e-9);
}

#[test]
fn test_log_rejects_out_of_range() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let d = date(2024, 1, 1);
    for (weight, kcal) in [(0.0, 2000.0), (301.0, 2000.0), (80.0, -1.0), (80.0, 10001.0)] {
        assert!(logging::log_observation(&db, &config, LogEntry { date: d, weight, kcal }).is_err());
    }
    assert_eq!(db.count_observations().unwrap(), 0);
}

#[test]
fn test_parse_simple_batch() {
    let entries = logging::parse_simple_batch("2024-01-01 90 2200, 2024-01-02 89.8 2150\n2024-01-03 89.5 2000").unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1], (date(2024, 1, 2), 89.8, 2150.0));

    assert!(logging::parse_simple_batch("").is_err());
    assert!(logging::parse_simple_batch("2024-01-01 90").is_err());
    assert!(logging::parse_simple_batch("yesterday 90 2000").is_err());
}

#[test]
fn test_log_batch_stops_at_first_invalid() {
    let (_dir, db) = common::setup_db();
    let config = Config::default();
    let err = logging::log_batch(&db, &config, "2024-01-01 90 2200, 2024-01-02 -5 2000, 2024-01-03 89 2000");
    assert!(err.is_err());
    assert_eq!(db.count_observations().unwrap(), 1);

    let ok = logging::log_batch(&db, &config, "2024-01-04 88 2000, 2024-01-05 87.5 1900").unwrap();
    assert_eq!(ok.len(), 2);
    assert_eq!(db.count_observations().unwrap(), 3);
}
