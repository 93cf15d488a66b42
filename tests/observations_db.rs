mod common;

use common::{date, obs};

#[test]
fn test_load_from_empty_store() {
    let (_dir, db) = common::setup_db();
    let series = db.load_observations().unwrap();
    assert!(series.is_empty());
    assert_eq!(db.count_observations().unwrap(), 0);
}

#[test]
fn test_upsert_replaces_same_date() {
    let (_dir, db) = common::setup_db();
    let d = date(2024, 1, 1);
    db.upsert_observation(&obs(d, 90.0, 2000.0)).unwrap();
    db.upsert_observation(&obs(d, 89.5, 1800.0)).unwrap();

    assert_eq!(db.count_observations().unwrap(), 1);
    let stored = db.get_observation(d).unwrap().unwrap();
    assert_eq!(stored.weight_kg(), 89.5);
    assert_eq!(stored.kcal(), 1800.0);
}

#[test]
fn test_load_is_sorted_by_date() {
    let (_dir, db) = common::setup_db();
    for (d, w) in [(15, 88.0), (1, 90.0), (8, 89.0)] {
        db.upsert_observation(&obs(date(2024, 1, d), w, 2000.0))
            .unwrap();
    }
    let series = db.load_observations().unwrap();
    let dates: Vec<_> = series.iter().map(|o| o.date()).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15)]
    );
}

#[test]
fn test_batch_upsert_is_counted() {
    let (_dir, db) = common::setup_db();
    let rows = [
        obs(date(2024, 1, 1), 90.0, 2000.0),
        obs(date(2024, 1, 2), 89.8, 2100.0),
    ];
    assert_eq!(db.upsert_observations(&rows).unwrap(), 2);
    assert_eq!(db.upsert_observations(&rows).unwrap(), 2);
    assert_eq!(db.count_observations().unwrap(), 2);
}

#[test]
fn test_get_missing_date() {
    let (_dir, db) = common::setup_db();
    assert!(db.get_observation(date(2024, 1, 1)).unwrap().is_none());
}
