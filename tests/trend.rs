mod common;

use common::{approx, date, obs};
use pocketdiet::core::trend::{self, DayBalance, KCAL_PER_KG};
use pocketdiet::error::EngineError;
use pocketdiet::models::config::EngineSettings;

#[test]
fn test_three_week_scenario() {
    let s = common::series(&[
        (date(2024, 1, 1), 90.0, 2200.0),
        (date(2024, 1, 8), 89.0, 2100.0),
        (date(2024, 1, 15), 88.0, 2000.0),
    ]);
    let e = trend::estimate_maintenance(s.as_slice()).unwrap();

    assert!(approx(e.weight_delta_kg, -2.0));
    assert_eq!(e.days, 14);
    assert!(approx(e.avg_kcal, 2100.0));
    assert!(approx(e.implied_daily_kcal_effect, -1100.0));
    assert!(approx(e.maintenance_kcal, 3200.0));
    assert!(approx(e.trend_weight, 89.0));
    assert_eq!(e.recent_count, 3);
}

#[test]
fn test_maintenance_symmetry_for_steady_loss() {
    // 0.1 kg per day over 20 days at 1800 kcal.
    let weights: Vec<f64> = (0..21).map(|i| 95.0 - 0.1 * i as f64).collect();
    let s = common::daily(date(2024, 3, 1), &weights, 1800.0);
    let e = trend::estimate_maintenance(s.as_slice()).unwrap();

    let delta = weights[20] - weights[0];
    let expected = 1800.0 - delta * KCAL_PER_KG / 20.0;
    assert!((e.maintenance_kcal - expected).abs() < 1e-6);
    assert!((e.maintenance_kcal - 2570.0).abs() < 1e-6);
}

#[test]
fn test_maintenance_symmetry_for_gain() {
    let weights: Vec<f64> = (0..11).map(|i| 70.0 + 0.05 * i as f64).collect();
    let s = common::daily(date(2024, 5, 1), &weights, 2600.0);
    let e = trend::estimate_maintenance(s.as_slice()).unwrap();
    assert!(e.maintenance_kcal < 2600.0);
    assert!((e.maintenance_kcal - (2600.0 - 0.5 * KCAL_PER_KG / 10.0)).abs() < 1e-6);
}

#[test]
fn test_single_observation_is_refused() {
    let s = common::series(&[(date(2024, 1, 1), 90.0, 2000.0)]);
    let err = trend::estimate_maintenance(s.as_slice()).unwrap_err();
    assert!(err.is_insufficient_data());
    assert!(matches!(
        err,
        EngineError::InsufficientData {
            needed: 2,
            found: 1,
            ..
        }
    ));
    assert!(trend::rolling_trend(s.as_slice(), 7).unwrap_err().is_insufficient_data());
}

#[test]
fn test_empty_window_is_refused() {
    let err = trend::estimate_maintenance(&[]).unwrap_err();
    assert!(err.is_insufficient_data());
    assert!(trend::rolling_trend(&[], 7).is_err());
}

#[test]
fn test_rolling_trend_stays_within_included_values() {
    let weights = [88.0, 91.5, 87.2, 90.1, 89.9, 86.4, 92.3, 88.8, 87.7, 90.0];
    let s = common::daily(date(2024, 2, 1), &weights, 2000.0);
    for size in 1..=12 {
        for end in 2..=weights.len() {
            let slice = &s.as_slice()[..end];
            let t = trend::rolling_trend(slice, size).unwrap();
            let start = end.saturating_sub(size);
            let included = &weights[start..end];
            let min = included.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = included.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!(t >= min - 1e-9 && t <= max + 1e-9, "size {} end {}", size, end);
        }
    }
}

#[test]
fn test_trend_series_keeps_partial_windows() {
    let s = common::daily(date(2024, 2, 1), &[90.0, 88.0, 86.0, 84.0], 2000.0);
    let points = trend::trend_series(s.as_slice(), 3);
    assert_eq!(points.len(), 4);
    assert!(approx(points[0].trend_kg, 90.0));
    assert!(approx(points[1].trend_kg, 89.0));
    assert!(approx(points[2].trend_kg, 88.0));
    assert!(approx(points[3].trend_kg, 86.0));
}

#[test]
fn test_trend_window_of_zero_behaves_like_one() {
    let s = common::daily(date(2024, 2, 1), &[90.0, 88.0], 2000.0);
    assert!(approx(trend::rolling_trend(s.as_slice(), 0).unwrap(), 88.0));
}

#[test]
fn test_recent_subwindow_covers_last_28_days() {
    let s = common::series(&[
        (date(2024, 1, 1), 95.0, 2500.0),
        (date(2024, 2, 1), 92.0, 2300.0),
        (date(2024, 2, 15), 91.0, 2200.0),
        (date(2024, 2, 28), 90.0, 2100.0),
    ]);
    let recent = trend::recent_subwindow(s.as_slice(), 28);
    // 2024-02-28 minus 27 days is 2024-02-01.
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].date(), date(2024, 2, 1));

    let e = trend::estimate_maintenance(s.as_slice()).unwrap();
    assert_eq!(e.recent_from, date(2024, 2, 1));
    assert_eq!(e.days, 27);
    assert!(approx(e.avg_kcal, 2200.0));
}

#[test]
fn test_recent_subwindow_of_one_day_holds_only_last_point() {
    let s = common::series(&[(date(2024, 1, 1), 95.0, 2500.0), (date(2024, 3, 1), 90.0, 2000.0)]);
    let recent = trend::recent_subwindow(s.as_slice(), 1);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].date(), date(2024, 3, 1));
    assert!(trend::recent_subwindow(&[], 28).is_empty());
}

#[test]
fn test_same_day_floor_avoids_division_by_zero() {
    let s = common::series(&[(date(2024, 1, 1), 95.0, 2500.0), (date(2024, 3, 1), 90.0, 2000.0)]);
    let settings = EngineSettings {
        trend_window: 7,
        recent_days: 1,
    };
    let e = trend::estimate_maintenance_with(s.as_slice(), &settings).unwrap();
    assert_eq!(e.days, 1);
    assert_eq!(e.recent_count, 1);
    assert!(approx(e.weight_delta_kg, 0.0));
    assert!(approx(e.maintenance_kcal, 2000.0));
}

#[test]
fn test_classification_is_strict() {
    let s = common::series(&[
        (date(2024, 1, 1), 90.0, 2000.0),
        (date(2024, 1, 2), 90.0, 2000.0),
    ]);
    let e = trend::estimate_maintenance(s.as_slice()).unwrap();
    assert!(approx(e.maintenance_kcal, 2000.0));

    assert_eq!(e.classify(1999.0), DayBalance::Deficit);
    assert_eq!(e.classify(2000.0), DayBalance::Neutral);
    assert_eq!(e.classify(2001.0), DayBalance::Surplus);
    assert!(approx(e.deficit_for(1500.0), 500.0));
    assert!(approx(e.deficit_for(2500.0), -500.0));

    let extra = [obs(date(2024, 1, 3), 90.0, 1500.0)];
    let days = trend::classify_days(&extra, &e);
    assert_eq!(days[0].balance, DayBalance::Deficit);
    assert!(approx(days[0].deficit, 500.0));
}

#[test]
fn test_recent_days_past_calendar_range_uses_whole_window() {
    let s = common::series(&[(date(2024, 1, 1), 90.0, 2200.0), (date(2024, 1, 15), 88.0, 2000.0)]);
    assert_eq!(trend::recent_subwindow(s.as_slice(), u32::MAX).len(), 2);

    let settings = EngineSettings {
        trend_window: 7,
        recent_days: 200_000_000,
    };
    let e = trend::estimate_maintenance_with(s.as_slice(), &settings).unwrap();
    assert_eq!(e.recent_count, 2);
    assert_eq!(e.days, 14);
}
