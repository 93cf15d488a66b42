//! Unit conversion and the display rounding policy.
//!
//! The engine works in kilograms and kcal at full precision. Values are only
//! converted and rounded here, on their way to a human.

use crate::models::config::Units;

const KG_TO_LBS: f64 = 2.20462;

/// Convert a stored weight to the display system, rounded to 1 decimal.
pub fn display_weight(kg: f64, units: &Units) -> (f64, &'static str) {
    if units.is_imperial() {
        (round1(kg * KG_TO_LBS), "lbs")
    } else {
        (round1(kg), "kg")
    }
}

/// Convert a weight change (kg) to the display system, rounded to 1 decimal.
pub fn display_weight_delta(kg: f64, units: &Units) -> f64 {
    display_weight(kg, units).0
}

pub fn weight_unit(units: &Units) -> &'static str {
    if units.is_imperial() { "lbs" } else { "kg" }
}

/// Convert a user-entered weight to kilograms for storage.
pub fn weight_from_input(value: f64, units: &Units) -> f64 {
    if units.is_imperial() {
        value / KG_TO_LBS
    } else {
        value
    }
}

/// Energy and macro grams are shown as whole numbers.
pub fn display_whole(v: f64) -> f64 {
    let r = v.round();
    // Avoid printing "-0".
    if r == 0.0 { 0.0 } else { r }
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
