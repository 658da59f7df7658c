// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aggregate workout metrics
//!
//! Pure functions of an exercise-record sequence plus the catalog. All
//! intermediate sums stay in floating point; rounding happens only at the
//! presentation boundary.

use crate::catalog::ExerciseCatalog;
use crate::constants::policy;
use crate::models::{Category, ExerciseRecord, Unit};

/// Unitless aggregate load: rep-based records at weight 1, minute-based
/// records weighted so duration efforts are comparable to rep counts.
pub fn volume(records: &[ExerciseRecord]) -> f64 {
    records
        .iter()
        .map(|record| {
            let weight = match record.unit {
                Unit::Minute => policy::MINUTE_VOLUME_WEIGHT,
                _ => 1.0,
            };
            f64::from(record.value) * weight
        })
        .sum()
}

/// Estimated calories burned across the workout.
///
/// Each record contributes `MET * 3.5 * weight / 200` kilocalories per
/// minute, with rep counts converted to an estimated duration first.
pub fn calories(records: &[ExerciseRecord], body_weight_kg: f64) -> f64 {
    records
        .iter()
        .map(|record| {
            let duration_minutes = match record.unit {
                Unit::Minute => f64::from(record.value),
                _ => f64::from(record.value) * policy::MINUTES_PER_REP,
            };
            met_coefficient(record.category) * 3.5 * body_weight_kg * duration_minutes / 200.0
        })
        .sum()
}

/// Difficulty score over catalog-matched records.
///
/// Records with no catalog match contribute zero here; they still count
/// toward volume and calories.
pub fn difficulty_score(records: &[ExerciseRecord], catalog: &ExerciseCatalog) -> f64 {
    records
        .iter()
        .filter_map(|record| {
            let key = record.normalized_key.as_deref()?;
            let definition = catalog.get(key)?;
            Some(definition.difficulty_weight * (f64::from(record.value) / 10.0))
        })
        .sum()
}

/// Fixed MET coefficient per category.
pub fn met_coefficient(category: Category) -> f64 {
    match category {
        Category::Strength => policy::MET_STRENGTH,
        Category::Cardio => policy::MET_CARDIO,
        Category::Core => policy::MET_CORE,
        Category::Stretch => policy::MET_STRETCH,
        Category::Other => policy::MET_OTHER,
    }
}
