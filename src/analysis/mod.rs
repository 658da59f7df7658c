// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Analysis Module
//!
//! The workout text-analysis engine: everything between raw message text and
//! a rendered assessment.
//!
//! This module includes:
//! - Free-text extraction of exercise records
//! - Aggregate metrics (volume, calories, difficulty)
//! - Classification and advice (tier, goal, balance, overtraining)
//! - Workout rewrites (harder/easier, recovery, pro version)
//!
//! Every operation here is a deterministic, side-effect-free function of its
//! inputs plus the injected catalog; no I/O, no clocks, no randomness. Given
//! identical input text, extraction followed by analysis always produces an
//! identical [`WorkoutAnalysis`].

use crate::models::{ExerciseRecord, FitnessLevel, Intensity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod advisor;
pub mod metrics;
pub mod parser;
pub mod rewrite;

pub use advisor::WorkoutAdvisor;
pub use parser::extract_exercises;
pub use rewrite::{generate_pro_version, rewrite_intensity, RewriteDirection};

/// Complete assessment of one submitted workout.
///
/// Produced once per analysis request and never mutated afterwards; the
/// caller decides whether to persist or discard it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAnalysis {
    /// Parsed records in input order
    pub exercises: Vec<ExerciseRecord>,

    /// Unitless aggregate load measure
    pub total_volume: f64,

    /// Estimated calories burned; rounded only for display
    pub total_calories: f64,

    /// Dominant workout type label
    pub workout_type: String,

    /// Intensity derived from total volume
    pub intensity: Intensity,

    /// Fitness tier derived from total volume
    pub fitness_level: FitnessLevel,

    /// Body regions the matched exercises engage
    pub muscle_groups: BTreeSet<String>,

    /// Suggested rest between moves, seconds
    pub rest_time_seconds: u32,

    /// Suggested water-break interval, minutes
    pub water_break_minutes: u32,

    /// Inferred training goal
    pub goal: String,

    /// Muscle-balance warnings, possibly empty
    pub imbalance_warnings: Vec<String>,

    /// Overtraining warnings, possibly empty
    pub overtraining_warnings: Vec<String>,

    /// Up to two improvement suggestions, joined into one line
    pub improvement_suggestion: String,

    /// Reduced-volume plan, present only for high-intensity workouts
    pub recovery_version: Option<String>,
}

/// Errors produced by the analysis engine.
///
/// The only failure the engine signals is an empty workout; everything else
/// is total over well-formed inputs.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no exercises were recognized in the submitted text")]
    EmptyWorkout,
}
