// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! This module contains the core data structures used throughout the Moraby
//! bot. The analysis engine works exclusively on these types; the parser
//! produces them, the advisor consumes them, and the transport layer renders
//! them back to the user.
//!
//! ## Design Principles
//!
//! - **Typed categories**: category membership is resolved once at catalog
//!   lookup time and carried as an enum, never re-derived from strings
//! - **Immutable records**: an [`ExerciseRecord`] is never mutated after the
//!   parser creates it; rewrites produce new values
//! - **Serializable**: all models support JSON serialization for persistence
//!
//! ## Core Models
//!
//! - [`ExerciseRecord`]: one parsed line of a workout submission
//! - [`Category`]: the exercise classification driving calorie and goal rules
//! - [`Unit`]: the measurement unit recovered from the input line
//! - [`UserProfile`] / [`UserSettings`]: Telegram user state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exercise classification used by the calorie formula and goal inference.
///
/// Resolved exactly once, at catalog lookup time. Names that match no catalog
/// entry are classified as [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Resistance work (push-ups, squats, triceps)
    Strength,
    /// Sustained aerobic work (jump rope, cycling, burpees)
    Cardio,
    /// Trunk stabilization work (sit-ups, planks, crunches)
    Core,
    /// Mobility and flexibility work
    Stretch,
    /// Anything the catalog does not recognize
    Other,
}

impl Category {
    /// Persian display label, matching what users see in replies.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Strength => "قدرتی",
            Category::Cardio => "هوازی",
            Category::Core => "مرکزی",
            Category::Stretch => "کششی",
            Category::Other => "سایر",
        }
    }
}

/// Measurement unit recovered from an input line.
///
/// An absent unit token defaults to [`Unit::Rep`]. [`Unit::Unspecified`] is
/// reserved for records arriving from the augmentation service with a unit the
/// parser does not recognize; the metrics engine treats it like a rep count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Rep,
    Minute,
    Second,
    Unspecified,
}

impl Unit {
    /// Whether the metrics engine should treat this unit as a repetition
    /// count (weight 1 in the volume aggregate, rep-to-duration conversion in
    /// the calorie formula).
    pub fn is_rep_based(&self) -> bool {
        matches!(self, Unit::Rep | Unit::Second | Unit::Unspecified)
    }

    /// Persian display label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Unit::Rep | Unit::Unspecified => "تکرار",
            Unit::Minute => "دقیقه",
            Unit::Second => "ثانیه",
        }
    }
}

/// Workout intensity derived from total volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Stable identifier used in persistence.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    /// Persian display label.
    pub fn display_name(&self) -> &'static str {
        match self {
            Intensity::Low => "کم",
            Intensity::Medium => "متوسط",
            Intensity::High => "زیاد",
        }
    }
}

/// Fitness tier derived from total volume; drives rest-time and
/// overtraining-ceiling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Persian display label.
    pub fn display_name(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "مبتدی",
            FitnessLevel::Intermediate => "متوسط",
            FitnessLevel::Advanced => "حرفه‌ای",
        }
    }

    /// Parse a Persian level label, as stored in settings callbacks.
    pub fn from_display_name(name: &str) -> Option<Self> {
        match name {
            "مبتدی" => Some(FitnessLevel::Beginner),
            "متوسط" => Some(FitnessLevel::Intermediate),
            "حرفه‌ای" => Some(FitnessLevel::Advanced),
            _ => None,
        }
    }
}

/// One parsed line of a workout submission.
///
/// Created by the line parser; immutable once created. `normalized_key` is
/// `None` when the raw name matched no catalog entry, in which case the raw
/// name is used verbatim downstream and `category` is [`Category::Other`].
///
/// # Examples
///
/// ```rust
/// use moraby_bot::models::{Category, ExerciseRecord, Unit};
///
/// let record = ExerciseRecord {
///     raw_name: "شنا سوئدی".to_string(),
///     normalized_key: Some("شنا".to_string()),
///     value: 10,
///     unit: Unit::Rep,
///     category: Category::Strength,
/// };
/// assert_eq!(record.display_name(), "شنا");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// The name exactly as the user wrote it (trimmed)
    pub raw_name: String,
    /// Catalog key the name normalized to, if any
    pub normalized_key: Option<String>,
    /// Non-negative count or duration recovered from the line
    pub value: u32,
    /// Measurement unit for `value`
    pub unit: Unit,
    /// Category of the matched catalog entry, or `Other`
    pub category: Category,
}

impl ExerciseRecord {
    /// The name used in replies and downstream matching: the normalized
    /// catalog key when available, the raw name otherwise.
    pub fn display_name(&self) -> &str {
        self.normalized_key.as_deref().unwrap_or(&self.raw_name)
    }
}

/// Telegram user profile captured at first contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Telegram user id
    pub user_id: i64,
    /// Public @username, if set
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Per-user preferences, stored as JSON in the users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Remind the user to rest between sets
    pub rest_reminder: bool,
    /// Remind the user to drink water
    pub water_reminder: bool,
    /// Self-reported fitness tier, used by the pro-version rewrite
    pub fitness_level: FitnessLevel,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            rest_reminder: true,
            water_reminder: true,
            fitness_level: FitnessLevel::Beginner,
        }
    }
}

/// One row of the workout-history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// When the workout was recorded (UTC)
    pub workout_date: DateTime<Utc>,
    /// Dominant workout type label at the time of analysis
    pub workout_type: String,
    /// Estimated calories burned
    pub calories_burned: f64,
}
