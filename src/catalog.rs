// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Exercise Catalog
//!
//! The static reference table mapping known Persian exercise names to their
//! metadata: category, body region, difficulty weight, and energy cost.
//! Loaded once at process start and treated as read-only shared data.
//!
//! Lookup uses bidirectional substring matching over a fixed iteration order;
//! that order is part of the observable contract, so the catalog keeps its
//! entries in an ordered list rather than a map.

use crate::models::{Category, Unit};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Energy cost of one unit of an exercise, in kilocalories.
///
/// Each definition carries exactly one figure, selected by the unit the
/// exercise is normally measured in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyCost {
    /// Kilocalories per repetition
    PerRep(f64),
    /// Kilocalories per minute
    PerMinute(f64),
}

impl EnergyCost {
    /// The unit this exercise is normally measured in, used when rendering
    /// rewritten plans.
    pub fn natural_unit(&self) -> Unit {
        match self {
            EnergyCost::PerRep(_) => Unit::Rep,
            EnergyCost::PerMinute(_) => Unit::Minute,
        }
    }
}

/// One entry of the exercise reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Canonical Persian name; unique within the catalog
    pub key: String,
    /// Classification driving calorie and goal rules
    pub category: Category,
    /// Body-region label shown in the muscle-group summary
    pub region: String,
    /// Relative difficulty used by the difficulty score
    pub difficulty_weight: f64,
    /// Energy cost in the exercise's natural unit
    pub energy: EnergyCost,
}

/// Ordered, immutable exercise reference table.
///
/// # Examples
///
/// ```rust
/// use moraby_bot::catalog::ExerciseCatalog;
/// use moraby_bot::models::Category;
///
/// let catalog = ExerciseCatalog::default();
/// let definition = catalog.lookup("شنا سوئدی").unwrap();
/// assert_eq!(definition.key, "شنا");
/// assert_eq!(definition.category, Category::Strength);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    #[serde(rename = "exercise")]
    exercises: Vec<ExerciseDefinition>,
}

impl ExerciseCatalog {
    /// Load the catalog from a file or fall back to the embedded defaults.
    pub fn load(path: Option<String>) -> Result<Self> {
        if let Some(catalog_path) = path {
            return Self::load_from_file(&catalog_path);
        }

        if Path::new("catalog.toml").exists() {
            return Self::load_from_file("catalog.toml");
        }

        Ok(Self::default())
    }

    /// Load the catalog from a specific TOML file.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path))?;

        let catalog: ExerciseCatalog = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path))?;

        Ok(catalog)
    }

    /// Find the definition a raw name normalizes to.
    ///
    /// A raw name matches a key when either string contains the other, after
    /// script normalization. The first matching entry in catalog order wins;
    /// there is no fuzzy matching beyond this rule.
    pub fn lookup(&self, name: &str) -> Option<&ExerciseDefinition> {
        let name = normalize_script(name.trim());
        if name.is_empty() {
            return None;
        }
        self.exercises.iter().find(|def| {
            let key = normalize_script(&def.key);
            name.contains(&key) || key.contains(&name)
        })
    }

    /// Fetch a definition by its exact key.
    pub fn get(&self, key: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|def| def.key == key)
    }

    /// Iterate definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.iter()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// Normalize Persian text for matching: fold Arabic-presentation letters to
/// their Persian forms, strip combining diacritics, and collapse the
/// zero-width non-joiner to nothing.
fn normalize_script(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\u{064A}' => Some('ی'), // Arabic yeh
            '\u{0643}' => Some('ک'), // Arabic kaf
            '\u{064B}'..='\u{0652}' => None, // tashkeel marks
            '\u{200C}' => None,      // zero-width non-joiner
            _ => Some(c),
        })
        .collect()
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        let exercise = |key: &str, category: Category, region: &str, difficulty_weight: f64, energy: EnergyCost| {
            ExerciseDefinition {
                key: key.to_string(),
                category,
                region: region.to_string(),
                difficulty_weight,
                energy,
            }
        };

        Self {
            exercises: vec![
                exercise("دراز نشست", Category::Core, "مرکزی", 3.0, EnergyCost::PerRep(0.3)),
                exercise("شنا", Category::Strength, "بالاتنه", 4.0, EnergyCost::PerRep(0.5)),
                exercise("اسکات", Category::Strength, "پایین تنه", 5.0, EnergyCost::PerRep(0.8)),
                exercise("طناب", Category::Cardio, "تمام بدن", 6.0, EnergyCost::PerMinute(10.0)),
                exercise("برپی", Category::Cardio, "تمام بدن", 8.0, EnergyCost::PerRep(1.5)),
                exercise("لانگز", Category::Strength, "پایین تنه", 4.0, EnergyCost::PerRep(0.7)),
                exercise("پلانک", Category::Core, "مرکزی", 5.0, EnergyCost::PerMinute(5.0)),
                exercise("دوچرخه", Category::Cardio, "پایین تنه", 5.0, EnergyCost::PerMinute(8.0)),
                exercise("کرانچ", Category::Core, "مرکزی", 2.0, EnergyCost::PerRep(0.2)),
                exercise("پشت بازو", Category::Strength, "بالاتنه", 3.0, EnergyCost::PerRep(0.4)),
                exercise("کشش", Category::Stretch, "تمام بدن", 1.0, EnergyCost::PerMinute(3.0)),
            ],
        }
    }
}
