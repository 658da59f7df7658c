// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Coaching-specific configuration: compound-move sets and muscle-region
//! name lists used by the advisor

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Advisor configuration: the configurable name sets behind rest bonuses,
/// improvement suggestions, and imbalance detection, plus the body weight
/// used for calorie estimates.
///
/// Numeric classification thresholds are deliberately not configurable; they
/// live in [`crate::constants::policy`] as fixed policy values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Assumed body weight for calorie estimates, kilograms
    pub body_weight_kg: f64,
    /// Moves whose presence earns the compound rest bonus
    pub compound_rest_moves: Vec<String>,
    /// Moves that satisfy the "has a compound movement" suggestion check
    pub compound_suggestion_moves: Vec<String>,
    /// Name substrings placing a record in the upper-body bucket
    pub upper_body_names: Vec<String>,
    /// Name substrings placing a record in the lower-body bucket
    pub lower_body_names: Vec<String>,
    /// Name substrings placing a record in the core bucket
    pub core_names: Vec<String>,
}

impl CoachConfig {
    /// Load coaching configuration from file or use defaults.
    pub fn load(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from_file(&config_path);
        }

        if Path::new("coach_config.toml").exists() {
            return Self::load_from_file("coach_config.toml");
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read coach config file: {}", path))?;

        let config: CoachConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse coach config file: {}", path))?;

        Ok(config)
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        let names = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

        Self {
            body_weight_kg: crate::constants::policy::DEFAULT_BODY_WEIGHT_KG,
            compound_rest_moves: names(&["اسکات", "شنا", "دراز نشست"]),
            compound_suggestion_moves: names(&["اسکات", "شنا", "برپی"]),
            upper_body_names: names(&["شنا", "پشت بازو", "بارفیکس", "زیربغل"]),
            lower_body_names: names(&["اسکات", "لانگز", "دوچرخه", "ساق پا"]),
            core_names: names(&["دراز نشست", "پلانک", "کرانچ", "زیرشکم"]),
        }
    }
}
