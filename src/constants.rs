// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! The `policy` module holds every numeric threshold the analysis engine
//! uses; they are fixed policy values, not derived quantities, and tests
//! target them directly.

use std::env;

/// Classification and scoring policy constants.
pub mod policy {
    /// Highest total volume still classified as beginner / low intensity.
    pub const BEGINNER_VOLUME_MAX: f64 = 30.0;
    /// Highest total volume still classified as intermediate / medium
    /// intensity; anything above is advanced / high.
    pub const INTERMEDIATE_VOLUME_MAX: f64 = 70.0;

    /// Weight applied to minute-based records in the volume aggregate, so
    /// duration efforts are comparable in magnitude to rep counts.
    pub const MINUTE_VOLUME_WEIGHT: f64 = 2.0;

    /// Estimated duration of one repetition, in minutes, for the calorie
    /// formula.
    pub const MINUTES_PER_REP: f64 = 0.5;
    /// Body weight assumed when the user has not provided one, kilograms.
    pub const DEFAULT_BODY_WEIGHT_KG: f64 = 70.0;

    /// MET coefficients by exercise category.
    pub const MET_STRENGTH: f64 = 5.0;
    pub const MET_CARDIO: f64 = 8.0;
    pub const MET_CORE: f64 = 3.5;
    pub const MET_STRETCH: f64 = 2.5;
    pub const MET_OTHER: f64 = 4.0;

    /// Base rest time between moves, seconds, by fitness tier.
    pub const REST_BEGINNER_SECS: u32 = 60;
    pub const REST_INTERMEDIATE_SECS: u32 = 45;
    pub const REST_ADVANCED_SECS: u32 = 30;
    /// Extra rest granted when the workout contains a compound move.
    pub const COMPOUND_REST_BONUS_SECS: u32 = 15;

    /// Water-break interval step, minutes.
    pub const WATER_BREAK_STEP_MINUTES: u32 = 15;
    /// Exercises per water-break step.
    pub const EXERCISES_PER_WATER_BREAK: u32 = 3;

    /// Minimum volume for the fat-loss goal when cardio work is present.
    pub const FAT_LOSS_VOLUME_MIN: f64 = 50.0;
    /// Minimum rep value marking a record as strength-goal evidence.
    pub const STRENGTH_REP_VALUE_MIN: u32 = 12;
    /// Minimum volume for the endurance goal.
    pub const ENDURANCE_VOLUME_MIN: f64 = 100.0;
    /// Maximum volume for the light/general goal.
    pub const LIGHT_VOLUME_MAX: f64 = 30.0;

    /// Overtraining volume ceilings by fitness tier.
    pub const OVERTRAINING_CEILING_BEGINNER: f64 = 50.0;
    pub const OVERTRAINING_CEILING_INTERMEDIATE: f64 = 100.0;
    pub const OVERTRAINING_CEILING_ADVANCED: f64 = 200.0;

    /// Rep value above which a record counts as a heavy move.
    pub const HEAVY_REP_VALUE_MIN: u32 = 20;
    /// Longest allowed run of consecutive heavy rep-based moves.
    pub const HEAVY_RUN_MAX: usize = 3;

    /// Intensity-rewrite multipliers.
    pub const HARDER_VALUE_FACTOR: f64 = 1.3;
    pub const HARDER_REST_FACTOR: f64 = 0.8;
    pub const EASIER_VALUE_FACTOR: f64 = 0.7;
    pub const EASIER_REST_FACTOR: f64 = 1.3;

    /// Number of exercises carried into the recovery version.
    pub const RECOVERY_EXERCISE_COUNT: usize = 3;
    /// Floor for halved values in the recovery version.
    pub const RECOVERY_MIN_VALUE: u32 = 5;

    /// Per-tier value increments for the pro version.
    pub const PRO_INCREMENT_BEGINNER: u32 = 5;
    pub const PRO_INCREMENT_INTERMEDIATE: u32 = 8;
    pub const PRO_INCREMENT_ADVANCED: u32 = 12;
    /// Rest suggested in the pro version, seconds.
    pub const PRO_REST_SECS: u32 = 45;

    /// How many improvement suggestions are surfaced per analysis.
    pub const MAX_SUGGESTIONS: usize = 2;
}

/// Environment-based configuration.
pub mod env_config {
    use super::env;

    /// Get HTTP port for the keep-alive/webhook server from environment or
    /// default.
    pub fn http_port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// Get database URL from environment or default.
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/moraby.db".to_string())
    }

    /// Get Telegram bot token from environment.
    pub fn bot_token() -> Option<String> {
        env::var("BOT_TOKEN").ok()
    }

    /// Get public webhook URL from environment; absent means long polling.
    pub fn webhook_url() -> Option<String> {
        env::var("WEBHOOK_URL").ok()
    }

    /// Get OpenAI API key from environment; absent disables augmentation.
    pub fn openai_api_key() -> Option<String> {
        env::var("OPENAI_API_KEY").ok()
    }
}

/// Webhook path registered with Telegram.
pub const WEBHOOK_PATH: &str = "webhook";

/// Service name used in logs and health responses.
pub const SERVICE_NAME: &str = "moraby-bot";

/// Service version from Cargo.toml.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds_are_ordered() {
        assert!(policy::BEGINNER_VOLUME_MAX < policy::INTERMEDIATE_VOLUME_MAX);
        assert!(policy::OVERTRAINING_CEILING_BEGINNER < policy::OVERTRAINING_CEILING_INTERMEDIATE);
        assert!(
            policy::OVERTRAINING_CEILING_INTERMEDIATE < policy::OVERTRAINING_CEILING_ADVANCED
        );
    }

    #[test]
    fn test_rest_decreases_with_tier() {
        assert!(policy::REST_BEGINNER_SECS > policy::REST_INTERMEDIATE_SECS);
        assert!(policy::REST_INTERMEDIATE_SECS > policy::REST_ADVANCED_SECS);
    }

    #[test]
    fn test_env_config_defaults() {
        // Only assert defaults for variables that are not set in the test
        // environment.
        if env::var("PORT").is_err() {
            assert_eq!(env_config::http_port(), 8080);
        }
        if env::var("DATABASE_URL").is_err() {
            assert_eq!(env_config::database_url(), "sqlite:./data/moraby.db");
        }
    }
}
