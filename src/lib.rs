// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Moraby Bot
//!
//! A Telegram coaching bot that analyzes free-form, Persian-language workout
//! descriptions. Users send their workout as plain text lines such as
//! `دراز نشست=۲۰` and receive a structured assessment: estimated calories,
//! intensity and fitness tier, suggested rest and water-break timing, muscle
//! balance warnings, and improvement suggestions.
//!
//! ## Features
//!
//! - **Rule-based extraction**: an ordered pattern cascade turns loosely
//!   formatted lines into typed exercise records
//! - **Heuristic analysis**: volume, calorie, and difficulty scoring with a
//!   fixed, reproducible classification policy
//! - **Workout rewrites**: harder/easier variants and a per-level pro version
//! - **History**: workouts and user settings persisted in SQLite
//! - **Optional LLM augmentation**: best-effort enrichment that degrades to
//!   "no augmentation" when unavailable
//!
//! ## Quick Start
//!
//! 1. Set `BOT_TOKEN` (and optionally `WEBHOOK_URL`) in the environment
//! 2. Start the bot with the `moraby-bot` binary
//! 3. Send a workout from Telegram
//!
//! ## Architecture
//!
//! The bot follows a modular architecture:
//! - **Catalog**: the exercise reference table used to normalize names
//! - **Analysis**: parser, metrics engine, advisor, and rewrite generation
//! - **Bot**: Telegram transport, keyboards, and conversation handlers
//! - **Database**: user and workout-history persistence
//! - **Augment**: optional external text-analysis enrichment
//!
//! ## Example Usage
//!
//! ```rust
//! use moraby_bot::analysis::{extract_exercises, WorkoutAdvisor};
//! use moraby_bot::catalog::ExerciseCatalog;
//! use moraby_bot::config::CoachConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let catalog = ExerciseCatalog::default();
//!     let advisor = WorkoutAdvisor::new(catalog.clone(), CoachConfig::default());
//!
//!     let records = extract_exercises("دراز نشست=۲۰\nشنا=۱۰", &catalog);
//!     let analysis = advisor.analyze(&records)?;
//!     println!("calories: {}", analysis.total_calories.round());
//!
//!     Ok(())
//! }
//! ```

/// Common data models for exercise records and user state
pub mod models;

/// Exercise reference catalog and name normalization
pub mod catalog;

/// Application constants and environment-based configuration values
pub mod constants;

/// Configuration management and persistence
pub mod config;

/// Workout text analysis: extraction, metrics, classification, rewrites
pub mod analysis;

/// Optional external text-analysis augmentation
pub mod augment;

/// User and workout-history database management
pub mod database;

/// Telegram transport, keyboards, and conversation handlers
pub mod bot;

/// Production logging and structured output
pub mod logging;

/// Health checks and keep-alive endpoints
pub mod health;
