// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Workout classification and advice
//!
//! State-free policy rules evaluated in a fixed order on every analysis:
//! tier, rest time, water breaks, goal, muscle balance, overtraining, and
//! improvement suggestions. Thresholds come from
//! [`crate::constants::policy`] and are never computed.

use super::{metrics, AnalysisError, WorkoutAnalysis};
use crate::catalog::ExerciseCatalog;
use crate::config::CoachConfig;
use crate::constants::policy;
use crate::models::{Category, ExerciseRecord, FitnessLevel, Intensity};
use std::collections::BTreeSet;

/// The classifier/advisor. Holds the injected catalog and coaching
/// configuration; carries no per-request state.
pub struct WorkoutAdvisor {
    catalog: ExerciseCatalog,
    config: CoachConfig,
}

impl WorkoutAdvisor {
    pub fn new(catalog: ExerciseCatalog, config: CoachConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    /// Produce the full assessment for a non-empty record sequence.
    ///
    /// Classification requires at least one record; callers surface
    /// [`AnalysisError::EmptyWorkout`] as a user-facing format hint.
    pub fn analyze(&self, records: &[ExerciseRecord]) -> Result<WorkoutAnalysis, AnalysisError> {
        if records.is_empty() {
            return Err(AnalysisError::EmptyWorkout);
        }

        let total_volume = metrics::volume(records);
        let total_calories = metrics::calories(records, self.config.body_weight_kg);
        let (fitness_level, intensity) = classify_tier(total_volume);
        let dominant = dominant_category(records);

        let recovery_version = if intensity == Intensity::High {
            Some(self.recovery_version(records))
        } else {
            None
        };

        Ok(WorkoutAnalysis {
            exercises: records.to_vec(),
            total_volume,
            total_calories,
            workout_type: dominant
                .map(|category| category.display_name().to_string())
                .unwrap_or_else(|| "ترکیبی".to_string()),
            intensity,
            fitness_level,
            muscle_groups: self.muscle_groups(records),
            rest_time_seconds: self.rest_time_seconds(fitness_level, records),
            water_break_minutes: water_break_minutes(records.len()),
            goal: self.infer_goal(records, total_volume),
            imbalance_warnings: self.imbalance_warnings(records),
            overtraining_warnings: overtraining_warnings(records, total_volume, fitness_level),
            improvement_suggestion: self.improvement_suggestion(records, dominant),
            recovery_version,
        })
    }

    /// Base rest by tier, plus a bonus when a compound move is present.
    fn rest_time_seconds(&self, level: FitnessLevel, records: &[ExerciseRecord]) -> u32 {
        let base = match level {
            FitnessLevel::Beginner => policy::REST_BEGINNER_SECS,
            FitnessLevel::Intermediate => policy::REST_INTERMEDIATE_SECS,
            FitnessLevel::Advanced => policy::REST_ADVANCED_SECS,
        };

        let has_compound = records.iter().any(|record| {
            record
                .normalized_key
                .as_deref()
                .is_some_and(|key| self.config.compound_rest_moves.iter().any(|m| m == key))
        });

        if has_compound {
            base + policy::COMPOUND_REST_BONUS_SECS
        } else {
            base
        }
    }

    /// Goal inference; the first matching rule wins.
    fn infer_goal(&self, records: &[ExerciseRecord], total_volume: f64) -> String {
        let has_category =
            |category: Category| records.iter().any(|record| record.category == category);
        let has_heavy_rep = records.iter().any(|record| {
            record.unit.is_rep_based() && record.value > policy::STRENGTH_REP_VALUE_MIN
        });

        let goal = if has_category(Category::Cardio) && total_volume > policy::FAT_LOSS_VOLUME_MIN
        {
            "چربی‌سوزی"
        } else if has_category(Category::Strength) && has_heavy_rep {
            "افزایش قدرت"
        } else if has_category(Category::Core) {
            "تقویت عضلات مرکزی"
        } else if total_volume > policy::ENDURANCE_VOLUME_MIN {
            "استقامتی"
        } else if total_volume < policy::LIGHT_VOLUME_MAX {
            "حفظ سلامتی و فعال ماندن"
        } else {
            "ترکیبی (چربی‌سوزی و قدرتی)"
        };

        goal.to_string()
    }

    /// Body regions engaged by the catalog-matched records.
    fn muscle_groups(&self, records: &[ExerciseRecord]) -> BTreeSet<String> {
        records
            .iter()
            .filter_map(|record| {
                let key = record.normalized_key.as_deref()?;
                self.catalog.get(key).map(|def| def.region.clone())
            })
            .collect()
    }

    /// One-sided-training and missing-core warnings, in a fixed order.
    fn imbalance_warnings(&self, records: &[ExerciseRecord]) -> Vec<String> {
        let bucket = |names: &[String]| {
            records
                .iter()
                .filter(|record| {
                    names
                        .iter()
                        .any(|name| record.display_name().contains(name.as_str()))
                })
                .count()
        };

        let upper = bucket(&self.config.upper_body_names);
        let lower = bucket(&self.config.lower_body_names);
        let core = bucket(&self.config.core_names);

        let mut warnings = Vec::new();

        if upper > 0 && lower == 0 {
            warnings.push(
                "تمرین شما فقط بالاتنه را درگیر می‌کند. حرکات پایین تنه مانند اسکات را اضافه کنید."
                    .to_string(),
            );
        } else if lower > 0 && upper == 0 {
            warnings.push(
                "تمرین شما فقط پایین تنه را درگیر می‌کند. حرکات بالاتنه مانند شنا را اضافه کنید."
                    .to_string(),
            );
        }

        if core == 0 && (upper > 0 || lower > 0) {
            warnings.push(
                "تمرینات مرکزی بدن (کرانچ، پلانک) را برای تعادل بیشتر اضافه کنید.".to_string(),
            );
        }

        warnings
    }

    /// Up to two improvement suggestions, joined into one line.
    fn improvement_suggestion(
        &self,
        records: &[ExerciseRecord],
        dominant: Option<Category>,
    ) -> String {
        let mut suggestions: Vec<&str> = Vec::new();

        let has_compound = records.iter().any(|record| {
            record
                .normalized_key
                .as_deref()
                .is_some_and(|key| self.config.compound_suggestion_moves.iter().any(|m| m == key))
        });
        if !has_compound {
            suggestions.push("اضافه کردن یک حرکت ترکیبی مانند اسکات یا شنا");
        }

        suggestions.push("افزایش تدریجی تعداد تکرارها یا ست‌ها در هفته");

        if dominant == Some(Category::Strength) {
            suggestions.push("تنوع در زاویه و نوع حرکات برای درگیری بیشتر عضلات");
        }

        suggestions.truncate(policy::MAX_SUGGESTIONS);
        suggestions.join(" - ")
    }

    /// Reduced-volume plan for high-intensity workouts: the first three
    /// records at half value, floored at five.
    fn recovery_version(&self, records: &[ExerciseRecord]) -> String {
        let plan: Vec<String> = records
            .iter()
            .take(policy::RECOVERY_EXERCISE_COUNT)
            .map(|record| {
                format!(
                    "{}: {} {}",
                    record.display_name(),
                    (record.value / 2).max(policy::RECOVERY_MIN_VALUE),
                    record.unit.display_name()
                )
            })
            .collect();

        format!(
            "نسخه ریکاوری: {}\n💧 تمرین سبک‌تر با ۵۰٪ حجم و استراحت بیشتر بین ست‌ها",
            plan.join(" - ")
        )
    }
}

/// Fitness tier and intensity from total volume.
fn classify_tier(total_volume: f64) -> (FitnessLevel, Intensity) {
    if total_volume <= policy::BEGINNER_VOLUME_MAX {
        (FitnessLevel::Beginner, Intensity::Low)
    } else if total_volume <= policy::INTERMEDIATE_VOLUME_MAX {
        (FitnessLevel::Intermediate, Intensity::Medium)
    } else {
        (FitnessLevel::Advanced, Intensity::High)
    }
}

/// Water-break interval: one step per three exercises, never below one step.
fn water_break_minutes(exercise_count: usize) -> u32 {
    let steps = (exercise_count as u32).div_ceil(policy::EXERCISES_PER_WATER_BREAK);
    (steps * policy::WATER_BREAK_STEP_MINUTES).max(policy::WATER_BREAK_STEP_MINUTES)
}

/// Volume-ceiling and heavy-run checks; both may fire independently.
fn overtraining_warnings(
    records: &[ExerciseRecord],
    total_volume: f64,
    level: FitnessLevel,
) -> Vec<String> {
    let mut warnings = Vec::new();

    let ceiling = match level {
        FitnessLevel::Beginner => policy::OVERTRAINING_CEILING_BEGINNER,
        FitnessLevel::Intermediate => policy::OVERTRAINING_CEILING_INTERMEDIATE,
        FitnessLevel::Advanced => policy::OVERTRAINING_CEILING_ADVANCED,
    };
    if total_volume > ceiling {
        warnings.push(format!(
            "⚠️ حجم تمرین ({:.0}) از سقف مجاز سطح شما ({:.0}) فراتر رفته است. به بدن خود استراحت کافی بدهید.",
            total_volume, ceiling
        ));
    }

    let mut run = 0usize;
    let mut longest = 0usize;
    for record in records {
        if record.unit.is_rep_based() && record.value > policy::HEAVY_REP_VALUE_MIN {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    if longest > policy::HEAVY_RUN_MAX {
        warnings.push(
            "⚠️ چند حرکت سنگین پشت سر هم انجام می‌دهید. بین حرکات سنگین یک حرکت سبک یا استراحت قرار دهید."
                .to_string(),
        );
    }

    warnings
}

/// Most frequent category among catalog-matched records; ties break toward
/// the category seen first, so the result is deterministic.
fn dominant_category(records: &[ExerciseRecord]) -> Option<Category> {
    let mut counts: Vec<(Category, usize)> = Vec::new();
    for record in records.iter().filter(|r| r.normalized_key.is_some()) {
        match counts.iter_mut().find(|(category, _)| *category == record.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.category, 1)),
        }
    }

    let mut best: Option<(Category, usize)> = None;
    for (category, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}
