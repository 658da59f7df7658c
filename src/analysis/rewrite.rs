// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Workout rewrites
//!
//! Pure transforms of an already-computed analysis: the harder/easier
//! intensity rewrites and the per-tier pro version. None of these re-derive
//! anything from raw text.

use super::WorkoutAnalysis;
use crate::constants::policy;
use crate::models::{ExerciseRecord, FitnessLevel};

/// Direction of an intensity rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteDirection {
    Harder,
    Easier,
}

/// Render a harder or easier variant of a previously computed analysis.
///
/// Harder scales every value by 1.3 and rest by 0.8; easier scales value by
/// 0.7 and rest by 1.3. Scaled figures truncate to integers, so a
/// harder-then-easier round trip never exceeds the original values.
pub fn rewrite_intensity(analysis: &WorkoutAnalysis, direction: RewriteDirection) -> String {
    let (value_factor, rest_factor, header, footer) = match direction {
        RewriteDirection::Harder => (
            policy::HARDER_VALUE_FACTOR,
            policy::HARDER_REST_FACTOR,
            "🔥 نسخه سخت‌تر تمرین:",
            "⚠️ این نسخه چالش‌برانگیزتر است. به فرم صحیح توجه کن!",
        ),
        RewriteDirection::Easier => (
            policy::EASIER_VALUE_FACTOR,
            policy::EASIER_REST_FACTOR,
            "🧊 نسخه سبک‌تر تمرین:",
            "👍 نسخه مناسب برای شروع یا ریکاوری.",
        ),
    };

    let mut text = format!("{}\n\n", header);
    for record in &analysis.exercises {
        text.push_str(&format!(
            "• {}: {} {}\n",
            record.display_name(),
            scale_value(record.value, value_factor),
            record.unit.display_name()
        ));
    }

    let rest = scale_value(analysis.rest_time_seconds, rest_factor);
    let rest_note = match direction {
        RewriteDirection::Harder => "کمتر",
        RewriteDirection::Easier => "بیشتر",
    };
    text.push_str(&format!("\n⏱ استراحت: {} ثانیه ({})\n\n{}", rest, rest_note, footer));

    text
}

/// Scale one rewritten value: multiply and truncate toward zero.
pub fn scale_value(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor) as u32
}

/// Render the pro version of a workout: every value raised by a per-tier
/// increment, with a named harder variant suggested for known moves.
pub fn generate_pro_version(records: &[ExerciseRecord], level: FitnessLevel) -> String {
    let increment = match level {
        FitnessLevel::Beginner => policy::PRO_INCREMENT_BEGINNER,
        FitnessLevel::Intermediate => policy::PRO_INCREMENT_INTERMEDIATE,
        FitnessLevel::Advanced => policy::PRO_INCREMENT_ADVANCED,
    };

    let mut text = "🔄 بازنویسی حرفه‌ای تمرین:\n\n".to_string();
    for record in records {
        match pro_variant(record.display_name()) {
            Some(variant) => text.push_str(&format!(
                "• {}: {} {} (نسخه حرفه‌ای: {})\n",
                record.display_name(),
                record.value + increment,
                record.unit.display_name(),
                variant
            )),
            None => text.push_str(&format!(
                "• {}: {} {}\n",
                record.display_name(),
                record.value + increment,
                record.unit.display_name()
            )),
        }
    }

    text.push_str(&format!(
        "\n⏱ استراحت: {} ثانیه بین ست‌ها",
        policy::PRO_REST_SECS
    ));

    text
}

/// Named harder variant for the moves that have one.
fn pro_variant(key: &str) -> Option<&'static str> {
    match key {
        "اسکات" => Some("اسکات پرشی"),
        "شنا" => Some("شنا دست جمع"),
        "دراز نشست" => Some("دراز نشست با پیچش"),
        "لانگز" => Some("لانگز راه رفتنی"),
        "پلانک" => Some("پلانک با لمس شانه"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{extract_exercises, WorkoutAdvisor};
    use crate::catalog::ExerciseCatalog;
    use crate::config::CoachConfig;

    fn analysis(text: &str) -> WorkoutAnalysis {
        let advisor = WorkoutAdvisor::new(ExerciseCatalog::default(), CoachConfig::default());
        let records = extract_exercises(text, advisor.catalog());
        advisor.analyze(&records).expect("analysis should succeed")
    }

    #[test]
    fn test_scale_value_truncates() {
        assert_eq!(scale_value(10, 1.3), 13);
        assert_eq!(scale_value(10, 0.7), 7);
        assert_eq!(scale_value(5, 1.3), 6); // 6.5 truncates
        assert_eq!(scale_value(5, 0.7), 3); // 3.5 truncates
        assert_eq!(scale_value(0, 1.3), 0);
    }

    #[test]
    fn test_harder_rewrite_scales_values_and_rest() {
        let analysis = analysis("شنا=10\nاسکات=10");
        let text = rewrite_intensity(&analysis, RewriteDirection::Harder);

        assert!(text.contains("شنا: 13 تکرار"));
        assert!(text.contains("اسکات: 13 تکرار"));
        // Rest 75s (intermediate base would differ; here beginner 60 + 15
        // compound bonus) scaled by 0.8.
        assert!(text.contains(&format!(
            "استراحت: {} ثانیه (کمتر)",
            scale_value(analysis.rest_time_seconds, 0.8)
        )));
    }

    #[test]
    fn test_easier_rewrite_scales_down() {
        let analysis = analysis("طناب=10 دقیقه");
        let text = rewrite_intensity(&analysis, RewriteDirection::Easier);

        assert!(text.contains("طناب: 7 دقیقه"));
        assert!(text.contains("بیشتر"));
    }

    #[test]
    fn test_round_trip_never_exceeds_original() {
        // easier(harder(v)) is bounded by 0.91 * v after truncation.
        for value in [1u32, 5, 10, 13, 20, 50, 99, 1000] {
            let harder = scale_value(value, policy::HARDER_VALUE_FACTOR);
            let round_trip = scale_value(harder, policy::EASIER_VALUE_FACTOR);
            assert!(
                round_trip <= value,
                "round trip {} -> {} -> {} exceeded original",
                value,
                harder,
                round_trip
            );
        }
    }

    #[test]
    fn test_pro_version_increment_by_level() {
        let records = extract_exercises("شنا=10", &ExerciseCatalog::default());

        let beginner = generate_pro_version(&records, FitnessLevel::Beginner);
        assert!(beginner.contains("شنا: 15 تکرار"));

        let intermediate = generate_pro_version(&records, FitnessLevel::Intermediate);
        assert!(intermediate.contains("شنا: 18 تکرار"));

        let advanced = generate_pro_version(&records, FitnessLevel::Advanced);
        assert!(advanced.contains("شنا: 22 تکرار"));
    }

    #[test]
    fn test_pro_version_names_variants() {
        let records = extract_exercises("اسکات=10\nپشت بازو=10", &ExerciseCatalog::default());
        let text = generate_pro_version(&records, FitnessLevel::Beginner);

        assert!(text.contains("اسکات پرشی"));
        // Triceps has no named variant; the line still appears.
        assert!(text.contains("پشت بازو: 15 تکرار"));
        assert!(text.contains("45 ثانیه"));
    }
}
