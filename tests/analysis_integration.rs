// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end analysis scenarios through the public API

use moraby_bot::analysis::{
    extract_exercises, generate_pro_version, rewrite_intensity, RewriteDirection, WorkoutAdvisor,
};
use moraby_bot::catalog::ExerciseCatalog;
use moraby_bot::config::CoachConfig;
use moraby_bot::models::{Category, FitnessLevel, Intensity, Unit};

fn advisor() -> WorkoutAdvisor {
    WorkoutAdvisor::new(ExerciseCatalog::default(), CoachConfig::default())
}

#[test]
fn test_blank_and_noise_input_extracts_nothing() {
    let advisor = advisor();

    for text in ["", "\n\n", "   \n  \n", "سلام\nچطوری؟", "just english text"] {
        assert!(
            extract_exercises(text, advisor.catalog()).is_empty(),
            "expected no records for {text:?}"
        );
    }
}

#[test]
fn test_empty_extraction_must_be_rejected_before_analysis() {
    let advisor = advisor();
    let records = extract_exercises("", advisor.catalog());

    assert!(records.is_empty());
    assert!(advisor.analyze(&records).is_err());
}

#[test]
fn test_equals_form_without_unit_is_rep() {
    let advisor = advisor();

    for (text, expected) in [("شنا=0", 0u32), ("شنا=7", 7), ("شنا=120", 120)] {
        let records = extract_exercises(text, advisor.catalog());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unit, Unit::Rep);
        assert_eq!(records[0].value, expected);
    }
}

#[test]
fn test_minute_records_weigh_double_in_volume() {
    let advisor = advisor();

    let rep_records = extract_exercises("طناب=10", advisor.catalog());
    let minute_records = extract_exercises("طناب=10 دقیقه", advisor.catalog());

    let rep_analysis = advisor.analyze(&rep_records).unwrap();
    let minute_analysis = advisor.analyze(&minute_records).unwrap();

    assert_eq!(rep_analysis.total_volume, 10.0);
    assert_eq!(minute_analysis.total_volume, 20.0);
}

#[test]
fn test_scenario_mixed_workout() {
    let advisor = advisor();
    let records = extract_exercises("دراز نشست=20\nشنا=10\nاسکات=5", advisor.catalog());

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].category, Category::Core);
    assert_eq!(records[1].category, Category::Strength);
    assert_eq!(records[2].category, Category::Strength);

    let analysis = advisor.analyze(&records).unwrap();
    assert_eq!(analysis.goal, "افزایش قدرت");
    assert!(analysis.imbalance_warnings.is_empty());
}

#[test]
fn test_scenario_jump_rope() {
    let advisor = advisor();
    let records = extract_exercises("طناب=3 دقیقه", advisor.catalog());

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].unit, Unit::Minute);
    assert_eq!(records[0].value, 3);
    assert_eq!(records[0].category, Category::Cardio);

    let analysis = advisor.analyze(&records).unwrap();
    assert_eq!(analysis.total_volume, 6.0);
    assert_eq!(analysis.fitness_level, FitnessLevel::Beginner);
    assert_eq!(analysis.rest_time_seconds, 60);
}

#[test]
fn test_scenario_overtraining_warnings_both_fire() {
    let advisor = advisor();

    let text = (0..11)
        .map(|i| format!("حرکت شماره {}=25", persian_ordinal(i)))
        .collect::<Vec<_>>()
        .join("\n");
    let records = extract_exercises(&text, advisor.catalog());
    assert_eq!(records.len(), 11);

    let analysis = advisor.analyze(&records).unwrap();
    assert_eq!(analysis.total_volume, 275.0);
    assert_eq!(analysis.overtraining_warnings.len(), 2);
    assert!(analysis.overtraining_warnings[0].contains("200"));
}

#[test]
fn test_determinism_byte_identical() {
    let advisor = advisor();
    let text = "دراز نشست=۲۰\nشنا=۱۰\nاسکات=۵\nطناب=۳ دقیقه\nحرکت ناشناخته=۷";

    let first = advisor
        .analyze(&extract_exercises(text, advisor.catalog()))
        .unwrap();
    let second = advisor
        .analyze(&extract_exercises(text, advisor.catalog()))
        .unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_rewrite_round_trip_is_bounded() {
    let advisor = advisor();
    let records = extract_exercises("شنا=10\nاسکات=20\nطناب=5 دقیقه", advisor.catalog());
    let analysis = advisor.analyze(&records).unwrap();

    let harder = rewrite_intensity(&analysis, RewriteDirection::Harder);
    // Rendering is pure; calling again gives the identical text.
    assert_eq!(harder, rewrite_intensity(&analysis, RewriteDirection::Harder));

    // Value bound: easier(harder(v)) <= v for every starting value.
    for value in [1u32, 3, 10, 13, 21, 100] {
        let up = moraby_bot::analysis::rewrite::scale_value(value, 1.3);
        let down = moraby_bot::analysis::rewrite::scale_value(up, 0.7);
        assert!(down <= value);
    }
}

#[test]
fn test_pro_version_per_level() {
    let advisor = advisor();
    let records = extract_exercises("اسکات=10\nطناب=4 دقیقه", advisor.catalog());

    let text = generate_pro_version(&records, FitnessLevel::Intermediate);
    assert!(text.contains("اسکات: 18 تکرار"));
    assert!(text.contains("طناب: 12 دقیقه"));
    assert!(text.contains("اسکات پرشی"));
}

#[test]
fn test_smaller_catalog_can_be_substituted() {
    // Catalog injection: with a single-entry catalog, everything else is
    // unmatched and classified as other.
    let catalog: ExerciseCatalog = toml::from_str(
        r#"
[[exercise]]
key = "شنا"
category = "strength"
region = "بالاتنه"
difficulty_weight = 4.0
energy = { per_rep = 0.5 }
"#,
    )
    .unwrap();

    let records = extract_exercises("شنا=10\nاسکات=5", &catalog);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, Category::Strength);
    assert_eq!(records[1].category, Category::Other);
    assert_eq!(records[1].normalized_key, None);

    let advisor = WorkoutAdvisor::new(catalog, CoachConfig::default());
    let analysis = advisor.analyze(&records).unwrap();
    assert_eq!(analysis.workout_type, "قدرتی");
}

#[test]
fn test_intensity_tiers_by_constructed_volume() {
    let advisor = advisor();

    let low = advisor
        .analyze(&extract_exercises("کرانچ=30", advisor.catalog()))
        .unwrap();
    assert_eq!(low.intensity, Intensity::Low);

    let medium = advisor
        .analyze(&extract_exercises("کرانچ=31", advisor.catalog()))
        .unwrap();
    assert_eq!(medium.intensity, Intensity::Medium);

    let high = advisor
        .analyze(&extract_exercises("کرانچ=71", advisor.catalog()))
        .unwrap();
    assert_eq!(high.intensity, Intensity::High);
    assert!(high.recovery_version.is_some());
}

/// Distinct Persian words so every generated line stays unmatched by the
/// catalog.
fn persian_ordinal(index: usize) -> String {
    let names = [
        "یک", "دو", "سه", "چهار", "پنج", "شش", "هفت", "هشت", "نه", "ده", "یازده",
    ];
    names[index % names.len()].to_string()
}
