// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Free-text workout extraction
//!
//! Converts loosely formatted Persian lines such as `دراز نشست=۲۰` or
//! `طناب ۳ دقیقه` into typed [`ExerciseRecord`]s. This is a best-effort,
//! rule-based extractor: lines that match no pattern are discarded, not
//! errors.

use crate::catalog::ExerciseCatalog;
use crate::models::{Category, ExerciseRecord, Unit};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Persian letter run (spaces allowed), used as the exercise-name group.
const NAME_RUN: &str = r"[\x{0600}-\x{06FF}\s]+";
/// ASCII, Persian, and Arabic-Indic digit run.
const DIGIT_RUN: &str = r"[0-9\x{06F0}-\x{06F9}\x{0660}-\x{0669}]+";
/// Recognized unit tokens: minute, second, repetition, time.
const UNIT_WORD: &str = "دقیقه|ثانیه|تکرار|بار";

/// The pattern cascade, tried in order. The order is load-bearing: the `=`
/// form wins over the `:` form, which wins over plain whitespace separation.
///
/// Stored as a filtered list so a pattern that fails to compile degrades to
/// a shorter cascade instead of a panic (should never happen for these
/// static patterns).
static LINE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!("({NAME_RUN})=\\s*({DIGIT_RUN})\\s*({UNIT_WORD})?"),
        format!("({NAME_RUN}):\\s*({DIGIT_RUN})\\s*({UNIT_WORD})?"),
        format!("({NAME_RUN})\\s+({DIGIT_RUN})\\s*({UNIT_WORD})?"),
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Parse one line into at most one exercise record.
///
/// Patterns are tried in cascade order and the first match wins. A line that
/// matches nothing contributes no record.
pub fn parse_line(line: &str, catalog: &ExerciseCatalog) -> Option<ExerciseRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    for pattern in LINE_PATTERNS.iter() {
        let Some(caps) = pattern.captures(line) else {
            continue;
        };

        let raw_name = caps.get(1)?.as_str().trim().to_string();
        if raw_name.is_empty() {
            continue;
        }

        let digits = ascii_digits(caps.get(2)?.as_str());
        let value: u32 = match digits.parse() {
            Ok(value) => value,
            Err(err) => {
                // The pattern guarantees a non-empty digit run, so reaching
                // this arm means the value did not fit; log the defect and
                // discard the line.
                warn!(line = %line, error = %err, "matched line yielded an unparseable value");
                return None;
            }
        };

        let unit = caps
            .get(3)
            .map(|m| unit_from_token(m.as_str()))
            .unwrap_or(Unit::Rep);

        let (normalized_key, category) = match catalog.lookup(&raw_name) {
            Some(definition) => (Some(definition.key.clone()), definition.category),
            None => (None, Category::Other),
        };

        return Some(ExerciseRecord {
            raw_name,
            normalized_key,
            value,
            unit,
            category,
        });
    }

    None
}

/// Extract every recognizable exercise record from a text block, in input
/// order.
///
/// An empty result means "no exercises recognized"; the caller must surface
/// that to the user instead of analyzing a zero-value workout.
pub fn extract_exercises(text: &str, catalog: &ExerciseCatalog) -> Vec<ExerciseRecord> {
    text.lines()
        .filter_map(|line| parse_line(line, catalog))
        .collect()
}

fn unit_from_token(token: &str) -> Unit {
    match token {
        "دقیقه" => Unit::Minute,
        "ثانیه" => Unit::Second,
        // Both "repetition" and "time" count as rep-based.
        _ => Unit::Rep,
    }
}

/// Fold Persian (۰-۹) and Arabic-Indic (٠-٩) digit glyphs to ASCII.
fn ascii_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => {
                char::from_u32('0' as u32 + (c as u32 - 0x06F0)).unwrap_or(c)
            }
            '\u{0660}'..='\u{0669}' => {
                char::from_u32('0' as u32 + (c as u32 - 0x0660)).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ExerciseCatalog {
        ExerciseCatalog::default()
    }

    #[test]
    fn test_equals_form_defaults_to_rep() {
        let record = parse_line("دراز نشست=20", &catalog()).expect("should parse");
        assert_eq!(record.raw_name, "دراز نشست");
        assert_eq!(record.normalized_key.as_deref(), Some("دراز نشست"));
        assert_eq!(record.value, 20);
        assert_eq!(record.unit, Unit::Rep);
        assert_eq!(record.category, Category::Core);
    }

    #[test]
    fn test_persian_digits() {
        let record = parse_line("شنا=۱۰", &catalog()).expect("should parse");
        assert_eq!(record.value, 10);
        assert_eq!(record.unit, Unit::Rep);
    }

    #[test]
    fn test_arabic_indic_digits() {
        let record = parse_line("اسکات=٥", &catalog()).expect("should parse");
        assert_eq!(record.value, 5);
    }

    #[test]
    fn test_minute_unit() {
        let record = parse_line("طناب=3 دقیقه", &catalog()).expect("should parse");
        assert_eq!(record.value, 3);
        assert_eq!(record.unit, Unit::Minute);
        assert_eq!(record.category, Category::Cardio);
    }

    #[test]
    fn test_second_unit() {
        let record = parse_line("پلانک: ۴۵ ثانیه", &catalog()).expect("should parse");
        assert_eq!(record.value, 45);
        assert_eq!(record.unit, Unit::Second);
    }

    #[test]
    fn test_colon_form() {
        let record = parse_line("کرانچ: 15", &catalog()).expect("should parse");
        assert_eq!(record.raw_name, "کرانچ");
        assert_eq!(record.value, 15);
    }

    #[test]
    fn test_whitespace_form() {
        let record = parse_line("شنا ۱۰ تکرار", &catalog()).expect("should parse");
        assert_eq!(record.raw_name, "شنا");
        assert_eq!(record.value, 10);
        assert_eq!(record.unit, Unit::Rep);
    }

    #[test]
    fn test_bar_token_counts_as_rep() {
        let record = parse_line("برپی ۸ بار", &catalog()).expect("should parse");
        assert_eq!(record.unit, Unit::Rep);
        assert_eq!(record.value, 8);
    }

    #[test]
    fn test_equals_wins_over_whitespace() {
        // The name run contains a space; the `=` pattern must claim the line
        // before the whitespace pattern gets a chance.
        let record = parse_line("شنا سوئدی = ۱۰", &catalog()).expect("should parse");
        assert_eq!(record.raw_name, "شنا سوئدی");
        assert_eq!(record.value, 10);
    }

    #[test]
    fn test_trailing_words_ignored() {
        let record = parse_line("طناب=۳ دقیقه عالی بود", &catalog()).expect("should parse");
        assert_eq!(record.value, 3);
        assert_eq!(record.unit, Unit::Minute);
    }

    #[test]
    fn test_unknown_name_is_other() {
        let record = parse_line("حرکت عجیب=۵", &catalog()).expect("should parse");
        assert_eq!(record.normalized_key, None);
        assert_eq!(record.category, Category::Other);
        assert_eq!(record.display_name(), "حرکت عجیب");
    }

    #[test]
    fn test_non_matching_lines_discarded() {
        assert!(parse_line("", &catalog()).is_none());
        assert!(parse_line("   ", &catalog()).is_none());
        assert!(parse_line("سلام مربی", &catalog()).is_none());
        assert!(parse_line("no persian here 10", &catalog()).is_none());
        assert!(parse_line("شنا=", &catalog()).is_none());
    }

    #[test]
    fn test_extract_preserves_input_order() {
        let text = "دراز نشست=20\nشنا=10\n\nاین خط تمرین نیست\nاسکات=5";
        let records = extract_exercises(text, &catalog());

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].display_name(), "دراز نشست");
        assert_eq!(records[1].display_name(), "شنا");
        assert_eq!(records[2].display_name(), "اسکات");
    }

    #[test]
    fn test_extract_empty_and_noise_only() {
        assert!(extract_exercises("", &catalog()).is_empty());
        assert!(extract_exercises("\n\n\n", &catalog()).is_empty());
        assert!(extract_exercises("سلام\nچطوری\nخداحافظ", &catalog()).is_empty());
    }

    #[test]
    fn test_overflowing_value_discarded() {
        assert!(parse_line("شنا=99999999999999999999", &catalog()).is_none());
    }
}
