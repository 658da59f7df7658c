// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Optional external text-analysis augmentation
//!
//! A capability-typed collaborator that may enrich an analysis with extra
//! recommendations. The core never calls it; the conversation layer does,
//! and any failure degrades to "no augmentation" without touching the
//! already-computed analysis. Core-computed fields always win on conflict.

use crate::analysis::WorkoutAnalysis;
use crate::constants::policy;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Partial, advisory analysis returned by an augmenter.
///
/// Only fields the core did not compute with higher confidence are ever
/// merged in; in practice that means recommendations only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Augmentation {
    /// Goal suggested by the external service; ignored when the core has
    /// its own (it always does)
    #[serde(default)]
    pub goal: Option<String>,
    /// Workout-type label suggested by the external service; likewise
    /// ignored
    #[serde(default)]
    pub workout_type: Option<String>,
    /// Free-form coaching recommendations, appended to the core's own
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Errors from an augmentation attempt. All of them mean "feature absent"
/// to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AugmentError {
    #[error("augmentation service is not configured")]
    Unavailable,

    #[error("augmentation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("augmentation response was not usable: {0}")]
    Malformed(String),
}

/// A collaborator that can enrich workout text analysis.
#[async_trait]
pub trait TextAugmenter: Send + Sync {
    /// Analyze the raw workout text and return advisory suggestions.
    async fn augment(&self, text: &str) -> Result<Augmentation, AugmentError>;
}

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Augmenter backed by the OpenAI chat-completions API.
pub struct OpenAiAugmenter {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

/// Chat-completions response envelope; only the content is used.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiAugmenter {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: OPENAI_API_BASE.to_string(),
        }
    }

    /// Override the API base URL, used by tests to point at a mock server.
    pub fn with_api_base(api_key: String, api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base,
        }
    }

    fn build_prompt(text: &str) -> String {
        format!(
            "این برنامه تمرینی را تحلیل کن و فقط یک JSON با ساختار زیر برگردان:\n\
             {{\"goal\": \"هدف تمرین\", \"workout_type\": \"نوع تمرین\", \"recommendations\": [\"توصیه‌ها\"]}}\n\
             متن تمرین:\n{}",
            text
        )
    }

    /// Pull the first JSON object out of a model reply that may carry
    /// surrounding prose.
    fn extract_json(content: &str) -> Option<&str> {
        let start = content.find('{')?;
        let end = content.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&content[start..=end])
    }
}

#[async_trait]
impl TextAugmenter for OpenAiAugmenter {
    async fn augment(&self, text: &str) -> Result<Augmentation, AugmentError> {
        let response: ChatResponse = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "You are a professional fitness coach."},
                    {"role": "user", "content": Self::build_prompt(text)}
                ],
                "temperature": 0.7
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| AugmentError::Malformed("empty choices".to_string()))?;

        let json_body = Self::extract_json(content)
            .ok_or_else(|| AugmentError::Malformed("no JSON object in reply".to_string()))?;

        serde_json::from_str(json_body)
            .map_err(|err| AugmentError::Malformed(err.to_string()))
    }
}

/// Merge an augmentation into an analysis, additively.
///
/// The core's own fields are authoritative: the goal and workout-type hints
/// are only logged, and recommendations are appended to the improvement
/// suggestion, capped at the same limit the advisor applies.
pub fn merge_augmentation(analysis: &mut WorkoutAnalysis, augmentation: Augmentation) {
    if let Some(goal) = augmentation.goal {
        debug!(suggested_goal = %goal, own_goal = %analysis.goal, "ignoring augmented goal");
    }
    if let Some(workout_type) = augmentation.workout_type {
        debug!(suggested_type = %workout_type, "ignoring augmented workout type");
    }

    let mut appended = 0usize;
    for recommendation in augmentation.recommendations {
        if appended >= policy::MAX_SUGGESTIONS {
            break;
        }
        let recommendation = recommendation.trim();
        if recommendation.is_empty() || analysis.improvement_suggestion.contains(recommendation) {
            continue;
        }
        analysis.improvement_suggestion.push_str(" - ");
        analysis.improvement_suggestion.push_str(recommendation);
        appended += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{extract_exercises, WorkoutAdvisor};
    use crate::catalog::ExerciseCatalog;
    use crate::config::CoachConfig;

    fn sample_analysis() -> WorkoutAnalysis {
        let advisor = WorkoutAdvisor::new(ExerciseCatalog::default(), CoachConfig::default());
        let records = extract_exercises("شنا=10\nاسکات=10", advisor.catalog());
        advisor.analyze(&records).expect("analysis should succeed")
    }

    #[test]
    fn test_extract_json_from_prose() {
        let content = "بله حتماً:\n{\"goal\": \"قدرت\"}\nموفق باشی";
        assert_eq!(
            OpenAiAugmenter::extract_json(content),
            Some("{\"goal\": \"قدرت\"}")
        );
        assert_eq!(OpenAiAugmenter::extract_json("no json here"), None);
    }

    #[test]
    fn test_merge_never_overrides_core_fields() {
        let mut analysis = sample_analysis();
        let original_goal = analysis.goal.clone();
        let original_type = analysis.workout_type.clone();

        merge_augmentation(
            &mut analysis,
            Augmentation {
                goal: Some("هدف دیگر".to_string()),
                workout_type: Some("نوع دیگر".to_string()),
                recommendations: vec![],
            },
        );

        assert_eq!(analysis.goal, original_goal);
        assert_eq!(analysis.workout_type, original_type);
    }

    #[test]
    fn test_merge_appends_capped_recommendations() {
        let mut analysis = sample_analysis();
        let original = analysis.improvement_suggestion.clone();

        merge_augmentation(
            &mut analysis,
            Augmentation {
                goal: None,
                workout_type: None,
                recommendations: vec![
                    "توصیه اول".to_string(),
                    "توصیه دوم".to_string(),
                    "توصیه سوم".to_string(),
                ],
            },
        );

        assert!(analysis.improvement_suggestion.starts_with(&original));
        assert!(analysis.improvement_suggestion.contains("توصیه اول"));
        assert!(analysis.improvement_suggestion.contains("توصیه دوم"));
        assert!(!analysis.improvement_suggestion.contains("توصیه سوم"));
    }

    #[test]
    fn test_merge_skips_duplicates_and_blanks() {
        let mut analysis = sample_analysis();
        let existing = analysis.improvement_suggestion.clone();
        // The core suggestion already contains progressive overload advice;
        // re-sending the identical text must not duplicate it.
        merge_augmentation(
            &mut analysis,
            Augmentation {
                goal: None,
                workout_type: None,
                recommendations: vec![existing.clone(), "   ".to_string()],
            },
        );

        assert_eq!(analysis.improvement_suggestion, existing);
    }

    #[tokio::test]
    async fn test_openai_augmenter_parses_mocked_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "choices": [{
                        "message": {
                            "role": "assistant",
                            "content": "{\"goal\": \"چربی‌سوزی\", \"recommendations\": [\"گرم کردن را فراموش نکن\"]}"
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let augmenter =
            OpenAiAugmenter::with_api_base("test-key".to_string(), server.url());
        let result = augmenter.augment("شنا=10").await.expect("should succeed");

        assert_eq!(result.goal.as_deref(), Some("چربی‌سوزی"));
        assert_eq!(result.recommendations.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_openai_augmenter_maps_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let augmenter =
            OpenAiAugmenter::with_api_base("test-key".to_string(), server.url());
        let result = augmenter.augment("شنا=10").await;

        assert!(matches!(result, Err(AugmentError::Http(_))));
    }
}
