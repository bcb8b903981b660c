//! Extracts a StructuredSummary from normalized transcript text via an
//! external text-generation model.
//!
//! Two failure classes are kept strictly apart: transport failures (model
//! unreachable, non-2xx, timeout) propagate as errors so callers can report
//! a failed run, while parse failures (the model answered with something we
//! couldn't use) degrade to the fallback structure and are never surfaced.

use crate::error::Error;
use crate::summary::StructuredSummary;
use async_trait::async_trait;
use log::*;
use std::fmt;

/// Port for the external text-generation model. Implemented by the Gemini
/// gateway client; test code injects fakes.
#[async_trait]
pub trait TextGeneration: Send + Sync {
    /// Generate text for a single prompt. One call, no streaming.
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

/// A failed attempt to interpret model output as a StructuredSummary.
/// Recovered locally via the fallback structure, never propagated.
#[derive(Debug)]
pub struct ParseFailure {
    reason: String,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse structured summary: {}", self.reason)
    }
}

/// Extracts structured summaries from transcript text using the injected
/// model.
pub struct SummaryExtractor<M: TextGeneration> {
    model: M,
}

impl<M: TextGeneration> SummaryExtractor<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Produces a StructuredSummary for the given transcript text.
    ///
    /// Empty or whitespace-only input short-circuits to the fallback without
    /// invoking the model. Transport errors from the model call propagate;
    /// unusable model output degrades to the fallback.
    pub async fn extract(&self, transcript_text: &str) -> Result<StructuredSummary, Error> {
        if transcript_text.trim().is_empty() {
            debug!("Empty transcript text, returning fallback summary without model call");
            return Ok(StructuredSummary::fallback());
        }

        let prompt = build_prompt(transcript_text);
        let raw = self.model.generate(&prompt).await?;

        match parse_structured_summary(&raw) {
            Ok(summary) => Ok(summary),
            Err(failure) => {
                warn!("{failure}; returning fallback summary");
                Ok(StructuredSummary::fallback())
            }
        }
    }
}

/// Builds the fixed instructional prompt embedding the transcript and the
/// expected JSON shape. The shape shown here is a contract with the parser
/// and the persister.
pub(crate) fn build_prompt(transcript_text: &str) -> String {
    format!(
        r#"You are an expert meeting analyst. Analyze the following meeting transcript and extract structured information.

TRANSCRIPT:
{transcript_text}

Please provide a structured analysis in the following JSON format:

{{
    "overview": "Brief overview of the meeting",
    "action_items": [
        {{
            "description": "Action item description",
            "owner": "Person responsible",
            "due_date": "Due date if mentioned (YYYY-MM-DD format)",
            "priority": "high/medium/low",
            "status": "pending"
        }}
    ],
    "key_decisions": [
        {{
            "decision": "Decision made",
            "context": "Context around the decision",
            "impact": "Impact of the decision"
        }}
    ],
    "key_takeaways": [
        "Key takeaway 1",
        "Key takeaway 2"
    ],
    "discussion_points": [
        {{
            "topic": "Discussion topic",
            "summary": "Summary of discussion",
            "participants": ["Participant names"]
        }}
    ],
    "jargon_clarifications": [
        {{
            "term": "Jargon or acronym",
            "clarification": "Explanation of the term"
        }}
    ],
    "themes": [
        "Theme 1",
        "Theme 2"
    ],
    "context_group": "Suggested context group identifier (e.g., 'product-development', 'sales-review', 'team-sync')"
}}

Return ONLY the JSON object, no additional text."#
    )
}

/// Strips a markdown code fence wrapping, if present: a leading ```json
/// (or bare ```) and a trailing ```.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped;
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped;
    }

    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped;
    }

    text.trim()
}

/// Attempts to interpret raw model output as a StructuredSummary.
///
/// The value must be a JSON object; unknown top-level keys are ignored and
/// missing ones take their defaults. No deep validation of nested field
/// types happens here beyond what the shape requires - the persister coerces
/// item sub-fields defensively.
pub fn parse_structured_summary(raw: &str) -> Result<StructuredSummary, ParseFailure> {
    let text = strip_code_fence(raw);

    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| ParseFailure {
        reason: format!("invalid JSON: {e}"),
    })?;

    if !value.is_object() {
        return Err(ParseFailure {
            reason: "model response is not a JSON object".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| ParseFailure {
        reason: format!("object does not match expected shape: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Model fake that records how many times it was called
    struct FakeModel {
        calls: AtomicUsize,
        response: Result<String, ()>,
    }

    impl FakeModel {
        fn replying(response: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Ok(response.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Err(()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGeneration for &FakeModel {
        async fn generate(&self, _prompt: &str) -> Result<String, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(Error {
                    source: None,
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_input_returns_fallback_without_model_call() {
        let model = FakeModel::replying("{}");
        let extractor = SummaryExtractor::new(&model);

        let summary = extractor.extract("").await.unwrap();
        assert_eq!(summary, StructuredSummary::fallback());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_only_input_returns_fallback_without_model_call() {
        let model = FakeModel::replying("{}");
        let extractor = SummaryExtractor::new(&model);

        let summary = extractor.extract("  \n\t  ").await.unwrap();
        assert_eq!(summary, StructuredSummary::fallback());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fenced_response_is_stripped_and_parsed() {
        let model = FakeModel::replying(
            "```json\n{\"overview\":\"x\", \"themes\": [\"planning\"]}\n```",
        );
        let extractor = SummaryExtractor::new(&model);

        let summary = extractor.extract("Alice: Hi\nBob: Hello").await.unwrap();
        assert_eq!(summary.overview, "x");
        assert_eq!(summary.themes, vec!["planning".to_string()]);
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_response_returns_fallback() {
        let model = FakeModel::replying("Sure! Here is your summary: overview...");
        let extractor = SummaryExtractor::new(&model);

        let summary = extractor.extract("Alice: Hi").await.unwrap();
        assert_eq!(summary, StructuredSummary::fallback());
    }

    #[tokio::test]
    async fn test_non_object_json_response_returns_fallback() {
        let model = FakeModel::replying(r#"["not", "an", "object"]"#);
        let extractor = SummaryExtractor::new(&model);

        let summary = extractor.extract("Alice: Hi").await.unwrap();
        assert_eq!(summary, StructuredSummary::fallback());
    }

    #[tokio::test]
    async fn test_transport_error_propagates_instead_of_fallback() {
        let model = FakeModel::failing();
        let extractor = SummaryExtractor::new(&model);

        let result = extractor.extract("Alice: Hi").await;
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(
                e.error_kind,
                DomainErrorKind::External(ExternalErrorKind::Network)
            );
        }
    }

    #[tokio::test]
    async fn test_prompt_embeds_transcript() {
        let model = FakeModel::replying("{}");
        let extractor = SummaryExtractor::new(&model);
        let _ = extractor.extract("Alice: the transcript body").await;

        let prompt = build_prompt("Alice: the transcript body");
        assert!(prompt.contains("Alice: the transcript body"));
        assert!(prompt.contains("Return ONLY the JSON object"));
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```json\n{}\n```  "), "{}");
    }

    #[test]
    fn test_parse_accepts_object_with_unknown_keys() {
        let summary =
            parse_structured_summary(r#"{"overview": "ok", "unexpected": true}"#).unwrap();
        assert_eq!(summary.overview, "ok");
    }

    #[test]
    fn test_parse_rejects_scalars() {
        assert!(parse_structured_summary("42").is_err());
        assert!(parse_structured_summary("\"just text\"").is_err());
    }
}
