//! Structured summary generation.
//!
//! The summary pipeline turns a session's stored transcript fragments into a
//! fixed-shape JSON document and fans it out into per-concern tables. The
//! StructuredSummary shape is a contract: search and UI rendering key off its
//! exact field names.

pub mod extractor;
pub mod persister;
pub mod pipeline;

use crate::error::Error;
use crate::{action_items, meeting_decisions, meeting_discussions, meeting_summaries, Id};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

pub use extractor::{SummaryExtractor, TextGeneration};
pub use pipeline::{process_meeting_summary, SummaryRun, SummaryRunStatus};

/// The summary_type discriminator used for structured summaries in the
/// canonical store.
pub const STRUCTURED_SUMMARY_TYPE: &str = "structured_summary";

/// The fixed-shape result of AI-driven transcript analysis.
///
/// Every field carries a serde default so a sparse model response still
/// parses; nested item fields are optional and coerced to safe values only
/// at persistence time. Field names are load-bearing and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSummary {
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub key_decisions: Vec<KeyDecision>,
    #[serde(default)]
    pub key_takeaways: Vec<String>,
    #[serde(default)]
    pub discussion_points: Vec<DiscussionPoint>,
    #[serde(default)]
    pub jargon_clarifications: Vec<JargonClarification>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default = "default_context_group")]
    pub context_group: String,
}

/// One action item as emitted by the model. All sub-fields are optional;
/// missing values are defaulted when persisted, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One decision as emitted by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDecision {
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

/// One discussion point as emitted by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionPoint {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// One jargon clarification as emitted by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JargonClarification {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub clarification: Option<String>,
}

fn default_context_group() -> String {
    "general".to_string()
}

impl StructuredSummary {
    /// The empty-but-valid structure produced whenever the model's output
    /// could not be used. Downstream consumers depend on this exact shape;
    /// the persister must not crash on its empty lists.
    pub fn fallback() -> Self {
        StructuredSummary {
            overview: "Error processing transcript".to_string(),
            action_items: Vec::new(),
            key_decisions: Vec::new(),
            key_takeaways: Vec::new(),
            discussion_points: Vec::new(),
            jargon_clarifications: Vec::new(),
            themes: Vec::new(),
            context_group: default_context_group(),
        }
    }
}

/// The latest structured summary for a meeting together with its exploded
/// component rows, as served to clients.
#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub summary: meeting_summaries::Model,
    pub action_items: Vec<action_items::Model>,
    pub decisions: Vec<meeting_decisions::Model>,
    pub discussions: Vec<meeting_discussions::Model>,
}

/// Loads the latest structured summary for a meeting with its components.
/// Returns None when the meeting has no summary yet.
pub async fn latest_for_meeting(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Option<SummaryView>, Error> {
    let summary = match entity_api::meeting_summary::find_latest_by_meeting_id(
        db,
        meeting_id,
        STRUCTURED_SUMMARY_TYPE,
    )
    .await?
    {
        Some(summary) => summary,
        None => return Ok(None),
    };

    let action_items = entity_api::action_item::find_by_meeting_id(db, meeting_id).await?;
    let decisions = entity_api::meeting_decision::find_by_meeting_id(db, meeting_id).await?;
    let discussions = entity_api::meeting_discussion::find_by_meeting_id(db, meeting_id).await?;

    Ok(Some(SummaryView {
        summary,
        action_items,
        decisions,
        discussions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_structure_shape() {
        let fallback = StructuredSummary::fallback();
        assert_eq!(fallback.overview, "Error processing transcript");
        assert!(fallback.action_items.is_empty());
        assert!(fallback.key_decisions.is_empty());
        assert!(fallback.key_takeaways.is_empty());
        assert!(fallback.discussion_points.is_empty());
        assert!(fallback.jargon_clarifications.is_empty());
        assert!(fallback.themes.is_empty());
        assert_eq!(fallback.context_group, "general");
    }

    #[test]
    fn test_fallback_serializes_with_exact_field_names() {
        let json = serde_json::to_value(StructuredSummary::fallback()).unwrap();
        let object = json.as_object().unwrap();

        for key in [
            "overview",
            "action_items",
            "key_decisions",
            "key_takeaways",
            "discussion_points",
            "jargon_clarifications",
            "themes",
            "context_group",
        ] {
            assert!(object.contains_key(key), "missing field {key}");
        }
    }

    #[test]
    fn test_sparse_model_output_parses_with_defaults() {
        let summary: StructuredSummary =
            serde_json::from_str(r#"{"overview": "Quick sync"}"#).unwrap();

        assert_eq!(summary.overview, "Quick sync");
        assert!(summary.action_items.is_empty());
        assert_eq!(summary.context_group, "general");
    }

    #[test]
    fn test_action_items_with_missing_subfields_parse() {
        let summary: StructuredSummary = serde_json::from_str(
            r#"{"action_items": [{"description": "Ship the report"}, {}]}"#,
        )
        .unwrap();

        assert_eq!(summary.action_items.len(), 2);
        assert_eq!(
            summary.action_items[0].description.as_deref(),
            Some("Ship the report")
        );
        assert!(summary.action_items[1].description.is_none());
    }
}
