//! Fans a StructuredSummary out into the canonical summary row and the
//! per-concern component tables.
//!
//! Ordering matters: the canonical row is written first and its failure
//! fails the operation. Component writes are best-effort and independent -
//! a failed component write is logged and the remaining writes continue, so
//! a partially persisted summary stays queryable. There is deliberately no
//! transaction around the batch.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::summary::{
    ActionItem, DiscussionPoint, JargonClarification, KeyDecision, StructuredSummary,
    STRUCTURED_SUMMARY_TYPE,
};
use crate::{meeting_summaries, Id};
use entity_api::action_item::ActionItemInput;
use entity_api::jargon_entry::JargonInput;
use entity_api::meeting_decision::DecisionInput;
use entity_api::meeting_discussion::DiscussionInput;
use entity_api::meeting_summary::SummaryInput;
use log::*;
use sea_orm::DatabaseConnection;

/// Persists a structured summary and its exploded components.
/// Returns the canonical summary row.
pub async fn persist(
    db: &DatabaseConnection,
    meeting_id: Id,
    bot_id: &str,
    created_by: Id,
    summary: &StructuredSummary,
) -> Result<meeting_summaries::Model, Error> {
    let content = serde_json::to_value(summary).map_err(|e| {
        warn!("Failed to serialize structured summary: {e:?}");
        Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Failed to serialize structured summary".to_string(),
            )),
        }
    })?;

    // Canonical row first. If this fails nothing else is attempted.
    let summary_row = entity_api::meeting_summary::create(
        db,
        meeting_id,
        SummaryInput {
            bot_id: bot_id.to_string(),
            summary_type: STRUCTURED_SUMMARY_TYPE.to_string(),
            content,
            context_group: summary.context_group.clone(),
            created_by,
        },
    )
    .await?;

    info!(
        "Persisted structured summary {} for meeting {meeting_id}",
        summary_row.id
    );

    persist_components(db, meeting_id, summary).await;

    Ok(summary_row)
}

/// Writes the per-concern component rows, tolerating individual failures.
async fn persist_components(db: &DatabaseConnection, meeting_id: Id, summary: &StructuredSummary) {
    for item in &summary.action_items {
        if let Err(e) =
            entity_api::action_item::create(db, meeting_id, action_item_input(item)).await
        {
            warn!("Failed to persist action item for meeting {meeting_id}: {e:?}");
        }
    }

    for decision in &summary.key_decisions {
        if let Err(e) =
            entity_api::meeting_decision::create(db, meeting_id, decision_input(decision)).await
        {
            warn!("Failed to persist decision for meeting {meeting_id}: {e:?}");
        }
    }

    for discussion in &summary.discussion_points {
        if let Err(e) =
            entity_api::meeting_discussion::create(db, meeting_id, discussion_input(discussion))
                .await
        {
            warn!("Failed to persist discussion point for meeting {meeting_id}: {e:?}");
        }
    }

    for jargon in &summary.jargon_clarifications {
        if let Err(e) = entity_api::jargon_entry::create(db, meeting_id, jargon_input(jargon)).await
        {
            warn!("Failed to persist jargon clarification for meeting {meeting_id}: {e:?}");
        }
    }

    // Exactly one themes row per summary, even when the themes list is empty.
    if let Err(e) = entity_api::meeting_theme::create(
        db,
        meeting_id,
        summary.themes.clone(),
        summary.context_group.clone(),
    )
    .await
    {
        warn!("Failed to persist themes for meeting {meeting_id}: {e:?}");
    }
}

/// Coerces a model-emitted action item into a row input, defaulting missing
/// sub-fields to safe values instead of failing the batch.
fn action_item_input(item: &ActionItem) -> ActionItemInput {
    ActionItemInput {
        description: item.description.clone().unwrap_or_default(),
        owner: item.owner.clone().unwrap_or_default(),
        due_date: item.due_date.clone(),
        priority: item
            .priority
            .clone()
            .unwrap_or_else(|| "medium".to_string()),
        status: item.status.clone().unwrap_or_else(|| "pending".to_string()),
    }
}

fn decision_input(decision: &KeyDecision) -> DecisionInput {
    DecisionInput {
        decision: decision.decision.clone().unwrap_or_default(),
        context: decision.context.clone().unwrap_or_default(),
        impact: decision.impact.clone().unwrap_or_default(),
    }
}

fn discussion_input(discussion: &DiscussionPoint) -> DiscussionInput {
    DiscussionInput {
        topic: discussion.topic.clone().unwrap_or_default(),
        summary: discussion.summary.clone().unwrap_or_default(),
        participants: discussion.participants.clone(),
    }
}

fn jargon_input(jargon: &JargonClarification) -> JargonInput {
    JargonInput {
        term: jargon.term.clone().unwrap_or_default(),
        clarification: jargon.clarification.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_item_defaults_for_missing_subfields() {
        let input = action_item_input(&ActionItem {
            description: None,
            owner: None,
            due_date: None,
            priority: None,
            status: None,
        });

        assert_eq!(input.description, "");
        assert_eq!(input.owner, "");
        assert_eq!(input.due_date, None);
        assert_eq!(input.priority, "medium");
        assert_eq!(input.status, "pending");
    }

    #[test]
    fn test_action_item_preserves_present_subfields() {
        let input = action_item_input(&ActionItem {
            description: Some("Send the deck".to_string()),
            owner: Some("Alice".to_string()),
            due_date: Some("2026-08-14".to_string()),
            priority: Some("high".to_string()),
            status: Some("in_progress".to_string()),
        });

        assert_eq!(input.description, "Send the deck");
        assert_eq!(input.owner, "Alice");
        assert_eq!(input.due_date.as_deref(), Some("2026-08-14"));
        assert_eq!(input.priority, "high");
        assert_eq!(input.status, "in_progress");
    }

    #[test]
    fn test_decision_and_jargon_defaults() {
        let decision = decision_input(&KeyDecision {
            decision: Some("Adopt Rust".to_string()),
            context: None,
            impact: None,
        });
        assert_eq!(decision.decision, "Adopt Rust");
        assert_eq!(decision.context, "");
        assert_eq!(decision.impact, "");

        let jargon = jargon_input(&JargonClarification {
            term: None,
            clarification: None,
        });
        assert_eq!(jargon.term, "");
        assert_eq!(jargon.clarification, "");
    }

    #[test]
    fn test_discussion_participants_pass_through() {
        let input = discussion_input(&DiscussionPoint {
            topic: Some("Roadmap".to_string()),
            summary: None,
            participants: vec!["Alice".to_string(), "Bob".to_string()],
        });

        assert_eq!(input.topic, "Roadmap");
        assert_eq!(input.summary, "");
        assert_eq!(input.participants, vec!["Alice", "Bob"]);
    }
}
