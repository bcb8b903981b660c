//! The end-to-end summary generation pipeline: load fragments, normalize,
//! extract, persist, notify.
//!
//! One pipeline run executes within a single request task. Every I/O step is
//! awaited sequentially; there is no internal parallelism, no retry logic,
//! and no locking. Concurrent runs for the same meeting interleave freely -
//! summaries are last-write-wins and the latest row by created_at is
//! authoritative.

use crate::error::Error;
use crate::notify::SummaryNotifier;
use crate::summary::extractor::{SummaryExtractor, TextGeneration};
use crate::summary::{persister, StructuredSummary};
use crate::transcript::normalizer;
use crate::Id;
use chrono::{DateTime, FixedOffset, Utc};
use log::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Outcome flag of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryRunStatus {
    Success,
    Error,
}

/// The caller-facing result of one summary generation run.
///
/// The pipeline never raises past this boundary: failures are reported as a
/// structured status object so callers (HTTP layer, retries, UI messaging)
/// can branch on the status flag and message.
#[derive(Debug, Serialize)]
pub struct SummaryRun {
    pub status: SummaryRunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_summary: Option<StructuredSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript_length: Option<usize>,
    /// Fragments the normalizer skipped for having an unrecognized shape
    pub fragments_skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub processed_at: DateTime<FixedOffset>,
}

impl SummaryRun {
    fn failure(error: String, fragments_skipped: usize) -> Self {
        SummaryRun {
            status: SummaryRunStatus::Error,
            summary_id: None,
            structured_summary: None,
            transcript_length: None,
            fragments_skipped,
            error: Some(error),
            processed_at: Utc::now().fixed_offset(),
        }
    }
}

/// Runs the full pipeline for one meeting's recording session.
pub async fn process_meeting_summary<M: TextGeneration>(
    db: &DatabaseConnection,
    extractor: &SummaryExtractor<M>,
    notifier: Option<&dyn SummaryNotifier>,
    meeting_id: Id,
    bot_id: &str,
    created_by: Id,
) -> SummaryRun {
    info!("Processing structured summary for meeting {meeting_id}, bot {bot_id}");

    // 1. Load the session's fragments in arrival order
    let fragments = match entity_api::transcript_fragment::find_by_bot_id(db, bot_id).await {
        Ok(fragments) => fragments,
        Err(e) => {
            warn!("Failed to load transcript fragments for bot {bot_id}: {e:?}");
            let e: Error = e.into();
            return SummaryRun::failure(format!("Failed to load transcript fragments: {e}"), 0);
        }
    };

    // 2. Normalize into chronological speaker-grouped text
    let payloads: Vec<serde_json::Value> = fragments
        .into_iter()
        .map(|fragment| fragment.transcript_data)
        .collect();
    let normalized = normalizer::normalize(&payloads);

    debug!(
        "Normalized {} words from {} fragments ({} skipped) for bot {bot_id}",
        normalized.words_seen,
        payloads.len(),
        normalized.fragments_skipped
    );

    if normalized.text.trim().is_empty() {
        return SummaryRun::failure(
            "No transcript content available to summarize".to_string(),
            normalized.fragments_skipped,
        );
    }

    // 3. Extract. Parse failures already degraded to the fallback inside the
    // extractor; an Err here means the model never answered usefully
    // (network/timeout), which fails the whole run.
    let summary = match extractor.extract(&normalized.text).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Summary extraction failed for meeting {meeting_id}: {e:?}");
            return SummaryRun::failure(
                format!("Summary extraction failed: {e}"),
                normalized.fragments_skipped,
            );
        }
    };

    // 4. Persist canonical row + components
    let summary_row = match persister::persist(db, meeting_id, bot_id, created_by, &summary).await {
        Ok(row) => row,
        Err(e) => {
            warn!("Failed to persist structured summary for meeting {meeting_id}: {e:?}");
            return SummaryRun::failure(
                format!("Failed to persist summary: {e}"),
                normalized.fragments_skipped,
            );
        }
    };

    // 5. Fire-and-forget notification after successful persistence
    if let Some(notifier) = notifier {
        notifier.summary_ready(meeting_id, &summary).await;
    }

    SummaryRun {
        status: SummaryRunStatus::Success,
        summary_id: Some(summary_row.id),
        structured_summary: Some(summary),
        transcript_length: Some(normalized.text.len()),
        fragments_skipped: normalized.fragments_skipped,
        error: None,
        processed_at: Utc::now().fixed_offset(),
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind};
    use async_trait::async_trait;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    struct TimingOutModel;

    #[async_trait]
    impl TextGeneration for TimingOutModel {
        async fn generate(&self, _prompt: &str) -> Result<String, Error> {
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            })
        }
    }

    fn fragment(bot_id: &str) -> entity::transcript_fragments::Model {
        entity::transcript_fragments::Model {
            id: uuid::Uuid::new_v4(),
            bot_id: bot_id.to_string(),
            meeting_id: None,
            transcript_data: json!({
                "participant": {"name": "Alice"},
                "words": [
                    {"text": "Hi", "start_timestamp": {"relative": 0.0}, "is_final": true}
                ]
            }),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_model_transport_failure_yields_error_run_and_no_writes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![fragment("bot-1")]])
            .into_connection();

        let extractor = SummaryExtractor::new(TimingOutModel);
        let meeting_id = uuid::Uuid::new_v4();
        let user_id = uuid::Uuid::new_v4();

        let run =
            process_meeting_summary(&db, &extractor, None, meeting_id, "bot-1", user_id).await;

        assert_eq!(run.status, SummaryRunStatus::Error);
        assert!(run.error.as_deref().unwrap().contains("extraction failed"));
        assert!(run.summary_id.is_none());

        // Only the fragment SELECT hit the database; no summary row was
        // persisted after the model failure.
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_fragment_set_yields_error_run_without_model_call() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::transcript_fragments::Model>::new()])
            .into_connection();

        // A model that would panic if called
        struct UnreachableModel;

        #[async_trait]
        impl TextGeneration for UnreachableModel {
            async fn generate(&self, _prompt: &str) -> Result<String, Error> {
                panic!("model must not be called for an empty transcript");
            }
        }

        let extractor = SummaryExtractor::new(UnreachableModel);
        let run = process_meeting_summary(
            &db,
            &extractor,
            None,
            uuid::Uuid::new_v4(),
            "bot-2",
            uuid::Uuid::new_v4(),
        )
        .await;

        assert_eq!(run.status, SummaryRunStatus::Error);
        assert!(run
            .error
            .as_deref()
            .unwrap()
            .contains("No transcript content"));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
    }
}
