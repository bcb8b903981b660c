//! Transcript ingestion.
//!
//! One webhook delivery becomes one stored fragment, verbatim. The payload's
//! internal structure is never inspected here - all interpretation is
//! deferred to the normalizer. Ingestion is not idempotent: at-least-once
//! webhook delivery means duplicates are expected and stored as separate
//! rows.

use crate::error::Error;
use crate::transcript_fragments::Model;
use log::*;
use sea_orm::DatabaseConnection;

pub use entity_api::transcript_fragment::{find_by_bot_id, find_by_meeting_id};

/// Persists one raw transcript payload for a recording session.
///
/// The owning meeting is resolved from the session's bot id; when no session
/// matches, the fragment is still stored (with a warning) so the data is not
/// lost. A storage failure surfaces to the caller - the upstream webhook
/// sender's redelivery is the recovery mechanism, not internal retries.
pub async fn ingest(
    db: &DatabaseConnection,
    bot_id: &str,
    payload: serde_json::Value,
) -> Result<Model, Error> {
    let meeting_id = match entity_api::recall_session::find_by_bot_id(db, bot_id).await? {
        Some(session) => Some(session.meeting_id),
        None => {
            warn!("No recall session found for bot {bot_id}; storing fragment without meeting id");
            None
        }
    };

    let fragment = entity_api::transcript_fragment::create(db, bot_id, meeting_id, payload).await?;

    debug!("Stored transcript fragment {} for bot {bot_id}", fragment.id);

    Ok(fragment)
}
