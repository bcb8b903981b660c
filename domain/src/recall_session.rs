//! Recording session lifecycle: starting and stopping Recall.ai bots and
//! querying their state.

use crate::error::{DomainErrorKind, EntityErrorKind, Error, InternalErrorKind};
use crate::gateway::recall_ai::{create_standard_bot_request, RecallAiClient};
use crate::recall_sessions::Model;
use crate::transcript_fragments::Model as TranscriptFragmentModel;
use crate::Id;
use log::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use service::config::Config;

pub use entity_api::recall_session::{
    find_all_by_meeting_id, find_by_bot_id, find_latest_by_meeting_id,
};

/// Current state of a recording session: the bot's latest status code plus
/// every transcript fragment stored so far.
#[derive(Debug, Serialize)]
pub struct RecordingState {
    pub state: String,
    pub transcript: Vec<TranscriptFragmentModel>,
}

fn no_session_error() -> Error {
    Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound)),
    }
}

/// Starts a recording for a meeting: creates a Recall.ai bot configured to
/// stream transcript webhooks back to us, then records the session.
pub async fn start(
    db: &DatabaseConnection,
    config: &Config,
    meeting_id: Id,
    user_id: Id,
    meeting_url: String,
) -> Result<Model, Error> {
    info!("Starting recording for meeting: {meeting_id}");

    let client = RecallAiClient::new(config)?;

    // Recall.ai realtime endpoints cannot carry custom headers, so the
    // shared secret rides along as a query parameter.
    let webhook_url = config.webhook_base_url().map(|base| {
        match config.webhook_secret() {
            Some(secret) => format!("{base}/webhooks/recall?secret={secret}"),
            None => format!("{base}/webhooks/recall"),
        }
    });

    if webhook_url.is_none() {
        warn!("No webhook base URL configured; bot will record without realtime transcripts");
    }

    let request = create_standard_bot_request(
        meeting_url,
        config.recall_bot_name().to_string(),
        webhook_url,
    );

    let bot = client.create_bot(request).await?;

    let session = entity_api::recall_session::create(db, meeting_id, user_id, bot.id).await?;

    info!(
        "Recording session {} started for meeting {meeting_id} with bot {}",
        session.id, session.bot_id
    );

    Ok(session)
}

/// Stops the latest recording session for a meeting.
pub async fn stop(db: &DatabaseConnection, config: &Config, meeting_id: Id) -> Result<Model, Error> {
    info!("Stopping recording for meeting: {meeting_id}");

    let session = entity_api::recall_session::find_latest_by_meeting_id(db, meeting_id)
        .await?
        .ok_or_else(no_session_error)?;

    let client = RecallAiClient::new(config)?;
    client.stop_bot(&session.bot_id).await?;

    Ok(entity_api::recall_session::mark_stopped(db, session.id).await?)
}

/// Returns the bot's latest status and the stored transcript fragments for
/// the latest session of a meeting.
pub async fn recording_state(
    db: &DatabaseConnection,
    config: &Config,
    meeting_id: Id,
) -> Result<RecordingState, Error> {
    let session = entity_api::recall_session::find_latest_by_meeting_id(db, meeting_id)
        .await?
        .ok_or_else(no_session_error)?;

    let client = RecallAiClient::new(config)?;
    let status = client.get_bot_status(&session.bot_id).await?;

    let transcript = entity_api::transcript_fragment::find_by_bot_id(db, &session.bot_id).await?;

    Ok(RecordingState {
        state: status.latest_status().to_string(),
        transcript,
    })
}
