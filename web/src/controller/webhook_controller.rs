//! Controller for handling webhooks from external services.
//!
//! Handles realtime transcript webhooks from Recall.ai. Delivery is
//! at-least-once and unordered; every accepted payload is stored verbatim
//! and interpretation is deferred to the normalizer.

use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::transcript_fragment as TranscriptFragmentApi;
use log::*;
use serde::{Deserialize, Serialize};

/// Query parameters on webhook deliveries. Recall.ai realtime endpoints
/// cannot send custom headers, so the shared secret is carried in the URL
/// we registered at bot creation time.
#[derive(Debug, Deserialize)]
pub struct RecallWebhookQuery {
    pub secret: Option<String>,
}

/// Recall.ai realtime webhook envelope
#[derive(Debug, Deserialize)]
pub struct RecallWebhookEnvelope {
    /// The type of event
    pub event: String,
    /// Event data; absent for some event types
    #[serde(default)]
    pub data: Option<RecallWebhookData>,
}

/// Data section of a Recall.ai realtime webhook
#[derive(Debug, Deserialize)]
pub struct RecallWebhookData {
    /// The bot this event is for
    pub bot: RecallWebhookBot,
    /// The raw transcript fragment payload
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Bot reference inside a webhook envelope
#[derive(Debug, Deserialize)]
pub struct RecallWebhookBot {
    pub id: String,
}

/// Response for webhook acknowledgment
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: String,
}

/// POST /webhooks/recall
///
/// Handles realtime transcript webhooks from Recall.ai. This endpoint does
/// not require authentication but validates the shared webhook secret.
/// Only "transcript.data" events are acted on; all other events are
/// acknowledged as no-ops. A storage failure returns 5xx so the sender
/// redelivers.
pub async fn recall_webhook(
    State(app_state): State<AppState>,
    Query(query): Query<RecallWebhookQuery>,
    Json(payload): Json<RecallWebhookEnvelope>,
) -> Result<impl IntoResponse, Error> {
    debug!("Received Recall.ai webhook: {:?}", payload.event);

    let db = app_state.db_conn_ref();

    // Validate webhook secret if configured
    if let Some(expected_secret) = app_state.config.webhook_secret() {
        let provided_secret = query.secret.as_deref().unwrap_or("");

        if provided_secret != expected_secret {
            warn!("Invalid webhook secret received");
            return Ok((
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse {
                    status: "unauthorized".to_string(),
                }),
            ));
        }
    }

    if payload.event != "transcript.data" {
        debug!("Ignoring Recall.ai event: {}", payload.event);
        return Ok((
            StatusCode::OK,
            Json(WebhookResponse {
                status: "ignored".to_string(),
            }),
        ));
    }

    let data = match payload.data {
        Some(data) if !data.data.is_null() => data,
        _ => {
            warn!("Received transcript.data webhook without a fragment payload");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse {
                    status: "invalid".to_string(),
                }),
            ));
        }
    };

    // A write failure propagates here and fails the webhook loudly; the
    // upstream sender's redelivery is the recovery mechanism.
    let fragment = TranscriptFragmentApi::ingest(db, &data.bot.id, data.data).await?;

    debug!(
        "Stored transcript fragment {} for bot {}",
        fragment.id, data.bot.id
    );

    Ok((
        StatusCode::OK,
        Json(WebhookResponse {
            status: "ok".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transcript_envelope_deserializes() {
        let envelope: RecallWebhookEnvelope = serde_json::from_value(json!({
            "event": "transcript.data",
            "data": {
                "bot": {"id": "bot-123"},
                "data": {
                    "participant": {"name": "Alice"},
                    "words": [{"text": "Hi"}]
                }
            }
        }))
        .unwrap();

        assert_eq!(envelope.event, "transcript.data");
        let data = envelope.data.unwrap();
        assert_eq!(data.bot.id, "bot-123");
        assert!(data.data.is_object());
    }

    #[test]
    fn test_non_transcript_event_without_data_deserializes() {
        let envelope: RecallWebhookEnvelope = serde_json::from_value(json!({
            "event": "participant_events.chat_message"
        }))
        .unwrap();

        assert_eq!(envelope.event, "participant_events.chat_message");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_transcript_event_with_missing_fragment_payload() {
        let envelope: RecallWebhookEnvelope = serde_json::from_value(json!({
            "event": "transcript.data",
            "data": {"bot": {"id": "bot-123"}}
        }))
        .unwrap();

        let data = envelope.data.unwrap();
        assert!(data.data.is_null());
    }
}
