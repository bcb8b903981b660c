//! Controller for transcript retrieval.
//!
//! Serves the stored fragments of a meeting as readable per-fragment
//! entries, with relative offsets converted to MM:SS at this presentation
//! boundary only.

use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::{AppState, Error};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::transcript::presentation_entries;
use domain::transcript_fragment as TranscriptFragmentApi;
use domain::Id;
use log::*;
use service::config::ApiVersion;

/// Helper to create a not found error
fn not_found_error() -> Error {
    Error::from(domain::error::Error {
        source: None,
        error_kind: domain::error::DomainErrorKind::Internal(
            domain::error::InternalErrorKind::Entity(domain::error::EntityErrorKind::NotFound),
        ),
    })
}

/// GET /meetings/{id}/transcript
///
/// Get the readable transcript for a meeting, one entry per stored
/// fragment with speaker, text and MM:SS timestamp.
#[utoipa::path(
    get,
    path = "/meetings/{id}/transcript",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting ID"),
    ),
    responses(
        (status = 200, description = "Transcript retrieved"),
        (status = 404, description = "No transcript data available for this meeting"),
    )
)]
pub async fn get_transcript(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET transcript for meeting: {meeting_id}");

    let fragments =
        TranscriptFragmentApi::find_by_meeting_id(app_state.db_conn_ref(), meeting_id).await?;

    if fragments.is_empty() {
        return Err(not_found_error());
    }

    let payloads: Vec<serde_json::Value> = fragments
        .into_iter()
        .map(|fragment| fragment.transcript_data)
        .collect();

    let entries = presentation_entries(&payloads);

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), entries)))
}
