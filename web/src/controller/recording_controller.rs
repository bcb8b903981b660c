//! Controller for meeting recording operations.
//!
//! Handles starting, stopping, and querying meeting recordings via Recall.ai.

use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::recording::StartRecordingParams;
use crate::{AppState, Error};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::recall_session as RecallSessionApi;
use domain::recall_sessions;
use domain::recall_sessions::Model as RecallSessionModel;
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

/// POST /meetings/{id}/recording/start
///
/// Start recording a meeting via a Recall.ai bot. The bot joins the given
/// meeting URL and streams transcript fragments back over webhooks.
#[utoipa::path(
    post,
    path = "/meetings/{id}/recording/start",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting ID"),
    ),
    request_body = StartRecordingParams,
    responses(
        (status = 201, description = "Recording started successfully", body = recall_sessions::Model),
        (status = 502, description = "Recall.ai could not be reached"),
    )
)]
pub async fn start_recording(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
    Json(params): Json<StartRecordingParams>,
) -> Result<impl IntoResponse, Error> {
    info!("Starting recording for meeting: {meeting_id}");

    let session: RecallSessionModel = RecallSessionApi::start(
        app_state.db_conn_ref(),
        &app_state.config,
        meeting_id,
        params.user_id,
        params.meeting_url,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED.into(), session)),
    ))
}

/// POST /meetings/{id}/recording/stop
///
/// Stop the latest active recording for a meeting.
#[utoipa::path(
    post,
    path = "/meetings/{id}/recording/stop",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting ID"),
    ),
    responses(
        (status = 200, description = "Recording stopped successfully", body = recall_sessions::Model),
        (status = 404, description = "No recording session found for this meeting"),
    )
)]
pub async fn stop_recording(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    info!("Stopping recording for meeting: {meeting_id}");

    let session: RecallSessionModel =
        RecallSessionApi::stop(app_state.db_conn_ref(), &app_state.config, meeting_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), session)))
}

/// GET /meetings/{id}/recording
///
/// Get the current bot state and stored transcript fragments for the latest
/// recording session of a meeting.
#[utoipa::path(
    get,
    path = "/meetings/{id}/recording",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting ID"),
    ),
    responses(
        (status = 200, description = "Recording state retrieved"),
        (status = 404, description = "No recording session found for this meeting"),
    )
)]
pub async fn recording_state(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET recording state for meeting: {meeting_id}");

    let state =
        RecallSessionApi::recording_state(app_state.db_conn_ref(), &app_state.config, meeting_id)
            .await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), state)))
}

/// GET /meetings/{id}/recording/sessions
///
/// List all recording sessions for a meeting, newest first.
#[utoipa::path(
    get,
    path = "/meetings/{id}/recording/sessions",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting ID"),
    ),
    responses(
        (status = 200, description = "Recording sessions retrieved", body = [recall_sessions::Model]),
        (status = 404, description = "Meeting has no recording sessions"),
    )
)]
pub async fn list_sessions(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET recording sessions for meeting: {meeting_id}");

    let sessions: Vec<RecallSessionModel> =
        RecallSessionApi::find_all_by_meeting_id(app_state.db_conn_ref(), meeting_id).await?;

    if sessions.is_empty() {
        return Err(not_found_error());
    }

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), sessions)))
}
