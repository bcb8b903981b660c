//! Controller for structured summary operations.
//!
//! Generation runs the full pipeline (load fragments, normalize, extract,
//! persist, notify) within this one request; there is no background job
//! queue. The pipeline reports its outcome as a structured status object
//! which is returned to the client either way.

use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::summary::GenerateSummaryParams;
use crate::{AppState, Error};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::gateway::gemini::GeminiClient;
use domain::notify::EmailSummaryNotifier;
use domain::recall_session as RecallSessionApi;
use domain::summary as SummaryApi;
use domain::summary::{SummaryExtractor, SummaryRunStatus};
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

/// POST /meetings/{id}/summary
///
/// Run the structured summary pipeline for the latest recording session of
/// a meeting. Responds with the pipeline's structured run result: 200 on
/// success, 500 with a status object describing the failure otherwise.
#[utoipa::path(
    post,
    path = "/meetings/{id}/summary",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting ID"),
    ),
    request_body = GenerateSummaryParams,
    responses(
        (status = 200, description = "Summary generated and persisted"),
        (status = 404, description = "Meeting has no recording session"),
        (status = 500, description = "Pipeline run failed; body carries the error status object"),
    )
)]
pub async fn generate_summary(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
    Json(params): Json<GenerateSummaryParams>,
) -> Result<impl IntoResponse, Error> {
    info!("Generating structured summary for meeting: {meeting_id}");

    let db = app_state.db_conn_ref();
    let config = &app_state.config;

    let session = RecallSessionApi::find_latest_by_meeting_id(db, meeting_id)
        .await?
        .ok_or_else(not_found_error)?;

    let model = GeminiClient::new(config)?;
    let extractor = SummaryExtractor::new(model);
    let notifier = EmailSummaryNotifier::new(config.clone());

    let run = SummaryApi::process_meeting_summary(
        db,
        &extractor,
        Some(&notifier),
        meeting_id,
        &session.bot_id,
        params.user_id,
    )
    .await;

    let status_code = match run.status {
        SummaryRunStatus::Success => StatusCode::OK,
        SummaryRunStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
    };

    Ok((
        status_code,
        Json(ApiResponse::new(status_code.into(), run)),
    ))
}

/// GET /meetings/{id}/summary
///
/// Get the latest structured summary for a meeting together with its
/// exploded action items, decisions and discussion points.
#[utoipa::path(
    get,
    path = "/meetings/{id}/summary",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Meeting ID"),
    ),
    responses(
        (status = 200, description = "Latest summary retrieved"),
        (status = 404, description = "No summary found for this meeting"),
    )
)]
pub async fn get_summary(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(meeting_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET structured summary for meeting: {meeting_id}");

    let view = SummaryApi::latest_for_meeting(app_state.db_conn_ref(), meeting_id)
        .await?
        .ok_or_else(not_found_error)?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), view)))
}
