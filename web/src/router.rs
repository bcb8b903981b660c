use crate::{controller::health_check_controller, params, AppState};
use axum::{
    routing::{get, post},
    Router,
};

use crate::controller::{
    recording_controller, summary_controller, transcript_controller, webhook_controller,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Momentum Platform API"
        ),
        paths(
            health_check_controller::health_check,
            recording_controller::start_recording,
            recording_controller::stop_recording,
            recording_controller::recording_state,
            recording_controller::list_sessions,
            summary_controller::generate_summary,
            summary_controller::get_summary,
            transcript_controller::get_transcript,
        ),
        components(
            schemas(
                domain::recall_sessions::Model,
                domain::transcript_fragments::Model,
                domain::meeting_summaries::Model,
                domain::action_items::Model,
                domain::meeting_decisions::Model,
                domain::meeting_discussions::Model,
                domain::meeting_jargon::Model,
                domain::meeting_themes::Model,
                params::recording::StartRecordingParams,
                params::summary::GenerateSummaryParams,
            )
        ),
        tags(
            (name = "momentum_platform", description = "Momentum Meeting Management API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(recording_routes(app_state.clone()))
        .merge(summary_routes(app_state.clone()))
        .merge(transcript_routes(app_state.clone()))
        .merge(webhook_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn recording_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/meetings/{id}/recording",
            get(recording_controller::recording_state),
        )
        .route(
            "/meetings/{id}/recording/start",
            post(recording_controller::start_recording),
        )
        .route(
            "/meetings/{id}/recording/stop",
            post(recording_controller::stop_recording),
        )
        .route(
            "/meetings/{id}/recording/sessions",
            get(recording_controller::list_sessions),
        )
        .with_state(app_state)
}

fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/meetings/{id}/summary",
            post(summary_controller::generate_summary).get(summary_controller::get_summary),
        )
        .with_state(app_state)
}

fn transcript_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/meetings/{id}/transcript",
            get(transcript_controller::get_transcript),
        )
        .with_state(app_state)
}

/// Routes for external service webhooks (no authentication - validated by webhook secret)
fn webhook_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/webhooks/recall", post(webhook_controller::recall_webhook))
        .with_state(app_state)
}
