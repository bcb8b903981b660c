use domain::Id;
use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for starting a meeting recording
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::recording::StartRecordingParams)]
pub struct StartRecordingParams {
    /// The meeting URL the bot should join
    pub meeting_url: String,
    /// The user starting the recording
    #[schema(value_type = String, format = Uuid)]
    pub user_id: Id,
}
