use domain::Id;
use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for generating a structured summary
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = params::summary::GenerateSummaryParams)]
pub struct GenerateSummaryParams {
    /// The user requesting the summary; recorded as the summary's creator
    #[schema(value_type = String, format = Uuid)]
    pub user_id: Id,
}
