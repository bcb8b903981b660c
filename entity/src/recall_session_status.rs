use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of a Recall.ai bot recording session.
#[derive(
    Debug, Clone, Eq, PartialEq, EnumIter, Deserialize, Default, Serialize, DeriveActiveEnum,
)]
#[serde(rename_all = "lowercase")]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "recall_session_status"
)]
pub enum RecallSessionStatus {
    /// Bot has been created and is joining or recording the meeting
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    /// Bot was told to leave the call or the meeting ended
    #[sea_orm(string_value = "stopped")]
    Stopped,
}

impl std::fmt::Display for RecallSessionStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecallSessionStatus::Active => write!(fmt, "active"),
            RecallSessionStatus::Stopped => write!(fmt, "stopped"),
        }
    }
}
