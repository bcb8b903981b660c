//! SeaORM Entity for recall_sessions table.
//! One row per Recall.ai bot recording instance, mapping a bot id to a meeting.

use crate::recall_session_status::RecallSessionStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::recall_sessions::Model)]
#[sea_orm(schema_name = "momentum", table_name = "recall_sessions")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// The meeting this recording session belongs to
    #[schema(value_type = String, format = Uuid)]
    pub meeting_id: Id,

    /// The user who started the recording
    #[schema(value_type = String, format = Uuid)]
    pub user_id: Id,

    /// Recall.ai bot id for this session
    pub bot_id: String,

    /// Current lifecycle status of the session
    #[schema(value_type = String)]
    pub status: RecallSessionStatus,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,

    /// Set when the bot leaves the call
    #[schema(value_type = Option<String>, format = DateTime)]
    pub ended_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
