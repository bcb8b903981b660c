//! SeaORM Entity for meeting_transcripts table.
//! Stores raw transcript webhook deliveries verbatim, one row per delivery.
//!
//! Rows are append-only: fragments are never updated or deleted, so the table
//! doubles as an audit trail of everything the recording bot sent us.
//! Duplicate deliveries are expected (at-least-once webhooks) and stored as
//! separate rows; consumers must tolerate duplication.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::transcript_fragments::Model)]
#[sea_orm(schema_name = "momentum", table_name = "meeting_transcripts")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    /// Recall.ai bot id of the owning recording session
    pub bot_id: String,

    /// Owning meeting, when the session -> meeting mapping was resolvable
    /// at ingestion time
    #[schema(value_type = Option<String>, format = Uuid)]
    pub meeting_id: Option<Id>,

    /// The raw webhook payload, stored unmodified. Interpretation is
    /// deferred entirely to the transcript normalizer.
    #[schema(value_type = Object)]
    pub transcript_data: Json,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
