//! SeaORM Entity for meeting_summaries table.
//! Canonical store for AI-generated structured summaries.
//!
//! A meeting may accumulate multiple summary rows over time; the most recent
//! by created_at is authoritative for reads. Summaries are last-write-wins
//! with no optimistic concurrency control.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::meeting_summaries::Model)]
#[sea_orm(schema_name = "momentum", table_name = "meeting_summaries")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = String, format = Uuid)]
    pub meeting_id: Id,

    /// Bot id of the recording session the summary was generated from
    pub bot_id: String,

    /// Summary kind discriminator; structured summaries use
    /// "structured_summary"
    pub summary_type: String,

    /// The full StructuredSummary document, JSON-serialized
    #[schema(value_type = Object)]
    pub content: Json,

    /// Free-text label for thematic clustering, duplicated out of the
    /// content document so it can be indexed
    pub context_group: String,

    /// User who requested the summary
    #[schema(value_type = String, format = Uuid)]
    pub created_by: Id,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
