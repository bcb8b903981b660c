//! SeaORM Entity for meeting_themes table.
//! Exactly one row is written per generated summary, capturing the full
//! themes list and context group together, even when the themes list is
//! empty.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::meeting_themes::Model)]
#[sea_orm(schema_name = "momentum", table_name = "meeting_themes")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = String, format = Uuid)]
    pub meeting_id: Id,

    /// Theme labels as a JSON list of strings
    #[schema(value_type = Vec<String>)]
    pub themes: Json,

    pub context_group: String,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
