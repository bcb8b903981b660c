//! SeaORM Entity for action_items table.
//! Action items exploded out of a structured summary.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::action_items::Model)]
#[sea_orm(schema_name = "momentum", table_name = "action_items")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = String, format = Uuid)]
    pub meeting_id: Id,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Person responsible, as named by the model
    pub owner: String,

    /// Due date if one was mentioned; freeform model output, not validated
    pub due_date: Option<String>,

    /// high / medium / low
    pub priority: String,

    /// pending / in_progress / completed
    pub status: String,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
