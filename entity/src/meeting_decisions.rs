//! SeaORM Entity for meeting_decisions table.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::meeting_decisions::Model)]
#[sea_orm(schema_name = "momentum", table_name = "meeting_decisions")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,

    #[schema(value_type = String, format = Uuid)]
    pub meeting_id: Id,

    #[sea_orm(column_type = "Text")]
    pub decision: String,

    /// Context around the decision
    #[sea_orm(column_type = "Text")]
    pub context: String,

    /// Expected impact of the decision
    #[sea_orm(column_type = "Text")]
    pub impact: String,

    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
