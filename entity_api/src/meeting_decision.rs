//! CRUD operations for meeting_decisions table.

use super::error::Error;
use entity::meeting_decisions::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel};

/// Input for creating a decision row
#[derive(Debug, Clone)]
pub struct DecisionInput {
    pub decision: String,
    pub context: String,
    pub impact: String,
}

/// Creates a new decision for a meeting
pub async fn create(
    db: &DatabaseConnection,
    meeting_id: Id,
    input: DecisionInput,
) -> Result<Model, Error> {
    debug!("Creating decision for meeting: {meeting_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        meeting_id: Set(meeting_id),
        decision: Set(input.decision),
        context: Set(input.context),
        impact: Set(input.impact),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds all decisions for a meeting, in creation order
pub async fn find_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::meeting_decisions::Column::MeetingId.eq(meeting_id))
        .order_by_asc(entity::meeting_decisions::Column::CreatedAt)
        .all(db)
        .await?)
}
