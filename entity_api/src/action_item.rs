//! CRUD operations for action_items table.

use super::error::Error;
use entity::action_items::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel};

/// Input for creating an action item row
#[derive(Debug, Clone)]
pub struct ActionItemInput {
    pub description: String,
    pub owner: String,
    pub due_date: Option<String>,
    pub priority: String,
    pub status: String,
}

/// Creates a new action item for a meeting
pub async fn create(
    db: &DatabaseConnection,
    meeting_id: Id,
    input: ActionItemInput,
) -> Result<Model, Error> {
    debug!("Creating action item for meeting: {meeting_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        meeting_id: Set(meeting_id),
        description: Set(input.description),
        owner: Set(input.owner),
        due_date: Set(input.due_date),
        priority: Set(input.priority),
        status: Set(input.status),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds all action items for a meeting, in creation order
pub async fn find_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::action_items::Column::MeetingId.eq(meeting_id))
        .order_by_asc(entity::action_items::Column::CreatedAt)
        .all(db)
        .await?)
}
