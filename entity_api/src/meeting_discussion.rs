//! CRUD operations for meeting_discussions table.

use super::error::Error;
use entity::meeting_discussions::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel};

/// Input for creating a discussion point row
#[derive(Debug, Clone)]
pub struct DiscussionInput {
    pub topic: String,
    pub summary: String,
    pub participants: Vec<String>,
}

/// Creates a new discussion point for a meeting
pub async fn create(
    db: &DatabaseConnection,
    meeting_id: Id,
    input: DiscussionInput,
) -> Result<Model, Error> {
    debug!("Creating discussion point for meeting: {meeting_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        meeting_id: Set(meeting_id),
        topic: Set(input.topic),
        summary: Set(input.summary),
        participants: Set(serde_json::Value::from(input.participants)),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds all discussion points for a meeting, in creation order
pub async fn find_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::meeting_discussions::Column::MeetingId.eq(meeting_id))
        .order_by_asc(entity::meeting_discussions::Column::CreatedAt)
        .all(db)
        .await?)
}
