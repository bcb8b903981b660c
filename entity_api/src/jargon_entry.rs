//! CRUD operations for meeting_jargon table.

use super::error::Error;
use entity::meeting_jargon::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel};

/// Input for creating a jargon clarification row
#[derive(Debug, Clone)]
pub struct JargonInput {
    pub term: String,
    pub clarification: String,
}

/// Creates a new jargon clarification for a meeting
pub async fn create(
    db: &DatabaseConnection,
    meeting_id: Id,
    input: JargonInput,
) -> Result<Model, Error> {
    debug!("Creating jargon clarification for meeting: {meeting_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        meeting_id: Set(meeting_id),
        term: Set(input.term),
        clarification: Set(input.clarification),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds all jargon clarifications for a meeting, in creation order
pub async fn find_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::meeting_jargon::Column::MeetingId.eq(meeting_id))
        .order_by_asc(entity::meeting_jargon::Column::CreatedAt)
        .all(db)
        .await?)
}
