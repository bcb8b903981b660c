//! CRUD operations for meeting_themes table.

use super::error::Error;
use entity::meeting_themes::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel};

/// Creates the themes row for a generated summary.
/// Called exactly once per summary, including when the themes list is empty.
pub async fn create(
    db: &DatabaseConnection,
    meeting_id: Id,
    themes: Vec<String>,
    context_group: String,
) -> Result<Model, Error> {
    debug!(
        "Creating themes row for meeting: {meeting_id} ({} themes)",
        themes.len()
    );

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        meeting_id: Set(meeting_id),
        themes: Set(serde_json::Value::from(themes)),
        context_group: Set(context_group),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds the latest themes row for a meeting
pub async fn find_latest_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::meeting_themes::Column::MeetingId.eq(meeting_id))
        .order_by_desc(entity::meeting_themes::Column::CreatedAt)
        .one(db)
        .await?)
}
