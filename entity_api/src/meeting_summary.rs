//! CRUD operations for meeting_summaries table.

use super::error::Error;
use entity::meeting_summaries::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel};

/// Input for creating a canonical summary row
#[derive(Debug, Clone)]
pub struct SummaryInput {
    pub bot_id: String,
    pub summary_type: String,
    pub content: serde_json::Value,
    pub context_group: String,
    pub created_by: Id,
}

/// Creates a new canonical summary row for a meeting
pub async fn create(
    db: &DatabaseConnection,
    meeting_id: Id,
    input: SummaryInput,
) -> Result<Model, Error> {
    debug!(
        "Creating {} summary for meeting: {meeting_id}",
        input.summary_type
    );

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        meeting_id: Set(meeting_id),
        bot_id: Set(input.bot_id),
        summary_type: Set(input.summary_type),
        content: Set(input.content),
        context_group: Set(input.context_group),
        created_by: Set(input.created_by),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds the latest summary of a given type for a meeting.
/// Multiple historical summaries may coexist; only the most recent is
/// authoritative for reads.
pub async fn find_latest_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
    summary_type: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::meeting_summaries::Column::MeetingId.eq(meeting_id))
        .filter(entity::meeting_summaries::Column::SummaryType.eq(summary_type))
        .order_by_desc(entity::meeting_summaries::Column::CreatedAt)
        .one(db)
        .await?)
}

/// Finds all summaries for a meeting, oldest first
pub async fn find_all_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::meeting_summaries::Column::MeetingId.eq(meeting_id))
        .order_by_asc(entity::meeting_summaries::Column::CreatedAt)
        .all(db)
        .await?)
}
