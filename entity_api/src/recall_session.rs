//! CRUD operations for recall_sessions table.

use super::error::{EntityApiErrorKind, Error};
use entity::recall_session_status::RecallSessionStatus;
use entity::recall_sessions::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, TryIntoModel,
};

/// Creates a new active recording session for a meeting
pub async fn create(
    db: &DatabaseConnection,
    meeting_id: Id,
    user_id: Id,
    bot_id: String,
) -> Result<Model, Error> {
    debug!("Creating recall session for meeting: {meeting_id}, bot: {bot_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        meeting_id: Set(meeting_id),
        user_id: Set(user_id),
        bot_id: Set(bot_id),
        status: Set(RecallSessionStatus::Active),
        created_at: Set(now.into()),
        ended_at: Set(None),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds a recall session by its Recall.ai bot id
pub async fn find_by_bot_id(db: &DatabaseConnection, bot_id: &str) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::recall_sessions::Column::BotId.eq(bot_id))
        .order_by_desc(entity::recall_sessions::Column::CreatedAt)
        .one(db)
        .await?)
}

/// Finds the latest recording session for a meeting
pub async fn find_latest_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::recall_sessions::Column::MeetingId.eq(meeting_id))
        .order_by_desc(entity::recall_sessions::Column::CreatedAt)
        .one(db)
        .await?)
}

/// Finds all recording sessions for a meeting, newest first
pub async fn find_all_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::recall_sessions::Column::MeetingId.eq(meeting_id))
        .order_by_desc(entity::recall_sessions::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Marks a session as stopped and records when the bot left the call
pub async fn mark_stopped(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    let result = Entity::find_by_id(id).one(db).await?;

    match result {
        Some(existing) => {
            debug!("Marking recall session stopped: {id}");

            let active_model = ActiveModel {
                id: Unchanged(existing.id),
                meeting_id: Unchanged(existing.meeting_id),
                user_id: Unchanged(existing.user_id),
                bot_id: Unchanged(existing.bot_id),
                status: Set(RecallSessionStatus::Stopped),
                created_at: Unchanged(existing.created_at),
                ended_at: Set(Some(chrono::Utc::now().into())),
            };

            Ok(active_model.update(db).await?.try_into_model()?)
        }
        None => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        }),
    }
}
