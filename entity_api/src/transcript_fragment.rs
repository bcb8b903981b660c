//! CRUD operations for the meeting_transcripts table.
//!
//! Fragments are append-only. There is deliberately no update or delete
//! here: every webhook delivery is preserved verbatim as an audit trail,
//! including duplicates from at-least-once redelivery.

use super::error::Error;
use entity::transcript_fragments::{ActiveModel, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, DatabaseConnection, QueryOrder, TryIntoModel};

/// Appends one raw transcript fragment for a recording session.
/// The payload is stored unmodified; interpretation belongs to the
/// normalizer.
pub async fn create(
    db: &DatabaseConnection,
    bot_id: &str,
    meeting_id: Option<Id>,
    payload: serde_json::Value,
) -> Result<Model, Error> {
    debug!("Appending transcript fragment for bot: {bot_id}");

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        bot_id: Set(bot_id.to_string()),
        meeting_id: Set(meeting_id),
        transcript_data: Set(payload),
        created_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds all fragments for a recording session, in arrival order
pub async fn find_by_bot_id(db: &DatabaseConnection, bot_id: &str) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::transcript_fragments::Column::BotId.eq(bot_id))
        .order_by_asc(entity::transcript_fragments::Column::CreatedAt)
        .all(db)
        .await?)
}

/// Finds all fragments for a meeting, in arrival order
pub async fn find_by_meeting_id(
    db: &DatabaseConnection,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(entity::transcript_fragments::Column::MeetingId.eq(meeting_id))
        .order_by_asc(entity::transcript_fragments::Column::CreatedAt)
        .all(db)
        .await?)
}
