use uuid::Uuid;

// Recording session entities
pub mod recall_session_status;
pub mod recall_sessions;
pub mod transcript_fragments;

// Structured summary entities
pub mod action_items;
pub mod meeting_decisions;
pub mod meeting_discussions;
pub mod meeting_jargon;
pub mod meeting_summaries;
pub mod meeting_themes;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
