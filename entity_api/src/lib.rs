pub use entity::{
    action_items, meeting_decisions, meeting_discussions, meeting_jargon, meeting_summaries,
    meeting_themes, recall_session_status, recall_sessions, transcript_fragments, Id,
};

pub mod action_item;
pub mod error;
pub mod jargon_entry;
pub mod meeting_decision;
pub mod meeting_discussion;
pub mod meeting_summary;
pub mod meeting_theme;
pub mod recall_session;
pub mod transcript_fragment;
