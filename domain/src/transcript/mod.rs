//! Transcript normalization.
//!
//! Recording bots deliver transcript fragments over webhooks with no ordering
//! or shape guarantees. This module reconstructs a chronological,
//! speaker-grouped transcript from the raw stored payloads.

pub mod normalizer;
pub mod shape;

pub use normalizer::{
    format_timestamp, normalize, presentation_entries, NormalizedTranscript, NormalizedWord,
    SpeakerTurn, TranscriptEntry,
};
pub use shape::FragmentShape;
