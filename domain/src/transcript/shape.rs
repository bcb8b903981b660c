//! Recognized transcript fragment payload shapes.
//!
//! Transcript providers deliver fragments in more than one shape: a single
//! utterance object carrying an embedded word list, or a flat list of
//! utterance-like entries. Rather than probing for keys repeatedly throughout
//! normalization, each raw payload is classified exactly once into a
//! `FragmentShape`; everything downstream works with typed data.

use serde::Deserialize;
use serde_json::Value;

/// A provider timestamp wrapper, e.g. `{"relative": 12.34}`.
/// `relative` is seconds from the start of the recording.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Timestamp {
    #[serde(default)]
    pub relative: f64,
}

/// Participant info attached to an utterance
#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub name: Option<String>,
}

/// One word inside an utterance payload
#[derive(Debug, Clone, Deserialize)]
pub struct WordPayload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub start_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub is_final: Option<bool>,
}

/// A single utterance with an embedded word list
#[derive(Debug, Clone, Deserialize)]
pub struct UtterancePayload {
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub participant: Option<Participant>,
    #[serde(default)]
    pub words: Vec<WordPayload>,
    #[serde(default)]
    pub start_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub is_final: Option<bool>,
}

/// One entry of a flat utterance list; carries its own speaker, text and
/// timing with no further explosion.
#[derive(Debug, Clone, Deserialize)]
pub struct UtteranceEntry {
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub participant: Option<Participant>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub start_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub is_final: Option<bool>,
}

/// The shapes a raw fragment payload can take, decided once at parse time.
#[derive(Debug, Clone)]
pub enum FragmentShape {
    /// A single utterance with an embedded word list
    Utterance(UtterancePayload),
    /// A flat list of independent utterance-like entries
    UtteranceList(Vec<UtteranceEntry>),
    /// Anything else. Unrecognized fragments are skipped by the normalizer
    /// but counted, so silent data loss stays observable.
    Unrecognized,
}

impl FragmentShape {
    /// Classifies a raw payload into one of the recognized shapes.
    pub fn classify(payload: &Value) -> FragmentShape {
        match payload {
            Value::Object(map) if map.get("words").map(Value::is_array).unwrap_or(false) => {
                match serde_json::from_value::<UtterancePayload>(payload.clone()) {
                    Ok(utterance) => FragmentShape::Utterance(utterance),
                    Err(_) => FragmentShape::Unrecognized,
                }
            }
            Value::Array(_) => {
                match serde_json::from_value::<Vec<UtteranceEntry>>(payload.clone()) {
                    Ok(entries) => FragmentShape::UtteranceList(entries),
                    Err(_) => FragmentShape::Unrecognized,
                }
            }
            _ => FragmentShape::Unrecognized,
        }
    }
}

/// Resolves a speaker label: an explicit `speaker` field takes priority,
/// then the participant's name, then "Unknown".
pub(crate) fn resolve_speaker(
    speaker: &Option<String>,
    participant: &Option<Participant>,
) -> String {
    speaker
        .clone()
        .or_else(|| participant.as_ref().and_then(|p| p.name.clone()))
        .unwrap_or_else(|| "Unknown".to_string())
}

impl UtterancePayload {
    pub fn speaker_label(&self) -> String {
        resolve_speaker(&self.speaker, &self.participant)
    }
}

impl UtteranceEntry {
    pub fn speaker_label(&self) -> String {
        resolve_speaker(&self.speaker, &self.participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_utterance_with_words() {
        let payload = json!({
            "participant": {"name": "Alice"},
            "words": [{"text": "Hi", "start_timestamp": {"relative": 0.0}}],
            "is_final": true
        });

        match FragmentShape::classify(&payload) {
            FragmentShape::Utterance(utterance) => {
                assert_eq!(utterance.speaker_label(), "Alice");
                assert_eq!(utterance.words.len(), 1);
            }
            other => panic!("Expected Utterance shape, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_flat_list() {
        let payload = json!([
            {"speaker": "Bob", "text": "Hello", "start_timestamp": {"relative": 1.0}},
            {"speaker": "Alice", "text": "Hi"}
        ]);

        match FragmentShape::classify(&payload) {
            FragmentShape::UtteranceList(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].speaker_label(), "Bob");
            }
            other => panic!("Expected UtteranceList shape, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_unrecognized_shapes() {
        assert!(matches!(
            FragmentShape::classify(&json!({"status": "recording"})),
            FragmentShape::Unrecognized
        ));
        assert!(matches!(
            FragmentShape::classify(&json!("just a string")),
            FragmentShape::Unrecognized
        ));
        assert!(matches!(
            FragmentShape::classify(&json!([1, 2, 3])),
            FragmentShape::Unrecognized
        ));
        // "words" present but not an array
        assert!(matches!(
            FragmentShape::classify(&json!({"words": "Hi there"})),
            FragmentShape::Unrecognized
        ));
    }

    #[test]
    fn test_speaker_field_takes_priority_over_participant() {
        let payload = json!({
            "speaker": "Speaker A",
            "participant": {"name": "Alice"},
            "words": []
        });

        match FragmentShape::classify(&payload) {
            FragmentShape::Utterance(utterance) => {
                assert_eq!(utterance.speaker_label(), "Speaker A");
            }
            other => panic!("Expected Utterance shape, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_speaker_and_participant_resolves_to_unknown() {
        let payload = json!({"words": [{"text": "hi"}]});

        match FragmentShape::classify(&payload) {
            FragmentShape::Utterance(utterance) => {
                assert_eq!(utterance.speaker_label(), "Unknown");
            }
            other => panic!("Expected Utterance shape, got {:?}", other),
        }
    }
}
