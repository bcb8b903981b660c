//! Reconstructs a chronological, speaker-grouped transcript from raw
//! fragment payloads.
//!
//! Fragments arrive over at-least-once webhooks in no particular order. The
//! normalizer flattens them into timestamped words, sorts chronologically
//! (stable, so equal timestamps keep arrival order), applies the finality
//! filter, groups consecutive words by speaker, and renders one line per
//! speaker turn. The result is the text handed to the summary extractor.

use crate::transcript::shape::{FragmentShape, UtteranceEntry, UtterancePayload};
use log::*;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

/// A single transcribed word with resolved speaker and timing.
/// Derived and in-memory only; recomputed from stored fragments on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWord {
    pub text: String,
    pub speaker: String,
    /// Seconds relative to the start of the recording
    pub timestamp: f64,
    pub is_final: bool,
}

/// A maximal run of consecutive words sharing one speaker label after
/// chronological sort.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerTurn {
    pub speaker: String,
    pub words: Vec<String>,
}

/// The result of normalizing one session's fragment set.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTranscript {
    /// Rendered transcript, one "{speaker}: {text}" line per turn.
    /// Empty when the fragment set contained no usable words.
    pub text: String,
    /// Total words extracted before the finality filter
    pub words_seen: usize,
    /// Fragments whose payload matched no recognized shape. Skipping is
    /// intentional resilience, but it must stay observable.
    pub fragments_skipped: usize,
}

/// A per-fragment transcript entry for UI rendering, with the relative
/// timestamp already converted to MM:SS.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranscriptEntry {
    pub speaker: String,
    pub text: String,
    pub timestamp: String,
    pub word_count: usize,
}

/// Normalizes a session's raw fragment payloads into a single transcript.
pub fn normalize(payloads: &[Value]) -> NormalizedTranscript {
    let mut all_words: Vec<NormalizedWord> = Vec::new();
    let mut fragments_skipped = 0;

    for payload in payloads {
        match FragmentShape::classify(payload) {
            FragmentShape::Utterance(utterance) => {
                all_words.extend(words_from_utterance(&utterance));
            }
            FragmentShape::UtteranceList(entries) => {
                all_words.extend(entries.iter().map(word_from_entry));
            }
            FragmentShape::Unrecognized => {
                debug!("Skipping transcript fragment with unrecognized payload shape");
                fragments_skipped += 1;
            }
        }
    }

    if fragments_skipped > 0 {
        warn!(
            "Skipped {fragments_skipped} of {} transcript fragments during normalization",
            payloads.len()
        );
    }

    let words_seen = all_words.len();

    // Stable sort: words with equal timestamps keep their arrival order.
    all_words.sort_by(|a, b| {
        a.timestamp
            .partial_cmp(&b.timestamp)
            .unwrap_or(Ordering::Equal)
    });

    // Finality filter is total: once any provider marks words final, every
    // provisional word is dropped. Providers that never mark finality keep
    // all words.
    let has_final_words = all_words.iter().any(|word| word.is_final);
    let words_to_process: Vec<NormalizedWord> = if has_final_words {
        all_words.into_iter().filter(|word| word.is_final).collect()
    } else {
        all_words
    };

    let turns = group_into_turns(&words_to_process);

    NormalizedTranscript {
        text: render_turns(&turns),
        words_seen,
        fragments_skipped,
    }
}

/// Explodes an utterance's embedded word list, inheriting the utterance's
/// speaker label. Word-level timing wins over the fragment-level timestamp;
/// both absent means time zero.
fn words_from_utterance(utterance: &UtterancePayload) -> Vec<NormalizedWord> {
    let speaker = utterance.speaker_label();
    let fragment_timestamp = utterance.start_timestamp.as_ref().map(|ts| ts.relative);

    utterance
        .words
        .iter()
        .map(|word| NormalizedWord {
            text: word.text.clone(),
            speaker: speaker.clone(),
            timestamp: word
                .start_timestamp
                .as_ref()
                .map(|ts| ts.relative)
                .or(fragment_timestamp)
                .unwrap_or(0.0),
            is_final: word.is_final.or(utterance.is_final).unwrap_or(false),
        })
        .collect()
}

/// Maps one flat-list entry to a single word-like unit; no explosion.
fn word_from_entry(entry: &UtteranceEntry) -> NormalizedWord {
    NormalizedWord {
        text: entry.text.clone().unwrap_or_default(),
        speaker: entry.speaker_label(),
        timestamp: entry
            .start_timestamp
            .as_ref()
            .map(|ts| ts.relative)
            .unwrap_or(0.0),
        is_final: entry.is_final.unwrap_or(false),
    }
}

/// Groups a chronologically sorted word sequence into speaker turns.
/// A new turn starts whenever the speaker label changes from the previous
/// word, including at the first word.
pub fn group_into_turns(words: &[NormalizedWord]) -> Vec<SpeakerTurn> {
    let mut turns: Vec<SpeakerTurn> = Vec::new();

    for word in words {
        match turns.last_mut() {
            Some(turn) if turn.speaker == word.speaker => {
                turn.words.push(word.text.clone());
            }
            _ => {
                turns.push(SpeakerTurn {
                    speaker: word.speaker.clone(),
                    words: vec![word.text.clone()],
                });
            }
        }
    }

    turns
}

/// Renders speaker turns as "{speaker}: {words joined by spaces}" lines.
pub fn render_turns(turns: &[SpeakerTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.speaker, turn.words.join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Converts a relative offset in seconds to MM:SS for presentation.
/// Normalization itself always works in raw seconds.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Builds per-fragment presentation entries for transcript rendering.
/// Unlike [`normalize`], entries are kept in fragment arrival order and are
/// not merged across fragments.
pub fn presentation_entries(payloads: &[Value]) -> Vec<TranscriptEntry> {
    let mut entries = Vec::new();

    for payload in payloads {
        match FragmentShape::classify(payload) {
            FragmentShape::Utterance(utterance) => {
                if utterance.words.is_empty() {
                    continue;
                }

                let timestamp = utterance
                    .words
                    .first()
                    .and_then(|word| word.start_timestamp.as_ref())
                    .or(utterance.start_timestamp.as_ref())
                    .map(|ts| ts.relative)
                    .unwrap_or(0.0);

                entries.push(TranscriptEntry {
                    speaker: utterance.speaker_label(),
                    text: utterance
                        .words
                        .iter()
                        .map(|word| word.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    timestamp: format_timestamp(timestamp),
                    word_count: utterance.words.len(),
                });
            }
            FragmentShape::UtteranceList(list) => {
                for entry in list {
                    let text = entry.text.clone().unwrap_or_default();
                    let word_count = text.split_whitespace().count();
                    entries.push(TranscriptEntry {
                        speaker: entry.speaker_label(),
                        text,
                        timestamp: format_timestamp(
                            entry
                                .start_timestamp
                                .as_ref()
                                .map(|ts| ts.relative)
                                .unwrap_or(0.0),
                        ),
                        word_count,
                    });
                }
            }
            FragmentShape::Unrecognized => {
                debug!("Skipping unrecognized fragment in transcript presentation");
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utterance(speaker: &str, words: &[(&str, f64, bool)]) -> Value {
        json!({
            "participant": {"name": speaker},
            "words": words
                .iter()
                .map(|(text, start, is_final)| {
                    json!({
                        "text": text,
                        "start_timestamp": {"relative": start},
                        "is_final": is_final
                    })
                })
                .collect::<Vec<_>>()
        })
    }

    #[test]
    fn test_empty_fragment_set_produces_empty_text() {
        let result = normalize(&[]);
        assert_eq!(result.text, "");
        assert_eq!(result.words_seen, 0);
        assert_eq!(result.fragments_skipped, 0);
    }

    #[test]
    fn test_two_speakers_in_timestamp_order() {
        let fragments = vec![
            utterance("Alice", &[("Hi", 0.0, true)]),
            utterance("Bob", &[("Hello", 1.0, true)]),
        ];

        let result = normalize(&fragments);
        assert_eq!(result.text, "Alice: Hi\nBob: Hello");
    }

    #[test]
    fn test_same_speaker_grouped_across_fragments() {
        let fragments = vec![
            utterance("Alice", &[("Good", 0.0, true)]),
            utterance("Alice", &[("morning", 0.5, true)]),
        ];

        let result = normalize(&fragments);
        assert_eq!(result.text, "Alice: Good morning");
    }

    #[test]
    fn test_arrival_order_does_not_affect_output() {
        let first = utterance("Alice", &[("Hi", 0.0, true)]);
        let second = utterance("Bob", &[("there", 1.0, true)]);
        let third = utterance("Alice", &[("again", 2.0, true)]);

        let in_order = normalize(&[first.clone(), second.clone(), third.clone()]);
        let shuffled = normalize(&[third, first, second]);
        assert_eq!(in_order.text, shuffled.text);
        assert_eq!(in_order.text, "Alice: Hi\nBob: there\nAlice: again");
    }

    #[test]
    fn test_finality_filter_is_total() {
        let fragments = vec![
            utterance("Alice", &[("provisional", 0.0, false)]),
            utterance("Alice", &[("final", 1.0, true)]),
        ];

        let result = normalize(&fragments);
        assert_eq!(result.text, "Alice: final");
        // The provisional word was still seen before filtering
        assert_eq!(result.words_seen, 2);
    }

    #[test]
    fn test_all_words_kept_when_provider_never_marks_finality() {
        let fragments = vec![
            utterance("Alice", &[("all", 0.0, false), ("kept", 0.5, false)]),
        ];

        let result = normalize(&fragments);
        assert_eq!(result.text, "Alice: all kept");
    }

    #[test]
    fn test_utterance_finality_inherited_by_words() {
        let fragment = json!({
            "speaker": "Alice",
            "is_final": true,
            "words": [
                {"text": "inherited", "start_timestamp": {"relative": 0.0}}
            ]
        });
        let provisional = utterance("Bob", &[("dropped", 1.0, false)]);

        let result = normalize(&[fragment, provisional]);
        assert_eq!(result.text, "Alice: inherited");
    }

    #[test]
    fn test_unrecognized_fragments_are_skipped_and_counted() {
        let fragments = vec![
            json!({"status": "in_call_recording"}),
            utterance("Alice", &[("Hi", 0.0, true)]),
            json!("garbage"),
        ];

        let result = normalize(&fragments);
        assert_eq!(result.text, "Alice: Hi");
        assert_eq!(result.fragments_skipped, 2);
    }

    #[test]
    fn test_all_fragments_skipped_produces_empty_text() {
        let fragments = vec![json!({"event": "unknown"}), json!(42)];

        let result = normalize(&fragments);
        assert_eq!(result.text, "");
        assert_eq!(result.fragments_skipped, 2);
    }

    #[test]
    fn test_flat_list_entries_carry_their_own_speakers() {
        let fragments = vec![json!([
            {"speaker": "Bob", "text": "Hello", "start_timestamp": {"relative": 1.0}},
            {"speaker": "Alice", "text": "Hi", "start_timestamp": {"relative": 0.0}}
        ])];

        let result = normalize(&fragments);
        assert_eq!(result.text, "Alice: Hi\nBob: Hello");
    }

    #[test]
    fn test_word_timestamp_falls_back_to_fragment_timestamp() {
        let fragment = json!({
            "speaker": "Alice",
            "start_timestamp": {"relative": 5.0},
            "words": [{"text": "late", "is_final": true}]
        });
        let earlier = utterance("Bob", &[("early", 1.0, true)]);

        let result = normalize(&[fragment, earlier]);
        assert_eq!(result.text, "Bob: early\nAlice: late");
    }

    #[test]
    fn test_missing_speaker_renders_as_unknown() {
        let fragment = json!({
            "words": [{"text": "hi", "start_timestamp": {"relative": 0.0}}]
        });

        let result = normalize(&[fragment]);
        assert_eq!(result.text, "Unknown: hi");
    }

    #[test]
    fn test_equal_timestamps_preserve_arrival_order() {
        let fragments = vec![
            utterance("Alice", &[("first", 1.0, true)]),
            utterance("Alice", &[("second", 1.0, true)]),
        ];

        let result = normalize(&fragments);
        assert_eq!(result.text, "Alice: first second");
    }

    #[test]
    fn test_every_output_line_matches_speaker_colon_text() {
        let fragments = vec![
            utterance("Alice", &[("one", 0.0, true), ("two", 0.5, true)]),
            utterance("Bob", &[("three", 1.0, true)]),
        ];

        let result = normalize(&fragments);
        for line in result.text.lines() {
            let (speaker, text) = line.split_once(": ").expect("line should contain ': '");
            assert!(!speaker.is_empty());
            assert!(!text.is_empty());
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(59.4), "00:59");
        assert_eq!(format_timestamp(61.0), "01:01");
        assert_eq!(format_timestamp(3601.0), "60:01");
        assert_eq!(format_timestamp(-5.0), "00:00");
    }

    #[test]
    fn test_presentation_entries_are_per_fragment() {
        let fragments = vec![
            utterance("Alice", &[("Good", 65.0, true), ("morning", 65.5, true)]),
            json!({"unrecognized": true}),
            json!([{"speaker": "Bob", "text": "hi there", "start_timestamp": {"relative": 70.0}}]),
        ];

        let entries = presentation_entries(&fragments);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].speaker, "Alice");
        assert_eq!(entries[0].text, "Good morning");
        assert_eq!(entries[0].timestamp, "01:05");
        assert_eq!(entries[0].word_count, 2);
        assert_eq!(entries[1].speaker, "Bob");
        assert_eq!(entries[1].word_count, 2);
        assert_eq!(entries[1].timestamp, "01:10");
    }
}
