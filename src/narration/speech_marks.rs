//! TTS speech-mark parsing.

use crate::error::{RecapError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One line of a speech-marks stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechMark {
    /// Offset into the synthesized audio, in milliseconds.
    pub time: u64,
    /// Mark type (`sentence`, `word`, `ssml`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Spoken text of the mark.
    pub value: String,
}

impl SpeechMark {
    /// Marks without a type are treated as sentence marks.
    pub fn is_sentence(&self) -> bool {
        self.kind.as_deref().map_or(true, |kind| kind == "sentence")
    }
}

/// Summary sentences with their narrated durations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    pub sentences: Vec<String>,
    pub durations_ms: Vec<u64>,
}

impl Narration {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total narrated time in milliseconds, saturating at `u64::MAX`.
    pub fn total_ms(&self) -> u64 {
        self.durations_ms.iter().fold(0, |acc, &d| acc.saturating_add(d))
    }
}

/// Parse newline-delimited JSON speech marks into sentences and durations.
///
/// A sentence lasts until the next sentence mark. The final mark has no
/// successor: it is closed at `audio_end_ms` when given and dropped otherwise.
pub fn parse_speech_marks(content: &str, audio_end_ms: Option<u64>) -> Result<Narration> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut marks = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mark: SpeechMark = serde_json::from_str(line).map_err(|e| {
            RecapError::Parse(format!("Invalid speech mark at line {}: {}", line_no + 1, e))
        })?;
        if mark.is_sentence() {
            marks.push(mark);
        }
    }

    let mut narration = Narration::default();
    for pair in marks.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let duration = next.time.checked_sub(current.time).ok_or_else(|| {
            RecapError::Parse(format!(
                "Speech marks go backwards: {}ms after {}ms",
                next.time, current.time
            ))
        })?;
        narration.sentences.push(current.value.clone());
        narration.durations_ms.push(duration);
    }

    if let Some(last) = marks.last() {
        match audio_end_ms {
            Some(end) => {
                let duration = end.checked_sub(last.time).ok_or_else(|| {
                    RecapError::Parse(format!(
                        "Audio ends at {}ms, before the last speech mark at {}ms",
                        end, last.time
                    ))
                })?;
                narration.sentences.push(last.value.clone());
                narration.durations_ms.push(duration);
            }
            None => debug!("Dropping last speech mark without an audio end time: {:?}", last.value),
        }
    }

    debug!("Parsed {} narrated sentences", narration.len());
    Ok(narration)
}
