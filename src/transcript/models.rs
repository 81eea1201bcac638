//! Data models for transcripts.

use serde::{Deserialize, Serialize};

/// A single subtitle block of the source SRT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Block text, multiple lines joined with a space.
    pub text: String,
    /// Start time in milliseconds.
    pub start_ms: u64,
    /// End time in milliseconds.
    pub end_ms: u64,
}

impl Fragment {
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }

    /// Whether this fragment closes a sentence.
    pub fn ends_sentence(&self) -> bool {
        self.text.ends_with(['.', '?', '!'])
    }
}

/// A unit of spoken text with its time span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Sentence text.
    pub text: String,
    /// Start time in milliseconds.
    pub start_ms: u64,
    /// End time in milliseconds.
    pub end_ms: u64,
}

impl Sentence {
    /// Create a new sentence.
    pub fn new(text: impl Into<String>, start_ms: u64, end_ms: u64) -> Self {
        Self {
            text: text.into(),
            start_ms,
            end_ms,
        }
    }

    /// Duration of this sentence in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Sentence-level view of an original transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Sentences in playback order.
    pub sentences: Vec<Sentence>,
}

impl Transcript {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sentence texts, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sentences.iter().map(|s| s.text.clone()).collect()
    }

    /// Sentence start times, in order.
    pub fn start_times(&self) -> Vec<u64> {
        self.sentences.iter().map(|s| s.start_ms).collect()
    }

    /// Sentence end times, in order.
    pub fn end_times(&self) -> Vec<u64> {
        self.sentences.iter().map(|s| s.end_ms).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_sentence_end() {
        assert!(Fragment::new("Done.", 0, 1).ends_sentence());
        assert!(Fragment::new("Really?", 0, 1).ends_sentence());
        assert!(Fragment::new("Wow!", 0, 1).ends_sentence());
        assert!(!Fragment::new("Mr. Smith said", 0, 1).ends_sentence());
    }

    #[test]
    fn test_transcript_accessors() {
        let transcript = Transcript::new(vec![
            Sentence::new("First.", 1000, 2000),
            Sentence::new("Second.", 3000, 5000),
        ]);

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.texts(), vec!["First.", "Second."]);
        assert_eq!(transcript.start_times(), vec![1000, 3000]);
        assert_eq!(transcript.end_times(), vec![2000, 5000]);
        assert_eq!(transcript.sentences[1].duration_ms(), 2000);
    }
}
