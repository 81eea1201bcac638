//! SRT transcript parsing and sentence merging.

use super::{Fragment, Sentence, Transcript};
use crate::error::{RecapError, Result};
use crate::timing::subtitle_timestamp_to_ms;
use regex::Regex;
use tracing::debug;

/// Parser for SRT-formatted transcripts.
pub struct SrtParser {
    timing_regex: Regex,
}

impl SrtParser {
    pub fn new() -> Self {
        // "00:00:01,000 --> 00:00:02,500", optionally followed by position data
        let timing_regex = Regex::new(r"^\s*(\S+)\s*-->\s*(\S+)").expect("Invalid regex");

        Self { timing_regex }
    }

    /// Parse SRT content into sentence-level records.
    pub fn parse(&self, content: &str) -> Result<Transcript> {
        let fragments = self.parse_fragments(content)?;
        let sentences = merge_fragments(&fragments);

        debug!(
            "Merged {} subtitle fragments into {} sentences",
            fragments.len(),
            sentences.len()
        );

        Ok(Transcript::new(sentences))
    }

    /// Parse SRT content into its subtitle blocks, in file order.
    pub fn parse_fragments(&self, content: &str) -> Result<Vec<Fragment>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut fragments = Vec::new();
        let mut block: Vec<(usize, &str)> = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    fragments.push(self.parse_block(&block)?);
                    block.clear();
                }
                continue;
            }
            block.push((line_no + 1, line));
        }

        if !block.is_empty() {
            fragments.push(self.parse_block(&block)?);
        }

        Ok(fragments)
    }

    fn parse_block(&self, block: &[(usize, &str)]) -> Result<Fragment> {
        let (index_line_no, index_line) = block[0];
        if index_line.trim().parse::<usize>().is_err() {
            return Err(RecapError::Parse(format!(
                "Expected subtitle index at line {}, found '{}'",
                index_line_no,
                index_line.trim()
            )));
        }

        let (timing_line_no, timing_line) = block.get(1).copied().ok_or_else(|| {
            RecapError::Parse(format!(
                "Subtitle block at line {} has no timing line",
                index_line_no
            ))
        })?;

        let caps = self.timing_regex.captures(timing_line).ok_or_else(|| {
            RecapError::Parse(format!(
                "Malformed timing line at line {}: '{}'",
                timing_line_no,
                timing_line.trim()
            ))
        })?;
        let start_ms = subtitle_timestamp_to_ms(&caps[1])?;
        let end_ms = subtitle_timestamp_to_ms(&caps[2])?;

        if start_ms > end_ms {
            return Err(RecapError::Parse(format!(
                "Subtitle block at line {} ends before it starts",
                index_line_no
            )));
        }

        let text = block[2..]
            .iter()
            .map(|(_, line)| line.trim())
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() {
            return Err(RecapError::Parse(format!(
                "Subtitle block at line {} has timing but no text",
                index_line_no
            )));
        }

        Ok(Fragment::new(text, start_ms, end_ms))
    }
}

impl Default for SrtParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse SRT content into sentence-level records.
pub fn parse_transcript(content: &str) -> Result<Transcript> {
    SrtParser::new().parse(content)
}

/// Merge consecutive fragments into sentences.
///
/// A sentence closes on a fragment whose text ends with `.`, `?` or `!`, and
/// on the last fragment regardless of punctuation.
pub fn merge_fragments(fragments: &[Fragment]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut text = String::new();
    let mut start_ms: Option<u64> = None;

    for (i, fragment) in fragments.iter().enumerate() {
        let start = *start_ms.get_or_insert(fragment.start_ms);

        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&fragment.text);

        if fragment.ends_sentence() || i == fragments.len() - 1 {
            sentences.push(Sentence::new(std::mem::take(&mut text), start, fragment.end_ms));
            start_ms = None;
        }
    }

    sentences
}
