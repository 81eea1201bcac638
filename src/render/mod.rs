//! Output track rendering.
//!
//! Turns an alignment plus narration durations into the two artifacts the
//! video stage consumes:
//!
//! - a timecode track (`.dat`): one `HH:MM:SS:FF,HH:MM:SS:FF` line per window
//! - a subtitle track (`.srt`) for the narrated summary
//!
//! Both renderers honour the same skip-set and iterate summary sentences in
//! the same order.

mod subtitles;
mod timecodes;

pub use subtitles::{format_subtitle_track, wrap_text};
pub use timecodes::{build_windows, format_timecode_track, TimeWindow};

use crate::timing::DEFAULT_FRAME_RATE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default length of the trailing credits window.
pub const DEFAULT_CREDITS_MS: u64 = 3500;

/// Default maximum subtitle line length in characters.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 90;

/// Options shared by the timecode and subtitle renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Frames per second of the timecode track.
    pub frame_rate: u32,
    /// Length of the trailing credits window in milliseconds.
    pub credits_ms: u64,
    /// Maximum characters per subtitle line.
    pub max_line_length: usize,
    /// Summary sentence indices excluded from both tracks.
    pub ignored_indices: BTreeSet<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            credits_ms: DEFAULT_CREDITS_MS,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            ignored_indices: BTreeSet::new(),
        }
    }
}

impl RenderOptions {
    /// Whether summary sentence `i` is rendered.
    pub fn includes(&self, i: usize) -> bool {
        !self.ignored_indices.contains(&i)
    }

    /// Exclude the given summary sentences from both tracks.
    pub fn with_ignored(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.ignored_indices.extend(indices);
        self
    }
}
