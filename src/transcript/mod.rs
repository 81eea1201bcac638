//! Original transcript handling.
//!
//! Parses the SRT transcript produced by the speech-to-text stage and merges
//! its subtitle fragments into sentence-level records whose timing anchors the
//! narrated summary.

mod models;
mod parser;

pub use models::{Fragment, Sentence, Transcript};
pub use parser::{merge_fragments, parse_transcript, SrtParser};
