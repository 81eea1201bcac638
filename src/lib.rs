//! Recap - narrated summary alignment
//!
//! Matches each sentence of a narrated summary to the sentence of the source
//! video's transcript it best paraphrases, then renders the clip windows and
//! the subtitle track for the summary cut.
//!
//! # Overview
//!
//! Recap allows you to:
//! - Parse SRT transcripts into timed sentences
//! - Embed summary and transcript sentences (OpenAI or precomputed vectors)
//! - Find a monotone sentence alignment maximizing total similarity
//! - Write frame timecodes and SRT subtitles sized to the narration
//!
//! # Architecture
//!
//! - `transcript` - SRT parsing and sentence merging
//! - `embedding` - Embedding generation
//! - `alignment` - Cosine similarity matrix and DP alignment
//! - `narration` - Speech marks, intro offset and SSML
//! - `render` - Timecode windows and subtitle formatting
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use recap::config::Settings;
//! use recap::narration::parse_speech_marks;
//! use recap::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let transcript = std::fs::read_to_string("video.srt")?;
//!     let narration = parse_speech_marks(&std::fs::read_to_string("marks.jsonl")?, None)?;
//!
//!     let tracks = orchestrator.process(&transcript, &narration, 1200).await?;
//!     print!("{}", tracks.timecodes);
//!
//!     Ok(())
//! }
//! ```

pub mod alignment;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod narration;
pub mod openai;
pub mod orchestrator;
pub mod render;
pub mod timing;
pub mod transcript;

pub use error::{RecapError, Result};
