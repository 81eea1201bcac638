//! CLI module for Recap.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Recap - narrated summary alignment
///
/// Aligns a narrated video summary to the transcript of the source video and
/// renders the timecode and subtitle tracks for the summary cut.
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Align narration to a transcript and write the timecode and subtitle tracks
    Align {
        /// SRT transcript of the source video
        #[arg(short, long)]
        transcript: String,

        /// Speech marks (JSON lines) of the narrated summary
        #[arg(short, long)]
        speech_marks: String,

        /// Silence before the narration starts, in milliseconds
        #[arg(long, conflicts_with = "transcription_json")]
        intro_ms: Option<u64>,

        /// Speech-to-text result to read the intro offset from
        #[arg(long)]
        transcription_json: Option<String>,

        /// End of the narration audio in milliseconds (keeps the last sentence)
        #[arg(long)]
        audio_end_ms: Option<u64>,

        /// JSON table of precomputed embeddings (overrides the configured provider)
        #[arg(short, long)]
        embeddings: Option<String>,

        /// Directory for the output tracks
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Base name of the output files (<name>.dat, <name>-summary.srt)
        #[arg(short, long, default_value = "summary")]
        name: String,

        /// Summary sentence indices (0-based) to leave out, comma separated
        #[arg(long, value_delimiter = ',')]
        ignore: Vec<usize>,
    },

    /// Build the SSML narration script for the summary text
    Ssml {
        /// Summary text file
        #[arg(short, long)]
        summary: String,

        /// Silence before the narration starts, in milliseconds
        #[arg(long, conflicts_with = "transcription_json", required_unless_present = "transcription_json")]
        intro_ms: Option<u64>,

        /// Speech-to-text result to read the intro offset from
        #[arg(long)]
        transcription_json: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show a millisecond offset in timecode and subtitle formats
    Timecode {
        /// Offset in milliseconds
        ms: u64,

        /// Frame rate for the timecode format
        #[arg(short, long)]
        frame_rate: Option<u32>,
    },

    /// Check configuration and embedding provider
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}
