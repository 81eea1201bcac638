//! Recap CLI entry point.

use anyhow::Result;
use clap::Parser;
use recap::cli::commands::{self, AlignArgs};
use recap::cli::{Cli, Commands};
use recap::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("recap={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match cli.command {
        Commands::Align {
            transcript,
            speech_marks,
            intro_ms,
            transcription_json,
            audio_end_ms,
            embeddings,
            output_dir,
            name,
            ignore,
        } => {
            let args = AlignArgs {
                transcript,
                speech_marks,
                intro_ms,
                transcription_json,
                audio_end_ms,
                embeddings,
                output_dir,
                name,
                ignore,
            };
            commands::run_align(args, settings).await?;
        }

        Commands::Ssml {
            summary,
            intro_ms,
            transcription_json,
            output,
        } => {
            commands::run_ssml(&summary, intro_ms, transcription_json.as_deref(), output)?;
        }

        Commands::Timecode { ms, frame_rate } => {
            commands::run_timecode(ms, frame_rate, &settings)?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, &settings, cli.config.as_deref())?;
        }
    }

    Ok(())
}
