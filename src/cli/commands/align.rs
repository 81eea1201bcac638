//! Align command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::narration::{intro_from_transcription_json, parse_speech_marks};
use crate::orchestrator::{write_tracks, Orchestrator};
use anyhow::{Context, Result};

/// Inputs of the align command.
#[derive(Debug, Clone, Default)]
pub struct AlignArgs {
    pub transcript: String,
    pub speech_marks: String,
    pub intro_ms: Option<u64>,
    pub transcription_json: Option<String>,
    pub audio_end_ms: Option<u64>,
    pub embeddings: Option<String>,
    pub output_dir: Option<String>,
    pub name: String,
    pub ignore: Vec<usize>,
}

/// Resolve the intro offset from the command line or a transcription result.
fn resolve_intro(intro_ms: Option<u64>, transcription_json: Option<&str>) -> Result<u64> {
    match (intro_ms, transcription_json) {
        (Some(ms), _) => Ok(ms),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read transcription result {}", path))?;
            Ok(intro_from_transcription_json(&content)?)
        }
        (None, None) => {
            Output::warning("No intro given; narration starts at 00:00:00.");
            Ok(0)
        }
    }
}

/// Run the align command.
pub async fn run_align(args: AlignArgs, mut settings: Settings) -> Result<()> {
    if let Some(path) = &args.embeddings {
        settings.embedding.provider = "precomputed".to_string();
        settings.embedding.precomputed_path = Some(path.clone());
    }

    // Pre-flight checks
    if let Err(e) = preflight::check(&settings.embedding) {
        Output::error(&format!("{}", e));
        Output::info("Run 'recap doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let transcript_srt = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("Failed to read transcript {}", args.transcript))?;
    let marks = std::fs::read_to_string(&args.speech_marks)
        .with_context(|| format!("Failed to read speech marks {}", args.speech_marks))?;

    let narration = parse_speech_marks(&marks, args.audio_end_ms)?;
    if narration.is_empty() {
        Output::error("No narrated sentences found in the speech marks.");
        return Err(anyhow::anyhow!("empty narration"));
    }
    let intro_ms = resolve_intro(args.intro_ms, args.transcription_json.as_deref())?;

    let mut orchestrator = Orchestrator::new(&settings)?;
    orchestrator.ignore(args.ignore.iter().copied());

    Output::info(&format!(
        "Aligning {} narrated sentences to {}",
        narration.len(),
        args.transcript
    ));

    let spinner = Output::spinner("Embedding and aligning sentences...");
    let result = orchestrator.process(&transcript_srt, &narration, intro_ms).await;
    spinner.finish_and_clear();

    let tracks = match result {
        Ok(tracks) => tracks,
        Err(e) => {
            Output::error(&format!("Alignment failed: {}", e));
            return Err(e.into());
        }
    };

    Output::header("Alignment");
    let frame_rate = orchestrator.options().frame_rate;
    // windows[0] is the intro; sentence windows follow in summary order
    let mut windows = tracks.windows.iter().skip(1);
    for (i, &anchor) in tracks.alignment.indices.iter().enumerate() {
        if !orchestrator.options().includes(i) {
            continue;
        }
        if let Some(window) = windows.next() {
            Output::alignment_row(
                i,
                anchor,
                &window.to_timecode_line(frame_rate),
                &narration.sentences[i],
            );
        }
    }
    println!();

    for &row in &tracks.alignment.unreachable_rows {
        Output::warning(&format!(
            "Sentence #{} has no positive similarity chain; its anchor is a fallback.",
            row + 1
        ));
    }
    if tracks.alignment.len() < narration.len() {
        Output::warning(&format!(
            "{} sentences exceed the transcript length and were left out.",
            narration.len() - tracks.alignment.len()
        ));
    }

    let output_dir = args
        .output_dir
        .as_deref()
        .map(Settings::expand_path)
        .unwrap_or_else(|| settings.output_dir());
    let paths = write_tracks(&output_dir, &args.name, &tracks)?;

    Output::success(&format!(
        "Wrote {} windows to {}",
        tracks.windows.len(),
        paths.timecodes.display()
    ));
    Output::success(&format!("Wrote subtitles to {}", paths.subtitles.display()));

    Ok(())
}
