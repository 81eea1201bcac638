//! Pipeline orchestrator for Recap.
//!
//! Wires transcript parsing, embedding, alignment and rendering into the
//! single `align_and_render` operation, and writes the resulting tracks.

use crate::alignment::{align, cosine_similarity_matrix, Alignment};
use crate::config::Settings;
use crate::embedding::{create_embedder, Embedder};
use crate::error::{RecapError, Result};
use crate::narration::Narration;
use crate::render::{
    build_windows, format_subtitle_track, format_timecode_track, RenderOptions, TimeWindow,
};
use crate::transcript::{parse_transcript, Transcript};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Everything produced by one alignment run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTracks {
    /// Timecode track text (`.dat`).
    pub timecodes: String,
    /// Subtitle track text (`.srt`).
    pub subtitles: String,
    /// Anchors chosen for the summary sentences.
    pub alignment: Alignment,
    /// Windows behind the timecode track, intro and credits included.
    pub windows: Vec<TimeWindow>,
}

/// Paths of the written track files.
#[derive(Debug, Clone)]
pub struct TrackPaths {
    pub timecodes: PathBuf,
    pub subtitles: PathBuf,
}

fn check_inputs(transcript: &Transcript, summary: &[String], durations_ms: &[u64]) -> Result<()> {
    if summary.is_empty() {
        return Err(RecapError::EmptyInput("no summary sentences".to_string()));
    }
    if transcript.is_empty() {
        return Err(RecapError::EmptyInput("no sentences in original transcript".to_string()));
    }
    if durations_ms.len() != summary.len() {
        return Err(RecapError::InvalidInput(format!(
            "{} summary sentences but {} narration durations",
            summary.len(),
            durations_ms.len()
        )));
    }
    Ok(())
}

/// Align and render from precomputed embeddings.
///
/// `summary_embeddings` and `original_embeddings` run parallel to `summary`
/// and `transcript.sentences`.
pub fn render_with_embeddings(
    transcript: &Transcript,
    summary: &[String],
    durations_ms: &[u64],
    summary_embeddings: &[Vec<f32>],
    original_embeddings: &[Vec<f32>],
    intro_ms: u64,
    options: &RenderOptions,
) -> Result<RenderedTracks> {
    check_inputs(transcript, summary, durations_ms)?;
    if summary_embeddings.len() != summary.len() || original_embeddings.len() != transcript.len() {
        return Err(RecapError::InvalidInput(format!(
            "Embedding counts ({}, {}) do not match sentence counts ({}, {})",
            summary_embeddings.len(),
            original_embeddings.len(),
            summary.len(),
            transcript.len()
        )));
    }

    let matrix = cosine_similarity_matrix(summary_embeddings, original_embeddings)?;
    let alignment = align(&matrix)?;
    let aligned = alignment.len();

    let windows = build_windows(
        &alignment.indices,
        &transcript.end_times(),
        &durations_ms[..aligned],
        intro_ms,
        options,
    )?;
    let timecodes = format_timecode_track(&windows, options.frame_rate);
    let subtitles = format_subtitle_track(
        &summary[..aligned],
        &durations_ms[..aligned],
        intro_ms,
        options,
    )?;

    debug!(
        windows = windows.len(),
        unreachable = alignment.unreachable_rows.len(),
        "Rendered tracks"
    );

    Ok(RenderedTracks {
        timecodes,
        subtitles,
        alignment,
        windows,
    })
}

/// Align a narrated summary to an SRT transcript and render both tracks.
#[instrument(skip_all, fields(summary = summary.len(), intro_ms = intro_ms))]
pub async fn align_and_render(
    transcript_srt: &str,
    summary: &[String],
    durations_ms: &[u64],
    embedder: &dyn Embedder,
    intro_ms: u64,
    options: &RenderOptions,
) -> Result<RenderedTracks> {
    let transcript = parse_transcript(transcript_srt)?;
    check_inputs(&transcript, summary, durations_ms)?;

    let original_texts = transcript.texts();
    let (summary_embeddings, original_embeddings) = futures::try_join!(
        embedder.embed_batch(summary),
        embedder.embed_batch(&original_texts)
    )?;

    render_with_embeddings(
        &transcript,
        summary,
        durations_ms,
        &summary_embeddings,
        &original_embeddings,
        intro_ms,
        options,
    )
}

/// The main orchestrator for the Recap pipeline.
pub struct Orchestrator {
    embedder: Arc<dyn Embedder>,
    options: RenderOptions,
}

impl Orchestrator {
    /// Create an orchestrator from settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let embedder = create_embedder(&settings.embedding)?;
        info!(
            "Using {} embeddings ({})",
            settings.embedding.provider, settings.embedding.model
        );

        Ok(Self {
            embedder,
            options: settings.render_options(),
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(embedder: Arc<dyn Embedder>, options: RenderOptions) -> Self {
        Self { embedder, options }
    }

    /// Render options in effect.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Exclude additional summary sentences from the output tracks.
    pub fn ignore(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.options.ignored_indices.extend(indices);
    }

    /// Align a narration to a transcript and render both tracks.
    pub async fn process(
        &self,
        transcript_srt: &str,
        narration: &Narration,
        intro_ms: u64,
    ) -> Result<RenderedTracks> {
        info!(
            "Aligning {} narrated sentences (intro {}ms)",
            narration.len(),
            intro_ms
        );

        let tracks = align_and_render(
            transcript_srt,
            &narration.sentences,
            &narration.durations_ms,
            self.embedder.as_ref(),
            intro_ms,
            &self.options,
        )
        .await?;

        info!("Aligned {} of {} sentences", tracks.alignment.len(), narration.len());
        Ok(tracks)
    }
}

/// Write `<name>.dat` and `<name>-summary.srt` into `dir`.
pub fn write_tracks(dir: &Path, name: &str, tracks: &RenderedTracks) -> Result<TrackPaths> {
    std::fs::create_dir_all(dir)?;

    let paths = TrackPaths {
        timecodes: dir.join(format!("{}.dat", name)),
        subtitles: dir.join(format!("{}-summary.srt", name)),
    };
    std::fs::write(&paths.timecodes, &tracks.timecodes)?;
    std::fs::write(&paths.subtitles, &tracks.subtitles)?;

    debug!("Wrote {:?} and {:?}", paths.timecodes, paths.subtitles);
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::PrecomputedEmbedder;
    use crate::transcript::Sentence;
    use std::collections::HashMap;

    const TRANSCRIPT: &str = "1
00:00:01,000 --> 00:00:02,000
Cats are small.

2
00:00:03,000 --> 00:00:04,000
Dogs bark loudly,

3
00:00:04,000 --> 00:00:05,000
at night.
";

    fn embedder() -> PrecomputedEmbedder {
        PrecomputedEmbedder::new(HashMap::from([
            ("Cats are small.".to_string(), vec![1.0, 0.1, 0.0]),
            ("Dogs bark loudly, at night.".to_string(), vec![0.0, 1.0, 0.2]),
            ("Dogs are noisy at night.".to_string(), vec![0.1, 0.9, 0.3]),
            ("Cats are tiny.".to_string(), vec![0.9, 0.2, 0.1]),
            ("Birds sing.".to_string(), vec![0.0, 0.0, 1.0]),
        ]))
        .unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_sentence_scenario() {
        let summary = strings(&["Dogs are noisy at night."]);
        let tracks = align_and_render(
            TRANSCRIPT,
            &summary,
            &[500],
            &embedder(),
            0,
            &RenderOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(tracks.alignment.indices, vec![1]);
        assert_eq!(
            tracks.timecodes,
            "00:00:00:00,00:00:00:00\n00:00:04:12,00:00:05:00\n00:00:05:00,00:00:08:12\n"
        );
        assert_eq!(
            tracks.subtitles,
            "1\n00:00:00,000 --> 00:00:00,500\nDogs are noisy at night.\n\n"
        );
    }

    #[tokio::test]
    async fn test_full_pipeline_is_idempotent() {
        let summary = strings(&["Cats are tiny.", "Dogs are noisy at night."]);
        let options = RenderOptions::default();
        let embedder = embedder();

        let first = align_and_render(TRANSCRIPT, &summary, &[700, 900], &embedder, 250, &options)
            .await
            .unwrap();
        let second = align_and_render(TRANSCRIPT, &summary, &[700, 900], &embedder, 250, &options)
            .await
            .unwrap();

        assert_eq!(first.alignment.indices, vec![0, 1]);
        assert_eq!(first.timecodes, second.timecodes);
        assert_eq!(first.subtitles, second.subtitles);
        assert_eq!(first.windows[1], TimeWindow::new(1300, 2000));
        assert_eq!(first.windows[2], TimeWindow::new(4100, 5000));
    }

    #[tokio::test]
    async fn test_empty_inputs() {
        let options = RenderOptions::default();
        assert!(matches!(
            align_and_render(TRANSCRIPT, &[], &[], &embedder(), 0, &options).await,
            Err(RecapError::EmptyInput(_))
        ));
        assert!(matches!(
            align_and_render("", &strings(&["Birds sing."]), &[100], &embedder(), 0, &options).await,
            Err(RecapError::EmptyInput(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_transcript() {
        let result = align_and_render(
            "1\nbroken\nText.\n",
            &strings(&["Birds sing."]),
            &[100],
            &embedder(),
            0,
            &RenderOptions::default(),
        )
        .await;
        assert!(matches!(result, Err(RecapError::Parse(_))));
    }

    #[test]
    fn test_extra_summary_sentences_are_not_rendered() {
        let transcript = Transcript::new(vec![Sentence::new("One.", 0, 1000)]);
        let tracks = render_with_embeddings(
            &transcript,
            &strings(&["First.", "Second."]),
            &[400, 600],
            &[vec![1.0, 0.0], vec![0.0, 1.0]],
            &[vec![1.0, 0.2]],
            0,
            &RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(tracks.alignment.indices, vec![0]);
        assert_eq!(
            tracks.windows,
            vec![
                TimeWindow::new(0, 0),
                TimeWindow::new(600, 1000),
                TimeWindow::new(1000, 4500),
            ]
        );
        assert_eq!(
            tracks.timecodes,
            "00:00:00:00,00:00:00:00\n00:00:00:14,00:00:01:00\n00:00:01:00,00:00:04:12\n"
        );
        assert_eq!(tracks.subtitles, "1\n00:00:00,000 --> 00:00:00,400\nFirst.\n\n");
        assert!(!tracks.subtitles.contains("Second."));
    }

    #[test]
    fn test_huge_narration_gap_is_rejected() {
        let marks = "{\"time\":0,\"type\":\"sentence\",\"value\":\"First.\"}\n\
                     {\"time\":18446744073709551615,\"type\":\"sentence\",\"value\":\"Second.\"}\n";
        let narration = crate::narration::parse_speech_marks(marks, None).unwrap();
        assert_eq!(narration.durations_ms, vec![u64::MAX]);

        let transcript = Transcript::new(vec![Sentence::new("One.", 0, 2000)]);
        let result = render_with_embeddings(
            &transcript,
            &narration.sentences,
            &narration.durations_ms,
            &[vec![1.0, 0.0]],
            &[vec![1.0, 0.0]],
            10,
            &RenderOptions::default(),
        );
        assert!(matches!(result, Err(RecapError::InvalidInput(_))));
    }

    #[test]
    fn test_render_with_embeddings_collision() {
        let transcript = Transcript::new(vec![
            Sentence::new("One.", 0, 2000),
            Sentence::new("Two.", 2000, 2000),
        ]);
        let summary = strings(&["First.", "Second."]);
        let tracks = render_with_embeddings(
            &transcript,
            &summary,
            &[800, 800],
            &[vec![1.0, 0.0], vec![0.0, 1.0]],
            &[vec![1.0, 0.0], vec![0.0, 1.0]],
            0,
            &RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(tracks.windows[1], TimeWindow::new(1200, 2000));
        assert_eq!(tracks.windows[2], TimeWindow::new(2000, 2800));
    }

    #[test]
    fn test_degenerate_embedding_is_surfaced() {
        let transcript = Transcript::new(vec![Sentence::new("One.", 0, 1000)]);
        let result = render_with_embeddings(
            &transcript,
            &strings(&["First."]),
            &[500],
            &[vec![0.0, 0.0]],
            &[vec![1.0, 0.0]],
            0,
            &RenderOptions::default(),
        );
        assert!(matches!(result, Err(RecapError::DegenerateEmbedding { .. })));
    }

    #[test]
    fn test_mismatched_durations() {
        let transcript = Transcript::new(vec![Sentence::new("One.", 0, 1000)]);
        let result = render_with_embeddings(
            &transcript,
            &strings(&["First."]),
            &[500, 600],
            &[vec![1.0]],
            &[vec![1.0]],
            0,
            &RenderOptions::default(),
        );
        assert!(matches!(result, Err(RecapError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_orchestrator_writes_tracks() {
        let orchestrator =
            Orchestrator::with_components(Arc::new(embedder()), RenderOptions::default());
        let narration = Narration {
            sentences: strings(&["Cats are tiny."]),
            durations_ms: vec![400],
        };

        let tracks = orchestrator.process(TRANSCRIPT, &narration, 0).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let paths = write_tracks(dir.path(), "task-1", &tracks).unwrap();

        assert!(paths.timecodes.ends_with("task-1.dat"));
        assert!(paths.subtitles.ends_with("task-1-summary.srt"));
        assert_eq!(std::fs::read_to_string(&paths.timecodes).unwrap(), tracks.timecodes);
        assert_eq!(std::fs::read_to_string(&paths.subtitles).unwrap(), tracks.subtitles);
    }
}
