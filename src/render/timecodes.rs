//! Playback window construction for the timecode track.

use super::RenderOptions;
use crate::error::{RecapError, Result};
use crate::timing::ms_to_frame_timecode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A span of the output video, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl TimeWindow {
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        Self { start_ms, end_ms }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Format as a `start,end` frame timecode line (without newline).
    pub fn to_timecode_line(&self, frame_rate: u32) -> String {
        format!(
            "{},{}",
            ms_to_frame_timecode(self.start_ms, frame_rate),
            ms_to_frame_timecode(self.end_ms, frame_rate)
        )
    }
}

/// Build the full window sequence: intro, one window per included summary
/// sentence, then credits.
///
/// Each sentence window ends at its anchor's end time and lasts exactly its
/// narration duration. When that would start before the previous window has
/// ended, the window is carried forward by the overlap, so adjacent windows
/// never overlap.
pub fn build_windows(
    anchors: &[usize],
    original_end_times: &[u64],
    durations_ms: &[u64],
    intro_ms: u64,
    options: &RenderOptions,
) -> Result<Vec<TimeWindow>> {
    if durations_ms.len() < anchors.len() {
        return Err(RecapError::InvalidInput(format!(
            "{} aligned sentences but only {} narration durations",
            anchors.len(),
            durations_ms.len()
        )));
    }

    let mut windows = Vec::with_capacity(anchors.len() + 2);
    windows.push(TimeWindow::new(0, intro_ms));
    let mut prev_end = to_signed(intro_ms, "intro")?;

    for (i, (&anchor, &duration)) in anchors.iter().zip(durations_ms).enumerate() {
        if !options.includes(i) {
            continue;
        }

        let anchor_end = original_end_times.get(anchor).ok_or_else(|| {
            RecapError::InvalidInput(format!(
                "Anchor {} of summary sentence {} is out of range ({} original sentences)",
                anchor,
                i,
                original_end_times.len()
            ))
        })?;
        let anchor_end = to_signed(*anchor_end, "anchor end time")?;
        let duration = to_signed(duration, "narration duration")?;

        let start = anchor_end - duration;
        let shifted_start = start.max(prev_end);
        let overflow =
            || RecapError::InvalidInput(format!("Window of summary sentence {} overflows", i));
        let carry = shifted_start.checked_sub(start).ok_or_else(overflow)?;
        if carry > 0 {
            debug!(sentence = i, carry_ms = carry, "Shifting window to avoid overlap");
        }

        let end = anchor_end.checked_add(carry).ok_or_else(overflow)?;
        // shifted_start >= prev_end >= 0
        let window = TimeWindow::new(shifted_start as u64, end as u64);
        prev_end = end;
        windows.push(window);
    }

    let last_end = prev_end as u64;
    let credits_end = last_end.checked_add(options.credits_ms).ok_or_else(|| {
        RecapError::InvalidInput(format!(
            "Credits window of {}ms after {}ms overflows",
            options.credits_ms, last_end
        ))
    })?;
    windows.push(TimeWindow::new(last_end, credits_end));

    Ok(windows)
}

fn to_signed(ms: u64, what: &str) -> Result<i64> {
    i64::try_from(ms)
        .map_err(|_| RecapError::InvalidInput(format!("{} of {}ms is out of range", what, ms)))
}

/// Serialize windows as newline-terminated `HH:MM:SS:FF,HH:MM:SS:FF` lines.
pub fn format_timecode_track(windows: &[TimeWindow], frame_rate: u32) -> String {
    let mut output = String::new();

    for window in windows {
        output.push_str(&window.to_timecode_line(frame_rate));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence_window() {
        let options = RenderOptions::default();
        let windows = build_windows(&[1], &[2000, 5000], &[500], 0, &options).unwrap();

        assert_eq!(
            windows,
            vec![
                TimeWindow::new(0, 0),
                TimeWindow::new(4500, 5000),
                TimeWindow::new(5000, 8500),
            ]
        );
        assert_eq!(windows[1].to_timecode_line(24), "00:00:04:12,00:00:05:00");
    }

    #[test]
    fn test_overlap_is_carried_forward() {
        let options = RenderOptions::default();
        let windows = build_windows(&[0, 1], &[2000, 2000], &[800, 800], 0, &options).unwrap();

        assert_eq!(windows[1], TimeWindow::new(1200, 2000));
        assert_eq!(windows[2], TimeWindow::new(2000, 2800));
        assert_eq!(windows[3], TimeWindow::new(2800, 6300));
    }

    #[test]
    fn test_intro_pushes_first_window() {
        let options = RenderOptions::default();
        let windows = build_windows(&[0], &[1000], &[600], 2500, &options).unwrap();

        assert_eq!(windows[0], TimeWindow::new(0, 2500));
        assert_eq!(windows[1], TimeWindow::new(2500, 3100));
    }

    #[test]
    fn test_duration_longer_than_anchor() {
        let options = RenderOptions::default();
        let windows = build_windows(&[0], &[300], &[1000], 0, &options).unwrap();

        assert_eq!(windows[1], TimeWindow::new(0, 1000));
    }

    #[test]
    fn test_windows_never_overlap_and_keep_durations() {
        let options = RenderOptions::default();
        let anchors = [0, 1, 2, 3, 4];
        let end_times = [1000, 1500, 1600, 9000, 9100];
        let durations = [2000, 700, 900, 100, 3000];
        let windows = build_windows(&anchors, &end_times, &durations, 400, &options).unwrap();

        assert_eq!(windows.len(), anchors.len() + 2);
        for pair in windows.windows(2) {
            assert!(pair[1].start_ms >= pair[0].end_ms);
        }
        for (window, duration) in windows[1..=anchors.len()].iter().zip(durations) {
            assert_eq!(window.duration_ms(), duration);
        }
    }

    #[test]
    fn test_ignored_sentences_are_skipped() {
        let options = RenderOptions::default().with_ignored([1]);
        let windows = build_windows(&[0, 1, 2], &[1000, 2000, 3000], &[500, 500, 500], 0, &options).unwrap();

        assert_eq!(
            windows,
            vec![
                TimeWindow::new(0, 0),
                TimeWindow::new(500, 1000),
                TimeWindow::new(2500, 3000),
                TimeWindow::new(3000, 6500),
            ]
        );
    }

    #[test]
    fn test_all_ignored_credits_follow_intro() {
        let options = RenderOptions::default().with_ignored([0]);
        let windows = build_windows(&[0], &[1000], &[500], 1200, &options).unwrap();

        assert_eq!(windows, vec![TimeWindow::new(0, 1200), TimeWindow::new(1200, 4700)]);
    }

    #[test]
    fn test_invalid_inputs() {
        let options = RenderOptions::default();
        assert!(matches!(
            build_windows(&[0, 1], &[1000, 2000], &[500], 0, &options),
            Err(RecapError::InvalidInput(_))
        ));
        assert!(matches!(
            build_windows(&[3], &[1000], &[500], 0, &options),
            Err(RecapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_oversized_durations_are_rejected() {
        let options = RenderOptions::default();
        assert!(matches!(
            build_windows(&[0], &[2000], &[u64::MAX - 1], 0, &options),
            Err(RecapError::InvalidInput(_))
        ));

        let huge = i64::MAX as u64;
        assert!(matches!(
            build_windows(&[0, 1], &[huge, 1000], &[1, huge], 0, &options),
            Err(RecapError::InvalidInput(_))
        ));

        let credits = RenderOptions {
            credits_ms: u64::MAX,
            ..RenderOptions::default()
        };
        assert!(matches!(
            build_windows(&[0], &[2000], &[500], 0, &credits),
            Err(RecapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_format_timecode_track() {
        let windows = vec![TimeWindow::new(0, 1500), TimeWindow::new(1500, 3_600_000)];
        assert_eq!(
            format_timecode_track(&windows, 24),
            "00:00:00:00,00:00:01:12\n00:00:01:12,01:00:00:00\n"
        );
    }
}
