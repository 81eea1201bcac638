//! Timecode command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::timing::{ms_to_frame_timecode, ms_to_subtitle_timestamp};
use anyhow::Result;

/// Run the timecode command.
pub fn run_timecode(ms: u64, frame_rate: Option<u32>, settings: &Settings) -> Result<()> {
    let frame_rate = frame_rate.unwrap_or(settings.render.frame_rate);
    if frame_rate == 0 {
        return Err(anyhow::anyhow!("Frame rate must be greater than zero"));
    }

    Output::kv(&format!("timecode @ {}fps", frame_rate), &ms_to_frame_timecode(ms, frame_rate));
    Output::kv("subtitle", &ms_to_subtitle_timestamp(ms));

    Ok(())
}
