//! Millisecond time codecs.
//!
//! Converts between integer milliseconds and the two display formats used by
//! the output tracks: frame-based timecodes (`HH:MM:SS:FF`) for the video
//! editor and subtitle timestamps (`HH:MM:SS,mmm`) for SRT files.
//!
//! Both formatters wrap the hour field at 24.

use crate::error::{RecapError, Result};

/// Default frame rate of the timecode track.
pub const DEFAULT_FRAME_RATE: u32 = 24;

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1000;

fn clock_fields(ms: u64) -> (u64, u64, u64) {
    let hours = (ms / MS_PER_HOUR) % 24;
    let minutes = (ms / MS_PER_MINUTE) % 60;
    let seconds = (ms / MS_PER_SECOND) % 60;
    (hours, minutes, seconds)
}

/// Format milliseconds as a frame timecode (`HH:MM:SS:FF`).
pub fn ms_to_frame_timecode(ms: u64, frame_rate: u32) -> String {
    let (hours, minutes, seconds) = clock_fields(ms);
    let frames = (ms % MS_PER_SECOND) * u64::from(frame_rate) / MS_PER_SECOND;

    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frames)
}

/// Format milliseconds as an SRT timestamp (`HH:MM:SS,mmm`).
pub fn ms_to_subtitle_timestamp(ms: u64) -> String {
    let (hours, minutes, seconds) = clock_fields(ms);

    format!(
        "{:02}:{:02}:{:02},{:03}",
        hours,
        minutes,
        seconds,
        ms % MS_PER_SECOND
    )
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into milliseconds.
///
/// A `.` millisecond separator (WebVTT style) is accepted as well.
pub fn subtitle_timestamp_to_ms(timestamp: &str) -> Result<u64> {
    let malformed = || RecapError::Parse(format!("Malformed subtitle timestamp: '{}'", timestamp));

    let trimmed = timestamp.trim();
    let (clock, millis) = trimmed
        .split_once([',', '.'])
        .ok_or_else(malformed)?;

    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let field = |value: &str, max_len: usize| -> Result<u64> {
        if value.is_empty() || value.len() > max_len || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        value.parse::<u64>().map_err(|_| malformed())
    };

    let hours = field(h, 3)?;
    let minutes = field(m, 2)?;
    let seconds = field(s, 2)?;
    let ms = field(millis, 3)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(malformed());
    }

    Ok(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + ms)
}
