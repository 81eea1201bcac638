//! Intro offset from a speech-to-text result.

use crate::error::{RecapError, Result};
use serde_json::Value;

/// Milliseconds before the first spoken item of a transcription result.
///
/// Reads `results.items[0].start_time`, given in seconds either as a string
/// (`"0.47"`) or a number.
pub fn intro_from_transcription(result: &Value) -> Result<u64> {
    let start_time = result
        .pointer("/results/items/0/start_time")
        .ok_or_else(|| {
            RecapError::Parse("Transcription result has no timed items".to_string())
        })?;

    let seconds = match start_time {
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            RecapError::Parse(format!("Invalid start_time in transcription result: '{}'", s))
        })?,
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            RecapError::Parse(format!("Invalid start_time in transcription result: {}", n))
        })?,
        other => {
            return Err(RecapError::Parse(format!(
                "Invalid start_time in transcription result: {}",
                other
            )))
        }
    };

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(RecapError::Parse(format!(
            "Negative or non-finite start_time in transcription result: {}",
            seconds
        )));
    }

    Ok((seconds * 1000.0).round() as u64)
}

/// Parse a transcription result document and read its intro offset.
pub fn intro_from_transcription_json(content: &str) -> Result<u64> {
    let value: Value = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;
    intro_from_transcription(&value)
}
