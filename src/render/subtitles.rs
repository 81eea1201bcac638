//! Subtitle track formatting for the narrated summary.

use super::RenderOptions;
use crate::error::{RecapError, Result};
use crate::timing::ms_to_subtitle_timestamp;

/// Greedily wrap text into lines of at most `max_line_length` characters.
///
/// Words are never split; a word longer than the limit gets a line of its own.
pub fn wrap_text(text: &str, max_line_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > max_line_length {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Format the summary as SRT.
///
/// Cues run back to back from `intro_ms`, each lasting its narration
/// duration. Cue numbers are the 1-based summary index, so skipped sentences
/// leave gaps in the numbering.
pub fn format_subtitle_track(
    sentences: &[String],
    durations_ms: &[u64],
    intro_ms: u64,
    options: &RenderOptions,
) -> Result<String> {
    if durations_ms.len() < sentences.len() {
        return Err(RecapError::InvalidInput(format!(
            "{} summary sentences but only {} narration durations",
            sentences.len(),
            durations_ms.len()
        )));
    }

    let mut output = String::new();
    let mut start = intro_ms;

    for (i, (sentence, &duration)) in sentences.iter().zip(durations_ms).enumerate() {
        if !options.includes(i) {
            continue;
        }

        let end = start.checked_add(duration).ok_or_else(|| {
            RecapError::InvalidInput(format!(
                "Cue of summary sentence {} ({}ms after {}ms) overflows",
                i, duration, start
            ))
        })?;

        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            ms_to_subtitle_timestamp(start),
            ms_to_subtitle_timestamp(end)
        ));
        for line in wrap_text(sentence, options.max_line_length) {
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');

        start = end;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap_text("Hello world.", 90), vec!["Hello world."]);
        assert!(wrap_text("   ", 90).is_empty());
    }

    #[test]
    fn test_wrap_exact_limit() {
        assert_eq!(wrap_text("aaaa bbbb", 9), vec!["aaaa bbbb"]);
        assert_eq!(wrap_text("aaaa bbbbb", 9), vec!["aaaa", "bbbbb"]);
    }

    #[test]
    fn test_wrap_long_sentence() {
        let words: Vec<String> = (0..40).map(|i| format!("word{}", i)).collect();
        let text = words.join(" ");
        assert!(text.len() >= 200);

        let lines = wrap_text(&text, 90);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 90, "line too long: {:?}", line);
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_wrap_oversized_word() {
        let long = "x".repeat(12);
        assert_eq!(wrap_text(&format!("{} end", long), 10), vec![long, "end".to_string()]);
    }

    #[test]
    fn test_format_subtitle_track() {
        let sentences = vec!["First point.".to_string(), "Second point.".to_string()];
        let srt = format_subtitle_track(&sentences, &[1500, 2000], 1000, &RenderOptions::default()).unwrap();

        assert_eq!(
            srt,
            "1\n00:00:01,000 --> 00:00:02,500\nFirst point.\n\n\
             2\n00:00:02,500 --> 00:00:04,500\nSecond point.\n\n"
        );
    }

    #[test]
    fn test_skipped_sentences_keep_numbering() {
        let sentences = vec!["A.".to_string(), "B.".to_string(), "C.".to_string()];
        let options = RenderOptions::default().with_ignored([1]);
        let srt = format_subtitle_track(&sentences, &[100, 200, 300], 0, &options).unwrap();

        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:00,100\nA.\n\n\
             3\n00:00:00,100 --> 00:00:00,400\nC.\n\n"
        );
    }

    #[test]
    fn test_oversized_duration_is_rejected() {
        let sentences = vec!["A.".to_string()];
        assert!(matches!(
            format_subtitle_track(&sentences, &[u64::MAX], 10, &RenderOptions::default()),
            Err(RecapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_wrapped_cue() {
        let sentence = "one two three four".to_string();
        let options = RenderOptions {
            max_line_length: 9,
            ..RenderOptions::default()
        };
        let srt = format_subtitle_track(&[sentence], &[1000], 0, &options).unwrap();

        assert_eq!(srt, "1\n00:00:00,000 --> 00:00:01,000\none two\nthree\nfour\n\n");
    }

    #[test]
    fn test_missing_durations() {
        let sentences = vec!["A.".to_string(), "B.".to_string()];
        assert!(matches!(
            format_subtitle_track(&sentences, &[100], 0, &RenderOptions::default()),
            Err(RecapError::InvalidInput(_))
        ));
    }
}
