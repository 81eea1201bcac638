//! SSML script for the narration voice.

/// Longest silence a single `<break>` tag may request.
pub const MAX_BREAK_MS: u64 = 10_000;

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the SSML document: `intro_ms` of silence followed by the summary.
///
/// Silence longer than [`MAX_BREAK_MS`] is split across consecutive breaks.
pub fn build_ssml(summary: &str, intro_ms: u64) -> String {
    let mut ssml = String::from("<speak>\n");

    let mut remaining = intro_ms;
    while remaining > MAX_BREAK_MS {
        ssml.push_str(&format!("<break time = \"{}ms\"/>", MAX_BREAK_MS));
        remaining -= MAX_BREAK_MS;
    }
    ssml.push_str(&format!("<break time = \"{}ms\"/>", remaining));

    ssml.push_str(&escape_xml(summary));
    ssml.push_str("</speak>");
    ssml
}
