//! SSML command implementation.

use crate::cli::Output;
use crate::narration::{build_ssml, intro_from_transcription_json};
use anyhow::{Context, Result};

/// Run the ssml command.
pub fn run_ssml(
    summary: &str,
    intro_ms: Option<u64>,
    transcription_json: Option<&str>,
    output: Option<String>,
) -> Result<()> {
    let text = std::fs::read_to_string(summary)
        .with_context(|| format!("Failed to read summary {}", summary))?;

    let intro_ms = match (intro_ms, transcription_json) {
        (Some(ms), _) => ms,
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read transcription result {}", path))?;
            intro_from_transcription_json(&content)?
        }
        (None, None) => return Err(anyhow::anyhow!("--intro-ms or --transcription-json is required")),
    };

    let ssml = build_ssml(text.trim_start_matches('\u{feff}'), intro_ms);

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &ssml)?;
            Output::success(&format!("Wrote SSML ({}ms intro) to {}", intro_ms, path));
        }
        _ => println!("{}", ssml),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ssml_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.txt");
        std::fs::write(&summary, "Rock & roll.").unwrap();
        let output = dir.path().join("script.ssml");

        run_ssml(
            &summary.to_string_lossy(),
            Some(12_000),
            None,
            Some(output.to_string_lossy().to_string()),
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "<speak>\n<break time = \"10000ms\"/><break time = \"2000ms\"/>Rock &amp; roll.</speak>"
        );
    }
}
