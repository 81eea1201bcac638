//! Pre-flight checks before calling the embedding provider.
//!
//! Validates that the configured provider can be used before any input is
//! read, so a run fails fast instead of after parsing.

use crate::config::EmbeddingSettings;
use crate::error::{RecapError, Result};

/// Run pre-flight checks for the configured embedding provider.
pub fn check(embedding: &EmbeddingSettings) -> Result<()> {
    match embedding.provider.to_lowercase().as_str() {
        "openai" => check_api_key(),
        "precomputed" => check_precomputed(embedding.precomputed_path.as_deref()),
        other => Err(RecapError::Config(format!(
            "Unknown embedding provider: {}. Use openai or precomputed.",
            other
        ))),
    }
}

/// Check if OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(RecapError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(RecapError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}

fn check_precomputed(path: Option<&str>) -> Result<()> {
    let path = path.ok_or_else(|| {
        RecapError::Config("embedding.precomputed_path is not set".to_string())
    })?;
    let expanded = crate::config::Settings::expand_path(path);
    if expanded.is_file() {
        Ok(())
    } else {
        Err(RecapError::Config(format!(
            "Precomputed embeddings not found at {}",
            expanded.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precomputed_requires_existing_file() {
        let mut settings = EmbeddingSettings {
            provider: "precomputed".to_string(),
            ..EmbeddingSettings::default()
        };
        assert!(check(&settings).is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        settings.precomputed_path = Some(file.path().to_string_lossy().to_string());
        assert!(check(&settings).is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        let settings = EmbeddingSettings {
            provider: "bedrock".to_string(),
            ..EmbeddingSettings::default()
        };
        assert!(matches!(check(&settings), Err(RecapError::Config(_))));
    }
}
