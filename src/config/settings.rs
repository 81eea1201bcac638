//! Configuration settings for Recap.

use crate::render::{RenderOptions, DEFAULT_CREDITS_MS, DEFAULT_MAX_LINE_LENGTH};
use crate::timing::DEFAULT_FRAME_RATE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub embedding: EmbeddingSettings,
    pub render: RenderSettings,
}

/// General application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where rendered tracks are written.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Embedding provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (openai, precomputed).
    pub provider: String,
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
    /// JSON table of precomputed vectors (for the precomputed provider).
    pub precomputed_path: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            precomputed_path: None,
        }
    }
}

/// Timecode and subtitle rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Frames per second of the timecode track.
    pub frame_rate: u32,
    /// Length of the credits window in milliseconds.
    pub credits_ms: u64,
    /// Maximum characters per subtitle line.
    pub max_line_length: usize,
    /// Summary sentence indices to leave out of both tracks.
    pub ignored_indices: Vec<usize>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            credits_ms: DEFAULT_CREDITS_MS,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            ignored_indices: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject values the renderers cannot work with.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.render.frame_rate == 0 {
            return Err(crate::error::RecapError::Config(
                "render.frame_rate must be greater than zero".to_string(),
            ));
        }
        if self.render.max_line_length == 0 {
            return Err(crate::error::RecapError::Config(
                "render.max_line_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::RecapError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recap")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Renderer options derived from the `[render]` section.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            frame_rate: self.render.frame_rate,
            credits_ms: self.render.credits_ms,
            max_line_length: self.render.max_line_length,
            ignored_indices: self.render.ignored_indices.iter().copied().collect(),
        }
    }
}
