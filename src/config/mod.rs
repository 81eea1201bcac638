//! Configuration module for Recap.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{EmbeddingSettings, GeneralSettings, RenderSettings, Settings};
