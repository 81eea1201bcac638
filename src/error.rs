//! Error types for Recap.

use thiserror::Error;

/// Which side of an alignment an embedding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingSet {
    /// Sentences of the narrated summary.
    Summary,
    /// Sentences of the original transcript.
    Original,
}

impl std::fmt::Display for EmbeddingSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingSet::Summary => write!(f, "summary"),
            EmbeddingSet::Original => write!(f, "original"),
        }
    }
}

/// Library-level error type for Recap operations.
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Degenerate embedding: {set} sentence {index} has a zero-norm vector")]
    DegenerateEmbedding { set: EmbeddingSet, index: usize },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Recap operations.
pub type Result<T> = std::result::Result<T, RecapError>;
