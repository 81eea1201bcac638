//! Embedding providers for sentence similarity.
//!
//! The alignment core only consumes vectors; where they come from is behind
//! the [`Embedder`] trait.

mod openai;
mod precomputed;

pub use openai::OpenAIEmbedder;
pub use precomputed::PrecomputedEmbedder;

use crate::config::EmbeddingSettings;
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
///
/// Implementations must be deterministic per text and return non-zero
/// vectors of a fixed length.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Create an embedder from settings.
pub fn create_embedder(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    match settings.provider.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAIEmbedder::with_config(
            &settings.model,
            settings.dimensions as usize,
        )?)),
        "precomputed" => {
            let path = settings.precomputed_path.as_deref().ok_or_else(|| {
                RecapError::Config(
                    "embedding.precomputed_path is required for the precomputed provider".to_string(),
                )
            })?;
            let path = crate::config::Settings::expand_path(path);
            Ok(Arc::new(PrecomputedEmbedder::from_file(&path)?))
        }
        other => Err(RecapError::Config(format!(
            "Unknown embedding provider: {}. Use openai or precomputed.",
            other
        ))),
    }
}
