//! Lookup-table embedder backed by vectors computed ahead of time.
//!
//! Useful for offline runs and tests. The table is a JSON object mapping
//! sentence text to its vector; lookups ignore differences in whitespace.

use super::Embedder;
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Embedder that serves vectors from an in-memory table.
pub struct PrecomputedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimensions: usize,
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl PrecomputedEmbedder {
    /// Build from a text-to-vector map. All vectors must have the same length.
    pub fn new(vectors: HashMap<String, Vec<f32>>) -> Result<Self> {
        let dimensions = vectors.values().next().map(|v| v.len()).unwrap_or(0);
        if let Some((text, v)) = vectors.iter().find(|(_, v)| v.len() != dimensions) {
            return Err(RecapError::InvalidInput(format!(
                "Embedding for '{}' has {} dimensions, expected {}",
                text,
                v.len(),
                dimensions
            )));
        }

        let vectors = vectors
            .into_iter()
            .map(|(text, v)| (normalize(&text), v))
            .collect();

        Ok(Self {
            vectors,
            dimensions,
        })
    }

    /// Load a JSON object of `{"sentence": [f32, ...]}` from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let vectors: HashMap<String, Vec<f32>> = serde_json::from_str(&content)?;
        debug!("Loaded {} precomputed embeddings from {:?}", vectors.len(), path);
        Self::new(vectors)
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[async_trait]
impl Embedder for PrecomputedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.vectors
            .get(&normalize(text))
            .cloned()
            .ok_or_else(|| RecapError::Embedding(format!("No precomputed embedding for '{}'", text.trim())))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table() -> HashMap<String, Vec<f32>> {
        HashMap::from([
            ("Rivers shape valleys.".to_string(), vec![1.0, 0.0]),
            ("They  carry sediment.".to_string(), vec![0.0, 1.0]),
        ])
    }

    #[tokio::test]
    async fn test_lookup_ignores_whitespace() {
        let embedder = PrecomputedEmbedder::new(table()).unwrap();

        assert_eq!(embedder.dimensions(), 2);
        assert_eq!(embedder.embed(" They carry\nsediment. ").await.unwrap(), vec![0.0, 1.0]);

        let batch = embedder
            .embed_batch(&["Rivers shape valleys.".to_string(), "They carry sediment.".to_string()])
            .await
            .unwrap();
        assert_eq!(batch, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_unknown_text() {
        let embedder = PrecomputedEmbedder::new(table()).unwrap();
        assert!(matches!(
            embedder.embed("Unknown.").await,
            Err(RecapError::Embedding(_))
        ));
    }

    #[test]
    fn test_mismatched_dimensions() {
        let mut vectors = table();
        vectors.insert("Odd.".to_string(), vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            PrecomputedEmbedder::new(vectors),
            Err(RecapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"A.": [0.5, 0.5, 0.0], "B.": [0.0, 0.1, 0.9]}}"#).unwrap();

        let embedder = PrecomputedEmbedder::from_file(file.path()).unwrap();
        assert_eq!(embedder.len(), 2);
        assert_eq!(embedder.dimensions(), 3);
    }
}
