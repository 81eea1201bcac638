//! Cosine similarity between embedding sets.

use crate::error::{EmbeddingSet, RecapError, Result};

/// Dense `rows x cols` matrix of similarity scores.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from row vectors. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != cols) {
            return Err(RecapError::InvalidInput(
                "Similarity matrix rows have different lengths".to_string(),
            ));
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows (summary sentences).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (original sentences).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Score at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// All scores of one row.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

/// Cosine similarity between two vectors of equal length.
///
/// Returns `None` when the lengths differ or either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }

    let norm_a = squared_norm(a);
    let norm_b = squared_norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    Some(cosine_with_norms(a, b, norm_a, norm_b))
}

fn squared_norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum()
}

// sqrt(x * x) == x in IEEE arithmetic, so identical vectors score exactly 1.0.
fn cosine_with_norms(a: &[f32], b: &[f32], norm_a: f64, norm_b: f64) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();

    (dot / (norm_a * norm_b).sqrt()).clamp(-1.0, 1.0)
}

fn checked_norms(vectors: &[Vec<f32>], set: EmbeddingSet, dims: usize) -> Result<Vec<f64>> {
    vectors
        .iter()
        .enumerate()
        .map(|(index, v)| {
            if v.len() != dims {
                return Err(RecapError::InvalidInput(format!(
                    "{} embedding {} has {} dimensions, expected {}",
                    set,
                    index,
                    v.len(),
                    dims
                )));
            }
            match squared_norm(v) {
                n if n == 0.0 || !n.is_finite() => {
                    Err(RecapError::DegenerateEmbedding { set, index })
                }
                n => Ok(n),
            }
        })
        .collect()
}

/// Compute `S[i][j] = cos(summary[i], original[j])`.
///
/// Every embedding must be non-degenerate: a zero-norm vector is reported as
/// [`RecapError::DegenerateEmbedding`] instead of being scored.
pub fn cosine_similarity_matrix(
    summary: &[Vec<f32>],
    original: &[Vec<f32>],
) -> Result<SimilarityMatrix> {
    if summary.is_empty() {
        return Err(RecapError::EmptyInput("no summary embeddings".to_string()));
    }
    if original.is_empty() {
        return Err(RecapError::EmptyInput("no original embeddings".to_string()));
    }

    let dims = summary[0].len();
    let summary_norms = checked_norms(summary, EmbeddingSet::Summary, dims)?;
    let original_norms = checked_norms(original, EmbeddingSet::Original, dims)?;

    let mut data = Vec::with_capacity(summary.len() * original.len());
    for (a, &norm_a) in summary.iter().zip(&summary_norms) {
        for (b, &norm_b) in original.iter().zip(&original_norms) {
            data.push(cosine_with_norms(a, b, norm_a, norm_b));
        }
    }

    Ok(SimilarityMatrix {
        rows: summary.len(),
        cols: original.len(),
        data,
    })
}
