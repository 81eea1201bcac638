//! Semantic alignment of summary sentences to original transcript sentences.
//!
//! Alignment runs in two steps:
//! 1. Build a cosine-similarity matrix between the summary embeddings (rows)
//!    and the original embeddings (columns).
//! 2. Find the highest-scoring order-preserving assignment of rows to columns
//!    with dynamic programming and a bounded backtrack.

mod dp;
mod similarity;

pub use dp::{align, score_table, Alignment, UNREACHABLE};
pub use similarity::{cosine_similarity, cosine_similarity_matrix, SimilarityMatrix};
