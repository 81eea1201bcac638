//! Order-preserving alignment by dynamic programming.
//!
//! `dp[i][j]` is the best cumulative similarity of summary sentences `0..=i`
//! when sentence `i` is anchored at original sentence `j`. Row 0 is the raw
//! similarity. For later rows a cell is only reachable when its own similarity
//! is positive and some strictly earlier column of the previous row holds a
//! positive score; otherwise it holds [`UNREACHABLE`].
//!
//! The anchors are read back from the last row with an exclusive upper bound
//! on the original index, which makes the result strictly increasing.

use super::SimilarityMatrix;
use crate::error::{RecapError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Score of a cell with no positive-scoring predecessor chain.
pub const UNREACHABLE: f64 = -1.0;

/// Result of aligning summary sentences to original sentences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// Anchor index into the original sentences, one per aligned summary sentence.
    pub indices: Vec<usize>,
    /// Summary rows whose candidate anchors were all unreachable.
    ///
    /// The anchor of such a row is the lowest admissible index rather than a
    /// similarity-backed choice.
    pub unreachable_rows: Vec<usize>,
}

impl Alignment {
    /// Number of aligned summary sentences.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Anchor of summary sentence `i`, if it was aligned.
    pub fn anchor(&self, i: usize) -> Option<usize> {
        self.indices.get(i).copied()
    }

    /// Whether every row was backed by a positive similarity chain.
    pub fn is_fully_reachable(&self) -> bool {
        self.unreachable_rows.is_empty()
    }
}

/// Fill the DP score table for a similarity matrix.
///
/// The inner maximum over predecessors `k < j` is carried as a running prefix
/// maximum, giving `O(rows * cols)` work.
pub fn score_table(matrix: &SimilarityMatrix) -> Vec<Vec<f64>> {
    let rows = matrix.rows();
    let cols = matrix.cols();
    let mut table: Vec<Vec<f64>> = Vec::with_capacity(rows);

    if rows == 0 {
        return table;
    }
    table.push(matrix.row(0).to_vec());

    for i in 1..rows {
        let prev = &table[i - 1];
        let mut row = vec![UNREACHABLE; cols];
        // Best positive score in prev[0..j]
        let mut best_prev: Option<f64> = None;

        for j in 0..cols {
            let similarity = matrix.get(i, j);
            if similarity > 0.0 {
                if let Some(best) = best_prev {
                    row[j] = similarity + best;
                }
            }
            if prev[j] > 0.0 {
                best_prev = Some(best_prev.map_or(prev[j], |best| best.max(prev[j])));
            }
        }

        table.push(row);
    }

    table
}

/// First index of the maximum value.
fn first_argmax(values: &[f64]) -> (usize, f64) {
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (idx, &value) in values.iter().enumerate() {
        if value > best {
            best = value;
            best_idx = idx;
        }
    }
    (best_idx, best)
}

/// Read the anchors back from a filled score table.
///
/// Row `i` is searched in `[i, max_original_index)`; the chosen column
/// becomes the exclusive bound for row `i - 1`.
fn backtrack(table: &[Vec<f64>], cols: usize) -> Alignment {
    let len = table.len().min(cols);
    let mut indices = Vec::with_capacity(len);
    let mut unreachable_rows = Vec::new();
    let mut max_original_index = cols;

    for i in (0..len).rev() {
        // Columns below `i` cannot end a strictly increasing chain of i + 1 anchors.
        let lower = i;
        let (offset, best) = first_argmax(&table[i][lower..max_original_index]);
        let idx = lower + offset;

        if i > 0 && best <= UNREACHABLE {
            warn!(
                row = i,
                anchor = idx,
                "No positive similarity chain reaches summary sentence {}; anchoring at lowest admissible index",
                i
            );
            unreachable_rows.push(i);
        }

        indices.push(idx);
        max_original_index = idx;
    }

    indices.reverse();
    unreachable_rows.reverse();

    Alignment {
        indices,
        unreachable_rows,
    }
}

/// Align summary rows to original columns of a similarity matrix.
///
/// Produces `min(rows, cols)` strictly increasing anchors, each in `[0, cols)`.
/// Summary rows beyond the number of original sentences are left unaligned.
pub fn align(matrix: &SimilarityMatrix) -> Result<Alignment> {
    if matrix.rows() == 0 {
        return Err(RecapError::EmptyInput("no summary sentences to align".to_string()));
    }
    if matrix.cols() == 0 {
        return Err(RecapError::EmptyInput("no original sentences to align to".to_string()));
    }

    let table = score_table(matrix);
    let alignment = backtrack(&table, matrix.cols());

    if alignment.len() < matrix.rows() {
        warn!(
            "{} summary sentences but only {} original sentences; {} left unaligned",
            matrix.rows(),
            matrix.cols(),
            matrix.rows() - alignment.len()
        );
    }
    debug!(indices = ?alignment.indices, "Aligned summary sentences");

    Ok(alignment)
}
