//! Cosine-similarity semantic search over an embedding matrix.

use std::num::NonZeroUsize;

use ndarray::{ArrayView1, ArrayView2, Axis};
use serde::Serialize;

use crate::config::DEFAULT_TOP_K;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchParams {
    /// Maximum number of hits returned.
    pub top_k: NonZeroUsize,
    /// Hits scoring below this are dropped.
    pub min_score: Option<f32>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            top_k: NonZeroUsize::new(DEFAULT_TOP_K).unwrap_or(NonZeroUsize::MIN),
            min_score: None,
        }
    }
}

/// A corpus row and its similarity to the query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hit {
    pub corpus_id: usize,
    pub score: f32,
}

/// Cosine similarity between `query` and every row of `corpus`.
///
/// Rows (or a query) with zero norm score 0.
pub fn cosine_scores(query: ArrayView1<'_, f32>, corpus: ArrayView2<'_, f32>) -> Vec<f32> {
    let query_norm = query.dot(&query).sqrt();
    let dots = corpus.dot(&query);
    let norms = corpus.map_axis(Axis(1), |row| row.dot(&row).sqrt());
    dots.iter()
        .zip(norms.iter())
        .map(|(dot, norm)| {
            let denom = query_norm * norm;
            if denom == 0.0 {
                0.0
            } else {
                dot / denom
            }
        })
        .collect()
}

/// Rank corpus rows by descending cosine similarity to `query`.
///
/// Equal scores keep ascending corpus order.
pub fn semantic_search(
    query: ArrayView1<'_, f32>,
    corpus: ArrayView2<'_, f32>,
    params: &SearchParams,
) -> Vec<Hit> {
    let mut hits: Vec<Hit> = cosine_scores(query, corpus)
        .into_iter()
        .enumerate()
        .map(|(corpus_id, score)| Hit { corpus_id, score })
        .filter(|hit| params.min_score.map_or(true, |min| hit.score >= min))
        .collect();
    hits.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.corpus_id.cmp(&b.corpus_id))
    });
    hits.truncate(params.top_k.get());
    hits
}
