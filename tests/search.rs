use std::num::NonZeroUsize;

use corpus_embed::nlp::search::{cosine_scores, semantic_search, Hit, SearchParams};
use ndarray::{array, Array2};

fn top(k: usize) -> SearchParams {
    SearchParams {
        top_k: NonZeroUsize::new(k).unwrap(),
        min_score: None,
    }
}

fn ids(hits: &[Hit]) -> Vec<usize> {
    hits.iter().map(|hit| hit.corpus_id).collect()
}

#[test]
fn hits_rank_by_descending_cosine() {
    let corpus = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [-1.0, 0.0]];
    let query = array![2.0, 0.0];

    let hits = semantic_search(query.view(), corpus.view(), &SearchParams::default());
    assert_eq!(ids(&hits), vec![0, 2, 1, 3]);
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert!((hits[1].score - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn top_k_and_min_score_limit_results() {
    let corpus = array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [-1.0, 0.0]];
    let query = array![1.0, 0.0];

    assert_eq!(ids(&semantic_search(query.view(), corpus.view(), &top(2))), vec![0, 2]);

    let filtered = SearchParams {
        min_score: Some(0.0),
        ..top(10)
    };
    assert_eq!(
        ids(&semantic_search(query.view(), corpus.view(), &filtered)),
        vec![0, 2, 1]
    );
}

#[test]
fn ties_keep_corpus_order() {
    let corpus = array![[0.0, 3.0], [1.0, 0.0], [2.0, 0.0], [1.0, 0.0]];
    let query = array![1.0, 0.0];
    let hits = semantic_search(query.view(), corpus.view(), &top(3));
    assert_eq!(ids(&hits), vec![1, 2, 3]);
}

#[test]
fn zero_vectors_score_zero() {
    let corpus = array![[0.0, 0.0], [1.0, 0.0]];
    assert_eq!(cosine_scores(array![1.0, 0.0].view(), corpus.view()), vec![0.0, 1.0]);
    assert_eq!(cosine_scores(array![0.0, 0.0].view(), corpus.view()), vec![0.0, 0.0]);
}

#[test]
fn empty_corpus_has_no_hits() {
    let corpus = Array2::<f32>::zeros((0, 4));
    let query = array![1.0, 0.0, 0.0, 0.0];
    assert!(semantic_search(query.view(), corpus.view(), &SearchParams::default()).is_empty());
}
