//! Embedding, clustering and query orchestration layer.

pub mod cluster;
pub mod embeddings;
pub mod search;

use std::{
    path::Path,
    time::{Duration, Instant},
};

use tracing::{info, warn};

use crate::{
    data::{
        corpus::Corpus,
        store::{embeddings_path_for, EmbeddingMatrix},
    },
    error::{EmbedError, Result},
    report::{GenerateReport, QueryMatch},
};

use self::{cluster::ClusterParams, embeddings::Embedder, search::SearchParams};

/// Embed every line of `input` and write the matrix next to it.
pub fn generate_embeddings<E>(embedder: &mut E, input: &Path) -> Result<GenerateReport>
where
    E: Embedder + ?Sized,
{
    let output = embeddings_path_for(input);
    let corpus = Corpus::load(input)?;

    let started = Instant::now();
    let vectors = embedder.embed_batch(corpus.sentences())?;
    let elapsed = started.elapsed();

    let matrix = EmbeddingMatrix::new(embedder.model_id(), vectors);
    matrix.ensure_aligned(corpus.len())?;
    info!(
        sentences = corpus.len(),
        dimension = matrix.dimension(),
        elapsed = ?elapsed,
        "encoded corpus"
    );
    matrix.save(&output)?;

    Ok(GenerateReport {
        input: input.to_path_buf(),
        output,
        model: matrix.model().to_string(),
        sentences: corpus.len(),
        dimension: matrix.dimension(),
        elapsed,
        bytes: matrix.byte_size(),
    })
}

/// Cluster the corpus by its embeddings; each group keeps corpus order.
pub fn cluster_corpus(
    corpus: &Corpus,
    matrix: &EmbeddingMatrix,
    params: &ClusterParams,
) -> Result<Vec<Vec<String>>> {
    matrix.ensure_aligned(corpus.len())?;
    let assignment = cluster::agglomerative(matrix.vectors(), params);
    let groups = cluster::group_by_cluster(&assignment, corpus.sentences());
    info!(
        sentences = corpus.len(),
        clusters = groups.len(),
        threshold = params.threshold,
        linkage = ?params.linkage,
        "clustered corpus"
    );
    Ok(groups)
}

/// Ranked matches for a query plus the time spent searching.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub matches: Vec<QueryMatch>,
    pub elapsed: Duration,
}

/// Embed `query` and rank corpus sentences by similarity to it.
pub fn query_corpus<E>(
    embedder: &mut E,
    corpus: &Corpus,
    matrix: &EmbeddingMatrix,
    query: &str,
    params: &SearchParams,
) -> Result<QueryOutcome>
where
    E: Embedder + ?Sized,
{
    matrix.ensure_aligned(corpus.len())?;
    if !matrix.model().is_empty() && matrix.model() != embedder.model_id() {
        warn!(
            matrix_model = matrix.model(),
            query_model = embedder.model_id(),
            "embedding matrix was produced by a different model"
        );
    }

    let query_vector = embedder.embed_query(query)?;
    if query_vector.len() != matrix.dimension() {
        return Err(EmbedError::DimensionMismatch {
            query: query_vector.len(),
            matrix: matrix.dimension(),
        });
    }

    let started = Instant::now();
    let hits = search::semantic_search(query_vector.view(), matrix.vectors(), params);
    let elapsed = started.elapsed();

    let matches = hits
        .into_iter()
        .filter_map(|hit| {
            corpus.get(hit.corpus_id).map(|sentence| QueryMatch {
                corpus_id: hit.corpus_id,
                score: hit.score,
                sentence: sentence.to_string(),
            })
        })
        .collect::<Vec<_>>();
    info!(%query, matches = matches.len(), elapsed = ?elapsed, "searched corpus");
    Ok(QueryOutcome { matches, elapsed })
}
