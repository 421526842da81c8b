//! CLI entry-point for semantic queries against a corpus.

use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli::{emit, existing_path, OutputFormat},
    config::Settings,
    data::{corpus::Corpus, store::EmbeddingMatrix},
    nlp::{self, embeddings::FastEmbedder, search::SearchParams},
    report::QueryReport,
};

/// Args for the `query` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Corpus file the embeddings were generated from.
    #[arg(value_parser = existing_path)]
    pub input: PathBuf,
    /// Embedding matrix written by `generate`.
    #[arg(value_parser = existing_path)]
    pub embeddings: PathBuf,
    /// Query words, joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
    /// Maximum number of matches (default 10).
    #[arg(long)]
    pub top_k: Option<NonZeroUsize>,
    /// Drop matches scoring below this cosine similarity.
    #[arg(long)]
    pub min_score: Option<f32>,
    /// Report rendering.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl Args {
    fn search_params(&self, settings: &Settings) -> SearchParams {
        let defaults = SearchParams::default();
        SearchParams {
            top_k: self
                .top_k
                .or_else(|| NonZeroUsize::new(settings.top_k))
                .unwrap_or(defaults.top_k),
            min_score: self.min_score.or(settings.min_score),
        }
    }
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let query = args.query.join(" ");
    let corpus = Corpus::load(&args.input)?;
    let matrix = EmbeddingMatrix::load(&args.embeddings)
        .with_context(|| format!("load embeddings {}", args.embeddings.display()))?;

    let mut embedder = FastEmbedder::from_settings(&settings)
        .with_context(|| format!("load embedding model {}", settings.model))?;
    let params = args.search_params(&settings);
    let outcome = nlp::query_corpus(&mut embedder, &corpus, &matrix, &query, &params)
        .with_context(|| format!("query {} for '{query}'", args.embeddings.display()))?;

    let report = QueryReport {
        embeddings: args.embeddings,
        query,
        elapsed: outcome.elapsed,
        matches: outcome.matches,
    };
    emit(&report, args.format)
}
