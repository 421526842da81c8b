//! CLI entry-point for clustering a corpus by its embeddings.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli::{emit, existing_path, OutputFormat},
    config::Settings,
    data::{corpus::Corpus, store::EmbeddingMatrix},
    nlp::{
        self,
        cluster::{ClusterParams, Linkage},
    },
    report::ClusterReport,
};

/// Args for the `clusters` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Corpus file the embeddings were generated from.
    #[arg(value_parser = existing_path)]
    pub input: PathBuf,
    /// Embedding matrix written by `generate`.
    #[arg(value_parser = existing_path)]
    pub embeddings: PathBuf,
    /// Linkage distance at or above which clusters stay apart (default 1.5).
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Linkage criterion.
    #[arg(long, value_enum, default_value_t)]
    pub linkage: Linkage,
    /// Report rendering.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let corpus = Corpus::load(&args.input)?;
    let matrix = EmbeddingMatrix::load(&args.embeddings)
        .with_context(|| format!("load embeddings {}", args.embeddings.display()))?;

    let params = ClusterParams {
        threshold: args.threshold.unwrap_or(settings.cluster_threshold),
        linkage: args.linkage,
    };
    let clusters = nlp::cluster_corpus(&corpus, &matrix, &params).with_context(|| {
        format!(
            "cluster {} with {}",
            args.input.display(),
            args.embeddings.display()
        )
    })?;

    let report = ClusterReport {
        input: args.input,
        threshold: params.threshold,
        linkage: params.linkage,
        clusters,
    };
    emit(&report, args.format)
}
