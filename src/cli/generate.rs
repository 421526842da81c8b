//! CLI entry-point for embedding a corpus file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli::{emit, existing_path, OutputFormat},
    config::Settings,
    nlp::{self, embeddings::FastEmbedder},
};

/// Args for the `generate` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Corpus file, one sentence per line.
    #[arg(value_parser = existing_path)]
    pub input: PathBuf,
    /// Report rendering.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let mut embedder = FastEmbedder::from_settings(&settings)
        .with_context(|| format!("load embedding model {}", settings.model))?;
    let report = nlp::generate_embeddings(&mut embedder, &args.input)
        .with_context(|| format!("generate embeddings for {}", args.input.display()))?;
    emit(&report, args.format)
}
