//! CLI entry-point for checking that a model can be fetched and loaded.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, nlp::embeddings::FastEmbedder};

/// Args for the `test` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Model identifier, e.g. all-mpnet-base-v2 or Xenova/all-mpnet-base-v2.
    #[arg(value_name = "MODEL")]
    pub identifier: String,
}

#[instrument(skip(settings))]
pub fn run(args: Args, settings: Settings) -> Result<()> {
    let embedder = FastEmbedder::load(&args.identifier, &settings)
        .with_context(|| format!("load embedding model {}", args.identifier))?;
    drop(embedder);
    info!(model = %args.identifier, "model loaded");
    Ok(())
}
