//! Entry point wiring CLI dispatch to the embedding pipeline.

use anyhow::Result;
use corpus_embed::{cli::Cli, config::Settings, logging};
use tracing::{debug, instrument};

#[instrument]
fn main() -> Result<()> {
    logging::init_tracing()?;
    let settings = Settings::load()?;
    let cli = Cli::parse();

    debug!(?cli, ?settings, "starting command");
    cli.dispatch(settings)
}
