//! Command-line interface wiring for corpus-embed.

use std::{fmt::Display, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::Settings;

pub mod clusters;
pub mod generate;
pub mod query;
pub mod smoke;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Embed, cluster and semantically query line-oriented text corpora",
    long_about = None
)]
pub struct Cli {
    /// Embedding model identifier; overrides EMBED_MODEL.
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub fn dispatch(self, mut settings: Settings) -> Result<()> {
        if let Some(model) = self.model {
            settings.model = model;
        }
        match self.command {
            Commands::Generate(args) => generate::run(args, settings),
            Commands::Clusters(args) => clusters::run(args, settings),
            Commands::Query(args) => query::run(args, settings),
            Commands::Test(args) => smoke::run(args, settings),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Embed every line of INPUT and save the matrix next to it.
    Generate(generate::Args),
    /// Group the sentences of INPUT by agglomerative clustering of their embeddings.
    Clusters(clusters::Args),
    /// Rank the sentences of INPUT by semantic similarity to QUERY.
    Query(query::Args),
    /// Load MODEL to check that it can be fetched.
    Test(smoke::Args),
}

/// Rendering of command reports on stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Print a finished report in the requested format.
pub(crate) fn emit<R: Display + Serialize>(report: &R, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

/// Accept only paths that already exist.
pub(crate) fn existing_path(value: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path `{value}` does not exist"))
    }
}
