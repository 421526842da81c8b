//! Runtime configuration utilities for corpus-embed.

use std::{env, path::PathBuf, str::FromStr};

use serde::Deserialize;

/// Default sentence-embedding model shared by every command.
pub const DEFAULT_MODEL: &str = "all-mpnet-base-v2";

/// Linkage distance at or above which clusters are no longer merged.
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 1.5;

/// Number of ranked hits returned by a query.
pub const DEFAULT_TOP_K: usize = 10;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Embedding model identifier used by `generate` and `query`.
    pub model: String,
    /// Directory where downloaded model weights are cached.
    pub cache_dir: Option<PathBuf>,
    /// Batch size handed to the embedding model, if overridden.
    pub batch_size: Option<usize>,
    /// Whether model downloads render a progress bar.
    pub show_download_progress: bool,
    /// Agglomerative clustering distance threshold.
    pub cluster_threshold: f64,
    /// Maximum hits returned by a query.
    pub top_k: usize,
    /// Hits scoring below this are dropped.
    pub min_score: Option<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            cache_dir: None,
            batch_size: None,
            show_download_progress: true,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            min_score: None,
        }
    }
}

impl Settings {
    /// Load configuration from `.env` and the environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let model = lookup("EMBED_MODEL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.model);
        let cache_dir = lookup("EMBED_CACHE_DIR").map(PathBuf::from);
        let batch_size = parsed(&lookup, "EMBED_BATCH_SIZE").filter(|size: &usize| *size > 0);
        let show_download_progress =
            parsed(&lookup, "EMBED_SHOW_PROGRESS").unwrap_or(defaults.show_download_progress);
        let cluster_threshold = parsed(&lookup, "CLUSTER_DISTANCE_THRESHOLD")
            .unwrap_or(defaults.cluster_threshold);
        let top_k = parsed(&lookup, "QUERY_TOP_K").unwrap_or(defaults.top_k);
        let min_score = parsed(&lookup, "QUERY_MIN_SCORE");

        Self {
            model,
            cache_dir,
            batch_size,
            show_download_progress,
            cluster_threshold,
            top_k,
            min_score,
        }
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}
