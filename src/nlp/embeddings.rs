//! Sentence embedding built on fastembed.

use std::time::Instant;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use ndarray::{Array1, Array2};
use tracing::{debug, info};

use crate::{
    config::Settings,
    error::{EmbedError, Result},
};

/// Maps sentences to fixed-dimension vectors.
pub trait Embedder {
    /// Identifier recorded alongside generated matrices.
    fn model_id(&self) -> &str;

    /// Length of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed all `texts` in order, one row per text.
    fn embed_batch(&mut self, texts: &[String]) -> Result<Array2<f32>>;

    fn embed_query(&mut self, text: &str) -> Result<Array1<f32>> {
        let matrix = self.embed_batch(&[text.to_string()])?;
        if matrix.nrows() != 1 {
            return Err(EmbedError::Encode {
                model: self.model_id().to_string(),
                message: format!("expected one query vector, got {}", matrix.nrows()),
            });
        }
        Ok(matrix.row(0).to_owned())
    }
}

/// Catalogue entry a model identifier resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    pub model: EmbeddingModel,
    pub code: String,
    pub dimension: usize,
}

/// Look `identifier` up in the fastembed catalogue.
///
/// Matches, case-insensitively and in this order of preference: the full model
/// code (`Xenova/all-mpnet-base-v2`), its last path segment
/// (`all-mpnet-base-v2`), then the catalogue variant name (`AllMpnetBaseV2`).
pub fn resolve_model(identifier: &str) -> Result<ResolvedModel> {
    let wanted = identifier.trim().to_ascii_lowercase();
    let catalogue = TextEmbedding::list_supported_models();

    let by_code = |code: &str| code.to_ascii_lowercase() == wanted;
    let by_name = |code: &str| {
        code.rsplit('/')
            .next()
            .is_some_and(|name| name.to_ascii_lowercase() == wanted)
    };

    catalogue
        .iter()
        .find(|info| by_code(&info.model_code))
        .or_else(|| catalogue.iter().find(|info| by_name(&info.model_code)))
        .or_else(|| {
            catalogue
                .iter()
                .find(|info| format!("{:?}", info.model).to_ascii_lowercase() == wanted)
        })
        .map(|info| ResolvedModel {
            model: info.model.clone(),
            code: info.model_code.clone(),
            dimension: info.dim,
        })
        .ok_or_else(|| EmbedError::UnknownModel(identifier.to_string()))
}

/// ONNX sentence embedder backed by a fastembed catalogue model.
pub struct FastEmbedder {
    model_id: String,
    dimension: usize,
    batch_size: Option<usize>,
    inner: TextEmbedding,
}

impl FastEmbedder {
    /// Resolve and load `model_id`, downloading weights into the cache if needed.
    pub fn load(model_id: &str, settings: &Settings) -> Result<Self> {
        let resolved = resolve_model(model_id)?;
        let mut options = InitOptions::new(resolved.model.clone())
            .with_show_download_progress(settings.show_download_progress);
        if let Some(cache_dir) = &settings.cache_dir {
            options = options.with_cache_dir(cache_dir.clone());
        }

        let started = Instant::now();
        let inner = TextEmbedding::try_new(options).map_err(|err| EmbedError::ModelLoad {
            model: model_id.to_string(),
            message: format!("{err:#}"),
        })?;
        info!(
            model = model_id,
            code = %resolved.code,
            dimension = resolved.dimension,
            elapsed = ?started.elapsed(),
            "loaded embedding model"
        );

        Ok(Self {
            model_id: model_id.to_string(),
            dimension: resolved.dimension,
            batch_size: settings.batch_size,
            inner,
        })
    }

    /// Load the model configured in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::load(&settings.model, settings)
    }
}

impl Embedder for FastEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&mut self, texts: &[String]) -> Result<Array2<f32>> {
        if texts.is_empty() {
            return Ok(Array2::zeros((0, self.dimension)));
        }
        let rows = self
            .inner
            .embed(texts.to_vec(), self.batch_size)
            .map_err(|err| EmbedError::Encode {
                model: self.model_id.clone(),
                message: format!("{err:#}"),
            })?;
        debug!(model = %self.model_id, rows = rows.len(), "encoded batch");
        stack_rows(&self.model_id, self.dimension, rows)
    }
}

/// Pack per-text vectors into a matrix, rejecting rows of the wrong length.
pub fn stack_rows(model: &str, dimension: usize, rows: Vec<Vec<f32>>) -> Result<Array2<f32>> {
    let count = rows.len();
    let mut values = Vec::with_capacity(count * dimension);
    for (index, row) in rows.into_iter().enumerate() {
        if row.len() != dimension {
            return Err(EmbedError::Encode {
                model: model.to_string(),
                message: format!(
                    "row {index} has dimension {}, expected {dimension}",
                    row.len()
                ),
            });
        }
        values.extend(row);
    }
    Ok(Array2::from_shape_vec((count, dimension), values)?)
}
