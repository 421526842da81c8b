//! Parquet persistence for embedding matrices.
//!
//! A matrix is stored as a single `embedding` column of
//! `FixedSizeList<Float32>(dimension)`, one row per corpus line. The schema
//! metadata records the producing model and the row count so a reader can
//! detect a truncated file or a corpus that changed since generation.

use std::{
    collections::HashMap,
    fs::File,
    mem::size_of,
    path::{Path, PathBuf},
    sync::Arc,
};

use arrow::{
    array::{Array, ArrayRef, FixedSizeListArray, Float32Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use ndarray::{Array2, ArrayView2};
use parquet::arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter};
use tracing::{debug, info};

use crate::error::{EmbedError, Result};

/// Extension given to serialized embedding matrices.
pub const EMBEDDINGS_EXTENSION: &str = "parquet";

const EMBEDDING_COLUMN: &str = "embedding";
const MODEL_KEY: &str = "corpus_embed.model";
const ROWS_KEY: &str = "corpus_embed.rows";
const DIMENSION_KEY: &str = "corpus_embed.dimension";

/// Derive the matrix path for a corpus file: same directory, extension replaced.
pub fn embeddings_path_for<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension(EMBEDDINGS_EXTENSION)
}

/// Row-aligned sentence embeddings plus the model that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    model: String,
    vectors: Array2<f32>,
}

impl EmbeddingMatrix {
    pub fn new(model: impl Into<String>, vectors: Array2<f32>) -> Self {
        Self {
            model: model.into(),
            vectors,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dimension(&self) -> usize {
        self.vectors.ncols()
    }

    /// Total size of the vector payload in bytes.
    pub fn byte_size(&self) -> u64 {
        (self.vectors.len() * size_of::<f32>()) as u64
    }

    pub fn vectors(&self) -> ArrayView2<'_, f32> {
        self.vectors.view()
    }

    /// Fail unless there is exactly one row per corpus line.
    pub fn ensure_aligned(&self, corpus_len: usize) -> Result<()> {
        if self.len() != corpus_len {
            return Err(EmbedError::Misaligned {
                corpus: corpus_len,
                embeddings: self.len(),
            });
        }
        Ok(())
    }

    /// Write the matrix to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dimension = i32::try_from(self.dimension()).map_err(|_| EmbedError::Malformed {
            path: path.to_path_buf(),
            reason: format!("dimension {} does not fit a list size", self.dimension()),
        })?;

        let item = Arc::new(Field::new("item", DataType::Float32, false));
        let values = Float32Array::from_iter_values(self.vectors.iter().copied());
        let column = FixedSizeListArray::try_new(item.clone(), dimension, Arc::new(values), None)?;

        let metadata = HashMap::from([
            (MODEL_KEY.to_string(), self.model.clone()),
            (ROWS_KEY.to_string(), self.len().to_string()),
            (DIMENSION_KEY.to_string(), self.dimension().to_string()),
        ]);
        let schema = Arc::new(
            Schema::new(vec![Field::new(
                EMBEDDING_COLUMN,
                DataType::FixedSizeList(item, dimension),
                false,
            )])
            .with_metadata(metadata),
        );
        let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(column) as ArrayRef])?;

        let file = File::create(path).map_err(|source| EmbedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = ArrowWriter::try_new(file, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;

        info!(
            path = %path.display(),
            rows = self.len(),
            dimension = self.dimension(),
            "wrote embedding matrix"
        );
        Ok(())
    }

    /// Read a matrix previously written by [`EmbeddingMatrix::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let malformed = |reason: String| EmbedError::Malformed {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|source| EmbedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let schema = builder.schema().clone();

        let field = schema
            .field_with_name(EMBEDDING_COLUMN)
            .map_err(|_| malformed(format!("missing `{EMBEDDING_COLUMN}` column")))?;
        let dimension = match field.data_type() {
            DataType::FixedSizeList(item, size) if item.data_type() == &DataType::Float32 => {
                usize::try_from(*size).map_err(|_| malformed(format!("negative list size {size}")))?
            }
            other => {
                return Err(malformed(format!(
                    "`{EMBEDDING_COLUMN}` has type {other}, expected a fixed-size float32 list"
                )))
            }
        };

        let metadata = schema.metadata();
        let model = metadata.get(MODEL_KEY).cloned().unwrap_or_default();
        let expected_rows = metadata
            .get(ROWS_KEY)
            .map(|rows| rows.parse::<usize>())
            .transpose()
            .map_err(|err| malformed(format!("invalid row count marker: {err}")))?;

        let mut rows = 0usize;
        let mut values = Vec::new();
        for batch in builder.build()? {
            let batch = batch?;
            let list = batch
                .column_by_name(EMBEDDING_COLUMN)
                .and_then(|column| column.as_any().downcast_ref::<FixedSizeListArray>())
                .ok_or_else(|| malformed("embedding column is not a fixed-size list".into()))?;
            for index in 0..list.len() {
                if list.is_null(index) {
                    return Err(malformed(format!("row {} is null", rows + index)));
                }
                let row = list.value(index);
                let floats = row
                    .as_any()
                    .downcast_ref::<Float32Array>()
                    .ok_or_else(|| malformed("embedding values are not float32".into()))?;
                values.extend_from_slice(floats.values());
            }
            rows += list.len();
        }

        if let Some(expected) = expected_rows {
            if expected != rows {
                return Err(malformed(format!(
                    "row count marker says {expected} rows but file holds {rows}"
                )));
            }
        }

        let vectors = Array2::from_shape_vec((rows, dimension), values)?;
        debug!(path = %path.display(), rows, dimension, %model, "loaded embedding matrix");
        Ok(Self { model, vectors })
    }
}
