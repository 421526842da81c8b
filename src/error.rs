//! Typed errors raised by the corpus, model, clustering and storage layers.

use std::{io, path::PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("failed to read corpus {}: {source}", path.display())]
    Corpus {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown embedding model `{0}`")]
    UnknownModel(String),

    #[error("failed to load embedding model `{model}`: {message}")]
    ModelLoad { model: String, message: String },

    #[error("embedding with `{model}` failed: {message}")]
    Encode { model: String, message: String },

    #[error("embedding matrix I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("malformed embedding matrix {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("corpus has {corpus} lines but the embedding matrix has {embeddings} rows")]
    Misaligned { corpus: usize, embeddings: usize },

    #[error("query vector has dimension {query} but the embedding matrix has dimension {matrix}")]
    DimensionMismatch { query: usize, matrix: usize },
}

pub type Result<T> = std::result::Result<T, EmbedError>;
