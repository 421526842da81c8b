//! Corpus ingestion and embedding matrix persistence layer.

pub mod corpus;
pub mod store;
