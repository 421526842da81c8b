//! Embed, cluster and semantically query line-oriented text corpora.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod report;
