//! Line-oriented corpus loading.

use std::{
    ops::Index,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{EmbedError, Result};

/// Ordered, index-stable sentences read from a text file, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Corpus {
    sentences: Vec<String>,
}

impl Corpus {
    /// Read `path` and trim every line. Blank lines are kept as empty strings.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| EmbedError::Corpus {
            path: PathBuf::from(path),
            source,
        })?;
        let corpus = Self::from_text(&String::from_utf8_lossy(&bytes));
        debug!(path = %path.display(), sentences = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    /// Split already-loaded text the same way [`Corpus::load`] does.
    pub fn from_text(text: &str) -> Self {
        let sentences = text.lines().map(|line| line.trim().to_string()).collect();
        Self { sentences }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.sentences.get(index).map(String::as_str)
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(String::as_str)
    }
}

impl Index<usize> for Corpus {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        &self.sentences[index]
    }
}
