#![allow(dead_code)]

use corpus_embed::{error::Result, nlp::embeddings::Embedder};
use ndarray::Array2;

/// Deterministic keyword embedder: one axis per topic, scaled so distinct
/// topics sit well beyond the default clustering threshold.
pub struct StubEmbedder {
    pub calls: usize,
}

const TOPICS: [&[&str]; 3] = [
    &["cat", "cats", "feline", "kitten"],
    &["dog", "dogs", "canine", "puppy"],
    &["car", "cars", "vehicle", "truck"],
];
const SCALE: f32 = 2.0;

impl StubEmbedder {
    pub fn new() -> Self {
        Self { calls: 0 }
    }

    fn vector(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; TOPICS.len() + 1];
        for word in text.split_whitespace().map(str::to_lowercase) {
            match TOPICS.iter().position(|topic| topic.contains(&word.as_str())) {
                Some(axis) => vector[axis] += SCALE,
                None => vector[TOPICS.len()] += 0.1,
            }
        }
        vector
    }
}

impl Embedder for StubEmbedder {
    fn model_id(&self) -> &str {
        "stub-keywords"
    }

    fn dimension(&self) -> usize {
        TOPICS.len() + 1
    }

    fn embed_batch(&mut self, texts: &[String]) -> Result<Array2<f32>> {
        self.calls += 1;
        let rows = texts.iter().map(|text| Self::vector(text)).collect();
        corpus_embed::nlp::embeddings::stack_rows(self.model_id(), self.dimension(), rows)
    }
}

/// Embedder producing vectors of a different width than [`StubEmbedder`].
pub struct NarrowEmbedder;

impl Embedder for NarrowEmbedder {
    fn model_id(&self) -> &str {
        "stub-keywords"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn embed_batch(&mut self, texts: &[String]) -> Result<Array2<f32>> {
        Ok(Array2::ones((texts.len(), 2)))
    }
}

pub fn write_corpus(dir: &std::path::Path, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    std::fs::write(&path, text).expect("write corpus");
    path
}
