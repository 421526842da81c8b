//! Human-readable and JSON renderings of command results.

use std::{fmt, path::PathBuf, time::Duration};

use serde::{Serialize, Serializer};

use crate::nlp::cluster::Linkage;

/// Elapsed time rounded to milliseconds, e.g. `1s 250ms`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    humantime::format_duration(Duration::from_millis(millis)).to_string()
}

/// Byte count in binary units, e.g. `9.0 KiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
    match bytes {
        1 => "1 Byte".to_string(),
        0..=1023 => format!("{bytes} Bytes"),
        _ => {
            let mut value = bytes as f64 / 1024.0;
            let mut unit = 0;
            while value >= 1024.0 && unit < UNITS.len() - 1 {
                value /= 1024.0;
                unit += 1;
            }
            format!("{value:.1} {}", UNITS[unit])
        }
    }
}

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_nanos() as f64 / 1_000_000.0)
}

/// Outcome of `generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub model: String,
    pub sentences: usize,
    pub dimension: usize,
    #[serde(rename = "encoding_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
    pub bytes: u64,
}

impl fmt::Display for GenerateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Generating embeddings from {} and saving to {}",
            self.input.display(),
            self.output.display()
        )?;
        writeln!(f, "Input corpus contains {} sentences.", self.sentences)?;
        writeln!(f, "Encoding took {}.", format_elapsed(self.elapsed))?;
        writeln!(f, "Total embeddings size is {}.", format_bytes(self.bytes))?;
        writeln!(f, "Embeddings saved to {}.", self.output.display())
    }
}

/// Outcome of `clusters`: sentence groups in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub input: PathBuf,
    pub threshold: f64,
    pub linkage: Linkage,
    pub clusters: Vec<Vec<String>>,
}

impl fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generating clusters from {}", self.input.display())?;
        writeln!(f)?;
        writeln!(f, "Generated Clusters:")?;
        for (index, members) in self.clusters.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Cluster {}:", index + 1)?;
            for sentence in members {
                writeln!(f, " - {sentence}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A ranked query hit resolved to its sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMatch {
    pub corpus_id: usize,
    pub score: f32,
    pub sentence: String,
}

/// Outcome of `query`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub embeddings: PathBuf,
    pub query: String,
    #[serde(rename = "search_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
    pub matches: Vec<QueryMatch>,
}

impl fmt::Display for QueryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Querying embeddings in {} with: '{}'",
            self.embeddings.display(),
            self.query
        )?;
        writeln!(f)?;
        writeln!(f, "Input query: '{}'", self.query)?;
        writeln!(f, "Search took {}", format_elapsed(self.elapsed))?;
        writeln!(f)?;
        writeln!(f, "Top matches:")?;
        for hit in &self.matches {
            writeln!(f, "\tScore: {:.3}\tSentence: {}", hit.score, hit.sentence)?;
        }
        writeln!(f)?;
        writeln!(f, "==============================")?;
        writeln!(f)
    }
}
