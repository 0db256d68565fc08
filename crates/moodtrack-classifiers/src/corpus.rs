//! Labeled corpus loading
//!
//! Each corpus row is `label-code,"text"`. The label code comes first and the
//! text may itself contain commas, so rows are split on the first comma only.
//! Malformed rows are skipped without failing the load.

use moodtrack_core::{Error, LabeledExample, Result, Sentiment};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A corpus file and the weight its rows carry during training
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSource {
    /// Path to the CSV file
    pub path: PathBuf,

    /// Number of times each row counts, equivalent to repeating the file
    #[serde(default = "default_weight")]
    pub weight: u32,
}

impl CorpusSource {
    /// Create a source with weight 1
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            weight: default_weight(),
        }
    }

    /// Set the weight for this source
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// Parses `path` or `path:weight`
impl FromStr for CorpusSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("corpus path must not be empty".to_string());
        }

        match s.rsplit_once(':') {
            Some((path, weight)) if !path.is_empty() => match weight.parse::<u32>() {
                Ok(weight) => Ok(Self::new(path).with_weight(weight)),
                Err(_) => Ok(Self::new(s)),
            },
            _ => Ok(Self::new(s)),
        }
    }
}

fn default_weight() -> u32 {
    1
}

/// A training example tagged with the weight of its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedExample {
    pub example: LabeledExample,
    pub weight: u32,
}

/// Row counts for one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read
    pub rows: usize,

    /// Rows turned into examples
    pub accepted: usize,

    /// Rows without a text field or with an unknown label code
    pub skipped: usize,
}

impl LoadStats {
    fn merge(&mut self, other: LoadStats) {
        self.rows += other.rows;
        self.accepted += other.accepted;
        self.skipped += other.skipped;
    }
}

/// Parse a single corpus row.
///
/// Returns `None` for rows with no text field or an unknown label code.
pub fn parse_row(line: &str) -> Option<LabeledExample> {
    let (code, text) = line.trim().split_once(',')?;
    let label = Sentiment::from_label_code(code)?;
    Some(LabeledExample::new(text.trim_matches('"'), label))
}

/// Reads labeled rows from corpus sources
#[derive(Debug, Clone, Default)]
pub struct CorpusLoader;

impl CorpusLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every source in order.
    ///
    /// Sources that cannot be opened or read are logged and skipped; the
    /// caller decides whether an empty result is fatal.
    pub fn load(&self, sources: &[CorpusSource]) -> Vec<WeightedExample> {
        let mut examples = Vec::new();
        let mut totals = LoadStats::default();

        for source in sources {
            if source.weight == 0 {
                debug!("Skipping zero-weight corpus source {:?}", source.path);
                continue;
            }

            match self.load_path(&source.path, source.weight) {
                Ok((loaded, stats)) => {
                    debug!(
                        "Loaded {} rows from {:?} (weight {}, {} skipped)",
                        stats.accepted, source.path, source.weight, stats.skipped
                    );
                    totals.merge(stats);
                    examples.extend(loaded);
                }
                Err(e) => {
                    warn!("Skipping corpus source: {}", e);
                }
            }
        }

        info!(
            "Corpus loaded: {} examples from {} sources ({} rows skipped)",
            totals.accepted,
            sources.len(),
            totals.skipped
        );

        examples
    }

    /// Load one file. Open and read failures are reported as
    /// [`Error::Corpus`] naming the file.
    pub fn load_path(
        &self,
        path: impl AsRef<Path>,
        weight: u32,
    ) -> Result<(Vec<WeightedExample>, LoadStats)> {
        let path = path.as_ref();
        File::open(path)
            .map_err(Error::from)
            .and_then(|file| self.load_reader(BufReader::new(file), weight))
            .map_err(|e| Error::corpus(format!("{}: {}", path.display(), e)))
    }

    /// Load rows from any buffered reader. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn load_reader<R: BufRead>(
        &self,
        mut reader: R,
        weight: u32,
    ) -> Result<(Vec<WeightedExample>, LoadStats)> {
        let mut examples = Vec::new();
        let mut stats = LoadStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.rows += 1;

            let line = String::from_utf8_lossy(&buf);
            match parse_row(&line) {
                Some(example) => {
                    stats.accepted += 1;
                    examples.push(WeightedExample { example, weight });
                }
                None => stats.skipped += 1,
            }
        }

        Ok((examples, stats))
    }
}
