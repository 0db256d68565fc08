//! Configuration for corpus sources and the sentiment pipeline

use crate::corpus::CorpusSource;
use crate::naive_bayes::DEFAULT_SMOOTHING;
use crate::normalizer::{IgnoreWordSet, DEFAULT_MIN_WORD_LENGTH};
use crate::response::ResponseRules;
use moodtrack_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Labeled corpus files, loaded in order
    #[serde(default = "default_corpus")]
    pub corpus: Vec<CorpusSource>,

    /// Replacement stop-word list (defaults to the built-in list)
    #[serde(default)]
    pub ignore_words: Option<Vec<String>>,

    /// Shorter words are dropped during normalization
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Additive smoothing for feature likelihoods
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,

    /// Keyword lists for supportive responses
    #[serde(default)]
    pub responses: ResponseRules,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            corpus: default_corpus(),
            ignore_words: None,
            min_word_length: default_min_word_length(),
            smoothing: default_smoothing(),
            responses: ResponseRules::default(),
        }
    }
}

impl MoodConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Stop-words to use for normalization
    pub fn ignore_word_set(&self) -> IgnoreWordSet {
        match &self.ignore_words {
            Some(words) => IgnoreWordSet::new(words),
            None => IgnoreWordSet::default(),
        }
    }

    /// Reject settings that can never train a model
    pub fn validate(&self) -> Result<()> {
        if self.corpus.is_empty() {
            return Err(Error::config("at least one corpus source is required"));
        }
        if self.min_word_length == 0 {
            return Err(Error::config("min_word_length must be at least 1"));
        }
        if !(self.smoothing.is_finite() && self.smoothing > 0.0) {
            return Err(Error::config(format!(
                "smoothing must be a positive number, got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}

/// Public tweet corpora plus the hand-authored file, which is weighted up
/// so that obvious words are not drowned out by the larger sets.
fn default_corpus() -> Vec<CorpusSource> {
    vec![
        CorpusSource::new("data/sentiment140.csv"),
        CorpusSource::new("data/datahub_tweets.csv"),
        CorpusSource::new("data/custom.csv").with_weight(20),
    ]
}

fn default_min_word_length() -> usize {
    DEFAULT_MIN_WORD_LENGTH
}

fn default_smoothing() -> f64 {
    DEFAULT_SMOOTHING
}
