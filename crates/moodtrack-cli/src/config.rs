//! Application configuration

use moodtrack_classifiers::MoodConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Corpus, stop-words, smoothing and response rules
    #[serde(flatten)]
    pub pipeline: MoodConfig,

    /// Where journal entries are stored
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &Path, cli: &crate::cli::Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if !cli.corpus.is_empty() {
            config.pipeline.corpus = cli.corpus.clone();
        }

        if let Some(journal) = &cli.journal {
            config.journal_path = journal.clone();
        }

        config.pipeline.validate()?;
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pipeline: MoodConfig::default(),
            journal_path: default_journal_path(),
        }
    }
}

fn default_journal_path() -> PathBuf {
    PathBuf::from("moodTrackerData.json")
}
