//! Journal persistence
//!
//! Entries are kept as a JSON array. Writes go to a sibling temporary file
//! that is renamed over the journal, so a crash never leaves half a file.

use chrono::{DateTime, Utc};
use moodtrack_core::{Error, Result, Sentiment};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fewer entries than this cannot form a trend
pub const MIN_TREND_ENTRIES: usize = 2;

/// One classified journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry text as the user wrote it
    pub text: String,

    /// Classified sentiment
    pub sentiment: Sentiment,

    /// When the entry was last recorded
    pub recorded_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
            recorded_at: Utc::now(),
        }
    }
}

/// Point on the mood trend, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub entry: usize,
    pub sentiment: Sentiment,
    pub score: i8,
}

/// File-backed list of journal entries
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Open a journal file. A missing or empty file is an empty journal.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    Error::journal(format!("{} is not a valid journal: {}", path.display(), e))
                })?
            }
        } else {
            Vec::new()
        };

        debug!("Opened journal {:?} with {} entries", path, entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record an entry and write the journal.
    ///
    /// Re-recording identical text updates the existing entry in place
    /// instead of adding a duplicate.
    pub fn record(&mut self, text: impl Into<String>, sentiment: Sentiment) -> Result<()> {
        let entry = JournalEntry::new(text, sentiment);

        match self.entries.iter_mut().find(|e| e.text == entry.text) {
            Some(existing) => {
                debug!("Updating existing journal entry");
                *existing = entry;
            }
            None => self.entries.push(entry),
        }

        self.save()
    }

    /// Number of entries per sentiment, in [`Sentiment::ALL`] order
    pub fn counts(&self) -> [(Sentiment, usize); 3] {
        let mut counts = Sentiment::ALL.map(|s| (s, 0));
        for entry in &self.entries {
            counts[entry.sentiment.index()].1 += 1;
        }
        counts
    }

    /// Sentiment score per entry number
    pub fn trend(&self) -> Result<Vec<TrendPoint>> {
        if self.entries.len() < MIN_TREND_ENTRIES {
            return Err(Error::journal(format!(
                "not enough data for a trend: {} entries, need at least {}",
                self.entries.len(),
                MIN_TREND_ENTRIES
            )));
        }

        Ok(self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| TrendPoint {
                entry: i + 1,
                sentiment: entry.sentiment,
                score: entry.sentiment.score(),
            })
            .collect())
    }

    /// Delete every entry and truncate the file
    pub fn clear(&mut self) -> Result<()> {
        let removed = self.entries.len();
        self.entries.clear();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, "")?;
        info!("Deleted {} journal entries", removed);
        Ok(())
    }

    /// Write all entries to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!("Saved {} journal entries to {:?}", self.entries.len(), self.path);
        Ok(())
    }
}
