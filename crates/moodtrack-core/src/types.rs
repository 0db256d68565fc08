//! Core types for MoodTrack

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Overall sentiment of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All labels in tie-break priority order (earlier wins)
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Map a corpus label code (`0`, `2`, `4`) to a sentiment
    pub fn from_label_code(code: &str) -> Option<Self> {
        match code {
            "4" => Some(Self::Positive),
            "2" => Some(Self::Neutral),
            "0" => Some(Self::Negative),
            _ => None,
        }
    }

    /// Position in [`Sentiment::ALL`], usable as a dense array index
    pub fn index(&self) -> usize {
        match self {
            Self::Positive => 0,
            Self::Neutral => 1,
            Self::Negative => 2,
        }
    }

    /// Numeric value for trend series: +1, 0, -1
    pub fn score(&self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Neutral => 0,
            Self::Negative => -1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(format!("unknown sentiment '{}'", other)),
        }
    }
}

/// A single row of training data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Raw text of the row
    pub text: String,

    /// Sentiment label assigned by the corpus
    pub label: Sentiment,
}

impl LabeledExample {
    /// Create a new labeled example
    pub fn new(text: impl Into<String>, label: Sentiment) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}
