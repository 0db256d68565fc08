//! Classifier trait and common types

use moodtrack_core::{Result, Sentiment};

/// Trait for all classifiers
pub trait Classifier: Send + Sync {
    /// Classify the given text
    fn classify(&self, text: &str) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Result of classification
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    /// Classification label
    pub label: Sentiment,

    /// Confidence score (0.0-1.0)
    pub score: f32,

    /// Additional metadata
    pub metadata: ClassificationMetadata,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl ClassificationResult {
    /// Supportive message chosen for this result, if any
    pub fn response(&self) -> Option<&str> {
        self.metadata.response.as_deref()
    }
}

/// Metadata about classification
#[derive(Debug, Clone, Default)]
pub struct ClassificationMetadata {
    /// Content words the text was reduced to
    pub words: Vec<String>,

    /// Model name or version
    pub model: Option<String>,

    /// All class scores
    pub all_scores: Option<Vec<(Sentiment, f32)>>,

    /// Supportive message for the user
    pub response: Option<String>,
}
