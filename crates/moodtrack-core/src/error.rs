//! Error types for MoodTrack

/// Result type alias using MoodTrack's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for MoodTrack operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Corpus source errors
    #[error("corpus error: {0}")]
    Corpus(String),

    /// Training could not produce a model
    #[error("training error: {0}")]
    Training(String),

    /// A feature vector built from a different vocabulary than the model's
    #[error("vocabulary mismatch: model expects {expected}, got {actual}")]
    VocabularyMismatch { expected: String, actual: String },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Mood journal errors
    #[error("journal error: {0}")]
    Journal(String),

    /// Filesystem/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new corpus error
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }

    /// Create a new training error
    pub fn training(msg: impl Into<String>) -> Self {
        Self::Training(msg.into())
    }

    /// Create a new vocabulary mismatch error
    pub fn vocabulary_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::VocabularyMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new journal error
    pub fn journal(msg: impl Into<String>) -> Self {
        Self::Journal(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
