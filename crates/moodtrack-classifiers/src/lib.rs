//! MoodTrack Classifiers
//!
//! Sentiment classification for journal entries.
//!
//! The pipeline is built once per process from a labeled tweet corpus:
//! - Corpus loading: `label-code,"text"` rows with per-source weights
//! - Normalization: mentions, punctuation, links and stop-words removed
//! - Vocabulary: content words ranked by corpus frequency
//! - Features: `contains(word)` presence flags over the vocabulary
//! - Naive Bayes: single-pass training, log-space argmax at inference
//!
//! A small rule set then maps the predicted label and the entry's keywords
//! to a supportive message.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod features;
pub mod naive_bayes;
pub mod normalizer;
pub mod pipeline;
pub mod response;
pub mod vocabulary;

pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
pub use config::MoodConfig;
pub use corpus::{parse_row, CorpusLoader, CorpusSource, LoadStats, WeightedExample};
pub use features::{extract_features, feature_name, FeatureVector};
pub use naive_bayes::{
    InformativeFeature, Model, NaiveBayesTrainer, Prediction, TrainingExample, DEFAULT_SMOOTHING,
};
pub use normalizer::{fold_case, normalize_with, IgnoreWordSet, TextNormalizer};
pub use pipeline::{classify_text, train_examples, train_pipeline, PipelineBuilder, SentimentPipeline};
pub use response::{ResponseKind, ResponseRules, ResponseSelector};
pub use vocabulary::{build_vocabulary, Fingerprint, Vocabulary, VocabularyBuilder};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::corpus::CorpusSource;
    pub use crate::normalizer::IgnoreWordSet;
    pub use crate::pipeline::{classify_text, train_pipeline, PipelineBuilder, SentimentPipeline};
    pub use moodtrack_core::Sentiment;
}
