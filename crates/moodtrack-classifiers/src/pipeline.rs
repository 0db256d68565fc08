//! End-to-end sentiment pipeline
//!
//! Training: corpus → case folding → normalization → vocabulary → features →
//! naive bayes. Inference runs a single entry through the same normalizer and
//! feature extractor, classifies it, and picks a supportive response.

use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use crate::config::MoodConfig;
use crate::corpus::{CorpusLoader, CorpusSource, WeightedExample};
use crate::features::{extract_features, FeatureVector};
use crate::naive_bayes::{Model, NaiveBayesTrainer, Prediction, TrainingExample};
use crate::normalizer::{normalize_with, IgnoreWordSet, TextNormalizer, DEFAULT_MIN_WORD_LENGTH};
use crate::response::{ResponseRules, ResponseSelector};
use crate::vocabulary::{Vocabulary, VocabularyBuilder};
use moodtrack_core::{Error, Result, Sentiment};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, info};

/// Load the corpus and train a model.
///
/// Fails if no source yields a usable row.
pub fn train_pipeline(
    sources: &[CorpusSource],
    ignore_words: &IgnoreWordSet,
) -> Result<(Vocabulary, Model)> {
    let examples = CorpusLoader::new().load(sources);
    let normalizer = TextNormalizer::new(ignore_words.clone());
    train_examples(&examples, &normalizer, &NaiveBayesTrainer::new())
}

/// Classify one entry and choose a response for it
pub fn classify_text(
    text: &str,
    ignore_words: &IgnoreWordSet,
    vocabulary: &Vocabulary,
    model: &Model,
) -> Result<(Sentiment, Option<String>)> {
    static RESPONDER: OnceLock<ResponseSelector> = OnceLock::new();

    let (words, _, prediction) = infer(normalize_with(text, ignore_words), vocabulary, model)?;
    let response = RESPONDER
        .get_or_init(ResponseSelector::default)
        .select(&words, prediction.label)
        .map(str::to_owned);
    Ok((prediction.label, response))
}

/// Content words → features → posterior. Every inference call site goes
/// through here.
fn infer(
    words: Vec<String>,
    vocabulary: &Vocabulary,
    model: &Model,
) -> Result<(Vec<String>, FeatureVector, Prediction)> {
    let features = extract_features(vocabulary, &words);
    let prediction = model.predict(&features)?;
    Ok((words, features, prediction))
}

/// Train from examples already in memory
pub fn train_examples(
    examples: &[WeightedExample],
    normalizer: &TextNormalizer,
    trainer: &NaiveBayesTrainer,
) -> Result<(Vocabulary, Model)> {
    if examples.is_empty() {
        return Err(Error::training("corpus contains no usable rows"));
    }

    let start = Instant::now();
    let normalized: Vec<Vec<String>> = examples
        .iter()
        .map(|e| normalizer.normalize_folded(&e.example.text))
        .collect();

    let mut builder = VocabularyBuilder::new();
    for (words, example) in normalized.iter().zip(examples) {
        builder.add_weighted(words, example.weight);
    }
    let vocabulary = builder.build();
    debug!(
        "Vocabulary built: {} words from {} examples in {:?}",
        vocabulary.len(),
        examples.len(),
        start.elapsed()
    );

    let training: Vec<TrainingExample> = normalized
        .iter()
        .zip(examples)
        .map(|(words, example)| {
            TrainingExample::new(extract_features(&vocabulary, words), example.example.label)
                .with_weight(example.weight)
        })
        .collect();

    let model = trainer.train_weighted(&training)?;
    info!(
        "Pipeline trained on {} examples ({} vocabulary words) in {:?}",
        examples.len(),
        vocabulary.len(),
        start.elapsed()
    );

    Ok((vocabulary, model))
}

/// A trained model together with everything needed to query it
pub struct SentimentPipeline {
    name: String,
    normalizer: TextNormalizer,
    vocabulary: Vocabulary,
    model: Model,
    responder: ResponseSelector,
}

impl SentimentPipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    fn infer(&self, text: &str) -> Result<(Vec<String>, FeatureVector, Prediction)> {
        infer(self.normalizer.normalize_folded(text), &self.vocabulary, &self.model)
    }
}

impl Classifier for SentimentPipeline {
    fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let (words, features, prediction) = self.infer(text)?;
        let response = self.responder.select(&words, prediction.label);

        metrics::counter!(
            "moodtrack_classifications_total",
            "sentiment" => prediction.label.as_str()
        )
        .increment(1);
        debug!(
            "Classified entry as {} ({} of {} features present)",
            prediction.label,
            features.count_present(),
            features.len()
        );

        Ok(ClassificationResult {
            label: prediction.label,
            score: prediction.confidence as f32,
            metadata: ClassificationMetadata {
                words,
                model: Some(format!("naive-bayes-{}", self.vocabulary.fingerprint())),
                all_scores: Some(
                    prediction
                        .probabilities
                        .iter()
                        .map(|(s, p)| (*s, *p as f32))
                        .collect(),
                ),
                response: response.map(str::to_owned),
            },
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Builder for [`SentimentPipeline`]
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    name: String,
    sources: Vec<CorpusSource>,
    ignore_words: IgnoreWordSet,
    min_word_length: usize,
    smoothing: f64,
    rules: ResponseRules,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            name: "sentiment".to_string(),
            sources: Vec::new(),
            ignore_words: IgnoreWordSet::default(),
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            smoothing: crate::naive_bayes::DEFAULT_SMOOTHING,
            rules: ResponseRules::default(),
        }
    }

    /// Start from a loaded configuration
    pub fn from_config(config: &MoodConfig) -> Self {
        Self {
            sources: config.corpus.clone(),
            ignore_words: config.ignore_word_set(),
            min_word_length: config.min_word_length,
            smoothing: config.smoothing,
            rules: config.responses.clone(),
            ..Self::new()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn add_source(mut self, source: CorpusSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_ignore_words(mut self, ignore_words: IgnoreWordSet) -> Self {
        self.ignore_words = ignore_words;
        self
    }

    pub fn with_min_word_length(mut self, len: usize) -> Self {
        self.min_word_length = len;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_response_rules(mut self, rules: ResponseRules) -> Self {
        self.rules = rules;
        self
    }

    /// Load the configured sources and train
    pub fn build(self) -> Result<SentimentPipeline> {
        let examples = CorpusLoader::new().load(&self.sources);
        self.build_from_examples(&examples)
    }

    /// Train on examples supplied directly
    pub fn build_from_examples(self, examples: &[WeightedExample]) -> Result<SentimentPipeline> {
        let normalizer =
            TextNormalizer::new(self.ignore_words).with_min_word_length(self.min_word_length);
        let trainer = NaiveBayesTrainer::new().with_smoothing(self.smoothing);
        let (vocabulary, model) = train_examples(examples, &normalizer, &trainer)?;

        Ok(SentimentPipeline {
            name: self.name,
            normalizer,
            vocabulary,
            model,
            responder: ResponseSelector::new(&self.rules),
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtrack_core::LabeledExample;

    fn example(text: &str, label: Sentiment) -> WeightedExample {
        WeightedExample {
            example: LabeledExample::new(text, label),
            weight: 1,
        }
    }

    fn corpus() -> Vec<WeightedExample> {
        vec![
            example("What a GREAT afternoon with friends", Sentiment::Positive),
            example("great food, great people!", Sentiment::Positive),
            example("@boss terrible meeting, terrible coffee", Sentiment::Negative),
            example("feeling sick and terrible", Sentiment::Negative),
            example("went to the store for groceries", Sentiment::Neutral),
        ]
    }

    #[test]
    fn test_train_examples_folds_case() {
        let normalizer = TextNormalizer::default();
        let (vocab, model) =
            train_examples(&corpus(), &normalizer, &NaiveBayesTrainer::new()).unwrap();

        assert_eq!(vocab.word(0), Some("great"));
        assert!(!vocab.contains("GREAT"));
        assert!(!vocab.contains("boss"));
        assert_eq!(model.dimension(), vocab.len());
        assert_eq!(model.fingerprint(), vocab.fingerprint());
    }

    #[test]
    fn test_empty_corpus_is_fatal() {
        let err = train_examples(&[], &TextNormalizer::default(), &NaiveBayesTrainer::new())
            .unwrap_err();
        assert!(matches!(err, Error::Training(_)));

        let err = train_pipeline(&[CorpusSource::new("/no/such/corpus.csv")], &IgnoreWordSet::default())
            .unwrap_err();
        assert!(matches!(err, Error::Training(_)));
    }

    #[test]
    fn test_classify_text_entry_point() {
        let ignore = IgnoreWordSet::default();
        let normalizer = TextNormalizer::new(ignore.clone());
        let (vocab, model) =
            train_examples(&corpus(), &normalizer, &NaiveBayesTrainer::new()).unwrap();

        let (label, response) = classify_text("Great!", &ignore, &vocab, &model).unwrap();
        assert_eq!(label, Sentiment::Positive);
        assert!(response.is_some());

        let (label, response) = classify_text("so sick and sleepy, terrible", &ignore, &vocab, &model).unwrap();
        assert_eq!(label, Sentiment::Negative);
        assert!(response.unwrap().starts_with("The average adult needs to sleep"));
    }

    #[test]
    fn test_pipeline_classifier_result() {
        let pipeline = SentimentPipeline::builder()
            .with_name("mood")
            .build_from_examples(&corpus())
            .unwrap();

        assert_eq!(pipeline.name(), "mood");

        let result = pipeline.classify("terrible terrible day").unwrap();
        assert_eq!(result.label, Sentiment::Negative);
        assert!(result.score > 0.0 && result.score <= 1.0);
        assert_eq!(result.metadata.words, vec!["terrible", "terrible"]);
        assert_eq!(result.metadata.all_scores.as_ref().unwrap().len(), 3);
        assert!(result.response().is_some());

        let result = pipeline.classify("").unwrap();
        assert!(result.metadata.words.is_empty());
    }

    #[test]
    fn test_builder_from_config() {
        let config = MoodConfig {
            smoothing: 1.0,
            min_word_length: 5,
            ..Default::default()
        };
        let pipeline = PipelineBuilder::from_config(&config)
            .build_from_examples(&corpus())
            .unwrap();
        assert_eq!(pipeline.model().smoothing(), 1.0);
        assert!(pipeline.vocabulary().contains("terrible"));
        assert!(!pipeline.vocabulary().contains("food"));
    }

    #[test]
    fn test_entry_points_agree() {
        let ignore = IgnoreWordSet::default();
        let pipeline = PipelineBuilder::new()
            .with_ignore_words(ignore.clone())
            .build_from_examples(&corpus())
            .unwrap();

        for text in [
            "Great food!",
            "@boss so sick and sleepy, terrible",
            "went to the store",
            "",
            "nothing known here",
        ] {
            let result = pipeline.classify(text).unwrap();
            let (label, response) =
                classify_text(text, &ignore, pipeline.vocabulary(), pipeline.model()).unwrap();
            assert_eq!(result.label, label, "label for {text:?}");
            assert_eq!(result.response(), response.as_deref(), "response for {text:?}");
        }
    }
}
