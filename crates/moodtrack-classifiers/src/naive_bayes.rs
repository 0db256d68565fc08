//! Naive Bayes training and inference over boolean presence features
//!
//! Each feature is a two-valued categorical variable. The model stores log
//! probabilities so that scoring a text is a sum rather than a product.

use crate::features::FeatureVector;
use crate::vocabulary::{Fingerprint, Vocabulary};
use moodtrack_core::{Error, Result, Sentiment};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info};

/// Additive smoothing applied to every feature/label count.
///
/// 0.5 is expected-likelihood estimation, which keeps every likelihood
/// strictly positive.
pub const DEFAULT_SMOOTHING: f64 = 0.5;

/// Number of values a presence feature can take
const FEATURE_VALUES: f64 = 2.0;

/// A feature vector with its label and source weight
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub features: FeatureVector,
    pub label: Sentiment,
    pub weight: u32,
}

impl TrainingExample {
    pub fn new(features: FeatureVector, label: Sentiment) -> Self {
        Self {
            features,
            label,
            weight: 1,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// Fits a [`Model`] in a single pass over the training set
#[derive(Debug, Clone)]
pub struct NaiveBayesTrainer {
    smoothing: f64,
}

impl NaiveBayesTrainer {
    pub fn new() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
        }
    }

    /// Set the additive smoothing constant (must be > 0)
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Train on unweighted `(features, label)` pairs
    pub fn train(&self, pairs: &[(FeatureVector, Sentiment)]) -> Result<Model> {
        self.fit(pairs.iter().map(|(features, label)| (features, *label, 1)))
    }

    /// Train on weighted examples. Weight N counts like N identical rows.
    pub fn train_weighted(&self, examples: &[TrainingExample]) -> Result<Model> {
        self.fit(examples.iter().map(|e| (&e.features, e.label, e.weight)))
    }

    fn fit<'a, I>(&self, examples: I) -> Result<Model>
    where
        I: IntoIterator<Item = (&'a FeatureVector, Sentiment, u32)>,
    {
        if !(self.smoothing.is_finite() && self.smoothing > 0.0) {
            return Err(Error::config(format!(
                "smoothing must be a positive number, got {}",
                self.smoothing
            )));
        }

        let start = Instant::now();
        let mut shape: Option<(usize, Fingerprint)> = None;
        let mut label_weight = [0.0f64; 3];
        let mut true_counts: [Vec<f64>; 3] = Default::default();
        let mut rows = 0usize;

        for (features, label, weight) in examples {
            let (dimension, fingerprint) = *shape.get_or_insert_with(|| {
                for counts in true_counts.iter_mut() {
                    *counts = vec![0.0; features.len()];
                }
                (features.len(), features.fingerprint())
            });

            if features.fingerprint() != fingerprint || features.len() != dimension {
                return Err(Error::vocabulary_mismatch(
                    format!("{} ({} features)", fingerprint, dimension),
                    format!("{} ({} features)", features.fingerprint(), features.len()),
                ));
            }

            if weight == 0 {
                continue;
            }

            let weight = f64::from(weight);
            let idx = label.index();
            label_weight[idx] += weight;
            for &pos in features.present() {
                true_counts[idx][pos] += weight;
            }
            rows += 1;
        }

        let total: f64 = label_weight.iter().sum();
        let (dimension, fingerprint) = match shape {
            Some(shape) if total > 0.0 => shape,
            _ => return Err(Error::training("no training examples")),
        };

        let alpha = self.smoothing;
        let mut labels: [Option<LabelModel>; 3] = Default::default();

        for sentiment in Sentiment::ALL {
            let idx = sentiment.index();
            let count = label_weight[idx];
            if count == 0.0 {
                continue;
            }

            let denominator = count + FEATURE_VALUES * alpha;
            let mut log_true = Vec::with_capacity(dimension);
            let mut log_false = Vec::with_capacity(dimension);
            for &present in &true_counts[idx] {
                log_true.push(((present + alpha) / denominator).ln());
                log_false.push(((count - present + alpha) / denominator).ln());
            }

            labels[idx] = Some(LabelModel {
                log_prior: (count / total).ln(),
                base_false: log_false.iter().sum(),
                log_true,
                log_false,
                weight: count,
            });
        }

        let elapsed = start.elapsed();
        metrics::histogram!("moodtrack_training_duration_us").record(elapsed.as_micros() as f64);
        info!(
            "Trained naive bayes model: {} rows, {} features, {} labels in {:?}",
            rows,
            dimension,
            labels.iter().flatten().count(),
            elapsed
        );

        Ok(Model {
            labels,
            dimension,
            fingerprint,
            smoothing: alpha,
            total_weight: total,
        })
    }
}

impl Default for NaiveBayesTrainer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct LabelModel {
    log_prior: f64,
    /// Sum of `log_false` over all features
    base_false: f64,
    log_true: Vec<f64>,
    log_false: Vec<f64>,
    weight: f64,
}

impl LabelModel {
    fn log_score(&self, features: &FeatureVector) -> f64 {
        features
            .present()
            .iter()
            .fold(self.log_prior + self.base_false, |score, &pos| {
                score + self.log_true[pos] - self.log_false[pos]
            })
    }
}

/// Posterior distribution for one text
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Most probable label
    pub label: Sentiment,

    /// Probability of `label`
    pub confidence: f64,

    /// Probability per label in priority order; untrained labels are 0
    pub probabilities: [(Sentiment, f64); 3],
}

impl Prediction {
    pub fn probability(&self, label: Sentiment) -> f64 {
        self.probabilities[label.index()].1
    }
}

/// A feature value that best separates two labels
#[derive(Debug, Clone, PartialEq)]
pub struct InformativeFeature {
    pub word: String,
    /// Feature value the ratio is about: `contains(word) = present`
    pub present: bool,
    pub most_likely: Sentiment,
    pub least_likely: Sentiment,
    /// `P(value | most_likely) / P(value | least_likely)`
    pub ratio: f64,
}

/// Trained sentiment model, immutable once built
#[derive(Debug, Clone)]
pub struct Model {
    labels: [Option<LabelModel>; 3],
    dimension: usize,
    fingerprint: Fingerprint,
    smoothing: f64,
    total_weight: f64,
}

impl Model {
    /// Number of features the model was trained on
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Fingerprint of the training vocabulary
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Labels seen during training, in priority order
    pub fn labels(&self) -> impl Iterator<Item = Sentiment> + '_ {
        Sentiment::ALL
            .into_iter()
            .filter(|s| self.labels[s.index()].is_some())
    }

    /// Prior probability of a label, `None` if it never appeared in training
    pub fn prior(&self, label: Sentiment) -> Option<f64> {
        self.labels[label.index()]
            .as_ref()
            .map(|m| m.weight / self.total_weight)
    }

    /// `P(feature = value | label)`
    pub fn feature_probability(&self, label: Sentiment, position: usize, value: bool) -> Option<f64> {
        let model = self.labels[label.index()].as_ref()?;
        let log = if value {
            model.log_true.get(position)?
        } else {
            model.log_false.get(position)?
        };
        Some(log.exp())
    }

    fn check_compatible(&self, features: &FeatureVector) -> Result<()> {
        if features.fingerprint() != self.fingerprint || features.len() != self.dimension {
            return Err(Error::vocabulary_mismatch(
                format!("{} ({} features)", self.fingerprint, self.dimension),
                format!("{} ({} features)", features.fingerprint(), features.len()),
            ));
        }
        Ok(())
    }

    /// Unnormalized log posterior per label, `None` for untrained labels
    pub fn log_scores(&self, features: &FeatureVector) -> Result<[Option<f64>; 3]> {
        self.check_compatible(features)?;

        let mut scores = [None; 3];
        for sentiment in Sentiment::ALL {
            if let Some(model) = &self.labels[sentiment.index()] {
                scores[sentiment.index()] = Some(model.log_score(features));
            }
        }
        Ok(scores)
    }

    /// Most probable label. Exact ties go to the earlier label in
    /// [`Sentiment::ALL`] (positive, then neutral, then negative).
    pub fn classify(&self, features: &FeatureVector) -> Result<Sentiment> {
        let scores = self.log_scores(features)?;
        argmax(&scores).ok_or_else(|| Error::internal("model has no trained labels"))
    }

    /// Full posterior distribution
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        let scores = self.log_scores(features)?;
        let label = argmax(&scores).ok_or_else(|| Error::internal("model has no trained labels"))?;

        let max = scores.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = scores.iter().flatten().map(|s| (s - max).exp()).sum();

        let mut probabilities = Sentiment::ALL.map(|s| (s, 0.0));
        for sentiment in Sentiment::ALL {
            if let Some(score) = scores[sentiment.index()] {
                probabilities[sentiment.index()].1 = (score - max).exp() / sum;
            }
        }

        debug!("Posterior {:?}", probabilities);

        Ok(Prediction {
            label,
            confidence: probabilities[label.index()].1,
            probabilities,
        })
    }

    /// Feature values that most strongly favour one label over another.
    ///
    /// Both presence and absence of each word are ranked. Equal ratios keep
    /// presence entries first, then vocabulary order.
    pub fn most_informative_features(
        &self,
        vocabulary: &Vocabulary,
        n: usize,
    ) -> Result<Vec<InformativeFeature>> {
        if vocabulary.fingerprint() != self.fingerprint {
            return Err(Error::vocabulary_mismatch(
                self.fingerprint.to_string(),
                vocabulary.fingerprint().to_string(),
            ));
        }

        let trained: Vec<(Sentiment, &LabelModel)> = Sentiment::ALL
            .into_iter()
            .filter_map(|s| self.labels[s.index()].as_ref().map(|m| (s, m)))
            .collect();
        if trained.len() < 2 {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<InformativeFeature> = [true, false]
            .into_iter()
            .flat_map(|present| {
                let trained = &trained;
                vocabulary.iter().enumerate().map(move |(pos, word)| {
                    let log_p = |model: &LabelModel| {
                        if present {
                            model.log_true[pos]
                        } else {
                            model.log_false[pos]
                        }
                    };

                    let (mut most, mut least) = (trained[0], trained[0]);
                    for &(sentiment, model) in &trained[1..] {
                        if log_p(model) > log_p(most.1) {
                            most = (sentiment, model);
                        }
                        if log_p(model) < log_p(least.1) {
                            least = (sentiment, model);
                        }
                    }

                    InformativeFeature {
                        word: word.to_string(),
                        present,
                        most_likely: most.0,
                        least_likely: least.0,
                        ratio: (log_p(most.1) - log_p(least.1)).exp(),
                    }
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.ratio.partial_cmp(&a.ratio).unwrap_or(Ordering::Equal));
        ranked.truncate(n);
        Ok(ranked)
    }
}

fn argmax(scores: &[Option<f64>; 3]) -> Option<Sentiment> {
    let mut best: Option<(Sentiment, f64)> = None;
    for sentiment in Sentiment::ALL {
        if let Some(score) = scores[sentiment.index()] {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((sentiment, score)),
            }
        }
    }
    best.map(|(sentiment, _)| sentiment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::extract_features;

    fn vocab() -> Vocabulary {
        Vocabulary::from_words(["great", "terrible", "okay", "weather"])
    }

    fn pair(vocab: &Vocabulary, words: &[&str], label: Sentiment) -> (FeatureVector, Sentiment) {
        (extract_features(vocab, words), label)
    }

    #[test]
    fn test_separable_words() {
        let vocab = vocab();
        let pairs = vec![
            pair(&vocab, &["great", "weather"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["terrible", "weather"], Sentiment::Negative),
            pair(&vocab, &["terrible"], Sentiment::Negative),
            pair(&vocab, &["okay"], Sentiment::Neutral),
        ];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();

        let great = extract_features(&vocab, &["great"]);
        let terrible = extract_features(&vocab, &["terrible"]);
        assert_eq!(model.classify(&great).unwrap(), Sentiment::Positive);
        assert_eq!(model.classify(&terrible).unwrap(), Sentiment::Negative);
    }

    #[test]
    fn test_priors_are_relative_frequencies() {
        let vocab = vocab();
        let pairs = vec![
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["terrible"], Sentiment::Negative),
        ];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();

        assert!((model.prior(Sentiment::Positive).unwrap() - 0.75).abs() < 1e-12);
        assert!((model.prior(Sentiment::Negative).unwrap() - 0.25).abs() < 1e-12);
        assert_eq!(model.prior(Sentiment::Neutral), None);
        assert_eq!(
            model.labels().collect::<Vec<_>>(),
            vec![Sentiment::Positive, Sentiment::Negative]
        );
    }

    #[test]
    fn test_smoothed_likelihoods_never_zero() {
        let vocab = vocab();
        let pairs = vec![
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
        ];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();

        // great: 2 of 2 present -> (2 + 0.5) / (2 + 1.0)
        let p = model.feature_probability(Sentiment::Positive, 0, true).unwrap();
        assert!((p - 2.5 / 3.0).abs() < 1e-12);

        // terrible: 0 of 2 present -> (0 + 0.5) / 3.0
        let p = model.feature_probability(Sentiment::Positive, 1, true).unwrap();
        assert!((p - 0.5 / 3.0).abs() < 1e-12);

        for pos in 0..vocab.len() {
            for value in [true, false] {
                let p = model.feature_probability(Sentiment::Positive, pos, value).unwrap();
                assert!(p > 0.0 && p < 1.0);
            }
        }
    }

    #[test]
    fn test_weight_equals_repetition() {
        let vocab = vocab();
        let weighted = vec![
            TrainingExample::new(extract_features(&vocab, &["great"]), Sentiment::Positive)
                .with_weight(3),
            TrainingExample::new(extract_features(&vocab, &["okay", "weather"]), Sentiment::Neutral),
        ];
        let repeated = vec![
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["okay", "weather"], Sentiment::Neutral),
        ];

        let trainer = NaiveBayesTrainer::new();
        let a = trainer.train_weighted(&weighted).unwrap();
        let b = trainer.train(&repeated).unwrap();

        let probe = extract_features(&vocab, &["weather", "great"]);
        let sa = a.log_scores(&probe).unwrap();
        let sb = b.log_scores(&probe).unwrap();
        for (x, y) in sa.iter().zip(sb.iter()) {
            match (x, y) {
                (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9),
                (None, None) => {}
                _ => panic!("label sets differ"),
            }
        }
    }

    #[test]
    fn test_tie_break_priority() {
        let vocab = vocab();
        let trainer = NaiveBayesTrainer::new();
        let probe = extract_features(&vocab, &["weather"]);

        let all_same = vec![
            pair(&vocab, &["weather"], Sentiment::Negative),
            pair(&vocab, &["weather"], Sentiment::Neutral),
            pair(&vocab, &["weather"], Sentiment::Positive),
        ];
        let model = trainer.train(&all_same).unwrap();
        assert_eq!(model.classify(&probe).unwrap(), Sentiment::Positive);

        let neutral_negative = vec![
            pair(&vocab, &["weather"], Sentiment::Negative),
            pair(&vocab, &["weather"], Sentiment::Neutral),
        ];
        let model = trainer.train(&neutral_negative).unwrap();
        assert_eq!(model.classify(&probe).unwrap(), Sentiment::Neutral);
    }

    #[test]
    fn test_empty_features_classify() {
        let vocab = vocab();
        let pairs = vec![
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["terrible"], Sentiment::Negative),
            pair(&vocab, &["terrible", "weather"], Sentiment::Negative),
        ];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();

        let empty = extract_features::<&str>(&vocab, &[]);
        let prediction = model.predict(&empty).unwrap();
        let total: f64 = prediction.probabilities.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(prediction.probability(Sentiment::Neutral), 0.0);
        assert_eq!(prediction.label, model.classify(&empty).unwrap());
    }

    #[test]
    fn test_log_score_matches_full_product() {
        let vocab = vocab();
        let pairs = vec![
            pair(&vocab, &["great", "weather"], Sentiment::Positive),
            pair(&vocab, &["okay"], Sentiment::Positive),
            pair(&vocab, &["terrible"], Sentiment::Negative),
        ];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();
        let probe = extract_features(&vocab, &["great", "okay"]);

        let scores = model.log_scores(&probe).unwrap();
        for sentiment in [Sentiment::Positive, Sentiment::Negative] {
            let mut expected = model.prior(sentiment).unwrap().ln();
            for (pos, value) in probe.iter().enumerate() {
                expected += model.feature_probability(sentiment, pos, value).unwrap().ln();
            }
            assert!((scores[sentiment.index()].unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_training_set_is_error() {
        let err = NaiveBayesTrainer::new().train(&[]).unwrap_err();
        assert!(matches!(err, Error::Training(_)));

        let vocab = vocab();
        let zero = vec![
            TrainingExample::new(extract_features(&vocab, &["great"]), Sentiment::Positive)
                .with_weight(0),
        ];
        let err = NaiveBayesTrainer::new().train_weighted(&zero).unwrap_err();
        assert!(matches!(err, Error::Training(_)));
    }

    #[test]
    fn test_invalid_smoothing() {
        let vocab = vocab();
        let pairs = vec![pair(&vocab, &["great"], Sentiment::Positive)];
        for alpha in [0.0, -1.0, f64::NAN] {
            let err = NaiveBayesTrainer::new()
                .with_smoothing(alpha)
                .train(&pairs)
                .unwrap_err();
            assert!(matches!(err, Error::Config(_)));
        }
    }

    #[test]
    fn test_vocabulary_mismatch() {
        let vocab = vocab();
        let other = Vocabulary::from_words(["great", "terrible"]);
        let pairs = vec![pair(&vocab, &["great"], Sentiment::Positive)];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();

        let foreign = extract_features(&other, &["great"]);
        assert!(matches!(
            model.classify(&foreign),
            Err(Error::VocabularyMismatch { .. })
        ));

        let mixed = vec![
            pair(&vocab, &["great"], Sentiment::Positive),
            (foreign, Sentiment::Negative),
        ];
        assert!(matches!(
            NaiveBayesTrainer::new().train(&mixed),
            Err(Error::VocabularyMismatch { .. })
        ));
    }

    #[test]
    fn test_most_informative_features() {
        let vocab = vocab();
        let pairs = vec![
            pair(&vocab, &["great", "weather"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["great", "weather"], Sentiment::Positive),
            pair(&vocab, &["terrible", "weather"], Sentiment::Negative),
            pair(&vocab, &["terrible"], Sentiment::Negative),
            pair(&vocab, &["terrible", "weather"], Sentiment::Negative),
        ];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();
        let top = model.most_informative_features(&vocab, 2).unwrap();

        assert_eq!(top.len(), 2);
        let words: Vec<&str> = top.iter().map(|f| f.word.as_str()).collect();
        assert!(words.contains(&"great"));
        assert!(words.contains(&"terrible"));
        assert!(top.iter().all(|f| f.ratio > 1.0));

        assert!(top.iter().all(|f| f.present));

        let great = top.iter().find(|f| f.word == "great").unwrap();
        assert_eq!(great.most_likely, Sentiment::Positive);
        assert_eq!(great.least_likely, Sentiment::Negative);
    }

    #[test]
    fn test_informative_features_rank_absence() {
        let vocab = vocab();
        let pairs = vec![
            pair(&vocab, &["great", "weather"], Sentiment::Positive),
            pair(&vocab, &["great"], Sentiment::Positive),
            pair(&vocab, &["great", "weather"], Sentiment::Positive),
            pair(&vocab, &["terrible", "weather"], Sentiment::Negative),
            pair(&vocab, &["terrible"], Sentiment::Negative),
            pair(&vocab, &["terrible", "weather"], Sentiment::Negative),
        ];
        let model = NaiveBayesTrainer::new().train(&pairs).unwrap();
        let top = model.most_informative_features(&vocab, 4).unwrap();

        // (3 + 0.5) / (0 + 0.5) either way round
        assert!(top.iter().all(|f| (f.ratio - 7.0).abs() < 1e-9));

        let no_great = top
            .iter()
            .find(|f| f.word == "great" && !f.present)
            .unwrap();
        assert_eq!(no_great.most_likely, Sentiment::Negative);
        assert_eq!(no_great.least_likely, Sentiment::Positive);

        let all = model.most_informative_features(&vocab, usize::MAX).unwrap();
        assert_eq!(all.len(), 2 * vocab.len());
    }
}
