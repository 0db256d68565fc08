//! Boolean presence features over a vocabulary
//!
//! A feature vector has one `contains(word)` entry per vocabulary word. Only
//! the positions of true entries are stored; every other position reads as
//! false, so extraction costs O(words) instead of O(vocabulary).

use crate::vocabulary::{Fingerprint, Vocabulary};

/// Name of the feature for a vocabulary word
pub fn feature_name(word: &str) -> String {
    format!("contains({})", word)
}

/// Presence of each vocabulary word in one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    /// Sorted, distinct positions of the words that are present
    present: Vec<usize>,
    dimension: usize,
    fingerprint: Fingerprint,
}

impl FeatureVector {
    /// Number of features, always the vocabulary size
    pub fn len(&self) -> usize {
        self.dimension
    }

    pub fn is_empty(&self) -> bool {
        self.dimension == 0
    }

    /// Value of the feature at a vocabulary position
    pub fn get(&self, position: usize) -> Option<bool> {
        if position >= self.dimension {
            return None;
        }
        Some(self.present.binary_search(&position).is_ok())
    }

    /// Value of `contains(word)`, or `None` if the word is not a feature
    pub fn contains(&self, vocabulary: &Vocabulary, word: &str) -> Option<bool> {
        vocabulary.position(word).and_then(|pos| self.get(pos))
    }

    /// Positions whose value is true
    pub fn present(&self) -> &[usize] {
        &self.present
    }

    pub fn count_present(&self) -> usize {
        self.present.len()
    }

    /// Vocabulary this vector was built from
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Dense values in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        let mut present = self.present.iter().peekable();
        (0..self.dimension).map(move |pos| {
            if present.peek() == Some(&&pos) {
                present.next();
                true
            } else {
                false
            }
        })
    }

    /// `(contains(word), value)` pairs in vocabulary order
    pub fn named<'a>(
        &'a self,
        vocabulary: &'a Vocabulary,
    ) -> impl Iterator<Item = (String, bool)> + 'a {
        vocabulary
            .iter()
            .zip(self.iter())
            .map(|(word, value)| (feature_name(word), value))
    }
}

/// Build the feature vector for a word list.
///
/// Training rows and user entries must both go through this function.
pub fn extract_features<S: AsRef<str>>(vocabulary: &Vocabulary, words: &[S]) -> FeatureVector {
    let mut present: Vec<usize> = words
        .iter()
        .filter_map(|word| vocabulary.position(word.as_ref()))
        .collect();
    present.sort_unstable();
    present.dedup();

    FeatureVector {
        present,
        dimension: vocabulary.len(),
        fingerprint: vocabulary.fingerprint(),
    }
}
