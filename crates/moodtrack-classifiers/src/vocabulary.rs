//! Frequency-ranked vocabulary
//!
//! The vocabulary fixes the dimensionality and ordering of every feature
//! vector for one model instance.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

/// Identity of a vocabulary, derived from its ordered contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    fn of_words(words: &[String]) -> Self {
        let mut hasher = Sha256::new();
        for word in words {
            hasher.update(word.as_bytes());
            hasher.update(b"\n");
        }
        let digest = hasher.finalize();

        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        Self(u64::from_be_bytes(prefix))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Ordered set of distinct content words, most frequent first
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, usize>,
    fingerprint: Fingerprint,
}

impl Vocabulary {
    /// Build a vocabulary from an explicit word order.
    ///
    /// Later duplicates are dropped so every word has one position.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();

        for word in words {
            let word = word.into();
            if !index.contains_key(&word) {
                index.insert(word.clone(), ordered.len());
                ordered.push(word);
            }
        }

        let fingerprint = Fingerprint::of_words(&ordered);
        Self {
            words: ordered,
            index,
            fingerprint,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Position of a word, if present
    pub fn position(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Word at a position
    pub fn word(&self, position: usize) -> Option<&str> {
        self.words.get(position).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }
}

#[derive(Debug, Clone, Copy)]
struct WordCount {
    count: u64,
    first_seen: usize,
}

/// Accumulates word frequencies across the corpus
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    counts: HashMap<String, WordCount>,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a word list once
    pub fn add(&mut self, words: &[String]) {
        self.add_weighted(words, 1);
    }

    /// Count a word list as if it appeared `weight` times in a row
    pub fn add_weighted(&mut self, words: &[String], weight: u32) {
        if weight == 0 {
            return;
        }

        for word in words {
            let next = self.counts.len();
            let entry = self.counts.entry(word.clone()).or_insert(WordCount {
                count: 0,
                first_seen: next,
            });
            entry.count += u64::from(weight);
        }
    }

    /// Number of distinct words seen so far
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sort by descending count, breaking ties by first appearance
    pub fn build(self) -> Vocabulary {
        let mut entries: Vec<(String, WordCount)> = self.counts.into_iter().collect();
        entries.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });

        Vocabulary::from_words(entries.into_iter().map(|(word, _)| word))
    }
}

/// Build a vocabulary from unweighted word lists
pub fn build_vocabulary(examples: &[Vec<String>]) -> Vocabulary {
    let mut builder = VocabularyBuilder::new();
    for words in examples {
        builder.add(words);
    }
    builder.build()
}
