//! Text normalization into content words
//!
//! The same normalizer instance is applied to corpus rows and to user
//! entries, so both sides of the model see identical tokens.

use std::collections::HashSet;

/// Tokens starting with this character are user mentions
pub const MENTION_SIGIL: char = '@';

/// Tokens starting with this prefix are treated as links
pub const URL_PREFIX: &str = "http";

/// Minimum length (in characters) of a content word
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Common, neutral or context-dependent words that tend to drown out the
/// polar words around them.
pub const DEFAULT_IGNORE_WORDS: &[&str] = &[
    "feel", "feeling", "need", "want", "and", "then", "day", "night", "had", "has", "have",
    "make", "makes", "made", "was", "are", "were", "will", "afternoon", "evening", "morning",
    "get", "got", "receive", "received", "the", "went", "its", "his", "her", "their", "our",
    "they", "them", "this", "that", "im", "mr", "mrs", "ms", "for", "you", "with", "only",
    "essentially", "basically", "from", "but", "just", "also", "too", "out", "today", "tonight",
    "tomorrow", "about", "around", "watch", "watched", "see", "saw", "hear", "heard", "now",
    "currently", "all", "what", "who", "where", "when", "how", "why", "some", "lots", "very",
    "really", "much", "many", "someone", "something", "since", "because", "which", "there",
    "did", "more", "less", "ate", "eat", "drink", "drank",
];

/// Immutable set of stop-words excluded during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreWordSet {
    words: HashSet<String>,
}

impl IgnoreWordSet {
    /// Build a set from any list of words. Entries are lowercased.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// A set that ignores nothing
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for IgnoreWordSet {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_WORDS)
    }
}

/// Lowercase text once, centrally, before it reaches the normalizer
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Splits text into content words
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    ignore_words: IgnoreWordSet,
    min_word_length: usize,
}

impl TextNormalizer {
    /// Create a normalizer with the given stop-words
    pub fn new(ignore_words: IgnoreWordSet) -> Self {
        Self {
            ignore_words,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
        }
    }

    /// Override the minimum content word length
    pub fn with_min_word_length(mut self, len: usize) -> Self {
        self.min_word_length = len;
        self
    }

    pub fn ignore_words(&self) -> &IgnoreWordSet {
        &self.ignore_words
    }

    /// Normalize already-lowercased text into content words.
    ///
    /// Mentions are dropped before punctuation is stripped, so `@name`
    /// never survives as `name`. Order and duplicates are preserved.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        content_words(text, &self.ignore_words, self.min_word_length)
    }

    /// Lowercase then normalize
    pub fn normalize_folded(&self, text: &str) -> Vec<String> {
        self.normalize(&fold_case(text))
    }
}

/// Lowercase then normalize against a borrowed stop list, with the default
/// minimum word length
pub fn normalize_with(text: &str, ignore_words: &IgnoreWordSet) -> Vec<String> {
    content_words(&fold_case(text), ignore_words, DEFAULT_MIN_WORD_LENGTH)
}

fn content_words(text: &str, ignore_words: &IgnoreWordSet, min_word_length: usize) -> Vec<String> {
    let without_mentions = text
        .split_whitespace()
        .filter(|token| !token.starts_with(MENTION_SIGIL))
        .collect::<Vec<_>>()
        .join(" ");

    let stripped: String = without_mentions
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    stripped
        .split_whitespace()
        .filter(|word| {
            if word.chars().count() < min_word_length {
                return false;
            }
            let lower = word.to_lowercase();
            !ignore_words.contains(&lower) && !lower.starts_with(URL_PREFIX)
        })
        .map(str::to_owned)
        .collect()
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(IgnoreWordSet::default())
    }
}
