//! Property tests for normalization, vocabulary and feature extraction

use moodtrack_classifiers::normalizer::{MENTION_SIGIL, URL_PREFIX};
use moodtrack_classifiers::{
    build_vocabulary, extract_features, IgnoreWordSet, TextNormalizer, Vocabulary,
};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

/// Lowercase tweet-like text: words, mentions, links and punctuation
fn tweet_text() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        "[a-z]{1,8}",
        "@[a-z]{1,6}",
        "https?://[a-z]{1,5}\\.[a-z]{2,3}",
        "[a-z]{1,5}[!?.,']{1,3}",
        "[!?.,;:()-]{1,3}",
        Just("the".to_string()),
        Just("feeling".to_string()),
    ];
    prop::collection::vec(token, 0..20).prop_map(|tokens| tokens.join(" "))
}

fn word_lists() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-e]{3}", 0..8), 0..6)
}

proptest! {
    #[test]
    fn normalized_words_are_content_words(text in tweet_text()) {
        let ignore = IgnoreWordSet::default();
        let normalizer = TextNormalizer::new(ignore.clone());

        for word in normalizer.normalize(&text) {
            prop_assert!(word.chars().count() >= 3);
            prop_assert!(!word.starts_with(MENTION_SIGIL));
            prop_assert!(!word.starts_with(URL_PREFIX));
            prop_assert!(!ignore.contains(&word));
            prop_assert!(!word.chars().any(|c| c.is_ascii_punctuation() || c.is_whitespace()));
        }
    }

    #[test]
    fn normalize_is_idempotent(text in tweet_text()) {
        let normalizer = TextNormalizer::default();
        let once = normalizer.normalize(&text);
        let twice = normalizer.normalize(&once.join(" "));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn vocabulary_is_distinct_and_frequency_sorted(lists in word_lists()) {
        let vocab = build_vocabulary(&lists);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for word in lists.iter().flatten() {
            *counts.entry(word.as_str()).or_default() += 1;
        }

        let distinct: HashSet<&str> = vocab.iter().collect();
        prop_assert_eq!(distinct.len(), vocab.len());
        prop_assert_eq!(vocab.len(), counts.len());

        let freqs: Vec<usize> = vocab.iter().map(|w| counts[w]).collect();
        prop_assert!(freqs.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn features_cover_vocabulary_exactly(
        vocab_words in prop::collection::vec("[a-f]{2}", 0..12),
        words in prop::collection::vec("[a-f]{2}", 0..12),
    ) {
        let vocab = Vocabulary::from_words(vocab_words);
        let features = extract_features(&vocab, &words);
        let word_set: HashSet<&str> = words.iter().map(String::as_str).collect();

        prop_assert_eq!(features.len(), vocab.len());
        prop_assert_eq!(features.iter().count(), vocab.len());
        for (word, value) in vocab.iter().zip(features.iter()) {
            prop_assert_eq!(value, word_set.contains(word));
        }
    }
}
