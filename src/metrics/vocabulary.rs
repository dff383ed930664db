use serde::Serialize;
use std::collections::HashMap;

use crate::metrics::util::{mean, word_pattern};

/// Vocabulary richness statistics over the lower-cased token stream.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct VocabularyStats {
    pub word_count: usize,
    pub unique_word_count: usize,
    /// Type-token ratio: unique words over total words, always in [0, 1].
    pub lexical_diversity: f64,
    pub avg_word_length: f64,
    /// The ten most frequent tokens with their counts, ties broken by
    /// first appearance in the text.
    pub top_words: Vec<(String, usize)>,
}

/// Tokenizes the lower-cased text into `\w+` runs and computes frequency,
/// diversity, and length statistics. Returns all-zero stats for token-free
/// input.
pub fn analyze(text: &str) -> VocabularyStats {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = word_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();

    if words.is_empty() {
        return VocabularyStats::default();
    }

    // word -> (first position seen, count)
    let mut freq: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, &word) in words.iter().enumerate() {
        let entry = freq.entry(word).or_insert((position, 0));
        entry.1 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = freq
        .iter()
        .map(|(&word, &(first_seen, count))| (word, first_seen, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));

    let top_words = ranked
        .iter()
        .take(10)
        .map(|&(word, _, count)| (word.to_string(), count))
        .collect();

    let lengths: Vec<f64> = words.iter().map(|w| w.chars().count() as f64).collect();

    VocabularyStats {
        word_count: words.len(),
        unique_word_count: freq.len(),
        lexical_diversity: freq.len() as f64 / words.len() as f64,
        avg_word_length: mean(&lengths),
        top_words,
    }
}
