use serde::Serialize;

use crate::metrics::util::word_pattern;

/// Flesch reading-ease estimate and its inputs. All fields are 0.0 when the
/// text has no sentences or no words.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ReadabilityStats {
    /// Flesch reading ease, clamped to [0, 100]. Higher is easier.
    pub flesch_score: f64,
    pub avg_words_per_sentence: f64,
    pub avg_syllables_per_word: f64,
}

impl ReadabilityStats {
    /// True when the extractor found no sentences or no words and the stats
    /// carry no usable signal.
    pub fn is_degenerate(&self) -> bool {
        self.avg_words_per_sentence == 0.0
    }
}

/// Estimates readability from sentence length and a vowel-run syllable
/// heuristic. Unlike the vocabulary extractor, tokens are not lower-cased
/// before counting.
pub fn analyze(text: &str) -> ReadabilityStats {
    let sentence_count = text
        .split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .count();
    let words: Vec<&str> = word_pattern().find_iter(text).map(|m| m.as_str()).collect();

    if sentence_count == 0 || words.is_empty() {
        return ReadabilityStats::default();
    }

    let total_syllables: usize = words.iter().map(|w| syllable_count(w)).sum();
    let avg_words_per_sentence = words.len() as f64 / sentence_count as f64;
    let avg_syllables_per_word = total_syllables as f64 / words.len() as f64;

    let flesch = 206.835 - 1.015 * avg_words_per_sentence - 84.6 * avg_syllables_per_word;

    ReadabilityStats {
        flesch_score: flesch.clamp(0.0, 100.0),
        avg_words_per_sentence,
        avg_syllables_per_word,
    }
}

/// Counts maximal vowel runs in the lower-cased word (`y` counts as a
/// vowel), with a floor of one syllable per word.
fn syllable_count(word: &str) -> usize {
    let mut count = 0;
    let mut prev_was_vowel = false;
    for c in word.to_lowercase().chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }
    count.max(1)
}
