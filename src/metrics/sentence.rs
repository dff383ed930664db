use serde::Serialize;

use crate::metrics::util::{mean, stddev};

/// Per-sentence length statistics, in words per sentence.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SentenceStats {
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub max_sentence_length: usize,
    pub min_sentence_length: usize,
    pub sentence_length_std: f64,
}

/// Splits `text` into sentences on `.`, `!` and `?`, discarding
/// whitespace-only fragments, and computes length statistics over the
/// per-sentence word counts. Returns all-zero stats when no sentences
/// survive the split.
pub fn analyze(text: &str) -> SentenceStats {
    let lengths: Vec<usize> = text
        .split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| fragment.split_whitespace().count())
        .collect();

    if lengths.is_empty() {
        return SentenceStats::default();
    }

    let series: Vec<f64> = lengths.iter().map(|&n| n as f64).collect();
    let avg = mean(&series);

    SentenceStats {
        sentence_count: lengths.len(),
        avg_sentence_length: avg,
        max_sentence_length: lengths.iter().copied().max().unwrap_or(0),
        min_sentence_length: lengths.iter().copied().min().unwrap_or(0),
        sentence_length_std: stddev(&series, avg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sentences() {
        let stats = analyze("This is a sentence. This is another sentence.");

        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.avg_sentence_length, 4.0);
        assert_eq!(stats.max_sentence_length, 4);
        assert_eq!(stats.min_sentence_length, 4);
        assert_eq!(stats.sentence_length_std, 0.0);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(analyze(""), SentenceStats::default());
    }

    #[test]
    fn test_punctuation_only() {
        // Runs of terminators leave only whitespace fragments behind
        assert_eq!(analyze("... !!! ???"), SentenceStats::default());
    }

    #[test]
    fn test_uneven_lengths() {
        let stats = analyze("One two three four five six. One two.");

        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.avg_sentence_length, 4.0);
        assert_eq!(stats.max_sentence_length, 6);
        assert_eq!(stats.min_sentence_length, 2);
        assert_eq!(stats.sentence_length_std, 2.0);
    }

    #[test]
    fn test_trailing_fragment_without_terminator() {
        let stats = analyze("A full sentence. and a trailing clause");
        assert_eq!(stats.sentence_count, 2);
    }
}
