use regex::Regex;
use std::sync::OnceLock;

static WORD: OnceLock<Regex> = OnceLock::new();

/// Unicode-aware word token pattern shared by the vocabulary and
/// readability extractors.
pub fn word_pattern() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"\w+").unwrap())
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}
