//! Composite scorer: combines metric extractor output and grammar findings
//! into four component scores and one weighted overall score with a letter
//! grade.

use serde::{Deserialize, Serialize};

use crate::metrics::{readability, sentence, vocabulary};
use crate::metrics::{ReadabilityStats, SentenceStats, VocabularyStats};
use crate::services::checker::GrammarFinding;

/// Scoring weights as supplied by configuration. Any missing field falls
/// back to an equal 0.25 share when resolved.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Weights {
    pub grammar_errors: Option<f64>,
    pub sentence_structure: Option<f64>,
    pub vocabulary_richness: Option<f64>,
    pub readability: Option<f64>,
}

impl Weights {
    /// Fills any missing field with 0.25. The resolved set is deliberately
    /// not re-normalized, so totals other than 1.0 are possible and the
    /// final score can leave [0, 100] when weights sum above 1. Kept as-is
    /// from the deployed behavior; likely an upstream defect.
    pub fn resolve(&self) -> ResolvedWeights {
        ResolvedWeights {
            grammar_errors: self.grammar_errors.unwrap_or(0.25),
            sentence_structure: self.sentence_structure.unwrap_or(0.25),
            vocabulary_richness: self.vocabulary_richness.unwrap_or(0.25),
            readability: self.readability.unwrap_or(0.25),
        }
    }
}

/// Validated weight set used by the scorer. Built once at engine
/// construction, never per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWeights {
    pub grammar_errors: f64,
    pub sentence_structure: f64,
    pub vocabulary_richness: f64,
    pub readability: f64,
}

impl Default for ResolvedWeights {
    fn default() -> Self {
        Self {
            grammar_errors: 0.40,
            sentence_structure: 0.20,
            vocabulary_richness: 0.20,
            readability: 0.20,
        }
    }
}

/// The four component scores, each clamped to [0, 100].
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub grammar: f64,
    pub structure: f64,
    pub vocabulary: f64,
    pub readability: f64,
}

/// Complete scoring output for one text. Constructed once per call and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    /// Weighted overall score, rounded to 2 decimals. Not clamped: can
    /// exceed 100 when the supplied weights sum above 1.
    pub score: f64,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_error: Option<String>,
    pub grammar_findings: Vec<GrammarFinding>,
    pub error_count: usize,
    pub sentence_stats: SentenceStats,
    pub vocabulary_stats: VocabularyStats,
    pub readability_stats: ReadabilityStats,
    pub component_scores: ComponentScores,
    pub text_length: usize,
    pub word_count: usize,
}

impl ScoringResult {
    fn empty_input(text: &str) -> Self {
        Self {
            score: 0.0,
            grade: "N/A".to_string(),
            input_error: Some("Empty text provided".to_string()),
            grammar_findings: Vec::new(),
            error_count: 0,
            sentence_stats: SentenceStats::default(),
            vocabulary_stats: VocabularyStats::default(),
            readability_stats: ReadabilityStats::default(),
            component_scores: ComponentScores::default(),
            text_length: text.len(),
            word_count: 0,
        }
    }
}

/// Scores `text` against externally supplied grammar findings.
///
/// Empty or whitespace-only text short-circuits to a zero score with grade
/// "N/A" without running any extractor. Otherwise each component score is
/// computed on its own 0-100 scale and the overall score is their weighted
/// sum.
pub fn score_text(
    text: &str,
    findings: Vec<GrammarFinding>,
    weights: &ResolvedWeights,
) -> ScoringResult {
    if text.trim().is_empty() {
        return ScoringResult::empty_input(text);
    }

    let sentence_stats = sentence::analyze(text);
    let vocabulary_stats = vocabulary::analyze(text);
    let readability_stats = readability::analyze(text);

    // Error density per 100 words, amplified tenfold and floored at zero.
    let word_count = vocabulary_stats.word_count;
    let error_rate = findings.len() as f64 / word_count.max(1) as f64 * 100.0;
    let grammar_score = (100.0 - error_rate * 10.0).max(0.0);

    // Coarse three-bucket policy: fragments score worse than run-ons.
    let avg_length = sentence_stats.avg_sentence_length;
    let structure_score = if avg_length < 5.0 {
        60.0
    } else if avg_length > 30.0 {
        70.0
    } else {
        100.0
    };

    // Natural speech rarely exceeds 0.5 diversity, so double it to fill the scale.
    let vocabulary_score = (vocabulary_stats.lexical_diversity * 200.0).min(100.0);

    // A degenerate readability pass carries no signal; score it neutral.
    let readability_score = if readability_stats.is_degenerate() {
        50.0
    } else {
        readability_stats.flesch_score
    };

    let final_score = grammar_score * weights.grammar_errors
        + structure_score * weights.sentence_structure
        + vocabulary_score * weights.vocabulary_richness
        + readability_score * weights.readability;

    // Grade the raw value, then round for presentation.
    let grade = grade(final_score).to_string();

    ScoringResult {
        score: round2(final_score),
        grade,
        input_error: None,
        error_count: findings.len(),
        grammar_findings: findings,
        sentence_stats,
        vocabulary_stats,
        readability_stats,
        component_scores: ComponentScores {
            grammar: round2(grammar_score),
            structure: round2(structure_score),
            vocabulary: round2(vocabulary_score),
            readability: round2(readability_score),
        },
        text_length: text.len(),
        word_count,
    }
}

/// Converts a numerical score into a letter grade.
///
/// | Range   | Grade           |
/// |---------|-----------------|
/// | >= 90   | A (Excellent)   |
/// | >= 75   | B (Good)        |
/// | >= 60   | C (Average)     |
/// | >= 40   | D (Poor)        |
/// | < 40    | F (Very Poor)   |
///
/// Applied to the un-clamped score, so a score above 100 still grades "A".
pub fn grade(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "A (Excellent)",
        s if s >= 75.0 => "B (Good)",
        s if s >= 60.0 => "C (Average)",
        s if s >= 40.0 => "D (Poor)",
        _ => "F (Very Poor)",
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
