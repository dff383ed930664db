//! Renders a [`ScoringResult`] into ordered, human-readable feedback text.

use crate::scorer::ScoringResult;

/// Builds the feedback text: overall score, grammar issues (first five),
/// sentence structure, and vocabulary, in that order. Pure and
/// deterministic; never mutates the result.
pub fn render(result: &ScoringResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("Overall Grammar Score: {}/100", result.score));
    lines.push(format!("Grade: {}", result.grade));
    lines.push(String::new());

    if result.error_count == 0 {
        lines.push("✓ No grammar errors detected!".to_string());
    } else {
        lines.push(format!("✗ Found {} grammar issue(s):", result.error_count));
        for (i, finding) in result.grammar_findings.iter().take(5).enumerate() {
            lines.push(format!("  {}. {}", i + 1, finding.message));
            if let Some(suggestion) = finding.suggestions.first() {
                lines.push(format!("     Suggestion: {}", suggestion));
            }
        }
    }

    lines.push(String::new());
    lines.push("Sentence Structure:".to_string());
    lines.push(format!(
        "  - {} sentence(s)",
        result.sentence_stats.sentence_count
    ));
    lines.push(format!(
        "  - Average length: {:.1} words",
        result.sentence_stats.avg_sentence_length
    ));

    lines.push(String::new());
    lines.push("Vocabulary:".to_string());
    lines.push(format!(
        "  - {} words ({} unique)",
        result.vocabulary_stats.word_count, result.vocabulary_stats.unique_word_count
    ));
    lines.push(format!(
        "  - Lexical diversity: {:.2}%",
        result.vocabulary_stats.lexical_diversity * 100.0
    ));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::{score_text, ResolvedWeights};
    use crate::services::checker::GrammarFinding;

    fn finding(message: &str, suggestions: Vec<&str>) -> GrammarFinding {
        GrammarFinding {
            message: message.to_string(),
            category: "GRAMMAR".to_string(),
            rule_id: "TEST_RULE".to_string(),
            suggestions: suggestions.into_iter().map(String::from).collect(),
            context: String::new(),
            offset: 0,
            length: 1,
        }
    }

    #[test]
    fn test_clean_result_reports_no_errors() {
        let result = score_text(
            "This is a clean sentence without any issues at all.",
            Vec::new(),
            &ResolvedWeights::default(),
        );
        let text = render(&result);

        assert!(text.contains("Overall Grammar Score:"));
        assert!(text.contains("✓ No grammar errors detected!"));
        assert!(text.contains("Sentence Structure:"));
        assert!(text.contains("Vocabulary:"));
    }

    #[test]
    fn test_findings_capped_at_five() {
        let findings: Vec<_> = (1..=8)
            .map(|i| finding(&format!("issue {i}"), vec![]))
            .collect();
        let result = score_text(
            "A sentence that somehow collected eight distinct problems.",
            findings,
            &ResolvedWeights::default(),
        );
        let text = render(&result);

        assert!(text.contains("Found 8 grammar issue(s)"));
        assert!(text.contains("5. issue 5"));
        assert!(!text.contains("issue 6"));
    }

    #[test]
    fn test_first_suggestion_shown() {
        let result = score_text(
            "Their going to the store.",
            vec![finding("Possible typo", vec!["They're", "There"])],
            &ResolvedWeights::default(),
        );
        let text = render(&result);

        assert!(text.contains("Suggestion: They're"));
        assert!(!text.contains("Suggestion: There\n"));
    }

    #[test]
    fn test_diversity_rendered_as_percentage() {
        let result = score_text(
            "Hello world. Hello world programming world.",
            Vec::new(),
            &ResolvedWeights::default(),
        );
        let text = render(&result);

        assert!(text.contains("6 words (3 unique)"));
        assert!(text.contains("Lexical diversity: 50.00%"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let result = score_text(
            "Rendering twice must give the same text.",
            Vec::new(),
            &ResolvedWeights::default(),
        );
        assert_eq!(render(&result), render(&result));
    }
}
