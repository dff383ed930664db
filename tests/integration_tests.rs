//! End-to-end tests over the scoring pipeline with in-process collaborators.

use anyhow::Result;
use async_trait::async_trait;
use grammar_rater::batch::{BatchItemResult, BatchSummary, Engine};
use grammar_rater::scorer::ResolvedWeights;
use grammar_rater::services::checker::{DisabledChecker, GrammarChecker, GrammarFinding};
use grammar_rater::services::transcriber::{Transcriber, Transcription};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Maps file stems to canned transcripts; any path named `bad.*` fails.
struct FixtureTranscriber;

#[async_trait]
impl Transcriber for FixtureTranscriber {
    async fn transcribe(&self, source: &Path) -> Result<Transcription> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        if stem == "bad" {
            anyhow::bail!("unreadable audio: {}", source.display());
        }

        let text = match stem {
            "short" => "Yes. No.".to_string(),
            _ => "This is a sentence. This is another sentence.".to_string(),
        };
        let word_count = text.split_whitespace().count();
        Ok(Transcription { text, word_count })
    }
}

/// Reports one fixed finding per check call.
struct OneFindingChecker;

#[async_trait]
impl GrammarChecker for OneFindingChecker {
    async fn check(&self, text: &str) -> Result<Vec<GrammarFinding>> {
        Ok(vec![GrammarFinding {
            message: "Possible agreement error".to_string(),
            category: "GRAMMAR".to_string(),
            rule_id: "AGREEMENT".to_string(),
            suggestions: vec!["is".to_string()],
            context: text.chars().take(20).collect(),
            offset: 0,
            length: 2,
        }])
    }
}

/// Always unreachable; the engine must degrade to empty findings.
struct BrokenChecker;

#[async_trait]
impl GrammarChecker for BrokenChecker {
    async fn check(&self, _text: &str) -> Result<Vec<GrammarFinding>> {
        anyhow::bail!("connection refused")
    }
}

fn engine_with(checker: Arc<dyn GrammarChecker>) -> Engine {
    Engine::new(
        Arc::new(FixtureTranscriber),
        checker,
        ResolvedWeights::default(),
    )
}

#[tokio::test]
async fn test_single_item_pipeline() {
    let engine = engine_with(Arc::new(OneFindingChecker));
    let report = engine.score_source(Path::new("sample.wav")).await.unwrap();

    assert_eq!(report.file_name, "sample.wav");
    assert_eq!(report.result.error_count, 1);
    assert_eq!(report.result.sentence_stats.sentence_count, 2);
    assert_eq!(report.result.word_count, 8);
    assert!(report.feedback.contains("Possible agreement error"));
    assert!(report.feedback.contains("Suggestion: is"));
}

#[tokio::test]
async fn test_unreachable_checker_degrades_to_no_findings() {
    let engine = engine_with(Arc::new(BrokenChecker));
    let report = engine.score_source(Path::new("sample.wav")).await.unwrap();

    assert_eq!(report.result.error_count, 0);
    assert_eq!(report.result.component_scores.grammar, 100.0);
    assert!(report.feedback.contains("No grammar errors detected"));
}

#[tokio::test]
async fn test_batch_isolates_failures_and_preserves_order() {
    let engine = engine_with(Arc::new(DisabledChecker));
    let sources: Vec<PathBuf> = ["a.wav", "bad.wav", "c.wav", "short.wav"]
        .iter()
        .map(PathBuf::from)
        .collect();

    let results = engine.run_batch(&sources, 2).await;

    assert_eq!(results.len(), 4);
    let names: Vec<&str> = results.iter().map(BatchItemResult::file_name).collect();
    assert_eq!(names, vec!["a.wav", "bad.wav", "c.wav", "short.wav"]);

    assert!(!results[0].is_failed());
    assert!(results[1].is_failed());
    assert_eq!(results[1].score(), 0.0);
    assert!(!results[2].is_failed());

    let summary = BatchSummary::from_results(&results).unwrap();
    assert_eq!(summary.count, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.min_score, 0.0);
    // The failed item's zero drags the mean below the best scored item.
    assert!(summary.mean_score < summary.max_score);
}

#[tokio::test]
async fn test_empty_batch_returns_empty() {
    let engine = engine_with(Arc::new(DisabledChecker));
    let results = engine.run_batch(&[], 4).await;

    assert!(results.is_empty());
    assert_eq!(BatchSummary::from_results(&results), None);
}

#[tokio::test]
async fn test_identical_inputs_score_identically() {
    let engine = engine_with(Arc::new(OneFindingChecker));
    let first = engine.score_transcript("A stable text scores the same twice.").await;
    let second = engine.score_transcript("A stable text scores the same twice.").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_batch_results_serialize_to_json() {
    let engine = engine_with(Arc::new(DisabledChecker));
    let sources = vec![PathBuf::from("a.wav"), PathBuf::from("bad.wav")];
    let results = engine.run_batch(&sources, 1).await;

    let json = serde_json::to_value(&results).unwrap();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0]["component_scores"]["grammar"].is_number());
    assert_eq!(items[1]["error"].as_str().unwrap().contains("unreadable"), true);
    assert_eq!(items[1]["score"].as_f64(), Some(0.0));
}
