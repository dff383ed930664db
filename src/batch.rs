//! Batch orchestration: drives the single-item pipeline across many audio
//! sources with bounded concurrency and per-item fault isolation.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

use crate::feedback;
use crate::metrics::util::mean;
use crate::scorer::{self, ResolvedWeights, ScoringResult};
use crate::services::checker::GrammarChecker;
use crate::services::transcriber::Transcriber;

/// Fully scored single input, ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub file_name: String,
    pub file_path: String,
    pub text: String,
    #[serde(flatten)]
    pub result: ScoringResult,
    pub feedback: String,
}

/// Outcome of one batch item. Failures carry an explicit zero score so
/// downstream aggregation never special-cases missing results.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchItemResult {
    Scored(ItemReport),
    Failed {
        file_name: String,
        error: String,
        score: f64,
    },
}

impl BatchItemResult {
    fn failed(file_name: String, error: String) -> Self {
        Self::Failed {
            file_name,
            error,
            score: 0.0,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Scored(report) => &report.file_name,
            Self::Failed { file_name, .. } => file_name,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Self::Scored(report) => report.result.score,
            Self::Failed { score, .. } => *score,
        }
    }

    pub fn error_count(&self) -> usize {
        match self {
            Self::Scored(report) => report.result.error_count,
            Self::Failed { .. } => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// The scoring engine: owns the external collaborators and the resolved
/// weight set, acquired once at startup and shared read-only across items.
#[derive(Clone)]
pub struct Engine {
    transcriber: Arc<dyn Transcriber>,
    checker: Arc<dyn GrammarChecker>,
    weights: ResolvedWeights,
}

impl Engine {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        checker: Arc<dyn GrammarChecker>,
        weights: ResolvedWeights,
    ) -> Self {
        Self {
            transcriber,
            checker,
            weights,
        }
    }

    /// Scores a transcript string directly.
    ///
    /// An unreachable checker is logged and treated as "no findings" rather
    /// than failing the item, so scoring degrades instead of aborting.
    pub async fn score_transcript(&self, text: &str) -> ScoringResult {
        let findings = match self.checker.check(text).await {
            Ok(findings) => findings,
            Err(e) => {
                warn!(error = %e, "Grammar checker unavailable, scoring with no findings");
                Vec::new()
            }
        };

        scorer::score_text(text, findings, &self.weights)
    }

    /// Full single-item pipeline: transcribe, check, score, render.
    #[tracing::instrument(skip(self), fields(source = %source.display()))]
    pub async fn score_source(&self, source: &Path) -> Result<ItemReport> {
        let transcription = self.transcriber.transcribe(source).await?;
        info!(
            word_count = transcription.word_count,
            "Transcription complete"
        );

        let result = self.score_transcript(&transcription.text).await;
        let feedback = feedback::render(&result);
        info!(score = result.score, grade = %result.grade, "Scoring complete");

        Ok(ItemReport {
            file_name: file_name_of(source),
            file_path: source.display().to_string(),
            text: transcription.text,
            result,
            feedback,
        })
    }

    /// Scores every source under a bounded permit pool.
    ///
    /// Output order always matches input order: tasks are spawned and their
    /// handles awaited in the order the sources were given, regardless of
    /// completion order. One item's failure becomes a failure record and
    /// never aborts the rest of the batch.
    pub async fn run_batch(
        &self,
        sources: &[PathBuf],
        concurrency: usize,
    ) -> Vec<BatchItemResult> {
        if sources.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency.max(1)));
        let total = sources.len();
        info!(total, concurrency, "Starting batch");

        let mut tasks = Vec::with_capacity(total);
        for source in sources {
            let engine = self.clone();
            let sem = Arc::clone(&semaphore);
            let task_source = source.clone();

            let item_span = tracing::info_span!("score_item", file = %source.display());
            let task = tokio::spawn(
                async move {
                    let _permit = sem.acquire().await?;
                    engine.score_source(&task_source).await
                }
                .instrument(item_span),
            );
            tasks.push((source.clone(), task));
        }

        let mut results = Vec::with_capacity(total);
        for (source, task) in tasks {
            let file_name = file_name_of(&source);
            let item = match task.await {
                Ok(Ok(report)) => BatchItemResult::Scored(report),
                Ok(Err(e)) => {
                    error!(file = %file_name, error = %e, "Item failed");
                    BatchItemResult::failed(file_name, e.to_string())
                }
                Err(e) => {
                    error!(file = %file_name, error = %e, "Item task panicked");
                    BatchItemResult::failed(file_name, e.to_string())
                }
            };
            results.push(item);
        }

        info!(total, "Batch complete");
        results
    }
}

/// Summary statistics over a full batch result set. Failed items contribute
/// their placeholder zero score to the mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub count: usize,
    pub failed: usize,
    pub mean_score: f64,
    pub max_score: f64,
    pub min_score: f64,
    pub mean_errors: f64,
    pub total_errors: usize,
}

impl BatchSummary {
    /// Returns `None` for an empty result set.
    pub fn from_results(results: &[BatchItemResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let scores: Vec<f64> = results.iter().map(BatchItemResult::score).collect();
        let error_counts: Vec<f64> = results
            .iter()
            .map(|r| r.error_count() as f64)
            .collect();

        Some(Self {
            count: results.len(),
            failed: results.iter().filter(|r| r.is_failed()).count(),
            mean_score: mean(&scores),
            max_score: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min_score: scores.iter().copied().fold(f64::INFINITY, f64::min),
            mean_errors: mean(&error_counts),
            total_errors: results.iter().map(BatchItemResult::error_count).sum(),
        })
    }

    pub fn log(&self) {
        info!(
            count = self.count,
            failed = self.failed,
            mean_score = self.mean_score,
            max_score = self.max_score,
            min_score = self.min_score,
            mean_errors = self.mean_errors,
            total_errors = self.total_errors,
            "Batch summary"
        );
    }
}

fn file_name_of(source: &Path) -> String {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string())
}
