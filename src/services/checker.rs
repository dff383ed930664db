//! Trait and types for the external grammar-check collaborator.

use anyhow::Result;
use serde::Serialize;

/// One issue reported by the grammar checker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrammarFinding {
    pub message: String,
    pub category: String,
    pub rule_id: String,
    /// Up to three suggested replacements, best first.
    pub suggestions: Vec<String>,
    /// Text surrounding the issue, as reported by the checker.
    pub context: String,
    pub offset: usize,
    pub length: usize,
}

/// Abstraction over a grammar-checking backend (e.g., a LanguageTool server).
///
/// Callers decide how to treat an `Err`: the scoring engine deliberately
/// maps checker failures to an empty finding list so an unreachable checker
/// degrades scoring instead of failing the item.
#[async_trait::async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Scans `text` and returns all findings, ordered by offset.
    async fn check(&self, text: &str) -> Result<Vec<GrammarFinding>>;
}

/// Checker used when grammar checking is turned off; reports nothing.
pub struct DisabledChecker;

#[async_trait::async_trait]
impl GrammarChecker for DisabledChecker {
    async fn check(&self, _text: &str) -> Result<Vec<GrammarFinding>> {
        Ok(Vec::new())
    }
}
