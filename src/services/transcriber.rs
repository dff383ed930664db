//! Trait and types for the external speech-to-text collaborator.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Transcript produced from one audio source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcription {
    pub text: String,
    pub word_count: usize,
}

/// Abstraction over a speech-to-text backend (e.g., a whisper.cpp server).
///
/// A failed transcription fails the item: without text there is nothing to
/// score.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, source: &Path) -> Result<Transcription>;
}
