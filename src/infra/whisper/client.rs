use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::services::transcriber::{Transcriber, Transcription};

/// Client for a whisper.cpp-style transcription server (`/inference`).
pub struct WhisperClient {
    base_url: String,
    client: reqwest::Client,
}

impl WhisperClient {
    pub fn new(base_url: String) -> Result<Self> {
        // Model inference dominates; allow long requests but fail fast on connect.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { base_url, client })
    }
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, source: &Path) -> Result<Transcription> {
        let bytes = tokio::fs::read(source)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read audio file {}: {}", source.display(), e))?;

        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("audio")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("response_format", "json");

        let url = format!("{}/inference", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send transcription request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Transcription server returned status {}: {}",
                status,
                body
            ));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse transcription response: {}", e))?;

        let text = json["text"].as_str().unwrap_or("").trim().to_string();
        let word_count = text.split_whitespace().count();

        Ok(Transcription { text, word_count })
    }
}
