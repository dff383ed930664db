use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::services::checker::{GrammarChecker, GrammarFinding};

/// Keep only the best few replacements per finding.
const MAX_SUGGESTIONS: usize = 3;

/// Client for a LanguageTool HTTP server (`/v2/check`).
pub struct LanguageToolClient {
    base_url: String,
    language: String,
    client: reqwest::Client,
}

impl LanguageToolClient {
    pub fn new(base_url: String, language: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url,
            language,
            client,
        })
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolClient {
    async fn check(&self, text: &str) -> Result<Vec<GrammarFinding>> {
        let url = format!("{}/v2/check", self.base_url);
        let params = [("text", text), ("language", self.language.as_str())];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send check request: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "LanguageTool returned status {}: {}",
                status,
                body
            ));
        }

        // Parse as generic JSON to extract only the fields we need
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse check response: {}", e))?;

        let findings = json["matches"]
            .as_array()
            .map(|matches| {
                matches
                    .iter()
                    .filter_map(|m| {
                        let message = m["message"].as_str()?.to_string();
                        let category = m["rule"]["category"]["name"]
                            .as_str()
                            .unwrap_or("")
                            .to_string();
                        let rule_id = m["rule"]["id"].as_str().unwrap_or("").to_string();
                        let suggestions = m["replacements"]
                            .as_array()
                            .map(|replacements| {
                                replacements
                                    .iter()
                                    .filter_map(|r| r["value"].as_str().map(str::to_string))
                                    .take(MAX_SUGGESTIONS)
                                    .collect()
                            })
                            .unwrap_or_default();
                        let context = m["context"]["text"].as_str().unwrap_or("").to_string();
                        let offset = m["offset"].as_u64().unwrap_or(0) as usize;
                        let length = m["length"].as_u64().unwrap_or(0) as usize;

                        Some(GrammarFinding {
                            message,
                            category,
                            rule_id,
                            suggestions,
                            context,
                            offset,
                            length,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(findings)
    }
}
