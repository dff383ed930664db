//! Engine configuration, loaded from a JSON file with serde defaults.

use anyhow::Result;
use serde::Deserialize;
use tracing::warn;

use crate::scorer::Weights;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grammar: GrammarConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// When false, the engine runs with the no-op checker and every text
    /// scores as error-free.
    pub use_language_tool: bool,
    /// Language code passed to the checker (e.g. "en-US").
    pub language: String,
    /// Scoring weights; unset fields resolve to 0.25 each, a fully unset
    /// block resolves to the built-in 0.40/0.20/0.20/0.20 split.
    pub weights: Option<Weights>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            use_language_tool: true,
            language: "en-US".to_string(),
            weights: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub results_dir: String,
    pub save_detailed_reports: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: "./results".to_string(),
            save_detailed_reports: true,
        }
    }
}

impl EngineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the config, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path, error = %e, "Config not loaded, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.grammar.use_language_tool);
        assert_eq!(config.grammar.language, "en-US");
        assert!(config.grammar.weights.is_none());
        assert_eq!(config.output.results_dir, "./results");
        assert!(config.output.save_detailed_reports);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{"grammar": {"language": "en-GB", "weights": {"grammar_errors": 0.5}}}"#,
        )
        .unwrap();

        assert_eq!(config.grammar.language, "en-GB");
        assert!(config.grammar.use_language_tool);

        let weights = config.grammar.weights.unwrap().resolve();
        assert_eq!(weights.grammar_errors, 0.5);
        assert_eq!(weights.readability, 0.25);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = EngineConfig::load_or_default("/nonexistent/config.json");
        assert_eq!(config.output.results_dir, "./results");
    }
}
