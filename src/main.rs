//! CLI entry point for the grammar rater.
//!
//! Provides subcommands for scoring a single audio file, scoring a raw
//! transcript, and batch-scoring a directory of audio files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use grammar_rater::batch::{BatchItemResult, BatchSummary, Engine, ItemReport};
use grammar_rater::config::EngineConfig;
use grammar_rater::feedback;
use grammar_rater::infra::languagetool::LanguageToolClient;
use grammar_rater::infra::whisper::WhisperClient;
use grammar_rater::output;
use grammar_rater::scorer::Weights;
use grammar_rater::services::checker::{DisabledChecker, GrammarChecker};
use grammar_rater::services::transcriber::Transcriber;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grammar_rater")]
#[command(about = "Scores spoken-language grammar from audio samples", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(long, default_value = "config.json", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe and score a single audio file
    Score {
        /// Path to the audio file
        #[arg(value_name = "AUDIO_FILE")]
        source: PathBuf,

        /// CSV file to append the flat result row to
        #[arg(short, long, default_value = "scores.csv")]
        output: String,
    },
    /// Score a transcript read from a UTF-8 text file
    ScoreText {
        /// Path to the transcript file
        #[arg(value_name = "TEXT_FILE")]
        source: PathBuf,
    },
    /// Transcribe and score every audio file in a directory
    Batch {
        /// Directory containing audio files
        #[arg(value_name = "AUDIO_DIR")]
        input_dir: PathBuf,

        /// Maximum number of files processed concurrently
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grammar_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grammar_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::load_or_default(&cli.config);
    let engine = build_engine(&config)?;

    match cli.command {
        Commands::Score { source, output } => {
            let report = engine.score_source(&source).await?;
            println!("{}", report.feedback);
            persist_item(&config, &report)?;
            output::append_record(&output, &BatchItemResult::Scored(report))?;
        }
        Commands::ScoreText { source } => {
            let text = std::fs::read_to_string(&source)?;
            let result = engine.score_transcript(&text).await;
            println!("{}", feedback::render(&result));
        }
        Commands::Batch {
            input_dir,
            concurrency,
        } => {
            let files = output::audio_files(&input_dir)?;
            if files.is_empty() {
                info!(dir = %input_dir.display(), "No audio files found");
                return Ok(());
            }

            let results = engine.run_batch(&files, concurrency).await;

            let results_dir = Path::new(&config.output.results_dir);
            let stamp = output::timestamp();
            let json_path = results_dir.join(format!("batch_results_{stamp}.json"));
            let csv_path = results_dir.join(format!("batch_results_{stamp}.csv"));
            output::save_json(&json_path, &results)?;
            output::save_batch_csv(&csv_path, &results)?;
            info!(json = %json_path.display(), csv = %csv_path.display(), "Batch results saved");

            if let Some(summary) = BatchSummary::from_results(&results) {
                summary.log();
            }
        }
    }

    Ok(())
}

/// Builds the engine from config and environment: collaborators are
/// acquired once here and shared across all items.
fn build_engine(config: &EngineConfig) -> Result<Engine> {
    let whisper_url = std::env::var("WHISPER_SERVER_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let transcriber: Arc<dyn Transcriber> = Arc::new(WhisperClient::new(whisper_url)?);

    let checker: Arc<dyn GrammarChecker> = if config.grammar.use_language_tool {
        let languagetool_url = std::env::var("LANGUAGETOOL_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8010".to_string());
        Arc::new(LanguageToolClient::new(
            languagetool_url,
            config.grammar.language.clone(),
        )?)
    } else {
        info!("Grammar checking disabled by config");
        Arc::new(DisabledChecker)
    };

    let weights = config
        .grammar
        .weights
        .as_ref()
        .map(Weights::resolve)
        .unwrap_or_default();

    Ok(Engine::new(transcriber, checker, weights))
}

/// Saves a single scored item: JSON record plus optional detailed report.
fn persist_item(config: &EngineConfig, report: &ItemReport) -> Result<()> {
    let results_dir = Path::new(&config.output.results_dir);
    let stamp = output::timestamp();
    let stem = Path::new(&report.file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("result");

    let json_path = results_dir.join(format!("{stem}_{stamp}.json"));
    output::save_json(&json_path, report)?;
    info!(path = %json_path.display(), "Result saved");

    if config.output.save_detailed_reports {
        let report_path = results_dir.join(format!("{stem}_{stamp}_report.txt"));
        output::write_report(&report_path, report)?;
        info!(path = %report_path.display(), "Detailed report saved");
    }

    Ok(())
}
