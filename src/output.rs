//! Persistence sink for scoring results.
//!
//! Supports CSV append and batch summaries, JSON records, timestamped text
//! reports, and audio file discovery.

use anyhow::Result;
use chrono::Local;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::batch::{BatchItemResult, ItemReport};

const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg", "m4a"];

/// One flattened row of the batch summary table.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    file_name: &'a str,
    score: f64,
    grade: &'a str,
    error_count: usize,
    word_count: usize,
    text: &'a str,
}

impl<'a> From<&'a BatchItemResult> for SummaryRow<'a> {
    fn from(item: &'a BatchItemResult) -> Self {
        match item {
            BatchItemResult::Scored(report) => Self {
                file_name: &report.file_name,
                score: report.result.score,
                grade: &report.result.grade,
                error_count: report.result.error_count,
                word_count: report.result.word_count,
                text: &report.text,
            },
            BatchItemResult::Failed {
                file_name, score, ..
            } => Self {
                file_name,
                score: *score,
                grade: "",
                error_count: 0,
                word_count: 0,
                text: "",
            },
        }
    }
}

/// Appends one batch item as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, item: &BatchItemResult) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(SummaryRow::from(item))?;
    writer.flush()?;

    Ok(())
}

/// Writes the flat summary table for a whole batch.
pub fn save_batch_csv(path: &Path, results: &[BatchItemResult]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().from_path(path)?;
    for item in results {
        writer.serialize(SummaryRow::from(item))?;
    }
    writer.flush()?;

    Ok(())
}

/// Serializes a value as pretty JSON, creating parent directories as needed.
pub fn save_json(path: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)?;
    Ok(())
}

/// Writes a detailed plain-text report for one scored item.
pub fn write_report(path: &Path, report: &ItemReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let rule = "=".repeat(70);
    let thin_rule = "-".repeat(70);
    let mut out = String::new();

    out.push_str(&format!("{rule}\nGRAMMAR SCORING REPORT\n{rule}\n\n"));
    out.push_str(&format!("File: {}\n", report.file_name));
    out.push_str(&format!(
        "Generated: {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("Overall Score: {:.2}/100\n", report.result.score));
    out.push_str(&format!("Grade: {}\n\n", report.result.grade));

    out.push_str(&format!("{thin_rule}\nTRANSCRIBED TEXT\n{thin_rule}\n"));
    out.push_str(&report.text);
    out.push_str("\n\n");

    out.push_str(&format!("{thin_rule}\nDETAILED ANALYSIS\n{thin_rule}\n\n"));
    out.push_str("Component Scores:\n");
    let components = &report.result.component_scores;
    out.push_str(&format!("  - Grammar: {:.2}/100\n", components.grammar));
    out.push_str(&format!("  - Structure: {:.2}/100\n", components.structure));
    out.push_str(&format!(
        "  - Vocabulary: {:.2}/100\n",
        components.vocabulary
    ));
    out.push_str(&format!(
        "  - Readability: {:.2}/100\n\n",
        components.readability
    ));

    out.push_str(&format!(
        "Grammar Errors Found: {}\n",
        report.result.error_count
    ));
    if !report.result.grammar_findings.is_empty() {
        out.push_str("\nDetailed Errors:\n");
        for (i, finding) in report.result.grammar_findings.iter().enumerate() {
            out.push_str(&format!("\n{}. {}\n", i + 1, finding.message));
            if !finding.suggestions.is_empty() {
                out.push_str(&format!(
                    "   Suggestions: {}\n",
                    finding.suggestions.join(", ")
                ));
            }
        }
    }

    out.push_str(&format!("\n{rule}\n"));
    fs::write(path, out)?;

    Ok(())
}

/// Enumerates audio files in a directory, sorted by path for deterministic
/// batch order. Extensions are matched case-insensitively.
pub fn audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                AUDIO_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            });
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Timestamp string for result filenames (YYYYMMDD_HHMMSS).
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}
