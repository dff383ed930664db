//! Grammar scoring engine for spoken-language samples.
//!
//! Turns a transcript (produced by an external speech-to-text collaborator)
//! and raw grammar findings (produced by an external checker) into component
//! quality metrics, a weighted overall score with a letter grade, and
//! rendered feedback, with batch orchestration across many inputs.

pub mod batch;
pub mod config;
pub mod feedback;
pub mod infra;
pub mod metrics;
pub mod output;
pub mod scorer;
pub mod services;
