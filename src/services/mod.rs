//! Collaborator contracts consumed by the scoring pipeline.

pub mod checker;
pub mod transcriber;
