//! Concrete clients for the external collaborators.

pub mod languagetool;
pub mod whisper;
