//! Pure text metric extractors.
//!
//! Each extractor is a standalone function over a text string. They never
//! fail: degenerate input yields zero-valued stats instead of an error.

pub mod readability;
pub mod sentence;
pub mod util;
pub mod vocabulary;

pub use readability::ReadabilityStats;
pub use sentence::SentenceStats;
pub use vocabulary::VocabularyStats;
