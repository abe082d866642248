//! MoodLens analytics core.
//!
//! Scores journal entries, extracts keywords, reads emotions, themes and needs,
//! and mines recurring low-mood patterns across a user's history.

pub mod brain;
pub mod config;
pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use brain::JournalAnalyzer;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, BestEffort, Fidelity, Result};
pub use models::Entry;
