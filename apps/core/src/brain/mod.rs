//! # Brain Module
//!
//! Fast, deterministic text analytics for MoodLens journal entries.
//! Nothing here touches the network, a database or shared mutable state.
//!
//! ## Components
//! - `lexicon`: Label trigger words, prompt pools and canned sentences
//! - `sentiment`: Blended rule-based and lexical polarity scoring
//! - `keywords`: Stopword-filtered frequency keyword extraction
//! - `emotion`: Emotion, theme and need detection with intensity metrics
//! - `reflection`: Reflections, followup questions, encouragement, risk screen
//! - `patterns`: Cross-entry mood pattern mining
//! - `report`: Output data structures
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod emotion;
pub mod keywords;
pub mod lexicon;
pub mod patterns;
pub mod reflection;
pub mod report;
pub mod sentiment;

// Re-export main types for convenience
pub use analyzer::JournalAnalyzer;
pub use emotion::{EmotionAnalyzer, EmotionIntensity, EmotionalContext};
pub use keywords::{KeywordExtractor, KeywordResult};
pub use patterns::PatternMiner;
pub use reflection::{RiskAssessment, RiskIndicators, RiskLevel};
pub use report::{
    AnalysisResult, AnalyticsSummary, CompanionResponse, EntryScores, MoodTrendPoint, Pattern,
    PatternAnalysis,
};
pub use sentiment::{
    LexicalPolarityEstimator, PolarityEstimator, RuleBasedEstimator, ScoringMode, SentimentScorer,
};
