//! Output structures for journal analysis.
//!
//! Everything here is ephemeral: built per request, never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorical reading of a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Detected emotions, never empty, deduplicated
    pub emotions: Vec<String>,
    /// Detected themes, possibly empty
    pub themes: Vec<String>,
    /// Detected needs, possibly empty
    pub needs: Vec<String>,
    /// Sentiment score of the text
    pub sentiment: f64,
    /// Canned reflection built from the labels above
    pub reflection: String,
}

impl AnalysisResult {
    pub fn has_emotion(&self, label: &str) -> bool {
        self.emotions.iter().any(|e| e == label)
    }
}

/// A recurring correlation between a trigger and low mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub trigger: String,
    /// Heuristic confidence in `[0, 1]`
    pub confidence: f64,
    /// Number of entries backing the pattern
    pub frequency: usize,
    /// Mean sentiment of the backing entries, 2 decimals
    pub avg_sentiment_impact: f64,
}

/// Derived fields computed when an entry is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryScores {
    pub sentiment_score: f64,
    /// Comma-joined keywords
    pub keywords: String,
}

impl EntryScores {
    pub fn neutral() -> Self {
        Self {
            sentiment_score: 0.0,
            keywords: String::new(),
        }
    }

    pub fn into_tuple(self) -> (f64, String) {
        (self.sentiment_score, self.keywords)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionResponse {
    pub detected_emotions: Vec<String>,
    pub themes: Vec<String>,
    pub your_needs: Vec<String>,
    pub reflection: String,
    pub followup_question: String,
    pub encouragement: String,
    /// ISO-8601 time of the analysis
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAnalysis {
    /// At most 3, most frequent first
    pub recurring_emotions: Vec<String>,
    /// At most 3, most frequent first
    pub recurring_themes: Vec<String>,
    /// At most 2, most frequent first
    pub recurring_needs: Vec<String>,
    pub insight: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub avg_sentiment: f64,
    /// Mood level (as string) to entry count
    pub mood_distribution: BTreeMap<String, usize>,
    pub total_entries: usize,
    pub most_common_keywords: Vec<String>,
    pub patterns: Vec<Pattern>,
}

impl AnalyticsSummary {
    pub fn empty() -> Self {
        Self {
            avg_sentiment: 0.0,
            mood_distribution: BTreeMap::new(),
            total_entries: 0,
            most_common_keywords: vec![],
            patterns: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodTrendPoint {
    /// ISO-8601 creation time
    pub date: String,
    pub sentiment: f64,
    pub mood_level: i32,
    pub title: String,
}
