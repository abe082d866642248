use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A journal entry as stored by the persistence layer.
///
/// The core never mutates an entry; it only computes `sentiment_score` and
/// `keywords` for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// The unique identifier for the entry.
    pub id: i64,
    /// The owner of the entry.
    #[serde(default)]
    pub user_id: i64,
    /// The user-defined title.
    #[serde(default)]
    pub title: String,
    /// The free-text body of the entry.
    pub content: String,
    /// Blended sentiment in `[-1.0, 1.0]`, computed at write time.
    #[serde(default)]
    pub sentiment_score: f64,
    /// Comma-joined keywords, computed at write time.
    #[serde(default)]
    pub keywords: String,
    /// Self-reported mood level.
    #[serde(default)]
    pub mood_level: i32,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(id: i64, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: 0,
            title: String::new(),
            content: content.into(),
            sentiment_score: 0.0,
            keywords: String::new(),
            mood_level: 0,
            created_at,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sentiment(mut self, score: f64) -> Self {
        self.sentiment_score = score;
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.join(",");
        self
    }

    pub fn with_mood(mut self, mood_level: i32) -> Self {
        self.mood_level = mood_level;
        self
    }

    /// Keywords split from the stored CSV, trimmed, empty items dropped.
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}
