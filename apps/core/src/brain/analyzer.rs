//! Journal Analyzer - boundary facade for the Brain module.
//!
//! Coordinates sentiment scoring, keyword extraction, emotion analysis,
//! prompt generation and pattern mining behind the operations a host
//! application calls on entry write and read.
//!
//! Two call sites matter:
//! 1. Write path: `analyze_sentiment_and_keywords` produces the persisted fields
//! 2. Read path: companion responses, pattern analysis and analytics

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, warn};
use validator::Validate;

use super::emotion::{EmotionAnalyzer, EmotionIntensity, EmotionalContext};
use super::keywords::KeywordExtractor;
use super::lexicon::{GENERIC_INSIGHT, INSIGHT_TEMPLATES};
use super::patterns::{most_common_keywords, PatternMiner};
use super::reflection::{self, RiskAssessment};
use super::report::{
    AnalysisResult, AnalyticsSummary, CompanionResponse, EntryScores, MoodTrendPoint, Pattern,
    PatternAnalysis,
};
use super::sentiment::{round2, SentimentScorer};
use crate::config::AnalyzerConfig;
use crate::error::{BestEffort, Result};
use crate::models::Entry;

const RECURRING_EMOTIONS: usize = 3;
const RECURRING_THEMES: usize = 3;
const RECURRING_NEEDS: usize = 2;
const SUMMARY_KEYWORDS: usize = 10;

/// Labels ranked by frequency, ties by first appearance.
fn rank_labels<'a>(labels: impl Iterator<Item = &'a String>, limit: usize) -> Vec<String> {
    let mut counts: Vec<(&String, usize)> = Vec::new();
    for label in labels {
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(label, _)| label.clone())
        .collect()
}

fn render_insight(emotion: Option<&str>, theme: Option<&str>) -> String {
    let template = emotion
        .and_then(|e| INSIGHT_TEMPLATES.iter().find(|(key, _)| *key == e))
        .map(|(_, template)| *template)
        .unwrap_or(GENERIC_INSIGHT);
    let clause = theme
        .map(|t| format!(" especially around {}", t.replace('_', " ")))
        .unwrap_or_default();
    template.replace("{theme}", &clause)
}

/// Main analyzer that orchestrates all journal analysis components
#[derive(Debug, Clone)]
pub struct JournalAnalyzer {
    config: AnalyzerConfig,
    emotions: EmotionAnalyzer,
    keyword_extractor: KeywordExtractor,
    miner: PatternMiner,
}

impl Default for JournalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl JournalAnalyzer {
    /// Create an analyzer with default settings
    pub fn new() -> Self {
        Self::build(AnalyzerConfig::default())
    }

    /// Create an analyzer from a validated configuration
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AnalyzerConfig) -> Self {
        let scorer = SentimentScorer::new()
            .with_mode(config.scoring_mode)
            .with_rule_weight(config.rule_based_weight);
        Self {
            emotions: EmotionAnalyzer::new(scorer),
            keyword_extractor: KeywordExtractor::with_config(0, config.max_keywords),
            miner: PatternMiner::with_limits(config.min_pattern_entries, config.max_patterns),
            config,
        }
    }

    /// Replace the sentiment scorer, e.g. to inject custom estimators
    pub fn with_scorer(mut self, scorer: SentimentScorer) -> Self {
        self.emotions = EmotionAnalyzer::new(scorer);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// RNG for prompt selection, built per call: seeded when configured,
    /// otherwise seeded from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Sentiment score alone.
    pub fn score(&self, text: &str) -> BestEffort<f64> {
        self.emotions.scorer().score(text)
    }

    /// Keywords alone, most frequent first.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.keyword_extractor.extract_keywords(text)
    }

    /// Fields persisted alongside an entry on create/update.
    pub fn analyze_sentiment_and_keywords(&self, text: &str) -> BestEffort<EntryScores> {
        let start = Instant::now();
        let sentiment = self.score(text);
        let keywords = self.extract_keywords(text).join(",");

        debug!(
            sentiment = sentiment.value,
            keywords = %keywords,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Scored entry text"
        );

        sentiment.map(|sentiment_score| EntryScores {
            sentiment_score,
            keywords,
        })
    }

    /// Emotions, themes, needs and a reflection for a text
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.emotions.analyze(text)
    }

    pub fn intensity(&self, text: &str) -> EmotionIntensity {
        self.emotions.intensity(text)
    }

    pub fn emotional_context(&self, text: &str) -> EmotionalContext {
        self.emotions.emotional_context(text)
    }

    /// Full companion reading of one entry using the caller's RNG.
    pub fn companion_response_with<R: Rng + ?Sized>(
        &self,
        entry: &Entry,
        rng: &mut R,
    ) -> CompanionResponse {
        let analysis = self.analyze(&entry.content);
        let followup_question = reflection::followup(&analysis, rng);
        let encouragement = reflection::encouragement(&analysis);

        CompanionResponse {
            detected_emotions: analysis.emotions,
            themes: analysis.themes,
            your_needs: analysis.needs,
            reflection: analysis.reflection,
            followup_question,
            encouragement,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Full companion reading of one entry
    pub fn companion_response(&self, entry: &Entry) -> CompanionResponse {
        self.companion_response_with(entry, &mut self.rng())
    }

    /// Followup drawn from the sentiment bucket of `score`
    pub fn sentiment_followup(&self, score: f64) -> String {
        reflection::sentiment_followup(score, &mut self.rng())
    }

    /// Risk screen of `entry` against recent history
    pub fn evaluate_risk(&self, entry: &Entry, recent: &[Entry]) -> RiskAssessment {
        let assessment = reflection::evaluate_risk(entry, recent);
        if assessment.needs_intervention {
            warn!(entry_id = entry.id, "Entry flagged for intervention");
        }
        assessment
    }

    /// Recurring labels across the most recent entries, with one insight sentence.
    pub fn pattern_analysis(&self, entries: &[Entry]) -> PatternAnalysis {
        let mut recent: Vec<&Entry> = entries.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(self.config.history_limit);

        let analyses: Vec<AnalysisResult> =
            recent.iter().map(|e| self.analyze(&e.content)).collect();

        let recurring_emotions = rank_labels(
            analyses.iter().flat_map(|a| a.emotions.iter()),
            RECURRING_EMOTIONS,
        );
        let recurring_themes = rank_labels(
            analyses.iter().flat_map(|a| a.themes.iter()),
            RECURRING_THEMES,
        );
        let recurring_needs =
            rank_labels(analyses.iter().flat_map(|a| a.needs.iter()), RECURRING_NEEDS);

        let insight = render_insight(
            recurring_emotions.first().map(String::as_str),
            recurring_themes.first().map(String::as_str),
        );

        debug!(
            entries = analyses.len(),
            ?recurring_emotions,
            ?recurring_themes,
            "Pattern analysis complete"
        );

        PatternAnalysis {
            recurring_emotions,
            recurring_themes,
            recurring_needs,
            insight,
        }
    }

    /// Mined low-mood patterns, strongest first
    pub fn find_mood_patterns(&self, entries: &[Entry]) -> BestEffort<Vec<Pattern>> {
        self.miner.mine(entries)
    }

    /// Aggregate statistics over an entry history.
    pub fn analytics_summary(&self, entries: &[Entry]) -> BestEffort<AnalyticsSummary> {
        if entries.is_empty() {
            return BestEffort::full(AnalyticsSummary::empty());
        }

        let scores: Vec<f64> = entries
            .iter()
            .map(|e| e.sentiment_score)
            .filter(|s| s.is_finite())
            .collect();
        if scores.len() < entries.len() {
            warn!(
                skipped = entries.len() - scores.len(),
                "Ignoring non-finite sentiment scores in summary"
            );
        }
        let avg_sentiment = if scores.is_empty() {
            0.0
        } else {
            round2(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        let mut mood_distribution = BTreeMap::new();
        for entry in entries {
            *mood_distribution
                .entry(entry.mood_level.to_string())
                .or_insert(0) += 1;
        }

        let most_common_keywords = most_common_keywords(entries, SUMMARY_KEYWORDS)
            .into_iter()
            .map(|(keyword, _)| keyword)
            .collect();

        self.find_mood_patterns(entries).map(|patterns| AnalyticsSummary {
            avg_sentiment,
            mood_distribution,
            total_entries: entries.len(),
            most_common_keywords,
            patterns,
        })
    }

    /// Entries written within the last `days` days of `now`, oldest first
    pub fn mood_trends(
        &self,
        entries: &[Entry],
        days: i64,
        now: DateTime<Utc>,
    ) -> Vec<MoodTrendPoint> {
        let cutoff = now - Duration::days(days);
        let mut recent: Vec<&Entry> = entries.iter().filter(|e| e.created_at >= cutoff).collect();
        recent.sort_by_key(|e| e.created_at);
        recent
            .into_iter()
            .map(|e| MoodTrendPoint {
                date: e.created_at.to_rfc3339(),
                sentiment: e.sentiment_score,
                mood_level: e.mood_level,
                title: e.title.clone(),
            })
            .collect()
    }
}
