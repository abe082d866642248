//! Emotion, theme and need detection.
//!
//! Labels are selected by substring lookup against the lexicons. Emotions fall
//! back to a sentiment-derived label when nothing matches, so the emotion list
//! is never empty. Themes and needs have no fallback.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

use super::lexicon::{Lexicon, EMOTIONS, NEEDS, NEGATIVE_WORDS, POSITIVE_WORDS, THEMES};
use super::reflection::compose_reflection;
use super::report::AnalysisResult;
use super::sentiment::{round2, words, RuleBasedEstimator, SentimentScorer};

/// Emotional word count above which an intensity label is prepended.
const INTENSITY_WORD_THRESHOLD: usize = 5;

const REFLECTIVE_PHRASES: &[&str] = &[
    "i think", "i feel", "i believe", "i realize", "perhaps", "maybe",
];

const OTHER_PEOPLE: &[&str] = &["my", "they", "he", "she", "we", "their", "someone", "people"];

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?\n]+").expect("Invalid regex: sentence boundary"));

/// Split text into trimmed, non-empty sentences.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Per-sentence intensity measures for a text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionIntensity {
    pub positive_intensity: f64,
    pub negative_intensity: f64,
    pub emotional_words_count: usize,
    pub avg_sentence_sentiment: f64,
    pub sentiment_variance: f64,
}

/// Narrative cues in a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalContext {
    pub has_questions: bool,
    pub has_exclamations: bool,
    pub is_reflective: bool,
    pub mentions_others: bool,
    pub is_narrative: bool,
    pub text_length: usize,
}

fn matching_labels(lexicons: &[Lexicon], text_lower: &str) -> Vec<String> {
    lexicons
        .iter()
        .filter(|lex| lex.matches(text_lower))
        .map(|lex| lex.label.to_string())
        .collect()
}

/// Label used when no emotion trigger matched.
pub fn fallback_emotion(sentiment: f64) -> &'static str {
    if sentiment > 0.4 {
        "joy"
    } else if sentiment > 0.1 {
        "calm"
    } else if sentiment < -0.4 {
        "sadness"
    } else if sentiment < -0.1 {
        "stress"
    } else {
        "neutral"
    }
}

/// Count of words found in the curated positive/negative lists.
pub fn emotional_word_count(text: &str) -> usize {
    sentences(text)
        .into_iter()
        .flat_map(words)
        .filter(|w| POSITIVE_WORDS.contains(&w.as_str()) || NEGATIVE_WORDS.contains(&w.as_str()))
        .count()
}

/// Maps text to emotions, themes, needs and a reflection.
#[derive(Debug, Clone, Default)]
pub struct EmotionAnalyzer {
    scorer: SentimentScorer,
    rule_based: RuleBasedEstimator,
}

impl EmotionAnalyzer {
    pub fn new(scorer: SentimentScorer) -> Self {
        Self {
            scorer,
            rule_based: RuleBasedEstimator::new(),
        }
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    /// Analyze a text. Deterministic for identical input.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let text_lower = text.to_lowercase();
        let sentiment = self.scorer.score(text).into_value();

        let mut emotions = matching_labels(EMOTIONS, &text_lower);
        if emotions.is_empty() {
            emotions.push(fallback_emotion(sentiment).to_string());
        }

        let emotional_words = emotional_word_count(text);
        if emotional_words > INTENSITY_WORD_THRESHOLD && !emotions.iter().any(|e| e == "excitement")
        {
            let label = if sentiment > 0.0 { "excitement" } else { "intensity" };
            if !emotions.iter().any(|e| e == label) {
                emotions.insert(0, label.to_string());
            }
        }

        let themes = matching_labels(THEMES, &text_lower);
        let needs = matching_labels(NEEDS, &text_lower);
        let reflection = compose_reflection(&emotions, &themes, &needs);

        debug!(
            ?emotions,
            ?themes,
            ?needs,
            sentiment,
            emotional_words,
            "Analyzed entry text"
        );

        AnalysisResult {
            emotions,
            themes,
            needs,
            sentiment,
            reflection,
        }
    }

    /// Measure emotional intensity across sentences.
    pub fn intensity(&self, text: &str) -> EmotionIntensity {
        let sentence_list = sentences(text);
        if sentence_list.is_empty() {
            return EmotionIntensity::default();
        }

        let scores: Vec<f64> = sentence_list
            .iter()
            .map(|s| self.rule_based.compound(s))
            .collect();
        let n = scores.len() as f64;
        let positive: f64 = scores.iter().filter(|s| **s > 0.1).sum();
        let negative: f64 = scores.iter().filter(|s| **s < -0.1).sum();
        let mean = scores.iter().sum::<f64>() / n;
        let variance = if scores.len() > 1 {
            scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n
        } else {
            0.0
        };

        EmotionIntensity {
            positive_intensity: round2(positive / n),
            negative_intensity: round2((negative / n).abs()),
            emotional_words_count: emotional_word_count(text),
            avg_sentence_sentiment: round2(mean),
            sentiment_variance: round2(variance),
        }
    }

    /// Detect narrative and reflective cues.
    pub fn emotional_context(&self, text: &str) -> EmotionalContext {
        let text_lower = text.to_lowercase();
        let tokens = words(text);

        EmotionalContext {
            has_questions: text.contains('?'),
            has_exclamations: text.contains('!'),
            is_reflective: REFLECTIVE_PHRASES.iter().any(|p| text_lower.contains(p)),
            mentions_others: tokens.iter().any(|w| OTHER_PEOPLE.contains(&w.as_str())),
            is_narrative: sentences(text).len() > 3,
            text_length: text.split_whitespace().count(),
        }
    }
}
