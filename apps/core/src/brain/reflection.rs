//! Reflections, followup questions, encouragement and a risk screen.
//!
//! Every scan here runs in a fixed priority order; changing the order of the
//! lexicon tables changes which text is produced when several labels match.
//! Randomness is confined to choosing within a prompt pool and comes from a
//! caller-supplied RNG.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::lexicon::{
    EMOTION_REFLECTIONS, ENCOURAGE_ANGER, ENCOURAGE_ANXIETY, ENCOURAGE_GENERIC, ENCOURAGE_JOY,
    ENCOURAGE_LONELINESS, ENCOURAGE_SADNESS, FOLLOWUP_PROMPTS, GENERIC_REFLECTION, HARM_TERMS,
    NEED_REFLECTIONS, SENTIMENT_PROMPTS, THEME_REFLECTIONS,
};
use super::report::AnalysisResult;
use crate::models::Entry;

/// At most this many sentences make up a reflection.
const MAX_REFLECTION_SENTENCES: usize = 3;

/// Score at or below which an entry counts as negative for the risk screen.
const NEGATIVE_ENTRY_THRESHOLD: f64 = -0.3;

fn key_matches(key: &str, labels: &[String]) -> bool {
    key.split('|').any(|k| labels.iter().any(|l| l == k))
}

/// Build a reflection from up to three matching priority keys.
pub fn compose_reflection(emotions: &[String], themes: &[String], needs: &[String]) -> String {
    let scans: [(&[(&str, &str)], &[String]); 3] = [
        (EMOTION_REFLECTIONS, emotions),
        (THEME_REFLECTIONS, themes),
        (NEED_REFLECTIONS, needs),
    ];

    let sentences: Vec<&str> = scans
        .iter()
        .flat_map(|(table, labels)| {
            table
                .iter()
                .filter(move |(key, _)| key_matches(key, labels))
                .map(|(_, sentence)| *sentence)
        })
        .take(MAX_REFLECTION_SENTENCES)
        .collect();

    if sentences.is_empty() {
        GENERIC_REFLECTION.to_string()
    } else {
        sentences.join(" ")
    }
}

/// Pick a followup question for the first candidate emotion present, or fall
/// back to the analysis reflection.
pub fn followup<R: Rng + ?Sized>(analysis: &AnalysisResult, rng: &mut R) -> String {
    FOLLOWUP_PROMPTS
        .iter()
        .find(|(emotion, _)| analysis.has_emotion(emotion))
        .and_then(|(_, pool)| pool.choose(rng))
        .map(|prompt| prompt.to_string())
        .unwrap_or_else(|| analysis.reflection.clone())
}

/// A fixed encouragement line per emotional branch.
pub fn encouragement(analysis: &AnalysisResult) -> String {
    let message = if analysis.has_emotion("anxiety") || analysis.has_emotion("stress") {
        ENCOURAGE_ANXIETY
    } else if analysis.has_emotion("sadness") {
        ENCOURAGE_SADNESS
    } else if analysis.has_emotion("anger") {
        ENCOURAGE_ANGER
    } else if analysis.has_emotion("loneliness") {
        ENCOURAGE_LONELINESS
    } else if analysis.has_emotion("joy") || analysis.has_emotion("gratitude") {
        ENCOURAGE_JOY
    } else {
        ENCOURAGE_GENERIC
    };
    message.to_string()
}

/// Sentiment bucket name for a score.
pub fn sentiment_bucket(score: f64) -> &'static str {
    if score <= -0.6 {
        "very_negative"
    } else if score <= -0.2 {
        "negative"
    } else if score <= 0.2 {
        "neutral"
    } else if score <= 0.6 {
        "positive"
    } else {
        "very_positive"
    }
}

/// Followup chosen purely from the sentiment bucket of `score`.
pub fn sentiment_followup<R: Rng + ?Sized>(score: f64, rng: &mut R) -> String {
    let bucket = sentiment_bucket(score);
    SENTIMENT_PROMPTS
        .iter()
        .find(|(name, _)| *name == bucket)
        .or_else(|| SENTIMENT_PROMPTS.iter().find(|(name, _)| *name == "neutral"))
        .and_then(|(_, pool)| pool.choose(rng))
        .map(|prompt| prompt.to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskIndicators {
    pub very_low_sentiment: bool,
    pub repeated_negative: bool,
    pub mentions_harm: bool,
}

impl RiskIndicators {
    fn count(&self) -> usize {
        [self.very_low_sentiment, self.repeated_negative, self.mentions_harm]
            .iter()
            .filter(|flag| **flag)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub indicators: RiskIndicators,
    pub needs_intervention: bool,
}

fn mentions_harm(text: &str) -> bool {
    let text_lower = text.to_lowercase();
    HARM_TERMS.iter().any(|term| text_lower.contains(term))
}

/// Screen an entry for risk indicators.
///
/// `recent` is the user's recent history; the entry itself is counted once
/// whether or not it appears there.
pub fn evaluate_risk(entry: &Entry, recent: &[Entry]) -> RiskAssessment {
    let negative_history = recent
        .iter()
        .filter(|e| e.id != entry.id && e.sentiment_score <= NEGATIVE_ENTRY_THRESHOLD)
        .count();
    let negative_total =
        negative_history + usize::from(entry.sentiment_score <= NEGATIVE_ENTRY_THRESHOLD);

    let indicators = RiskIndicators {
        very_low_sentiment: entry.sentiment_score <= -0.8,
        repeated_negative: negative_total >= 3,
        mentions_harm: mentions_harm(&entry.content),
    };

    let risk_level = match indicators.count() {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    };

    RiskAssessment {
        needs_intervention: risk_level == RiskLevel::High,
        risk_level,
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn analysis(emotions: &[&str]) -> AnalysisResult {
        AnalysisResult {
            emotions: labels(emotions),
            themes: vec![],
            needs: vec![],
            sentiment: 0.0,
            reflection: "fallback reflection".to_string(),
        }
    }

    #[test]
    fn test_reflection_priority_and_cap() {
        let reflection = compose_reflection(
            &labels(&["joy", "anxiety", "sadness", "anger"]),
            &labels(&["work"]),
            &[],
        );
        // anxiety, sadness, anger win over joy and work
        assert!(reflection.starts_with("It sounds like worry"));
        assert!(reflection.contains("heaviness"));
        assert!(reflection.contains("crossed a line"));
        assert!(!reflection.contains("bright, energetic"));
        assert!(!reflection.contains("Work seems"));
    }

    #[test]
    fn test_reflection_spans_categories() {
        let reflection =
            compose_reflection(&labels(&["excitement"]), &labels(&["health"]), &labels(&["rest"]));
        assert_eq!(
            reflection,
            "There is a bright, energetic feeling running through this entry. \
             Your body and wellbeing are part of this story too. \
             Your mind and body may be asking for some rest."
        );
    }

    #[test]
    fn test_reflection_generic_fallback() {
        assert_eq!(compose_reflection(&labels(&["neutral"]), &[], &[]), GENERIC_REFLECTION);
    }

    #[test]
    fn test_followup_uses_first_candidate_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let question = followup(&analysis(&["joy", "sadness"]), &mut rng);
        let sadness_pool = FOLLOWUP_PROMPTS
            .iter()
            .find(|(e, _)| *e == "sadness")
            .map(|(_, pool)| pool)
            .unwrap();
        assert!(sadness_pool.contains(&question.as_str()));
    }

    #[test]
    fn test_followup_is_seedable() {
        let subject = analysis(&["anxiety"]);
        let a = followup(&subject, &mut StdRng::seed_from_u64(42));
        let b = followup(&subject, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_followup_falls_back_to_reflection() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(followup(&analysis(&["calm"]), &mut rng), "fallback reflection");
    }

    #[test]
    fn test_encouragement_branches() {
        assert_eq!(encouragement(&analysis(&["stress"])), ENCOURAGE_ANXIETY);
        assert_eq!(encouragement(&analysis(&["sadness", "anger"])), ENCOURAGE_SADNESS);
        assert_eq!(encouragement(&analysis(&["anger"])), ENCOURAGE_ANGER);
        assert_eq!(encouragement(&analysis(&["loneliness"])), ENCOURAGE_LONELINESS);
        assert_eq!(encouragement(&analysis(&["gratitude"])), ENCOURAGE_JOY);
        assert_eq!(encouragement(&analysis(&["neutral"])), ENCOURAGE_GENERIC);
    }

    #[test]
    fn test_sentiment_buckets() {
        assert_eq!(sentiment_bucket(-0.9), "very_negative");
        assert_eq!(sentiment_bucket(-0.6), "very_negative");
        assert_eq!(sentiment_bucket(-0.3), "negative");
        assert_eq!(sentiment_bucket(0.0), "neutral");
        assert_eq!(sentiment_bucket(0.5), "positive");
        assert_eq!(sentiment_bucket(0.61), "very_positive");

        let mut rng = StdRng::seed_from_u64(3);
        let prompt = sentiment_followup(0.9, &mut rng);
        assert!(!prompt.is_empty());
    }

    #[test]
    fn test_risk_levels() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let calm = Entry::new(1, "A quiet walk in the park", at).with_sentiment(0.3);
        assert_eq!(evaluate_risk(&calm, &[]).risk_level, RiskLevel::Low);

        let grim = Entry::new(2, "I feel hopeless", at).with_sentiment(-0.85);
        let assessment = evaluate_risk(&grim, &[]);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!(assessment.needs_intervention);

        let walk = Entry::new(3, "Went for a long walk", at).with_sentiment(0.2);
        assert!(!evaluate_risk(&walk, &[]).indicators.mentions_harm);
    }

    #[test]
    fn test_harm_mentions_match_inflections() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        for text in [
            "I keep thinking about self-harm",
            "I harmed myself last night",
            "feelings of hopelessness",
            "My grandmother died",
            "Everything feels hopeless.",
            "Sometimes I want to END IT ALL",
        ] {
            let entry = Entry::new(4, text, at);
            assert!(
                evaluate_risk(&entry, &[]).indicators.mentions_harm,
                "Expected harm mention in '{}'",
                text
            );
        }
    }

    #[test]
    fn test_repeated_negative_history() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let history: Vec<Entry> = (0..3)
            .map(|i| Entry::new(10 + i, "rough day", at - Duration::days(i)).with_sentiment(-0.5))
            .collect();
        let entry = Entry::new(99, "another rough day", at).with_sentiment(-0.4);

        let assessment = evaluate_risk(&entry, &history);
        assert!(assessment.indicators.repeated_negative);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);

        // the entry itself is not double counted
        let assessment = evaluate_risk(&history[0], &history[..2]);
        assert!(!assessment.indicators.repeated_negative);
    }
}
