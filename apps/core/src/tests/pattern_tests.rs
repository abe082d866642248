//! Pattern Module Tests
//!
//! Scenarios for the pattern miner plus the cross-entry reports built on it:
//! recurring-label analysis and the analytics summary.

use crate::brain::patterns::{keyword_correlation, sequence_correlation};
use crate::brain::{JournalAnalyzer, Pattern, PatternMiner};
use crate::config::AnalyzerConfig;
use crate::models::Entry;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn day(offset: i64) -> DateTime<Utc> {
    // 2024-01-01 was a Monday
    Utc.with_ymd_and_hms(2024, 1, 1, 21, 30, 0).unwrap() + Duration::days(offset)
}

fn find<'a>(patterns: &'a [Pattern], prefix: &str) -> Option<&'a Pattern> {
    patterns.iter().find(|p| p.trigger.starts_with(prefix))
}

#[cfg(test)]
mod miner_tests {
    use super::*;

    #[test]
    fn test_deadline_sequence_scenario() {
        let entries: Vec<Entry> = (0..3)
            .map(|i| {
                Entry::new(i, "Deadline again", day(i))
                    .with_sentiment(-0.5)
                    .with_keywords(&["deadline"])
            })
            .collect();

        let patterns = PatternMiner::new().mine(&entries).into_value();
        let sequence = find(&patterns, "Consecutive low mood").expect("sequence pattern");
        assert!(sequence.trigger.contains("deadline"));
        assert_eq!(sequence.confidence, 0.7);
        assert_eq!(sequence.frequency, 3);
        assert_eq!(sequence.avg_sentiment_impact, -0.5);
    }

    #[test]
    fn test_money_keyword_scenario() {
        let entries = vec![
            Entry::new(1, "", day(0)).with_sentiment(-0.4).with_keywords(&["money"]),
            Entry::new(2, "", day(1)).with_sentiment(0.3).with_keywords(&["walk"]),
            Entry::new(3, "", day(2)).with_sentiment(-0.5).with_keywords(&["money", "rent"]),
            Entry::new(4, "", day(3)).with_sentiment(0.3).with_keywords(&["walk"]),
            Entry::new(5, "", day(4)).with_sentiment(-0.6).with_keywords(&["money"]),
        ];

        let patterns = keyword_correlation(&entries).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].trigger, "Entries mentioning 'money'");
        assert!((patterns[0].avg_sentiment_impact - (-0.5)).abs() < 1e-9);
        assert_eq!(patterns[0].confidence, 0.6);
        assert_eq!(patterns[0].frequency, 3);

        let mined = PatternMiner::new().mine(&entries).into_value();
        assert_eq!(mined, patterns);
    }

    #[test]
    fn test_short_history_yields_nothing() {
        let miner = PatternMiner::new();
        assert!(miner.mine(&[]).value.is_empty());

        let two: Vec<Entry> = (0..2)
            .map(|i| Entry::new(i, "", day(i)).with_sentiment(-1.0).with_keywords(&["x1x1"]))
            .collect();
        assert!(miner.mine(&two).value.is_empty());
    }

    #[test]
    fn test_output_sorted_and_capped() {
        let entries: Vec<Entry> = (0..8)
            .map(|i| {
                Entry::new(i, "", day(i))
                    .with_sentiment(-0.6)
                    .with_keywords(&["work", "sleep", "money"])
            })
            .collect();

        let patterns = PatternMiner::new().mine(&entries).into_value();
        assert_eq!(patterns.len(), 5);
        assert!(patterns
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence));
        // keyword patterns lead, in first-seen order
        assert_eq!(patterns[0].trigger, "Entries mentioning 'work'");
        assert_eq!(patterns[1].trigger, "Entries mentioning 'sleep'");
        assert_eq!(patterns[2].trigger, "Entries mentioning 'money'");
        assert_eq!(patterns[3].confidence, 0.7);
    }

    #[test]
    fn test_overlapping_windows_not_deduplicated() {
        let entries: Vec<Entry> = (0..5)
            .map(|i| {
                Entry::new(i, "", day(i))
                    .with_sentiment(-0.8)
                    .with_keywords(&["insomnia"])
            })
            .collect();
        let patterns = sequence_correlation(&entries).unwrap();
        assert_eq!(patterns.len(), 3);
        assert!(patterns.iter().all(|p| p == &patterns[0]));
    }

    #[test]
    fn test_configured_limits() {
        let entries: Vec<Entry> = (0..8)
            .map(|i| {
                Entry::new(i, "", day(i))
                    .with_sentiment(-0.6)
                    .with_keywords(&["work", "sleep", "money"])
            })
            .collect();
        let miner = PatternMiner::with_limits(10, 2);
        assert!(miner.mine(&entries).value.is_empty());

        let miner = PatternMiner::with_limits(3, 2);
        assert_eq!(miner.mine(&entries).value.len(), 2);
    }

    #[test]
    fn test_degraded_mining_when_every_detector_fails() {
        let analyzer = JournalAnalyzer::new();
        let entries = vec![
            Entry::new(1, "", day(0)).with_sentiment(-0.5).with_keywords(&["work"]),
            Entry::new(2, "", day(1)).with_sentiment(f64::NAN).with_keywords(&["work"]),
            Entry::new(3, "", day(2)).with_sentiment(-0.5).with_keywords(&["work"]),
        ];
        let result = analyzer.find_mood_patterns(&entries);
        assert!(result.is_degraded());
        assert!(result.value.is_empty());
        assert!(result.reason().unwrap().contains("Non-finite score"));
    }

    #[test]
    fn test_keyword_pattern_survives_failed_detectors() {
        let analyzer = JournalAnalyzer::new();
        let entries = vec![
            Entry::new(1, "", day(0)).with_sentiment(-0.5).with_keywords(&["money"]),
            Entry::new(2, "", day(1)).with_sentiment(-0.5).with_keywords(&["money", "rent"]),
            Entry::new(3, "Unscored draft", day(2)).with_sentiment(f64::NAN),
        ];

        let result = analyzer.find_mood_patterns(&entries);
        assert!(result.is_degraded());
        assert!(!result.reason().unwrap().contains("keyword_correlation"));
        let money = find(&result.value, "Entries mentioning 'money'").expect("keyword pattern");
        assert_eq!(money.frequency, 2);
        assert_eq!(money.avg_sentiment_impact, -0.5);
    }
}

#[cfg(test)]
mod pattern_analysis_tests {
    use super::*;

    #[test]
    fn test_recurring_labels_and_insight() {
        let analyzer = JournalAnalyzer::new();
        let entries = vec![
            Entry::new(1, "Anxious about the project at work", day(0)),
            Entry::new(2, "Still anxious, work keeps piling up", day(1)),
            Entry::new(3, "Work meeting left me anxious and tired", day(2)),
        ];

        let analysis = analyzer.pattern_analysis(&entries);
        assert_eq!(analysis.recurring_emotions[0], "anxiety");
        assert_eq!(analysis.recurring_themes[0], "work");
        assert_eq!(analysis.recurring_needs, vec!["rest"]);
        assert_eq!(
            analysis.insight,
            "Anxiety has been a frequent visitor in your recent entries especially around work. \
             Noticing what sets it off is a powerful first step."
        );
    }

    #[test]
    fn test_only_recent_entries_count() {
        let config = AnalyzerConfig {
            history_limit: 2,
            ..AnalyzerConfig::default()
        };
        let analyzer = JournalAnalyzer::with_config(config).unwrap();
        let entries = vec![
            Entry::new(1, "Anxious all day", day(0)),
            Entry::new(2, "So anxious again", day(1)),
            Entry::new(3, "Happy and calm by the lake", day(11)),
            Entry::new(4, "Anxious before the trip", day(2)),
            Entry::new(5, "A happy afternoon in the garden", day(10)),
        ];

        let analysis = analyzer.pattern_analysis(&entries);
        assert_eq!(analysis.recurring_emotions, vec!["joy", "calm"]);
    }

    #[test]
    fn test_limits_on_recurring_lists() {
        let analyzer = JournalAnalyzer::new();
        let entries = vec![Entry::new(
            1,
            "Angry, sad, lonely, anxious and stressed about work, money, my family and my health. \
             I need help, I should rest, I want to connect and I hope to grow.",
            day(0),
        )];

        let analysis = analyzer.pattern_analysis(&entries);
        assert_eq!(analysis.recurring_emotions.len(), 3);
        assert_eq!(analysis.recurring_themes.len(), 3);
        assert_eq!(analysis.recurring_needs.len(), 2);
    }

    #[test]
    fn test_empty_history() {
        let analyzer = JournalAnalyzer::new();
        let analysis = analyzer.pattern_analysis(&[]);
        assert!(analysis.recurring_emotions.is_empty());
        assert!(analysis.recurring_themes.is_empty());
        assert!(analysis.recurring_needs.is_empty());
        assert_eq!(
            analysis.insight,
            "Your entries show a mix of experiences. \
             Keep journaling to uncover deeper patterns over time."
        );
    }
}

#[cfg(test)]
mod analytics_tests {
    use super::*;

    #[test]
    fn test_summary_aggregates() {
        let analyzer = JournalAnalyzer::new();
        let entries = vec![
            Entry::new(1, "", day(0)).with_sentiment(0.5).with_mood(3).with_keywords(&["garden", "sun"]),
            Entry::new(2, "", day(1)).with_sentiment(-0.25).with_mood(3).with_keywords(&["rain"]),
            Entry::new(3, "", day(2)).with_sentiment(0.1).with_mood(5).with_keywords(&["garden"]),
        ];

        let summary = analyzer.analytics_summary(&entries);
        assert!(!summary.is_degraded());
        let summary = summary.into_value();
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.avg_sentiment, 0.12);
        assert_eq!(summary.mood_distribution.get("3"), Some(&2));
        assert_eq!(summary.mood_distribution.get("5"), Some(&1));
        assert_eq!(summary.most_common_keywords, vec!["garden", "sun", "rain"]);
        assert!(summary.patterns.is_empty());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("avgSentiment").is_some());
        assert!(json.get("moodDistribution").is_some());
    }

    #[test]
    fn test_summary_of_nothing() {
        let analyzer = JournalAnalyzer::new();
        let summary = analyzer.analytics_summary(&[]).into_value();
        assert_eq!(summary.total_entries, 0);
        assert_eq!(summary.avg_sentiment, 0.0);
        assert!(summary.mood_distribution.is_empty());
    }
}
