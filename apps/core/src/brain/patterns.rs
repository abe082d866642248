//! Cross-entry mood pattern mining.
//!
//! Three detectors run independently over a user's history:
//! 1. keyword correlation: keywords whose entries average clearly negative
//! 2. temporal correlation: weekdays whose entries average negative
//! 3. consecutive sequences: runs of three low entries sharing keywords
//!
//! Results are merged, sorted by confidence (descending, stable) and truncated.
//! A detector that fails contributes nothing; the others are unaffected.

use tracing::{debug, warn};

use super::report::Pattern;
use super::sentiment::round2;
use crate::error::{AnalysisError, BestEffort, Result};
use crate::models::Entry;

/// Fewer entries than this yields no patterns.
pub const MIN_ENTRIES: usize = 3;

/// Upper bound on returned patterns.
pub const MAX_PATTERNS: usize = 5;

const KEYWORD_SENTIMENT_THRESHOLD: f64 = -0.3;
const TEMPORAL_SENTIMENT_THRESHOLD: f64 = -0.2;
const SEQUENCE_SENTIMENT_THRESHOLD: f64 = -0.3;
const SEQUENCE_CONFIDENCE: f64 = 0.7;
const SEQUENCE_WINDOW: usize = 3;
/// Shared keywords considered per window before the frequency filter.
const SEQUENCE_TOP_KEYWORDS: usize = 3;

/// Groups values by key, keeping keys in first-seen order.
struct OrderedGroups<T> {
    groups: Vec<(String, Vec<T>)>,
}

impl<T> OrderedGroups<T> {
    fn new() -> Self {
        Self { groups: Vec::new() }
    }

    fn push(&mut self, key: &str, value: T) {
        match self.groups.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value),
            None => self.groups.push((key.to_string(), vec![value])),
        }
    }

    fn into_groups(self) -> impl Iterator<Item = (String, Vec<T>)> {
        self.groups.into_iter()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn finite_score(entry: &Entry) -> Result<f64> {
    if entry.sentiment_score.is_finite() {
        Ok(entry.sentiment_score)
    } else {
        Err(AnalysisError::NonFiniteScore(format!("entry {}", entry.id)))
    }
}

/// Most frequent keywords across `entries`, ties by first occurrence.
pub fn most_common_keywords<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    limit: usize,
) -> Vec<(String, usize)> {
    let mut counts: OrderedGroups<()> = OrderedGroups::new();
    for entry in entries {
        for keyword in entry.keyword_list() {
            counts.push(&keyword, ());
        }
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_groups()
        .map(|(keyword, hits)| (keyword, hits.len()))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Mines recurring low-mood patterns from an entry history.
#[derive(Debug, Clone)]
pub struct PatternMiner {
    min_entries: usize,
    max_patterns: usize,
}

impl Default for PatternMiner {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMiner {
    pub fn new() -> Self {
        Self::with_limits(MIN_ENTRIES, MAX_PATTERNS)
    }

    /// `min_entries` never drops below 3 and `max_patterns` never exceeds 5.
    pub fn with_limits(min_entries: usize, max_patterns: usize) -> Self {
        Self {
            min_entries: min_entries.max(MIN_ENTRIES),
            max_patterns: max_patterns.min(MAX_PATTERNS),
        }
    }

    /// Run all detectors. Never fails; a failed detector marks the result degraded.
    pub fn mine(&self, entries: &[Entry]) -> BestEffort<Vec<Pattern>> {
        if entries.len() < self.min_entries {
            return BestEffort::full(vec![]);
        }

        let detectors: [(&str, fn(&[Entry]) -> Result<Vec<Pattern>>); 3] = [
            ("keyword_correlation", keyword_correlation),
            ("temporal_correlation", temporal_correlation),
            ("sequence_correlation", sequence_correlation),
        ];

        let mut patterns = Vec::new();
        let mut failures = Vec::new();
        for (name, detector) in detectors {
            match detector(entries) {
                Ok(found) => {
                    debug!(detector = name, count = found.len(), "Detector finished");
                    patterns.extend(found);
                }
                Err(err) => {
                    warn!(detector = name, error = %err, "Pattern detector failed");
                    failures.push(format!("{}: {}", name, err));
                }
            }
        }

        // Stable: equal confidences keep detector order
        patterns.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        patterns.truncate(self.max_patterns);

        if failures.is_empty() {
            BestEffort::full(patterns)
        } else {
            BestEffort::degraded(patterns, failures.join("; "))
        }
    }
}

/// Keywords appearing in at least two entries whose mean sentiment is below -0.3.
pub fn keyword_correlation(entries: &[Entry]) -> Result<Vec<Pattern>> {
    let mut groups = OrderedGroups::new();
    for entry in entries {
        let keywords = entry.keyword_list();
        if keywords.is_empty() {
            continue;
        }
        let score = finite_score(entry)?;
        for keyword in keywords {
            groups.push(&keyword, score);
        }
    }

    let total = entries.len() as f64;
    Ok(groups
        .into_groups()
        .filter(|(_, scores)| scores.len() >= 2)
        .filter_map(|(keyword, scores)| {
            let avg = mean(&scores);
            (avg < KEYWORD_SENTIMENT_THRESHOLD).then(|| Pattern {
                trigger: format!("Entries mentioning '{}'", keyword),
                confidence: (scores.len() as f64 / total).min(1.0),
                frequency: scores.len(),
                avg_sentiment_impact: round2(avg),
            })
        })
        .collect())
}

/// Weekdays with at least two entries whose mean sentiment is below -0.2.
pub fn temporal_correlation(entries: &[Entry]) -> Result<Vec<Pattern>> {
    let mut groups = OrderedGroups::new();
    for entry in entries {
        let day = entry.created_at.format("%A").to_string();
        groups.push(&day, finite_score(entry)?);
    }

    let total = entries.len() as f64;
    Ok(groups
        .into_groups()
        .filter(|(_, scores)| scores.len() >= 2)
        .filter_map(|(day, scores)| {
            let avg = mean(&scores);
            (avg < TEMPORAL_SENTIMENT_THRESHOLD).then(|| Pattern {
                trigger: format!("Mood pattern on {}s", day),
                confidence: (scores.len() as f64 / total).min(1.0),
                frequency: scores.len(),
                avg_sentiment_impact: round2(avg),
            })
        })
        .collect())
}

/// Runs of three chronologically consecutive low entries, one pattern per
/// keyword shared by at least two of them. Overlapping windows each report.
pub fn sequence_correlation(entries: &[Entry]) -> Result<Vec<Pattern>> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.created_at);

    let mut patterns = Vec::new();
    for window in sorted.windows(SEQUENCE_WINDOW) {
        let scores = window
            .iter()
            .map(|e| finite_score(e))
            .collect::<Result<Vec<f64>>>()?;
        if !scores.iter().all(|s| *s < SEQUENCE_SENTIMENT_THRESHOLD) {
            continue;
        }

        let avg = round2(mean(&scores));
        for (keyword, count) in most_common_keywords(window.iter().copied(), SEQUENCE_TOP_KEYWORDS) {
            if count < 2 {
                continue;
            }
            patterns.push(Pattern {
                trigger: format!("Consecutive low mood with '{}'", keyword),
                confidence: SEQUENCE_CONFIDENCE,
                frequency: SEQUENCE_WINDOW,
                avg_sentiment_impact: avg,
            });
        }
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn monday() -> chrono::DateTime<Utc> {
        // 2024-01-01 was a Monday
        Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_too_few_entries() {
        let miner = PatternMiner::new();
        let entries = vec![
            Entry::new(1, "a", monday()).with_sentiment(-0.9).with_keywords(&["work"]),
            Entry::new(2, "b", monday()).with_sentiment(-0.9).with_keywords(&["work"]),
        ];
        let result = miner.mine(&entries);
        assert!(result.value.is_empty());
        assert!(!result.is_degraded());

        // a lower configured minimum is raised back to three
        assert!(PatternMiner::with_limits(1, 5).mine(&entries).value.is_empty());
    }

    #[test]
    fn test_keyword_correlation_threshold() {
        let entries = vec![
            Entry::new(1, "", monday()).with_sentiment(-0.3).with_keywords(&["rain"]),
            Entry::new(2, "", monday()).with_sentiment(-0.3).with_keywords(&["rain"]),
            Entry::new(3, "", monday()).with_sentiment(0.5).with_keywords(&["sun"]),
        ];
        // mean of exactly -0.3 is not below the threshold
        assert!(keyword_correlation(&entries).unwrap().is_empty());
    }

    #[test]
    fn test_temporal_correlation_by_weekday() {
        let entries = vec![
            Entry::new(1, "", monday()).with_sentiment(-0.5),
            Entry::new(2, "", monday() + Duration::days(7)).with_sentiment(-0.3),
            Entry::new(3, "", monday() + Duration::days(1)).with_sentiment(0.8),
            Entry::new(4, "", monday() + Duration::days(2)).with_sentiment(0.2),
        ];
        let patterns = temporal_correlation(&entries).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].trigger, "Mood pattern on Mondays");
        assert_eq!(patterns[0].frequency, 2);
        assert_eq!(patterns[0].confidence, 0.5);
        assert_eq!(patterns[0].avg_sentiment_impact, -0.4);
    }

    #[test]
    fn test_sequence_windows_overlap() {
        let entries: Vec<Entry> = (0..4)
            .map(|i| {
                Entry::new(i, "", monday() + Duration::days(i))
                    .with_sentiment(-0.6)
                    .with_keywords(&["insomnia"])
            })
            .collect();
        let patterns = sequence_correlation(&entries).unwrap();
        // two overlapping windows, each reporting the shared keyword
        assert_eq!(patterns.len(), 2);
        assert!(patterns.iter().all(|p| p.trigger.contains("insomnia")));
    }

    #[test]
    fn test_sequence_uses_chronological_order() {
        let entries = vec![
            Entry::new(1, "", monday() + Duration::days(2)).with_sentiment(-0.5).with_keywords(&["exam"]),
            Entry::new(2, "", monday() + Duration::days(5)).with_sentiment(0.9).with_keywords(&["exam"]),
            Entry::new(3, "", monday()).with_sentiment(-0.5).with_keywords(&["exam"]),
            Entry::new(4, "", monday() + Duration::days(1)).with_sentiment(-0.5).with_keywords(&["exam"]),
        ];
        let patterns = sequence_correlation(&entries).unwrap();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].avg_sentiment_impact, -0.5);
    }

    #[test]
    fn test_failed_detectors_leave_others_intact() {
        let miner = PatternMiner::new();
        // the unscored entry has no keywords, so only the keyword detector can finish
        let entries = vec![
            Entry::new(1, "", monday()).with_sentiment(-0.5).with_keywords(&["money"]),
            Entry::new(2, "", monday() + Duration::days(1))
                .with_sentiment(-0.5)
                .with_keywords(&["money"]),
            Entry::new(3, "", monday() + Duration::days(2)).with_sentiment(f64::NAN),
        ];

        let result = miner.mine(&entries);
        assert!(result.is_degraded());
        let reason = result.reason().unwrap();
        assert!(reason.contains("temporal_correlation"));
        assert!(reason.contains("sequence_correlation"));
        assert!(!reason.contains("keyword_correlation"));

        assert_eq!(result.value.len(), 1);
        assert_eq!(result.value[0].trigger, "Entries mentioning 'money'");
        assert_eq!(result.value[0].frequency, 2);
        assert!((result.value[0].confidence - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_keyword_entry_fails_keyword_detector() {
        let entries = vec![
            Entry::new(1, "", monday()).with_sentiment(-0.6).with_keywords(&["broken"]),
            Entry::new(2, "", monday()).with_sentiment(f64::NAN).with_keywords(&["broken"]),
        ];
        assert!(matches!(
            keyword_correlation(&entries),
            Err(AnalysisError::NonFiniteScore(_))
        ));
    }

    #[test]
    fn test_most_common_keywords_order() {
        let at = monday();
        let entries = vec![
            Entry::new(1, "", at).with_keywords(&["walk", "rain"]),
            Entry::new(2, "", at).with_keywords(&["rain", "coffee"]),
            Entry::new(3, "", at).with_keywords(&["coffee", "walk"]),
        ];
        let ranked = most_common_keywords(&entries, 2);
        assert_eq!(
            ranked,
            vec![("walk".to_string(), 2), ("rain".to_string(), 2)]
        );
    }
}
