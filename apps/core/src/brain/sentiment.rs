//! Sentiment scoring.
//!
//! Two independent polarity estimators are blended into a single score in
//! `[-1.0, 1.0]`:
//! - `RuleBasedEstimator`: valence lexicon with boosters, negation, caps
//!   emphasis, contrastive "but" and punctuation amplification. Tuned for
//!   informal text.
//! - `LexicalPolarityEstimator`: averaged adjective/adverb polarity with
//!   intensifiers and negation.
//!
//! Estimators are injected as `Arc<dyn PolarityEstimator>` handles, so tests can
//! swap them and no process-wide model instance exists.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

use super::lexicon::{NEGATIVE_WORDS, POSITIVE_WORDS};
use crate::error::{AnalysisError, BestEffort, Result};

/// Default share of the rule-based estimator in the blend.
pub const DEFAULT_RULE_WEIGHT: f64 = 0.6;

/// Valence lexicon for the rule-based estimator, on a -4..=4 scale.
const VALENCE: &[(&str, f64)] = &[
    // positive
    ("happy", 2.7), ("happier", 2.4), ("happiness", 2.6), ("glad", 2.0), ("joy", 2.8),
    ("joyful", 2.9), ("wonderful", 2.7), ("great", 3.1), ("good", 1.9), ("nice", 1.8),
    ("amazing", 2.8), ("awesome", 3.1), ("fantastic", 2.6), ("excellent", 2.7),
    ("lovely", 2.8), ("love", 3.2), ("loved", 2.9), ("loving", 2.9), ("like", 1.5),
    ("liked", 1.8), ("enjoy", 2.2), ("enjoyed", 2.3), ("fun", 2.3), ("grateful", 1.3),
    ("thankful", 2.7), ("thanks", 1.9), ("blessed", 2.9), ("calm", 1.3), ("peaceful", 2.2),
    ("relaxed", 2.2), ("content", 1.7), ("excited", 1.4), ("exciting", 2.2),
    ("thrilled", 2.6), ("proud", 2.1), ("confident", 2.2), ("strong", 2.3),
    ("successful", 2.8), ("success", 2.7), ("hope", 1.9), ("hopeful", 2.3),
    ("optimistic", 1.3), ("better", 1.9), ("best", 3.2), ("beautiful", 2.9),
    ("delighted", 3.0), ("cheerful", 2.5), ("fine", 0.8), ("okay", 0.9), ("ok", 1.2),
    ("win", 2.8), ("won", 2.7), ("accomplished", 1.8), ("productive", 1.6),
    ("energetic", 1.6), ("motivated", 1.9), ("inspired", 2.2), ("supported", 1.8),
    ("appreciate", 1.7), ("appreciated", 2.3), ("kind", 2.4), ("friendly", 2.2),
    ("safe", 1.9), ("comfortable", 1.5), ("rested", 1.4), ("smile", 1.5), ("laugh", 2.6),
    ("laughed", 2.0), ("perfect", 2.7), ("brilliant", 2.8), ("fantastically", 2.5),
    ("relief", 2.1), ("relieved", 1.9), ("satisfied", 1.8), ("improving", 1.5),
    ("care", 2.2), ("caring", 2.2), ("helpful", 1.9), ("yay", 2.4),
    // negative
    ("sad", -2.1), ("sadness", -1.9), ("unhappy", -1.8), ("depressed", -2.3),
    ("depression", -2.7), ("miserable", -2.2), ("anxious", -1.0), ("anxiety", -0.7),
    ("worried", -1.2), ("worry", -1.9), ("nervous", -1.2), ("panic", -2.3),
    ("stressed", -1.4), ("stress", -1.8), ("stressful", -2.0), ("overwhelmed", -1.6),
    ("angry", -2.3), ("anger", -2.7), ("furious", -2.8), ("mad", -2.2), ("annoyed", -1.6),
    ("irritated", -1.8), ("frustrated", -2.4), ("frustrating", -1.9),
    ("disappointed", -1.9), ("disappointing", -2.2), ("upset", -1.6), ("bad", -2.5),
    ("terrible", -2.1), ("awful", -2.0), ("horrible", -2.5), ("hate", -2.7),
    ("hated", -3.2), ("dislike", -1.6), ("pain", -2.3), ("painful", -1.9), ("hurt", -2.4),
    ("hurts", -2.2), ("sick", -2.3), ("tired", -1.9), ("exhausted", -1.5),
    ("scared", -1.9), ("afraid", -2.0), ("fear", -2.2), ("terrified", -3.0),
    ("lonely", -1.5), ("alone", -1.0), ("isolated", -1.3), ("lost", -1.3),
    ("confused", -1.3), ("broken", -2.1), ("cry", -2.1), ("crying", -2.1),
    ("cried", -1.6), ("tears", -0.9), ("hopeless", -2.0), ("worthless", -2.4),
    ("useless", -1.8), ("fail", -2.5), ("failed", -2.3), ("failure", -2.3),
    ("struggle", -1.3), ("struggling", -1.4), ("difficult", -1.5), ("hard", -0.4),
    ("problem", -1.7), ("problems", -1.7), ("worse", -2.1), ("worst", -3.1),
    ("ugly", -2.3), ("guilty", -1.8), ("ashamed", -2.1), ("embarrassed", -1.5),
    ("jealous", -2.0), ("bored", -1.1), ("boring", -1.3), ("heartbroken", -3.3),
    ("grief", -2.2), ("died", -2.6), ("death", -2.9), ("kill", -3.7), ("die", -2.9),
    ("suicide", -3.5), ("harm", -2.5), ("ruined", -2.4), ("mess", -1.5),
];

/// Intensity adjustments applied to the next sentiment-bearing word.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293), ("completely", 0.293), ("deeply", 0.293), ("especially", 0.293),
    ("extremely", 0.293), ("incredibly", 0.293), ("really", 0.293), ("so", 0.293),
    ("super", 0.293), ("totally", 0.293), ("truly", 0.293), ("very", 0.293),
    ("utterly", 0.293), ("hugely", 0.293), ("remarkably", 0.293), ("most", 0.293),
    ("barely", -0.293), ("hardly", -0.293), ("kinda", -0.293), ("sorta", -0.293),
    ("slightly", -0.293), ("somewhat", -0.293), ("marginally", -0.293), ("partly", -0.293),
    ("occasionally", -0.293), ("little", -0.293),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "cannot",
    "without", "dont", "cant", "wont", "didnt", "doesnt", "isnt", "wasnt", "arent", "werent",
    "couldnt", "wouldnt", "shouldnt", "havent", "hasnt", "hadnt", "aint",
];

/// Polarity lexicon for the lexical estimator, on a -1..=1 scale.
const POLARITY: &[(&str, f64)] = &[
    ("happy", 0.8), ("glad", 0.5), ("joyful", 0.8), ("wonderful", 1.0), ("great", 0.8),
    ("good", 0.7), ("nice", 0.6), ("amazing", 0.6), ("awesome", 1.0), ("fantastic", 0.4),
    ("excellent", 1.0), ("lovely", 0.5), ("perfect", 1.0), ("beautiful", 0.85),
    ("best", 1.0), ("better", 0.5), ("grateful", 0.6), ("thankful", 0.6), ("blessed", 0.5),
    ("calm", 0.3), ("peaceful", 0.5), ("relaxed", 0.4), ("content", 0.4), ("excited", 0.4),
    ("exciting", 0.3), ("proud", 0.8), ("confident", 0.5), ("strong", 0.43),
    ("successful", 0.75), ("hopeful", 0.5), ("fun", 0.3), ("kind", 0.6), ("friendly", 0.4),
    ("comfortable", 0.4), ("productive", 0.5), ("brilliant", 0.9), ("delighted", 0.7),
    ("cheerful", 0.6), ("fine", 0.42), ("love", 0.5), ("loved", 0.7), ("enjoyable", 0.5),
    ("sad", -0.5), ("unhappy", -0.6), ("depressed", -0.6), ("miserable", -1.0),
    ("anxious", -0.5), ("worried", -0.4), ("nervous", -0.3), ("stressed", -0.5),
    ("stressful", -0.5), ("overwhelmed", -0.4), ("angry", -0.5), ("furious", -0.9),
    ("mad", -0.6), ("annoyed", -0.4), ("frustrated", -0.7), ("frustrating", -0.6),
    ("disappointed", -0.75), ("upset", -0.5), ("bad", -0.7), ("terrible", -1.0),
    ("awful", -1.0), ("horrible", -1.0), ("painful", -0.7), ("hurt", -0.5), ("sick", -0.7),
    ("tired", -0.4), ("exhausted", -0.4), ("scared", -0.5), ("afraid", -0.6),
    ("terrified", -0.8), ("lonely", -0.5), ("alone", -0.3), ("lost", -0.2),
    ("confused", -0.4), ("broken", -0.4), ("hopeless", -0.8), ("worthless", -0.8),
    ("useless", -0.5), ("difficult", -0.5), ("hard", -0.3), ("worse", -0.4),
    ("worst", -1.0), ("ugly", -0.7), ("guilty", -0.5), ("boring", -1.0), ("bored", -0.5),
    ("heartbroken", -0.9), ("hate", -0.8), ("hated", -0.9),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3), ("really", 1.3), ("so", 1.3), ("extremely", 1.5), ("incredibly", 1.5),
    ("super", 1.4), ("totally", 1.4), ("absolutely", 1.5), ("quite", 1.1), ("pretty", 1.1),
    ("too", 1.2), ("slightly", 0.6), ("somewhat", 0.7), ("little", 0.7), ("bit", 0.7),
];

static VALENCE_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| VALENCE.iter().copied().collect());
static BOOSTER_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| BOOSTERS.iter().copied().collect());
static NEGATION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATIONS.iter().copied().collect());
static POLARITY_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| POLARITY.iter().copied().collect());
static INTENSIFIER_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// Rounds to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Splits on whitespace and strips leading/trailing punctuation, keeping case.
fn raw_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Lower-cased lookup form of a token; apostrophes are dropped so "can't" == "cant".
fn lookup_form(token: &str) -> String {
    token
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_negation(word: &str) -> bool {
    NEGATION_SET.contains(word)
}

fn is_all_caps(token: &str) -> bool {
    token.chars().filter(|c| c.is_alphabetic()).count() > 1
        && token
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

/// Lower-cased, punctuation-stripped words of `text`.
pub(crate) fn words(text: &str) -> Vec<String> {
    raw_tokens(text).into_iter().map(lookup_form).collect()
}

/// A source of polarity in `[-1.0, 1.0]`.
pub trait PolarityEstimator: Send + Sync {
    fn name(&self) -> &'static str;
    fn polarity(&self, text: &str) -> Result<f64>;
}

/// Lexicon- and grammar-aware estimator producing a normalised compound score.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedEstimator;

impl RuleBasedEstimator {
    const NEGATION_SCALAR: f64 = -0.74;
    const CAPS_INCREMENT: f64 = 0.733;
    const NORMALIZATION_ALPHA: f64 = 15.0;

    pub fn new() -> Self {
        Self
    }

    /// Compound score for `text`, in `[-1.0, 1.0]`.
    pub fn compound(&self, text: &str) -> f64 {
        let tokens = raw_tokens(text);
        if tokens.is_empty() {
            return 0.0;
        }
        let lowered: Vec<String> = tokens.iter().map(|t| lookup_form(t)).collect();
        let caps_differential = {
            let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
            caps > 0 && caps < tokens.len()
        };

        let mut sentiments = vec![0.0; tokens.len()];
        for (i, word) in lowered.iter().enumerate() {
            if BOOSTER_MAP.contains_key(word.as_str()) {
                continue;
            }
            let Some(&base) = VALENCE_MAP.get(word.as_str()) else {
                continue;
            };
            if base == 0.0 {
                continue;
            }
            let mut valence = base;
            if caps_differential && is_all_caps(tokens[i]) {
                valence += Self::CAPS_INCREMENT * valence.signum();
            }

            for distance in 1..=3 {
                let Some(j) = i.checked_sub(distance) else {
                    break;
                };
                if let Some(&boost) = BOOSTER_MAP.get(lowered[j].as_str()) {
                    let mut scalar = boost * valence.signum();
                    if caps_differential && is_all_caps(tokens[j]) {
                        scalar += Self::CAPS_INCREMENT * valence.signum();
                    }
                    let decay = match distance {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += scalar * decay;
                }
            }

            let negated = (1..=3)
                .filter_map(|d| i.checked_sub(d))
                .any(|j| is_negation(&lowered[j]));
            if negated {
                valence *= Self::NEGATION_SCALAR;
            }
            sentiments[i] = valence;
        }

        if let Some(pivot) = lowered.iter().position(|w| w == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < pivot {
                    *s *= 0.5;
                } else if i > pivot {
                    *s *= 1.5;
                }
            }
        }

        let mut sum: f64 = sentiments.iter().sum();
        if sum != 0.0 {
            let exclamations = text.chars().filter(|c| *c == '!').count().min(4) as f64;
            let questions = text.chars().filter(|c| *c == '?').count();
            let question_amp = match questions {
                0 | 1 => 0.0,
                2 | 3 => questions as f64 * 0.18,
                _ => 0.96,
            };
            let emphasis = exclamations * 0.292 + question_amp;
            sum += emphasis * sum.signum();
        }

        let compound = sum / (sum * sum + Self::NORMALIZATION_ALPHA).sqrt();
        compound.clamp(-1.0, 1.0)
    }
}

impl PolarityEstimator for RuleBasedEstimator {
    fn name(&self) -> &'static str {
        "rule_based"
    }

    fn polarity(&self, text: &str) -> Result<f64> {
        Ok(self.compound(text))
    }
}

/// Averaged word-polarity estimator.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicalPolarityEstimator;

impl LexicalPolarityEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityEstimator for LexicalPolarityEstimator {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn polarity(&self, text: &str) -> Result<f64> {
        let words = words(text);
        let mut scores = Vec::new();

        for (i, word) in words.iter().enumerate() {
            let Some(&base) = POLARITY_MAP.get(word.as_str()) else {
                continue;
            };
            let mut score = base;
            if let Some(prev) = i.checked_sub(1).map(|j| words[j].as_str()) {
                if let Some(&factor) = INTENSIFIER_MAP.get(prev) {
                    score *= factor;
                }
            }
            let negated = (1..=2)
                .filter_map(|d| i.checked_sub(d))
                .any(|j| is_negation(&words[j]));
            if negated {
                score *= -0.5;
            }
            scores.push(score.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return Ok(0.0);
        }
        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// How the two estimators are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Weighted blend of both estimators.
    #[default]
    Blended,
    /// Weighted blend whose sign follows the word-count majority when that
    /// majority disagrees with the lexical estimator.
    SignCorrected,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Blended => write!(f, "blended"),
            ScoringMode::SignCorrected => write!(f, "sign_corrected"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "blended" => Ok(ScoringMode::Blended),
            "sign_corrected" | "sign-corrected" => Ok(ScoringMode::SignCorrected),
            other => Err(AnalysisError::Config(format!("unknown scoring mode '{}'", other))),
        }
    }
}

/// Positive minus negative hits against the curated word lists.
fn word_count_balance(text: &str) -> i64 {
    words(text).iter().fold(0, |acc, w| {
        if POSITIVE_WORDS.contains(&w.as_str()) {
            acc + 1
        } else if NEGATIVE_WORDS.contains(&w.as_str()) {
            acc - 1
        } else {
            acc
        }
    })
}

/// Maps text to a bounded sentiment score.
#[derive(Clone)]
pub struct SentimentScorer {
    rule_based: Arc<dyn PolarityEstimator>,
    statistical: Arc<dyn PolarityEstimator>,
    mode: ScoringMode,
    rule_weight: f64,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentScorer")
            .field("rule_based", &self.rule_based.name())
            .field("statistical", &self.statistical.name())
            .field("mode", &self.mode)
            .field("rule_weight", &self.rule_weight)
            .finish()
    }
}

impl SentimentScorer {
    /// Create a scorer with the built-in estimators in blended mode
    pub fn new() -> Self {
        Self::with_estimators(
            Arc::new(RuleBasedEstimator::new()),
            Arc::new(LexicalPolarityEstimator::new()),
        )
    }

    pub fn with_estimators(
        rule_based: Arc<dyn PolarityEstimator>,
        statistical: Arc<dyn PolarityEstimator>,
    ) -> Self {
        Self {
            rule_based,
            statistical,
            mode: ScoringMode::Blended,
            rule_weight: DEFAULT_RULE_WEIGHT,
        }
    }

    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_rule_weight(mut self, weight: f64) -> Self {
        self.rule_weight = weight.clamp(0.0, 1.0);
        self
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Score `text`. Empty text scores `0.0`; any estimator failure yields a
    /// degraded `0.0` instead of an error.
    pub fn score(&self, text: &str) -> BestEffort<f64> {
        if text.trim().is_empty() {
            return BestEffort::full(0.0);
        }
        let result = BestEffort::from_result(self.try_score(text), 0.0);
        if let Some(reason) = result.reason() {
            warn!(reason, "Sentiment scoring degraded to neutral");
        }
        result
    }

    fn try_score(&self, text: &str) -> Result<f64> {
        let a = self.rule_based.polarity(text)?;
        let b = self.statistical.polarity(text)?;
        if !a.is_finite() || !b.is_finite() {
            return Err(AnalysisError::NonFiniteScore(format!(
                "{}={} / {}={}",
                self.rule_based.name(),
                a,
                self.statistical.name(),
                b
            )));
        }

        let mut blended = self.rule_weight * a + (1.0 - self.rule_weight) * b;

        if self.mode == ScoringMode::SignCorrected {
            let majority = word_count_balance(text).signum() as f64;
            if majority != 0.0 && majority != sign(b) {
                debug!(majority, lexical = b, "Forcing blended sign to word-count majority");
                blended = blended.abs() * majority;
            }
        }

        Ok(round2(blended.clamp(-1.0, 1.0)))
    }
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
