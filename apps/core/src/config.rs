use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{debug, info};
use validator::Validate;

use crate::brain::keywords::MAX_KEYWORDS;
use crate::brain::patterns::{MAX_PATTERNS, MIN_ENTRIES};
use crate::brain::sentiment::{ScoringMode, DEFAULT_RULE_WEIGHT};
use crate::error::{AnalysisError, Result};

/// Entries considered by the recurring-label pattern analysis.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Tunables for the journal analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// How the two polarity estimators are combined.
    pub scoring_mode: ScoringMode,
    /// Weight of the rule-based estimator in the blend. Value between 0.0 and 1.0.
    #[validate(range(min = 0.0, max = 1.0))]
    pub rule_based_weight: f64,
    /// Keywords kept per entry.
    #[validate(range(min = 1, max = 10))]
    pub max_keywords: usize,
    /// Most recent entries fed to the recurring-label analysis.
    #[validate(range(min = 1, max = 100))]
    pub history_limit: usize,
    /// Patterns returned by the miner.
    #[validate(range(min = 1, max = 5))]
    pub max_patterns: usize,
    /// Minimum history size before mining runs. Never below 3.
    #[validate(range(min = 3))]
    pub min_pattern_entries: usize,
    /// Fixed seed for prompt selection. Unset means an entropy-seeded RNG per call.
    pub rng_seed: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            scoring_mode: ScoringMode::Blended,
            rule_based_weight: DEFAULT_RULE_WEIGHT,
            max_keywords: MAX_KEYWORDS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_patterns: MAX_PATTERNS,
            min_pattern_entries: MIN_ENTRIES,
            rng_seed: None,
        }
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AnalysisError::Config(format!("{} ('{}'): {}", key, raw, e))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(AnalysisError::Config(format!("{}: {}", key, e))),
    }
}

impl AnalyzerConfig {
    /// Load from the environment (and a `.env` file when present), starting
    /// from the defaults. The result is validated.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_current_env()
    }

    /// Like [`from_env`](Self::from_env) but without reading a `.env` file.
    pub fn from_current_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(mode) = env_parse::<ScoringMode>("MOODLENS_SCORING_MODE")? {
            config.scoring_mode = mode;
        }
        if let Some(weight) = env_parse("MOODLENS_RULE_WEIGHT")? {
            config.rule_based_weight = weight;
        }
        if let Some(max) = env_parse("MOODLENS_MAX_KEYWORDS")? {
            config.max_keywords = max;
        }
        if let Some(limit) = env_parse("MOODLENS_HISTORY_LIMIT")? {
            config.history_limit = limit;
        }
        if let Some(max) = env_parse("MOODLENS_MAX_PATTERNS")? {
            config.max_patterns = max;
        }
        if let Some(min) = env_parse("MOODLENS_MIN_PATTERN_ENTRIES")? {
            config.min_pattern_entries = min;
        }
        config.rng_seed = env_parse("MOODLENS_RNG_SEED")?;

        config.validate()?;
        info!(
            mode = %config.scoring_mode,
            rule_weight = config.rule_based_weight,
            seeded = config.rng_seed.is_some(),
            "Analyzer configuration loaded"
        );
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}
