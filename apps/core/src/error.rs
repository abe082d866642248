use std::fmt;
use std::io;
use thiserror::Error;

/// Crate-wide error type for the analytics core.
///
/// Analytics failures never reach callers of the boundary operations; they are
/// absorbed into a [`BestEffort`] value. This enum describes *why* a result was
/// degraded, and is returned directly only by configuration loading.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A polarity estimator could not produce a score.
    #[error("Estimator '{name}' failed: {reason}")]
    Estimator { name: String, reason: String },

    /// A computation produced or consumed a NaN/infinite score.
    #[error("Non-finite score in {0}")]
    NonFiniteScore(String),

    /// An entry record carried data the core cannot use.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Represents configuration-related errors (e.g., unparsable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<validator::ValidationErrors> for AnalysisError {
    fn from(err: validator::ValidationErrors) -> Self {
        AnalysisError::Config(format!("Validation errors: {}", err))
    }
}

/// How faithfully a [`BestEffort`] value was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fidelity {
    /// Every step succeeded.
    Full,
    /// At least one step failed and a safe default was substituted.
    Degraded { reason: String },
}

/// A value that is always produced, even when part of the computation failed.
#[derive(Debug, Clone, PartialEq)]
pub struct BestEffort<T> {
    pub value: T,
    pub fidelity: Fidelity,
}

impl<T> BestEffort<T> {
    pub fn full(value: T) -> Self {
        Self {
            value,
            fidelity: Fidelity::Full,
        }
    }

    pub fn degraded(value: T, reason: impl fmt::Display) -> Self {
        Self {
            value,
            fidelity: Fidelity::Degraded {
                reason: reason.to_string(),
            },
        }
    }

    /// Converts a fallible computation, substituting `default` on error.
    pub fn from_result(result: Result<T>, default: T) -> Self {
        match result {
            Ok(value) => Self::full(value),
            Err(err) => Self::degraded(default, err),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.fidelity, Fidelity::Degraded { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match &self.fidelity {
            Fidelity::Full => None,
            Fidelity::Degraded { reason } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BestEffort<U> {
        BestEffort {
            value: f(self.value),
            fidelity: self.fidelity,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
