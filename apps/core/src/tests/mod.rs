//! Test Module
//!
//! Cross-module test suites for the MoodLens analytics core.
//!
//! ## Test Categories
//! - `brain_tests`: Sentiment, keywords, emotion analysis and companion responses
//! - `pattern_tests`: Pattern mining, pattern analysis and analytics summaries
//! - `config_tests`: Environment-driven analyzer configuration

pub mod pattern_tests;
