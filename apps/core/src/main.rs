// MoodLens CLI
// Runs the analytics core over a JSON export of journal entries

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use moodlens_core::brain::{
    AnalyticsSummary, CompanionResponse, JournalAnalyzer, MoodTrendPoint, PatternAnalysis,
};
use moodlens_core::{AnalyzerConfig, Entry};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const TREND_DAYS: i64 = 30;

const USAGE: &str = "Usage:\n  moodlens <entries.json>\n  moodlens --score <text>";

/// Full report printed for an entry export.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    summary: AnalyticsSummary,
    pattern_analysis: PatternAnalysis,
    mood_trends: Vec<MoodTrendPoint>,
    latest: Option<CompanionResponse>,
    /// Reasons for any degraded computation
    warnings: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("MOODLENS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        Registry::default()
            .with(filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new("moodlens".into(), std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read entries from {}", path.display()))?;
    let entries: Vec<Entry> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid entry JSON in {}", path.display()))?;
    Ok(entries)
}

/// Fill in derived fields for entries exported before they were scored.
fn rescore_missing(analyzer: &JournalAnalyzer, entries: &mut [Entry], warnings: &mut Vec<String>) {
    for entry in entries.iter_mut().filter(|e| e.keyword_list().is_empty()) {
        let scores = analyzer.analyze_sentiment_and_keywords(&entry.content);
        if let Some(reason) = scores.reason() {
            warnings.push(format!("entry {}: {}", entry.id, reason));
        }
        let (sentiment_score, keywords) = scores.into_value().into_tuple();
        entry.sentiment_score = sentiment_score;
        entry.keywords = keywords;
    }
}

fn build_report(analyzer: &JournalAnalyzer, mut entries: Vec<Entry>, now: DateTime<Utc>) -> Report {
    let mut warnings = Vec::new();
    rescore_missing(analyzer, &mut entries, &mut warnings);

    let summary = analyzer.analytics_summary(&entries);
    if let Some(reason) = summary.reason() {
        warn!(reason, "Analytics summary degraded");
        warnings.push(reason.to_string());
    }

    let latest = entries
        .iter()
        .max_by_key(|e| e.created_at)
        .map(|e| analyzer.companion_response(e));

    Report {
        summary: summary.into_value(),
        pattern_analysis: analyzer.pattern_analysis(&entries),
        mood_trends: analyzer.mood_trends(&entries, TREND_DAYS, now),
        latest,
        warnings,
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = AnalyzerConfig::from_env().context("Failed to load analyzer configuration")?;
    let analyzer = JournalAnalyzer::with_config(config)?;

    let args: Vec<String> = env::args().skip(1).collect();
    let output = match args.first().map(String::as_str) {
        Some("--score") => {
            let text = args[1..].join(" ");
            if text.is_empty() {
                bail!("--score needs some text\n{}", USAGE);
            }
            serde_json::to_string_pretty(&analyzer.analyze_sentiment_and_keywords(&text).value)?
        }
        Some("-h") | Some("--help") | None => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(path) => {
            let entries = load_entries(Path::new(path))?;
            info!(count = entries.len(), "Loaded journal entries");
            serde_json::to_string_pretty(&build_report(&analyzer, entries, Utc::now()))?
        }
    };

    println!("{}", output);
    Ok(())
}
