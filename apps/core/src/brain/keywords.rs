//! Keyword Extraction using stopword-filtered frequency ranking.
//!
//! Text is reduced to ASCII alphanumerics, lower-cased and tokenized; stopwords
//! and short tokens are dropped and the remaining terms are ranked by frequency,
//! ties broken by first occurrence.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Hard cap on returned keywords.
pub const MAX_KEYWORDS: usize = 10;

/// Tokens must be strictly longer than this.
pub const MIN_KEYWORD_EXCLUSIVE_LENGTH: usize = 3;

/// Standard English stopwords, plus apostrophe-stripped contractions that
/// survive cleaning ("can't" becomes "cant"). Contractions that collapse into
/// ordinary words ("we'll", "let's") are left out.
const STOPWORDS_EN: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
    // contractions after punctuation removal
    "dont", "cant", "wont", "didnt", "doesnt", "isnt", "wasnt", "arent", "werent", "couldnt",
    "wouldnt", "shouldnt", "havent", "hasnt", "hadnt", "youre", "theyre", "thats", "whats",
    "theres", "youve", "weve", "theyve", "youll", "itll",
];

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9\s]").expect("Invalid regex: non-alphanumeric filter")
});

/// Result of keyword extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    /// The keyword
    pub keyword: String,
    /// Raw frequency in the text
    pub frequency: usize,
}

/// Keyword extractor using frequency ranking
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stopwords: HashSet<&'static str>,
    min_word_length: usize,
    max_keywords: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create a new keyword extractor with default settings
    pub fn new() -> Self {
        Self::with_config(MIN_KEYWORD_EXCLUSIVE_LENGTH + 1, MAX_KEYWORDS)
    }

    /// Create a keyword extractor with custom configuration.
    ///
    /// `min_word_length` never drops below 4 and `max_keywords` never exceeds 10.
    pub fn with_config(min_word_length: usize, max_keywords: usize) -> Self {
        Self {
            stopwords: STOPWORDS_EN.iter().copied().collect(),
            min_word_length: min_word_length.max(MIN_KEYWORD_EXCLUSIVE_LENGTH + 1),
            max_keywords: max_keywords.min(MAX_KEYWORDS),
        }
    }

    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Strip everything but ASCII alphanumerics and whitespace, collapse whitespace.
    pub fn clean(text: &str) -> String {
        NON_ALPHANUMERIC
            .replace_all(text, "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Tokenize text into candidate keywords, in order of appearance
    fn tokenize(&self, text: &str) -> Vec<String> {
        Self::clean(text)
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.len() >= self.min_word_length && !self.is_stopword(word))
            .map(str::to_string)
            .collect()
    }

    /// Extract the top N keywords from text
    pub fn extract(&self, text: &str, top_k: Option<usize>) -> Vec<KeywordResult> {
        let max_results = top_k.unwrap_or(self.max_keywords).min(self.max_keywords);
        let words = self.tokenize(text);

        if words.is_empty() {
            return vec![];
        }

        // Insertion order doubles as the tie-breaker
        let mut order: Vec<String> = Vec::new();
        let mut freq: HashMap<String, usize> = HashMap::new();
        for word in words {
            let count = freq.entry(word.clone()).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }

        let mut ranked: Vec<KeywordResult> = order
            .into_iter()
            .map(|keyword| {
                let frequency = freq.get(&keyword).copied().unwrap_or(0);
                KeywordResult { keyword, frequency }
            })
            .collect();

        // Stable sort keeps first-occurrence order among equal counts
        ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        ranked.truncate(max_results);
        ranked
    }

    /// Extract keywords and return just the strings
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.extract(text, None)
            .into_iter()
            .map(|k| k.keyword)
            .collect()
    }
}
