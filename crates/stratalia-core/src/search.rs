//! Slang and knowledge-bank search.
//!
//! Word search is a substring match over the word, its meaning and its
//! example sentence. Exact word hits rank first; the rest keep catalog
//! order. When nothing matches, [`suggestions`] offers fuzzy alternatives.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::{Catalog, KnowledgeItem};

/// Shown when a search finds nothing and no fuzzy suggestion fits.
pub const POPULAR_WORDS: &[&str] = &[
    "skeer", "breezy", "flexen", "chill", "dope", "lit", "waggi", "bro", "sick",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub match_type: MatchType,
    pub similarity_score: f64,
}

/// The complete answer to a word search, including the user-facing message.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<SearchHit>,
    pub message: String,
    pub suggestions: Vec<String>,
    pub total: usize,
}

/// Trims, lowercases and NFC-normalises a search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase().nfc().collect()
}

/// Finds words whose text contains `query`, exact matches first.
pub fn search_words(catalog: &Catalog, query: &str, limit: usize) -> Vec<SearchHit> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = catalog.with_words(|words| {
        words
            .iter()
            .filter(|w| {
                w.word.to_lowercase().contains(&needle)
                    || w.meaning.to_lowercase().contains(&needle)
                    || w.example.to_lowercase().contains(&needle)
            })
            .map(|w| {
                let exact = w.word.to_lowercase() == needle;
                SearchHit {
                    id: w.id.clone(),
                    word: w.word.clone(),
                    meaning: w.meaning.clone(),
                    example: w.example.clone(),
                    match_type: if exact { MatchType::Exact } else { MatchType::Partial },
                    similarity_score: if exact { 1.0 } else { 0.8 },
                }
            })
            .collect()
    });

    // Stable sort keeps catalog order within each class.
    hits.sort_by_key(|h| h.match_type != MatchType::Exact);
    hits.truncate(limit);
    hits
}

/// Up to `n` words that fuzzily resemble `query`, best first.
///
/// Falls back to [`POPULAR_WORDS`] when nothing resembles the query.
pub fn suggestions(catalog: &Catalog, query: &str, n: usize) -> Vec<String> {
    let needle = normalize_query(query);
    let matcher = SkimMatcherV2::default();

    let mut scored: Vec<(i64, String)> = catalog.with_words(|words| {
        words
            .iter()
            .filter_map(|w| {
                matcher
                    .fuzzy_match(&w.word.to_lowercase(), &needle)
                    .map(|score| (score, w.word.clone()))
            })
            .collect()
    });

    if needle.is_empty() || scored.is_empty() {
        return POPULAR_WORDS.iter().take(n).map(|w| w.to_string()).collect();
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.into_iter().take(n).map(|(_, w)| w).collect()
}

/// Runs a word search and phrases the result for the user.
pub fn search(catalog: &Catalog, query: &str, limit: usize) -> SearchOutcome {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return SearchOutcome {
            results: Vec::new(),
            message: "Voer een zoekterm in".to_string(),
            suggestions: POPULAR_WORDS.iter().map(|w| w.to_string()).collect(),
            total: 0,
        };
    }

    let results = search_words(catalog, trimmed, limit);
    let total = results.len();
    if total == 0 {
        return SearchOutcome {
            results,
            message: format!(
                "Geen resultaten gevonden voor \"{trimmed}\". Probeer een ander woord."
            ),
            suggestions: suggestions(catalog, trimmed, POPULAR_WORDS.len()),
            total,
        };
    }

    let noun = if total == 1 { "resultaat" } else { "resultaten" };
    SearchOutcome {
        results,
        message: format!("Gevonden {total} {noun} voor \"{trimmed}\""),
        suggestions: Vec::new(),
        total,
    }
}

/// Active knowledge items mentioning `query`, title matches first.
pub fn search_knowledge(catalog: &Catalog, query: &str, limit: usize) -> Vec<KnowledgeItem> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<(bool, KnowledgeItem)> = catalog.with_knowledge(|items| {
        items
            .iter()
            .filter(|item| item.is_active)
            .filter_map(|item| {
                let in_title = item.title.to_lowercase().contains(&needle);
                let matches = in_title
                    || item.content.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
                    || item.tags.iter().any(|t| t.to_lowercase().contains(&needle));
                matches.then(|| (in_title, item.clone()))
            })
            .collect()
    });

    found.sort_by_key(|(in_title, _)| !in_title);
    found.into_iter().take(limit).map(|(_, item)| item).collect()
}
