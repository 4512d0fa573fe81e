//! Word-by-word translation between straattaal and formal Dutch.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    ToSlang,
    ToFormal,
}

const SLANG_TO_FORMAL: &[(&str, &str)] = &[
    ("swag", "stijl, cool, stoer"),
    ("flexen", "opscheppen, pronken"),
    ("skeer", "arm, weinig geld"),
    ("breezy", "makkelijk, relaxed"),
    ("chill", "ontspannen, kalm"),
    ("dope", "geweldig, cool"),
    ("lit", "geweldig, fantastisch"),
    ("fire", "geweldig, fantastisch"),
    ("slay", "geweldig doen, excelleren"),
    ("vibe", "sfeer, gevoel"),
];

const FORMAL_TO_SLANG: &[(&str, &str)] = &[
    ("stijl", "swag"),
    ("cool", "swag"),
    ("stoer", "swag"),
    ("opscheppen", "flexen"),
    ("pronken", "flexen"),
    ("arm", "skeer"),
    ("makkelijk", "breezy"),
    ("relaxed", "breezy"),
    ("ontspannen", "chill"),
    ("kalm", "chill"),
    ("geweldig", "dope"),
    ("fantastisch", "lit"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub translation: String,
    pub confidence: f64,
    pub alternatives: Vec<String>,
    pub explanation: String,
    pub etymology: String,
    /// Tokens that were found in the dictionary for this direction.
    pub recognized: Vec<String>,
}

fn lookup(table: &[(&str, &'static str)], token: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == token).map(|(_, v)| *v)
}

fn clean(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?'))
        .collect()
}

/// Formal meaning of a single slang word, if known.
pub fn formal_meaning(word: &str) -> Option<&'static str> {
    lookup(SLANG_TO_FORMAL, &clean(word))
}

pub fn translate(text: &str, direction: Direction) -> Translation {
    let table = match direction {
        Direction::ToSlang => FORMAL_TO_SLANG,
        Direction::ToFormal => SLANG_TO_FORMAL,
    };

    let tokens: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    let mut recognized = Vec::new();
    let translated: Vec<String> = tokens
        .iter()
        .map(|token| {
            let cleaned = clean(token);
            match lookup(table, &cleaned) {
                Some(hit) => {
                    recognized.push(cleaned);
                    hit.to_string()
                }
                None => token.clone(),
            }
        })
        .collect();
    let translation = translated.join(" ");

    let (mut explanation, etymology) = match direction {
        Direction::ToSlang => (
            "Deze vertaling gebruikt moderne straattaal uit onze database.".to_string(),
            "straattaal ontwikkelt zich continu en wordt beïnvloed door verschillende culturen en media.",
        ),
        Direction::ToFormal => (
            "Deze vertaling geeft de formele Nederlandse betekenis van het straattaalwoord."
                .to_string(),
            "Veel straattaalwoorden hebben hun oorsprong in andere talen of zijn afgeleid van bestaande Nederlandse woorden.",
        ),
    };

    let (confidence, alternatives) = if recognized.is_empty() {
        (
            0.3,
            vec![
                format!("{translation} (fallback)"),
                format!("{translation} (contextual)"),
            ],
        )
    } else {
        (
            0.9,
            vec![
                format!("{translation} (database match)"),
                format!("{translation} (verified translation)"),
            ],
        )
    };

    if let Some(first) = tokens.first().map(|t| clean(t)) {
        if let Some(meaning) = lookup(SLANG_TO_FORMAL, &first) {
            explanation = format!("\"{first}\" betekent {meaning}");
        }
    }

    tracing::debug!("Translated {:?} with confidence {confidence}", direction);

    Translation {
        translation,
        confidence,
        alternatives,
        explanation,
        etymology: etymology.to_string(),
        recognized,
    }
}

/// How many `(phrase, translation)` pairs keep vote counters.
pub const FEEDBACK_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Votes {
    pub upvotes: u32,
    pub downvotes: u32,
}

/// Up/down votes on translations, keyed by the normalized phrase and
/// translation.
#[derive(Default)]
pub struct TranslationFeedback {
    votes: DashMap<(String, String), Votes>,
    tracked: AtomicUsize,
}

impl TranslationFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a vote. Once [`FEEDBACK_CAPACITY`] pairs are tracked, votes on
    /// new pairs are dropped and zero counts are returned.
    pub fn record(&self, phrase: &str, translation: &str, vote: Vote) -> Votes {
        let key = (normalize(phrase), normalize(translation));
        if !self.votes.contains_key(&key) {
            if self.tracked.load(Ordering::Relaxed) >= FEEDBACK_CAPACITY {
                tracing::debug!("Translation feedback dropped: {} -> {}", key.0, key.1);
                return Votes::default();
            }
            self.tracked.fetch_add(1, Ordering::Relaxed);
        }

        let mut entry = self.votes.entry(key).or_default();
        match vote {
            Vote::Up => entry.upvotes += 1,
            Vote::Down => entry.downvotes += 1,
        }
        *entry
    }

    pub fn votes(&self, phrase: &str, translation: &str) -> Votes {
        self.votes
            .get(&(normalize(phrase), normalize(translation)))
            .map(|v| *v)
            .unwrap_or_default()
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
