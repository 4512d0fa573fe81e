//! Adaptive learning: mastery scoring and spaced repetition.
//!
//! A single answer is turned into a mastery score in `[0, 1]`. The score
//! drives the next difficulty, a handful of practice words, a learning path
//! and the time of the next review.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Difficulty;

/// Response time that earns the full time score.
const OPTIMAL_RESPONSE_MS: f64 = 3000.0;

const EASY_POOL: &[&str] = &["skeer", "breezy", "chillen", "dope", "swag"];
const MEDIUM_POOL: &[&str] = &["flexen", "lit", "noob", "salty", "savage"];
const HARD_POOL: &[&str] = &["yeet", "cap", "bet", "periodt", "stan"];

const BEGINNER_PATH: &[&str] = &[
    "Basis woorden leren",
    "Eenvoudige quizzen",
    "Woord van de dag volgen",
    "Community woorden bekijken",
];
const INTERMEDIATE_PATH: &[&str] = &[
    "Middelmatige woorden oefenen",
    "Complexere quizzen",
    "Context begrijpen",
    "Eigen woorden toevoegen",
];
const ADVANCED_PATH: &[&str] = &[
    "Moeilijke woorden beheersen",
    "Uitdagende quizzen",
    "Etymologie begrijpen",
    "Anderen helpen leren",
];

/// One answered exercise.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Answer {
    pub word_id: String,
    pub difficulty: Difficulty,
    pub response_time_ms: u64,
    pub correct: bool,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPlan {
    pub next_difficulty: Difficulty,
    pub recommended_words: Vec<String>,
    pub learning_path: Vec<String>,
    pub mastery_score: f64,
    pub next_review_hours: u32,
    pub next_review_time: DateTime<Utc>,
}

pub fn mastery_score(answer: &Answer) -> f64 {
    let mut score = 0.5;
    score += if answer.correct { 0.3 } else { -0.2 };

    let t = answer.response_time_ms as f64;
    let time_score = (1.0 - (t - OPTIMAL_RESPONSE_MS) / OPTIMAL_RESPONSE_MS).max(0.0);
    score += time_score * 0.2;

    let attempts = f64::from(answer.attempts.max(1));
    let attempt_score = (1.0 - (attempts - 1.0) * 0.1).max(0.0);
    score += attempt_score * 0.1;

    score.clamp(0.0, 1.0)
}

pub fn next_difficulty(current: Difficulty, mastery: f64) -> Difficulty {
    if mastery >= 0.8 {
        current.harder()
    } else if mastery <= 0.4 {
        current.easier()
    } else {
        current
    }
}

/// Three to five practice words from the pool for `difficulty`.
pub fn recommended_words<R: Rng + ?Sized>(
    mastery: f64,
    difficulty: Difficulty,
    rng: &mut R,
) -> Vec<String> {
    let pool = match difficulty {
        Difficulty::Easy => EASY_POOL,
        Difficulty::Medium => MEDIUM_POOL,
        Difficulty::Hard => HARD_POOL,
    };
    let count = if mastery > 0.7 {
        5
    } else if mastery > 0.4 {
        4
    } else {
        3
    };
    pool.choose_multiple(rng, count)
        .map(|w| w.to_string())
        .collect()
}

pub fn learning_path(mastery: f64) -> Vec<String> {
    let path = if mastery >= 0.7 {
        ADVANCED_PATH
    } else if mastery >= 0.4 {
        INTERMEDIATE_PATH
    } else {
        BEGINNER_PATH
    };
    path.iter().map(|s| s.to_string()).collect()
}

/// Hours until the word should be reviewed again.
pub fn review_interval_hours(mastery: f64, attempts: u32) -> u32 {
    let hours = if mastery >= 0.8 {
        24 * 7
    } else if mastery >= 0.6 {
        24 * 3
    } else if mastery >= 0.4 {
        24
    } else {
        6
    };
    if attempts > 3 {
        (hours / 2).max(1)
    } else {
        hours
    }
}

pub fn plan<R: Rng + ?Sized>(answer: &Answer, now: DateTime<Utc>, rng: &mut R) -> LearningPlan {
    let mastery = mastery_score(answer);
    let hours = review_interval_hours(mastery, answer.attempts);
    tracing::debug!(
        "Mastery for word {}: {mastery:.2} ({:?})",
        answer.word_id,
        answer.difficulty
    );

    LearningPlan {
        next_difficulty: next_difficulty(answer.difficulty, mastery),
        recommended_words: recommended_words(mastery, answer.difficulty, rng),
        learning_path: learning_path(mastery),
        mastery_score: mastery,
        next_review_hours: hours,
        next_review_time: now + Duration::hours(i64::from(hours)),
    }
}
