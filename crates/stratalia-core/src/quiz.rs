//! Quiz selection, scoring, points and per-user history.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Difficulty, QuizQuestion};
use crate::error::{CoreError, CoreResult};

/// Recorded when a question was left unanswered.
pub const NO_ANSWER: &str = "Geen antwoord";

/// Picks up to `limit` random questions, optionally of one difficulty.
pub fn select_questions<R: Rng + ?Sized>(
    questions: &[QuizQuestion],
    difficulty: Option<Difficulty>,
    limit: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let mut pool: Vec<QuizQuestion> = questions
        .iter()
        .filter(|q| difficulty.is_none_or(|d| q.difficulty == d))
        .cloned()
        .collect();
    pool.shuffle(rng);
    pool.truncate(limit);
    pool
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub question: String,
    pub selected: String,
    pub correct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizOutcome {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub time_taken_ms: u64,
    pub difficulty: Difficulty,
    /// Words of the correctly answered questions.
    pub correct_answers: Vec<String>,
    pub wrong_answers: Vec<WrongAnswer>,
}

/// Scores a set of answers keyed by question id. A question listed more
/// than once is scored once.
///
/// # Errors
///
/// [`CoreError::Validation`] when `questions` is empty.
pub fn score_answers(
    questions: &[QuizQuestion],
    answers: &HashMap<String, String>,
    time_taken_ms: u64,
) -> CoreResult<QuizOutcome> {
    let mut seen = HashSet::new();
    let questions: Vec<QuizQuestion> = questions
        .iter()
        .filter(|q| seen.insert(q.id.as_str()))
        .cloned()
        .collect();
    if questions.is_empty() {
        return Err(CoreError::validation("answers", "Er moet minimaal 1 vraag zijn"));
    }

    let mut correct_answers = Vec::new();
    let mut wrong_answers = Vec::new();
    for question in &questions {
        match answers.get(&question.id) {
            Some(answer) if *answer == question.correct_answer => {
                correct_answers.push(question.word.clone());
            }
            other => wrong_answers.push(WrongAnswer {
                question: question.question_text.clone(),
                selected: other.cloned().unwrap_or_else(|| NO_ANSWER.to_string()),
                correct: question.correct_answer.clone(),
            }),
        }
    }

    let score = correct_answers.len() as u32;
    let total = questions.len() as u32;
    let percentage = (f64::from(score) * 100.0 / f64::from(total)).round() as u32;

    Ok(QuizOutcome {
        score,
        total_questions: total,
        percentage,
        time_taken_ms,
        difficulty: overall_difficulty(&questions),
        correct_answers,
        wrong_answers,
    })
}

/// Hard when at least half the questions are hard, easy when at least half
/// are easy, otherwise medium.
pub fn overall_difficulty(questions: &[QuizQuestion]) -> Difficulty {
    if questions.is_empty() {
        return Difficulty::Medium;
    }
    let total = questions.len() as f64;
    let ratio = |d: Difficulty| questions.iter().filter(|q| q.difficulty == d).count() as f64 / total;

    if ratio(Difficulty::Hard) >= 0.5 {
        Difficulty::Hard
    } else if ratio(Difficulty::Easy) >= 0.5 {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}

/// Ten points per correct answer, a bonus for finishing within 50 seconds,
/// scaled by difficulty.
pub fn quiz_points(score: u32, time_taken_secs: u64, difficulty: Difficulty) -> u32 {
    let base = f64::from(score) * 10.0;
    let bonus = 50u64.saturating_sub(time_taken_secs) as f64;
    let multiplier = match difficulty {
        Difficulty::Easy => 1.0,
        Difficulty::Medium => 1.5,
        Difficulty::Hard => 2.0,
    };
    ((base + bonus) * multiplier).round() as u32
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuizStats {
    pub total_questions: usize,
    pub questions_by_difficulty: BTreeMap<String, usize>,
}

pub fn quiz_stats(questions: &[QuizQuestion]) -> QuizStats {
    let mut by_difficulty = BTreeMap::new();
    for q in questions {
        *by_difficulty.entry(q.difficulty.as_str().to_string()).or_insert(0) += 1;
    }
    QuizStats {
        total_questions: questions.len(),
        questions_by_difficulty: by_difficulty,
    }
}

/// A completed quiz as stored in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizRecord {
    pub id: String,
    pub user_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub time_taken_secs: u64,
    pub difficulty: Difficulty,
    pub correct_answers: Vec<String>,
    pub wrong_answers: Vec<WrongAnswer>,
    pub points_earned: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuizSummary {
    pub total_quizzes: usize,
    pub average_score: f64,
    pub average_percentage: f64,
    pub best_score: u32,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Default)]
pub struct QuizHistory {
    records: DashMap<String, Vec<QuizRecord>>,
}

impl QuizHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, record: QuizRecord) {
        tracing::info!(
            "Quiz result saved: user={}, score={}, points={}",
            record.user_id,
            record.score,
            record.points_earned
        );
        self.records
            .entry(record.user_id.clone())
            .or_default()
            .push(record);
    }

    /// The user's most recent results, newest first.
    pub fn history(&self, user_id: &str, limit: usize) -> Vec<QuizRecord> {
        let Some(records) = self.records.get(user_id) else {
            return Vec::new();
        };
        let mut sorted = records.clone();
        sorted.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        sorted.truncate(limit);
        sorted
    }

    pub fn summary(&self, user_id: &str) -> QuizSummary {
        let Some(records) = self.records.get(user_id) else {
            return QuizSummary::default();
        };
        if records.is_empty() {
            return QuizSummary::default();
        }
        let n = records.len() as f64;
        QuizSummary {
            total_quizzes: records.len(),
            average_score: round2(records.iter().map(|r| f64::from(r.score)).sum::<f64>() / n),
            average_percentage: round2(records.iter().map(|r| r.percentage).sum::<f64>() / n),
            best_score: records.iter().map(|r| r.score).max().unwrap_or(0),
        }
    }
}
