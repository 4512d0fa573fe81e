//! Challenges: built-in goals measured against a user's [`Activity`].
//!
//! Progress is measured from activity, never taken from the client. A
//! stored entry keeps the highest progress seen per user and challenge, so
//! a streak challenge stays completed after the streak breaks. It also
//! marks the first completion so the reward is paid once.

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::points::{PointsAward, PointsLedger};
use crate::profile::Activity;

pub const CHALLENGE_ACTION: &str = "challenge_completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeType {
    Daily,
    Weekly,
    Monthly,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    /// Active and not yet completed.
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    WordsLearned,
    QuizzesCompleted,
    SubmissionsMade,
    PointsEarned,
    StreakDays,
}

impl Metric {
    pub fn measure(self, activity: &Activity) -> u32 {
        match self {
            Metric::WordsLearned => activity.words_learned,
            Metric::QuizzesCompleted => activity.quizzes_completed,
            Metric::SubmissionsMade => activity.submissions_made,
            Metric::PointsEarned => activity.total_points,
            Metric::StreakDays => activity.current_streak,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Challenge {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    pub difficulty: crate::Difficulty,
    pub target_metric: Metric,
    pub target_value: u32,
    pub reward_points: u32,
    pub is_active: bool,
}

macro_rules! challenge {
    ($id:literal, $title:literal, $description:literal, $kind:ident, $difficulty:ident, $metric:ident, $target:literal, $reward:literal, $active:literal) => {
        Challenge {
            id: $id,
            title: $title,
            description: $description,
            kind: ChallengeType::$kind,
            difficulty: crate::Difficulty::$difficulty,
            target_metric: Metric::$metric,
            target_value: $target,
            reward_points: $reward,
            is_active: $active,
        }
    };
}

pub const CHALLENGES: &[Challenge] = &[
    challenge!("daily_word", "Woord van de dag", "Rond een woord van de dag af", Daily, Easy, WordsLearned, 1, 10, true),
    challenge!("quiz_starter", "Quizstarter", "Voltooi 3 quizzen", Weekly, Easy, QuizzesCompleted, 3, 50, true),
    challenge!("word_collector", "Woordverzamelaar", "Rond 7 woorden van de dag af", Weekly, Medium, WordsLearned, 7, 75, true),
    challenge!("streak_week", "Volhouder", "Wees 7 dagen op rij actief", Weekly, Medium, StreakDays, 7, 100, true),
    challenge!("word_builder", "Taalbouwer", "Dien 3 nieuwe woorden in", Monthly, Medium, SubmissionsMade, 3, 150, true),
    challenge!("point_hunter", "Puntenjager", "Verdien 500 punten", Monthly, Hard, PointsEarned, 500, 200, true),
    challenge!("quiz_marathon", "Quizmarathon", "Voltooi 25 quizzen", Special, Hard, QuizzesCompleted, 25, 300, true),
    challenge!("summer_slang_2024", "Zomerslang 2024", "Voltooi 10 quizzen tijdens de zomer", Special, Medium, QuizzesCompleted, 10, 250, false),
];

pub fn challenge_by_id(id: &str) -> Option<&'static Challenge> {
    CHALLENGES.iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Progress {
    best: u32,
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeView {
    #[serde(flatten)]
    pub challenge: Challenge,
    pub current_progress: u32,
    pub progress_percentage: u32,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserChallengeStats {
    pub words_learned: u32,
    pub quizzes_completed: u32,
    pub submissions_made: u32,
    pub points_earned: u32,
    pub streak_days: u32,
    /// Challenges with a paid reward.
    pub total_challenges_completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeStats {
    pub total_challenges: usize,
    pub completed_challenges: usize,
    /// Rewards of the completed challenges listed.
    pub total_points_earned: u32,
    pub completion_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChallengeBoard {
    pub challenges: Vec<ChallengeView>,
    pub user_stats: UserChallengeStats,
    pub challenge_stats: ChallengeStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub challenge: ChallengeView,
    /// Set on the first completion only.
    pub award: Option<PointsAward>,
    pub message: &'static str,
}

#[derive(Default)]
pub struct Challenges {
    progress: DashMap<(String, &'static str), Progress>,
}

impl Challenges {
    pub fn new() -> Self {
        Self::default()
    }

    fn view(&self, user_id: Option<&str>, challenge: &Challenge, activity: &Activity) -> ChallengeView {
        let stored = user_id
            .and_then(|u| self.progress.get(&(u.to_string(), challenge.id)).map(|p| *p))
            .unwrap_or_default();
        let current = stored.best.max(challenge.target_metric.measure(activity));
        let target = challenge.target_value.max(1);
        ChallengeView {
            challenge: *challenge,
            current_progress: current,
            progress_percentage: (u64::from(current) * 100 / u64::from(target)).min(100) as u32,
            is_completed: current >= challenge.target_value,
            completed_at: stored.completed_at,
        }
    }

    /// Active challenges with the user's progress, filtered by type and status.
    /// Anonymous callers get progress measured against an empty activity.
    pub fn board(
        &self,
        user_id: Option<&str>,
        activity: &Activity,
        kind: Option<ChallengeType>,
        status: Option<ChallengeStatus>,
    ) -> ChallengeBoard {
        let challenges: Vec<ChallengeView> = CHALLENGES
            .iter()
            .filter(|c| c.is_active)
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .map(|c| self.view(user_id, c, activity))
            .filter(|v| match status {
                None => true,
                Some(ChallengeStatus::Active) => !v.is_completed,
                Some(ChallengeStatus::Completed) => v.is_completed,
            })
            .collect();

        let completed: Vec<&ChallengeView> = challenges.iter().filter(|v| v.is_completed).collect();
        let challenge_stats = ChallengeStats {
            total_challenges: challenges.len(),
            completed_challenges: completed.len(),
            total_points_earned: completed.iter().map(|v| v.challenge.reward_points).sum(),
            completion_percentage: if challenges.is_empty() {
                0
            } else {
                (completed.len() as f64 * 100.0 / challenges.len() as f64).round() as u32
            },
        };

        let total_challenges_completed = user_id.map_or(0, |u| {
            self.progress
                .iter()
                .filter(|e| e.key().0 == u && e.completed_at.is_some())
                .count()
        });

        ChallengeBoard {
            challenges,
            user_stats: UserChallengeStats {
                words_learned: activity.words_learned,
                quizzes_completed: activity.quizzes_completed,
                submissions_made: activity.submissions_made,
                points_earned: activity.total_points,
                streak_days: activity.current_streak,
                total_challenges_completed,
            },
            challenge_stats,
        }
    }

    /// Records the measured progress on a challenge and pays the reward on
    /// the first completion.
    ///
    /// # Errors
    ///
    /// [`CoreError::NotFound`] for an unknown challenge,
    /// [`CoreError::Validation`] for an inactive challenge, or when
    /// `claim_completed` is set but the target is not reached.
    pub fn record_progress(
        &self,
        user_id: &str,
        display_name: &str,
        challenge_id: &str,
        claim_completed: bool,
        activity: &Activity,
        points: &PointsLedger,
        today: NaiveDate,
    ) -> CoreResult<ProgressUpdate> {
        let challenge = challenge_by_id(challenge_id)
            .ok_or_else(|| CoreError::NotFound(format!("challenge {challenge_id}")))?;
        if !challenge.is_active {
            return Err(CoreError::validation("challenge_id", "Deze uitdaging is niet actief"));
        }

        let key = (user_id.to_string(), challenge.id);
        let best = self
            .progress
            .get(&key)
            .map_or(0, |p| p.best)
            .max(challenge.target_metric.measure(activity));
        if claim_completed && best < challenge.target_value {
            return Err(CoreError::validation(
                "completed",
                "Deze uitdaging is nog niet voltooid",
            ));
        }

        let newly_completed = {
            let mut entry = self.progress.entry(key).or_default();
            entry.best = entry.best.max(best);
            if entry.best >= challenge.target_value && entry.completed_at.is_none() {
                entry.completed_at = Some(Utc::now());
                true
            } else {
                false
            }
        };

        let award = if newly_completed {
            tracing::info!("Challenge completed: user={user_id}, challenge={}", challenge.id);
            Some(points.award(
                user_id,
                display_name,
                challenge.reward_points,
                CHALLENGE_ACTION,
                today,
            )?)
        } else {
            None
        };

        Ok(ProgressUpdate {
            challenge: self.view(Some(user_id), challenge, activity),
            message: if newly_completed {
                "Uitdaging voltooid!"
            } else {
                "Voortgang bijgewerkt"
            },
            award,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn board_lists_only_active_challenges() {
        let board = Challenges::new().board(None, &Activity::default(), None, None);
        assert_eq!(board.challenges.len(), CHALLENGES.iter().filter(|c| c.is_active).count());
        assert!(board.challenges.iter().all(|v| v.challenge.is_active));
        assert_eq!(board.challenge_stats.completed_challenges, 0);
        assert_eq!(board.user_stats.total_challenges_completed, 0);
    }

    #[test]
    fn board_measures_progress_and_filters() {
        let activity = Activity {
            quizzes_completed: 4,
            ..Activity::default()
        };
        let challenges = Challenges::new();

        let weekly = challenges.board(Some("u1"), &activity, Some(ChallengeType::Weekly), None);
        assert!(weekly.challenges.iter().all(|v| v.challenge.kind == ChallengeType::Weekly));
        let starter = weekly
            .challenges
            .iter()
            .find(|v| v.challenge.id == "quiz_starter")
            .unwrap();
        assert!(starter.is_completed);
        assert_eq!(starter.progress_percentage, 100);

        let done = challenges.board(Some("u1"), &activity, None, Some(ChallengeStatus::Completed));
        assert_eq!(done.challenges.len(), 1);
        assert_eq!(done.challenge_stats.total_points_earned, 50);

        let marathon = challenges
            .board(Some("u1"), &activity, Some(ChallengeType::Special), Some(ChallengeStatus::Active))
            .challenges;
        assert_eq!(marathon.len(), 1);
        assert_eq!(marathon[0].current_progress, 4);
        assert_eq!(marathon[0].progress_percentage, 16);
    }

    #[test]
    fn completion_pays_once() {
        let challenges = Challenges::new();
        let points = PointsLedger::new();
        let activity = Activity {
            words_learned: 1,
            ..Activity::default()
        };

        let first = challenges
            .record_progress("u1", "Sam", "daily_word", true, &activity, &points, today())
            .unwrap();
        assert_eq!(first.award.as_ref().map(|a| a.points_earned), Some(10));
        assert!(first.challenge.is_completed);
        assert!(first.challenge.completed_at.is_some());

        let again = challenges
            .record_progress("u1", "Sam", "daily_word", true, &activity, &points, today())
            .unwrap();
        assert!(again.award.is_none());
        assert_eq!(again.message, "Voortgang bijgewerkt");
        assert_eq!(points.get("u1").unwrap().total_points, 10);

        let board = challenges.board(Some("u1"), &activity, None, None);
        assert_eq!(board.user_stats.total_challenges_completed, 1);
    }

    #[test]
    fn progress_comes_from_measured_activity() {
        let challenges = Challenges::new();
        let points = PointsLedger::new();
        let activity = Activity {
            quizzes_completed: 1,
            ..Activity::default()
        };

        let update = challenges
            .record_progress("u1", "Sam", "quiz_starter", false, &activity, &points, today())
            .unwrap();
        assert_eq!(update.challenge.current_progress, 1);
        assert!(!update.challenge.is_completed);
        assert!(update.award.is_none());

        let err = challenges
            .record_progress("u1", "Sam", "quiz_starter", true, &activity, &points, today())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(points.get("u1").is_none());
    }

    #[test]
    fn stored_best_survives_a_broken_streak() {
        let challenges = Challenges::new();
        let points = PointsLedger::new();
        let streak = Activity {
            current_streak: 7,
            ..Activity::default()
        };
        challenges
            .record_progress("u1", "Sam", "streak_week", false, &streak, &points, today())
            .unwrap();

        let board = challenges.board(Some("u1"), &Activity::default(), Some(ChallengeType::Weekly), None);
        let view = board
            .challenges
            .iter()
            .find(|v| v.challenge.id == "streak_week")
            .unwrap();
        assert!(view.is_completed);
        assert_eq!(view.current_progress, 7);
    }

    #[test]
    fn unknown_and_inactive_challenges_are_refused() {
        let challenges = Challenges::new();
        let points = PointsLedger::new();
        let activity = Activity::default();

        let missing = challenges
            .record_progress("u1", "Sam", "onbekend", false, &activity, &points, today())
            .unwrap_err();
        assert!(matches!(missing, CoreError::NotFound(_)));

        let inactive = challenges
            .record_progress("u1", "Sam", "summer_slang_2024", false, &activity, &points, today())
            .unwrap_err();
        assert!(matches!(inactive, CoreError::Validation { .. }));
    }
}
