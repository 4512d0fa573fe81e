//! Profile statistics and achievements.
//!
//! Both are derived on request from an [`Activity`] snapshot collected
//! across the points ledger, quiz history, daily words and submissions.
//! Nothing here is stored.

use serde::Serialize;

use crate::community::{SubmissionStatus, Submissions, APPROVAL_POINTS};
use crate::daily::DailyWords;
use crate::points::PointsLedger;
use crate::quiz::QuizHistory;

/// What a user has done so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub total_points: u32,
    pub current_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub words_learned: u32,
    pub quizzes_completed: u32,
    pub average_percentage: f64,
    pub submissions_made: u32,
    pub approved_submissions: u32,
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            total_points: 0,
            current_level: 1,
            current_streak: 0,
            longest_streak: 0,
            words_learned: 0,
            quizzes_completed: 0,
            average_percentage: 0.0,
            submissions_made: 0,
            approved_submissions: 0,
        }
    }
}

impl Activity {
    pub fn collect(
        user_id: &str,
        points: &PointsLedger,
        quizzes: &QuizHistory,
        daily: &DailyWords,
        submissions: &Submissions,
    ) -> Self {
        let mut activity = Self::default();
        if let Some(p) = points.get(user_id) {
            activity.total_points = p.total_points;
            activity.current_level = p.current_level;
            activity.current_streak = p.current_streak;
            activity.longest_streak = p.longest_streak;
        }

        let summary = quizzes.summary(user_id);
        activity.quizzes_completed = summary.total_quizzes as u32;
        activity.average_percentage = summary.average_percentage;
        activity.words_learned = daily.learned_count(user_id);

        let mine = submissions.by_submitter(user_id);
        activity.submissions_made = mine.len() as u32;
        activity.approved_submissions = mine
            .iter()
            .filter(|s| s.status == SubmissionStatus::Approved)
            .count() as u32;
        activity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    pub total_points: u32,
    pub current_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub words_learned: u32,
    pub quizzes_completed: u32,
    /// Average quiz percentage.
    pub average_score: f64,
    pub submissions_count: u32,
    pub approved_submissions: u32,
    pub total_submission_points: u32,
}

impl From<&Activity> for ProfileStats {
    fn from(a: &Activity) -> Self {
        Self {
            total_points: a.total_points,
            current_level: a.current_level,
            current_streak: a.current_streak,
            longest_streak: a.longest_streak,
            words_learned: a.words_learned,
            quizzes_completed: a.quizzes_completed,
            average_score: (a.average_percentage * 100.0).round() / 100.0,
            submissions_count: a.submissions_made,
            approved_submissions: a.approved_submissions,
            total_submission_points: a.approved_submissions * APPROVAL_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    Quizzes,
    Words,
    Streak,
    AveragePercentage,
    Submissions,
    Approved,
    Level,
}

impl Measure {
    fn value(self, a: &Activity) -> f64 {
        match self {
            Measure::Quizzes => f64::from(a.quizzes_completed),
            Measure::Words => f64::from(a.words_learned),
            Measure::Streak => f64::from(a.longest_streak),
            Measure::AveragePercentage => a.average_percentage,
            Measure::Submissions => f64::from(a.submissions_made),
            Measure::Approved => f64::from(a.approved_submissions),
            Measure::Level => f64::from(a.current_level),
        }
    }
}

struct Definition {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: &'static str,
    points_reward: u32,
    rarity: Rarity,
    measure: Measure,
    target: u32,
}

const ACHIEVEMENTS: &[Definition] = &[
    Definition { id: "first_quiz", name: "Eerste Stappen", description: "Voltooi je eerste quiz", icon: "🎯", category: "learning", points_reward: 50, rarity: Rarity::Common, measure: Measure::Quizzes, target: 1 },
    Definition { id: "word_learner_10", name: "Woordkenner", description: "Leer 10 woorden", icon: "📚", category: "learning", points_reward: 100, rarity: Rarity::Common, measure: Measure::Words, target: 10 },
    Definition { id: "word_learner_25", name: "Woordexpert", description: "Leer 25 woorden", icon: "📖", category: "learning", points_reward: 200, rarity: Rarity::Rare, measure: Measure::Words, target: 25 },
    Definition { id: "word_learner_50", name: "Woordmeester", description: "Leer 50 woorden", icon: "🎓", category: "learning", points_reward: 300, rarity: Rarity::Epic, measure: Measure::Words, target: 50 },
    Definition { id: "streak_3", name: "Streak Starter", description: "Houd een streak van 3 dagen", icon: "🔥", category: "streak", points_reward: 150, rarity: Rarity::Common, measure: Measure::Streak, target: 3 },
    Definition { id: "streak_7", name: "Streak Master", description: "Houd een streak van 7 dagen", icon: "🔥🔥", category: "streak", points_reward: 300, rarity: Rarity::Rare, measure: Measure::Streak, target: 7 },
    Definition { id: "quiz_5", name: "Quiz Lover", description: "Voltooi 5 quizzen", icon: "🧠", category: "quiz", points_reward: 200, rarity: Rarity::Common, measure: Measure::Quizzes, target: 5 },
    Definition { id: "quiz_10", name: "Quiz Champion", description: "Voltooi 10 quizzen", icon: "🏆", category: "quiz", points_reward: 400, rarity: Rarity::Epic, measure: Measure::Quizzes, target: 10 },
    Definition { id: "high_score", name: "Score Master", description: "Behaal een gemiddelde score van 80%", icon: "⭐", category: "performance", points_reward: 250, rarity: Rarity::Rare, measure: Measure::AveragePercentage, target: 80 },
    Definition { id: "contributor", name: "Bijdrager", description: "Dien je eerste woord in", icon: "✍️", category: "community", points_reward: 100, rarity: Rarity::Common, measure: Measure::Submissions, target: 1 },
    Definition { id: "approved_contributor", name: "Goedgekeurde Bijdrager", description: "Krijg je eerste inzending goedgekeurd", icon: "✅", category: "community", points_reward: 200, rarity: Rarity::Rare, measure: Measure::Approved, target: 1 },
    Definition { id: "level_5", name: "Level 5", description: "Bereik level 5", icon: "🎖️", category: "level", points_reward: 500, rarity: Rarity::Epic, measure: Measure::Level, target: 5 },
    Definition { id: "level_10", name: "Level 10", description: "Bereik level 10", icon: "👑", category: "level", points_reward: 1000, rarity: Rarity::Legendary, measure: Measure::Level, target: 10 },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub points_reward: u32,
    pub rarity: Rarity,
    pub is_earned: bool,
    /// Capped at `target`.
    pub progress: u32,
    pub target: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementSummary {
    pub total_achievements: usize,
    pub earned_achievements: usize,
    pub total_points_from_achievements: u32,
    pub completion_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievements {
    pub achievements: Vec<Achievement>,
    pub stats: AchievementSummary,
}

pub fn achievements(activity: &Activity) -> Achievements {
    let achievements: Vec<Achievement> = ACHIEVEMENTS
        .iter()
        .map(|d| {
            let value = d.measure.value(activity);
            let target = f64::from(d.target);
            Achievement {
                id: d.id,
                name: d.name,
                description: d.description,
                icon: d.icon,
                category: d.category,
                points_reward: d.points_reward,
                rarity: d.rarity,
                is_earned: value >= target,
                progress: value.min(target).floor() as u32,
                target: d.target,
            }
        })
        .collect();

    let earned: Vec<&Achievement> = achievements.iter().filter(|a| a.is_earned).collect();
    let stats = AchievementSummary {
        total_achievements: achievements.len(),
        earned_achievements: earned.len(),
        total_points_from_achievements: earned.iter().map(|a| a.points_reward).sum(),
        completion_percentage: (earned.len() as f64 * 100.0 / achievements.len() as f64).round()
            as u32,
    };
    Achievements { achievements, stats }
}
