//! Points, levels, streaks and the leaderboard.

use chrono::{Days, NaiveDate};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub const POINTS_PER_LEVEL: u32 = 100;

/// Display name for users who never supplied one.
pub const ANONYMOUS: &str = "Anoniem";

pub fn level_for(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPoints {
    pub user_id: String,
    pub display_name: String,
    pub total_points: u32,
    pub current_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
}

impl UserPoints {
    pub fn new(user_id: &str, display_name: &str) -> Self {
        let display_name = if display_name.is_empty() {
            ANONYMOUS
        } else {
            display_name
        };
        Self {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            total_points: 0,
            current_level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
        }
    }

    fn touch(&mut self, today: NaiveDate) {
        self.current_streak = match self.last_activity_date {
            Some(last) if last == today => self.current_streak.max(1),
            Some(last) if last.checked_add_days(Days::new(1)) == Some(today) => {
                self.current_streak + 1
            }
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_activity_date = Some(today);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsAward {
    pub points_earned: u32,
    pub total_points: u32,
    pub new_level: u32,
    pub leveled_up: bool,
    pub action_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Week,
    Month,
}

impl Period {
    fn window_days(self) -> Option<u64> {
        match self {
            Period::All => None,
            Period::Week => Some(7),
            Period::Month => Some(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub display_name: String,
    pub total_points: u32,
    pub current_level: u32,
    pub current_streak: u32,
}

/// Demo users shown on an otherwise empty leaderboard:
/// `(user_id, name, points, current_streak, longest_streak)`.
const DEMO_USERS: &[(&str, &str, u32, u32, u32)] = &[
    ("user-1", "Ahmed Hassan", 2450, 15, 23),
    ("user-2", "Sofia Rodriguez", 2380, 8, 18),
    ("user-3", "Mohammed Ali", 2290, 12, 20),
    ("user-4", "Emma van der Berg", 2150, 5, 16),
    ("user-5", "Yusuf Demir", 2080, 20, 25),
    ("user-6", "Layla Johnson", 1950, 3, 14),
    ("user-7", "Omar El-Mansouri", 1820, 7, 12),
    ("user-8", "Aisha Bakker", 1750, 10, 15),
    ("user-9", "Hassan van Dijk", 1680, 4, 11),
    ("user-10", "Fatima de Vries", 1620, 6, 13),
];

#[derive(Default)]
pub struct PointsLedger {
    users: DashMap<String, UserPoints>,
}

impl PointsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger pre-filled with the demo users, all active on `today`.
    pub fn with_demo_users(today: NaiveDate) -> Self {
        let ledger = Self::new();
        for &(id, name, points, streak, longest) in DEMO_USERS {
            ledger.users.insert(
                id.to_string(),
                UserPoints {
                    user_id: id.to_string(),
                    display_name: name.to_string(),
                    total_points: points,
                    current_level: level_for(points),
                    current_streak: streak,
                    longest_streak: longest,
                    last_activity_date: Some(today),
                },
            );
        }
        ledger
    }

    /// Adds `points` to the user's total and updates level and streak.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] when `points` is zero or `action` is blank.
    pub fn award(
        &self,
        user_id: &str,
        display_name: &str,
        points: u32,
        action: &str,
        today: NaiveDate,
    ) -> CoreResult<PointsAward> {
        if points == 0 {
            return Err(CoreError::validation("points", "Punten moeten groter zijn dan 0"));
        }
        if action.trim().is_empty() {
            return Err(CoreError::validation("action_type", "Actie type is verplicht"));
        }

        let mut entry = self
            .users
            .entry(user_id.to_string())
            .or_insert_with(|| UserPoints::new(user_id, display_name));
        if !display_name.is_empty() {
            entry.display_name = display_name.to_string();
        }

        let previous_level = entry.current_level;
        entry.total_points = entry.total_points.saturating_add(points);
        entry.current_level = level_for(entry.total_points);
        entry.touch(today);

        tracing::info!(
            "Points awarded: user={user_id}, points={points}, action={action}, total={}",
            entry.total_points
        );

        Ok(PointsAward {
            points_earned: points,
            total_points: entry.total_points,
            new_level: entry.current_level,
            leveled_up: entry.current_level > previous_level,
            action_type: action.to_string(),
        })
    }

    pub fn get(&self, user_id: &str) -> Option<UserPoints> {
        self.users.get(user_id).map(|u| u.clone())
    }

    /// Users ranked by total points; ties are broken by user id.
    pub fn leaderboard(&self, period: Period, limit: usize, today: NaiveDate) -> Vec<LeaderboardEntry> {
        let since = period
            .window_days()
            .and_then(|days| today.checked_sub_days(Days::new(days)));

        let mut users: Vec<UserPoints> = self
            .users
            .iter()
            .filter(|u| match since {
                None => true,
                Some(since) => u.last_activity_date.is_some_and(|d| d >= since),
            })
            .map(|u| u.clone())
            .collect();

        users.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        users
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, u)| LeaderboardEntry {
                rank: i + 1,
                user_id: u.user_id,
                display_name: u.display_name,
                total_points: u.total_points,
                current_level: u.current_level,
                current_streak: u.current_streak,
            })
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
