//! Stratalia core library: framework-agnostic slang-learning logic.
//!
//! `stratalia-core` holds everything the HTTP layer serves: the content
//! catalog and its search, quizzes, points, adaptive learning, community
//! submissions and accounts, plus the request throttling and caching the
//! server relies on. Nothing in here knows about HTTP.
//!
//! # Modules
//!
//! - [`catalog`]: Slang words, quiz questions and knowledge items, seeded from JSON.
//! - [`search`]: Word and knowledge search with fuzzy suggestions.
//! - [`daily`]: Word of the day and daily completion tracking.
//! - [`translate`]: Word-by-word slang ↔ formal Dutch translation and translation votes.
//! - [`quiz`]: Question selection, scoring, points and result history.
//! - [`points`]: Points ledger, levels, streaks and the leaderboard.
//! - [`profile`]: Per-user activity, profile statistics and achievements.
//! - [`challenges`]: Built-in challenges with progress and one-time rewards.
//! - [`learning`]: Mastery scoring and spaced-repetition scheduling.
//! - [`community`]: Word submissions and moderation.
//! - [`accounts`]: User and administrator accounts.
//! - [`validation`]: Sanitization and character-class checks.
//! - [`ratelimit`]: Per-category request limiting with suspicious-activity blocking.
//! - [`cache`]: A concurrent TTL cache.
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod accounts;
pub mod cache;
pub mod catalog;
pub mod challenges;
pub mod community;
pub mod daily;
pub mod error;
pub mod learning;
pub mod points;
pub mod profile;
pub mod quiz;
pub mod ratelimit;
pub mod search;
pub mod translate;
pub mod validation;

pub use accounts::{Account, Accounts, Role};
pub use cache::TtlCache;
pub use catalog::{Catalog, Difficulty, KnowledgeItem, QuizQuestion, Seed, SlangWord};
pub use challenges::Challenges;
pub use community::{Decision, Submission, SubmissionStatus, Submissions};
pub use daily::DailyWords;
pub use error::{CoreError, CoreResult};
pub use points::{Period, PointsLedger};
pub use quiz::QuizHistory;
pub use ratelimit::{Category, ClientSignals, RateLimiter, Verdict};
pub use translate::{Direction, TranslationFeedback};
