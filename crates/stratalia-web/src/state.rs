use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use stratalia_core::profile::Activity;
use stratalia_core::quiz::QuizStats;
use stratalia_core::ratelimit::Policies;
use stratalia_core::search::SearchOutcome;
use stratalia_core::{
    Accounts, Catalog, Challenges, DailyWords, PointsLedger, QuizHistory, RateLimiter, Seed,
    Submissions, TranslationFeedback, TtlCache,
};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub catalog: Arc<Catalog>,
    pub daily: Arc<DailyWords>,
    pub quiz_history: Arc<QuizHistory>,
    pub points: Arc<PointsLedger>,
    pub submissions: Arc<Submissions>,
    pub challenges: Arc<Challenges>,
    pub translation_feedback: Arc<TranslationFeedback>,
    pub accounts: Arc<Accounts>,
    pub limiter: Arc<RateLimiter>,
    pub search_cache: Arc<TtlCache<SearchOutcome>>,
    pub stats_cache: Arc<TtlCache<QuizStats>>,
    /// Revoked JWT token IDs (jti) with their expiry as a unix timestamp.
    /// Tokens in this map are rejected by the auth extractor.
    pub revoked_tokens: Arc<DashMap<String, u64>>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, seed: Seed) -> anyhow::Result<Self> {
        let today = chrono::Utc::now().date_naive();
        let points = if config.content.demo_leaderboard {
            PointsLedger::with_demo_users(today)
        } else {
            PointsLedger::new()
        };

        let accounts = Accounts::new();
        for admin in &config.auth.admins {
            accounts
                .add_admin(&admin.email, &admin.full_name, admin.password_hash.clone())
                .map_err(|e| anyhow::anyhow!("Invalid admin entry {}: {e}", admin.email))?;
        }

        let limiter = RateLimiter::new(Policies::with_overrides(&config.rate_limit.policies));

        Ok(Self {
            catalog: Arc::new(Catalog::new(seed)),
            daily: Arc::new(DailyWords::new()),
            quiz_history: Arc::new(QuizHistory::new()),
            points: Arc::new(points),
            submissions: Arc::new(Submissions::new()),
            challenges: Arc::new(Challenges::new()),
            translation_feedback: Arc::new(TranslationFeedback::new()),
            accounts: Arc::new(accounts),
            limiter: Arc::new(limiter),
            search_cache: Arc::new(TtlCache::new()),
            stats_cache: Arc::new(TtlCache::new()),
            revoked_tokens: Arc::new(DashMap::new()),
            started_at: Instant::now(),
            config: Arc::new(config),
        })
    }

    /// The user's activity across points, quizzes, daily words and submissions.
    pub fn activity(&self, user_id: &str) -> Activity {
        Activity::collect(
            user_id,
            &self.points,
            &self.quiz_history,
            &self.daily,
            &self.submissions,
        )
    }

    pub fn search_ttl(&self) -> Duration {
        Duration::from_secs(self.config.content.search_cache_ttl_secs)
    }

    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.config.content.stats_cache_ttl_secs)
    }

    /// Drops expired limiter entries, cache entries, revocations and daily
    /// completions outside the learn window.
    pub fn cleanup(&self) {
        let limiter_removed = self.limiter.cleanup(Instant::now());
        let daily = self.daily.prune(chrono::Utc::now().date_naive());
        let cached = self.search_cache.purge_expired() + self.stats_cache.purge_expired();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let before = self.revoked_tokens.len();
        self.revoked_tokens.retain(|_, exp| *exp > now);
        let revoked = before.saturating_sub(self.revoked_tokens.len());

        if limiter_removed + cached + revoked + daily > 0 {
            tracing::debug!(
                "Cleanup: {limiter_removed} limiter entries, {cached} cache entries, {revoked} revoked tokens, {daily} daily entries"
            );
        }
    }
}
