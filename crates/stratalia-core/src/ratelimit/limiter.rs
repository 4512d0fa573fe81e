use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;

use super::fingerprint::ClientSignals;
use super::policy::{Category, Policies};

/// More requests than this in one window, arriving faster than
/// [`RAPID_INTERVAL`], counts as suspicious.
const RAPID_COUNT: u32 = 20;
const RAPID_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
struct Entry {
    count: u32,
    reset_at: Instant,
    last_request: Instant,
    suspicious: u32,
    blocked_until: Option<Instant>,
}

impl Entry {
    fn fresh(now: Instant, window: Duration) -> Self {
        Self {
            count: 0,
            reset_at: now + window,
            last_request: now,
            suspicious: 0,
            blocked_until: None,
        }
    }

    fn is_blocked(&self, now: Instant) -> bool {
        self.blocked_until.is_some_and(|until| now < until)
    }
}

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed {
        limit: u32,
        remaining: u32,
        reset_after: Duration,
    },
    /// Too many requests in the current window.
    Limited { retry_after: Duration },
    /// The client is serving an earlier block.
    Blocked { retry_after: Duration },
    /// This request pushed the client over the suspicious-activity threshold.
    SuspiciousBlocked { retry_after: Duration },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LimiterStats {
    pub total_entries: usize,
    /// Entries whose window has not yet expired.
    pub active_entries: usize,
    pub blocked_clients: usize,
}

/// In-memory request counter keyed by `category:fingerprint`.
pub struct RateLimiter {
    policies: Policies,
    entries: DashMap<String, Entry>,
}

impl RateLimiter {
    pub fn new(policies: Policies) -> Self {
        Self {
            policies,
            entries: DashMap::new(),
        }
    }

    pub fn policies(&self) -> &Policies {
        &self.policies
    }

    pub fn check(&self, category: Category, signals: &ClientSignals, now: Instant) -> Verdict {
        let policy = self.policies.get(category);
        let key = format!("{category}:{}", signals.fingerprint());

        let mut entry = self
            .entries
            .entry(key)
            .or_insert_with(|| Entry::fresh(now, policy.window()));

        if let Some(until) = entry.blocked_until.filter(|&until| now < until) {
            return Verdict::Blocked {
                retry_after: until - now,
            };
        }

        if entry.reset_at <= now {
            *entry = Entry::fresh(now, policy.window());
        }

        let rapid = entry.count > RAPID_COUNT && now.duration_since(entry.last_request) < RAPID_INTERVAL;
        let suspicious = signals.looks_automated() || (signals.is_post && !signals.has_referer) || rapid;
        if suspicious {
            entry.suspicious += 1;
            if entry.suspicious >= policy.suspicious_threshold {
                let until = now + policy.block_duration();
                entry.blocked_until = Some(until);
                tracing::warn!("Client blocked for suspicious activity: {category}");
                return Verdict::SuspiciousBlocked {
                    retry_after: policy.block_duration(),
                };
            }
        }

        if entry.count >= policy.max_requests {
            tracing::warn!("Rate limit exceeded: {category}");
            return Verdict::Limited {
                retry_after: entry.reset_at.saturating_duration_since(now),
            };
        }

        entry.count += 1;
        entry.last_request = now;
        Verdict::Allowed {
            limit: policy.max_requests,
            remaining: policy.max_requests.saturating_sub(entry.count),
            reset_after: entry.reset_at.saturating_duration_since(now),
        }
    }

    /// Drops entries whose window and block have both run out.
    pub fn cleanup(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, e| e.reset_at > now || e.is_blocked(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!("Rate limiter cleanup removed {removed} entries");
        }
        removed
    }

    pub fn stats(&self, now: Instant) -> LimiterStats {
        let mut stats = LimiterStats::default();
        for entry in self.entries.iter() {
            stats.total_entries += 1;
            if entry.reset_at > now {
                stats.active_entries += 1;
            }
            if entry.is_blocked(now) {
                stats.blocked_clients += 1;
            }
        }
        stats
    }

    /// Lifts blocks for `fingerprint` in every category. Returns how many
    /// entries were unblocked.
    pub fn unblock(&self, fingerprint: &str) -> usize {
        let mut lifted = 0;
        for mut entry in self.entries.iter_mut() {
            let matches = entry
                .key()
                .split_once(':')
                .is_some_and(|(_, fp)| fp == fingerprint);
            if matches && entry.blocked_until.is_some() {
                entry.blocked_until = None;
                entry.suspicious = 0;
                lifted += 1;
            }
        }
        if lifted > 0 {
            tracing::info!("Rate limit blocks lifted for {fingerprint}: {lifted}");
        }
        lifted
    }
}
