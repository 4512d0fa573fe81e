use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Endpoint groups that are limited independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Default,
    Search,
    Translate,
    Quiz,
    Auth,
    Admin,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Default,
        Category::Search,
        Category::Translate,
        Category::Quiz,
        Category::Auth,
        Category::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Default => "default",
            Category::Search => "search",
            Category::Translate => "translate",
            Category::Quiz => "quiz",
            Category::Auth => "auth",
            Category::Admin => "admin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    pub window_secs: u64,
    pub max_requests: u32,
    pub block_secs: u64,
    /// Suspicious requests within one window before the client is blocked.
    pub suspicious_threshold: u32,
}

impl RateLimitPolicy {
    pub const fn new(window_secs: u64, max_requests: u32, block_secs: u64, suspicious_threshold: u32) -> Self {
        Self {
            window_secs,
            max_requests,
            block_secs,
            suspicious_threshold,
        }
    }

    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Default => Self::new(60, 60, 5 * 60, 3),
            Category::Search => Self::new(60, 100, 3 * 60, 5),
            Category::Translate => Self::new(60, 30, 10 * 60, 3),
            Category::Quiz => Self::new(5 * 60, 20, 5 * 60, 3),
            Category::Auth => Self::new(5 * 60, 5, 15 * 60, 2),
            Category::Admin => Self::new(60, 20, 30 * 60, 1),
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn block_duration(&self) -> Duration {
        Duration::from_secs(self.block_secs)
    }
}

/// The policy for every category, with optional overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct Policies {
    by_category: HashMap<Category, RateLimitPolicy>,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            by_category: Category::ALL
                .iter()
                .map(|&c| (c, RateLimitPolicy::for_category(c)))
                .collect(),
        }
    }
}

impl Policies {
    pub fn with_overrides(overrides: &HashMap<Category, RateLimitPolicy>) -> Self {
        let mut policies = Self::default();
        for (&category, &policy) in overrides {
            policies.by_category.insert(category, policy);
        }
        policies
    }

    pub fn get(&self, category: Category) -> RateLimitPolicy {
        self.by_category
            .get(&category)
            .copied()
            .unwrap_or_else(|| RateLimitPolicy::for_category(category))
    }
}
