use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use stratalia_core::ratelimit::{Category, RateLimitPolicy};

/// An administrator account created at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    #[serde(default = "default_admin_name")]
    pub full_name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub tls: TlsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_ttl_hours")]
    pub jwt_ttl_hours: u64,
    #[serde(default)]
    pub admins: Vec<AdminConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Per-IP burst allowance in front of the auth endpoints.
    #[serde(default = "default_auth_rpm")]
    pub auth_requests_per_minute: u32,
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
    /// Replaces the built-in policy of individual categories.
    #[serde(default)]
    pub policies: HashMap<Category, RateLimitPolicy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Directory with `words.json`, `quiz.json` and `knowledge.json`.
    /// The embedded seed is used when unset.
    #[serde(default)]
    pub seed_dir: Option<PathBuf>,
    #[serde(default = "default_search_cache_ttl_secs")]
    pub search_cache_ttl_secs: u64,
    #[serde(default = "default_stats_cache_ttl_secs")]
    pub stats_cache_ttl_secs: u64,
    #[serde(default = "default_true")]
    pub demo_leaderboard: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_ttl_hours: default_jwt_ttl_hours(),
            admins: Vec::new(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_requests_per_minute: default_auth_rpm(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            policies: HashMap::new(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            seed_dir: None,
            search_cache_ttl_secs: default_search_cache_ttl_secs(),
            stats_cache_ttl_secs: default_stats_cache_ttl_secs(),
            demo_leaderboard: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            content: ContentConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_admin_name() -> String { "Beheerder".to_string() }
fn default_jwt_ttl_hours() -> u64 { 24 }
fn default_auth_rpm() -> u32 { 10 }
fn default_cleanup_interval_secs() -> u64 { 60 }
fn default_search_cache_ttl_secs() -> u64 { 300 }
fn default_stats_cache_ttl_secs() -> u64 { 1800 }
fn default_true() -> bool { true }

const WEAK_SECRETS: &[&str] = &[
    "change-me-to-a-random-secret",
    "secret",
    "password",
    "jwt-secret",
];

impl ServerConfig {
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls.cert_path.is_some() && self.tls.key_path.is_some()
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("STRATALIA_CONFIG").map(PathBuf::from).ok();

        let mut config = if let Some(path) = config_path {
            let contents = std::fs::read_to_string(&path)?;
            Self::from_toml(&contents)?
        } else {
            ServerConfig::default()
        };

        if let Ok(secret) = std::env::var("STRATALIA_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(addr) = std::env::var("STRATALIA_BIND_ADDR") {
            config.bind_addr = addr.parse()?;
        }
        if let Ok(dir) = std::env::var("STRATALIA_SEED_DIR") {
            config.content.seed_dir = Some(PathBuf::from(dir));
        }
        if let Ok(cert) = std::env::var("STRATALIA_TLS_CERT") {
            config.tls.cert_path = Some(cert);
        }
        if let Ok(key) = std::env::var("STRATALIA_TLS_KEY") {
            config.tls.key_path = Some(key);
        }

        config.ensure_jwt_secret()?;
        Ok(config)
    }

    /// Fills in a random secret when none is set and rejects placeholder
    /// values.
    pub fn ensure_jwt_secret(&mut self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.is_empty() {
            self.auth.jwt_secret = uuid::Uuid::new_v4().to_string();
            tracing::warn!(
                "No JWT secret configured. Generated random secret (will change on restart)."
            );
            return Ok(());
        }

        if WEAK_SECRETS.iter().any(|&w| self.auth.jwt_secret == w) {
            anyhow::bail!(
                "JWT secret matches a known weak/placeholder value. \
                 Set a strong random secret via STRATALIA_JWT_SECRET environment variable."
            );
        }
        if self.auth.jwt_secret.len() < 32 {
            tracing::warn!(
                "JWT secret is shorter than 32 characters. \
                 Consider using a stronger secret via STRATALIA_JWT_SECRET."
            );
        }
        Ok(())
    }
}
