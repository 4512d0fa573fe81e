use sha2::{Digest, Sha256};

/// User-agent fragments that mark automated clients.
const BOT_MARKERS: &[&str] = &[
    "bot", "crawler", "spider", "scraper", "curl", "wget", "python", "node", "automated",
    "script", "tool",
];

/// What the limiter needs to know about a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSignals {
    pub ip: String,
    pub user_agent: Option<String>,
    pub has_referer: bool,
    pub is_post: bool,
}

impl ClientSignals {
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.ip, self.user_agent.as_deref().unwrap_or("unknown"))
    }

    pub fn looks_automated(&self) -> bool {
        self.user_agent.as_deref().is_some_and(is_bot_agent)
    }
}

/// Picks the client address: first `X-Forwarded-For` hop, then
/// `X-Real-IP`, then `CF-Connecting-IP`, then the socket peer.
pub fn client_ip(
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
    cf_connecting_ip: Option<&str>,
    peer: Option<&str>,
) -> String {
    forwarded_for
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| real_ip.map(str::trim).filter(|v| !v.is_empty()))
        .or_else(|| cf_connecting_ip.map(str::trim).filter(|v| !v.is_empty()))
        .or(peer)
        .unwrap_or("unknown")
        .to_string()
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let hex = format!("{digest:x}");
    hex[..16].to_string()
}

/// Coarse client identity: a hash of the IP and a hash of the user agent.
pub fn fingerprint(ip: &str, user_agent: &str) -> String {
    short_hash(&format!("{ip}:{}", short_hash(user_agent)))
}

pub fn is_bot_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    BOT_MARKERS.iter().any(|m| ua.contains(m))
}
