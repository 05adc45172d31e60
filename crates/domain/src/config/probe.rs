use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    #[serde(default = "default_http_attempts")]
    pub http_attempts: u32,

    #[serde(default = "default_http_retry_backoff_ms")]
    pub http_retry_backoff_ms: u64,

    /// Connect timeout and per-attempt request ceiling.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    #[serde(default = "default_icmp_timeout_ms")]
    pub icmp_timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ProbeConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn http_retry_backoff(&self) -> Duration {
        Duration::from_millis(self.http_retry_backoff_ms)
    }

    pub fn icmp_timeout(&self) -> Duration {
        Duration::from_millis(self.icmp_timeout_ms)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            http_attempts: default_http_attempts(),
            http_retry_backoff_ms: default_http_retry_backoff_ms(),
            http_timeout_ms: default_http_timeout_ms(),
            icmp_timeout_ms: default_icmp_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_attempts() -> u32 {
    3
}

fn default_http_retry_backoff_ms() -> u64 {
    500
}

fn default_http_timeout_ms() -> u64 {
    5000
}

fn default_icmp_timeout_ms() -> u64 {
    3000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/122.0.0.0 Safari/537.36".to_string()
}
