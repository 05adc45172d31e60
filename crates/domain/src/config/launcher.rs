use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Supervised start of the filtering executable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LauncherConfig {
    #[serde(default = "default_executable_name")]
    pub executable_name: String,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,

    /// Pause between process confirmation and the first probe.
    #[serde(default = "default_stabilization_delay_ms")]
    pub stabilization_delay_ms: u64,
}

impl LauncherConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn stabilization_delay(&self) -> Duration {
        Duration::from_millis(self.stabilization_delay_ms)
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            executable_name: default_executable_name(),
            max_attempts: default_max_attempts(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_timeout_ms: default_poll_timeout_ms(),
            stabilization_delay_ms: default_stabilization_delay_ms(),
        }
    }
}

fn default_executable_name() -> String {
    "winws.exe".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_poll_timeout_ms() -> u64 {
    3000
}

fn default_stabilization_delay_ms() -> u64 {
    2000
}
