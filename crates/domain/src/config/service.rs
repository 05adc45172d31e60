use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Name of the OS service wrapping the filtering executable.
    #[serde(default = "default_service_name")]
    pub name: String,

    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    #[serde(default = "default_powershell")]
    pub powershell: String,
}

impl ServiceConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            settle_delay_ms: default_settle_delay_ms(),
            powershell: default_powershell(),
        }
    }
}

fn default_service_name() -> String {
    "sots".to_string()
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_powershell() -> String {
    "powershell".to_string()
}
