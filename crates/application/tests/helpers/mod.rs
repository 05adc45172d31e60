#![allow(dead_code)]

pub mod mock_ports;

pub use mock_ports::*;

use sots_domain::config::{LauncherConfig, ProbeConfig, ServiceConfig};

pub const EXECUTABLE: &str = "/opt/sots/bin/winws.exe";
pub const PROCESS_NAME: &str = "winws.exe";

pub fn fast_launcher_config() -> LauncherConfig {
    LauncherConfig {
        executable_name: PROCESS_NAME.to_string(),
        max_attempts: 3,
        poll_interval_ms: 5,
        poll_timeout_ms: 40,
        stabilization_delay_ms: 1,
    }
}

pub fn fast_probe_config() -> ProbeConfig {
    ProbeConfig {
        http_attempts: 3,
        http_retry_backoff_ms: 1,
        http_timeout_ms: 200,
        icmp_timeout_ms: 200,
        ..ProbeConfig::default()
    }
}

pub fn fast_service_config() -> ServiceConfig {
    ServiceConfig {
        settle_delay_ms: 1,
        ..ServiceConfig::default()
    }
}
