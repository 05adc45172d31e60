use serde::{Deserialize, Serialize};
use std::fmt;

/// State of the OS service hosting the filtering executable, as reported by the service manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceRunState {
    NotFound,
    Stopped,
    Running,
    ErrorUnknown,
}

impl ServiceRunState {
    /// Interprets the raw output of the status script.
    ///
    /// A missing or empty answer and any unrecognized value map to `ErrorUnknown`.
    pub fn from_status_output(output: Option<&str>) -> Self {
        let Some(raw) = output.map(str::trim).filter(|s| !s.is_empty()) else {
            return ServiceRunState::ErrorUnknown;
        };

        if raw == "NOT_FOUND" {
            ServiceRunState::NotFound
        } else if raw.eq_ignore_ascii_case("running") {
            ServiceRunState::Running
        } else if raw.eq_ignore_ascii_case("stopped") {
            ServiceRunState::Stopped
        } else {
            ServiceRunState::ErrorUnknown
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, ServiceRunState::NotFound)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRunState::NotFound => "not found",
            ServiceRunState::Stopped => "stopped",
            ServiceRunState::Running => "running",
            ServiceRunState::ErrorUnknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceRunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
