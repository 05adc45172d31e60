use crate::errors::DomainError;
use crate::probe::VerificationOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one profile's verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCheckResult {
    Success,
    Error(String),
    CategoriesResult(VerificationOutcome),
}

impl ProfileCheckResult {
    pub fn from_error(error: &DomainError) -> Self {
        ProfileCheckResult::Error(error.to_string())
    }

    /// Partial success counts: a profile passes when at least one category is reachable.
    pub fn status(&self) -> ProfileCheckStatus {
        match self {
            ProfileCheckResult::Success => ProfileCheckStatus::Success,
            ProfileCheckResult::Error(_) => ProfileCheckStatus::Error,
            ProfileCheckResult::CategoriesResult(outcome) => {
                if outcome.is_all_success() || outcome.has_any_success() {
                    ProfileCheckStatus::Success
                } else {
                    ProfileCheckStatus::Error
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ProfileCheckStatus::Success
    }

    pub fn outcome(&self) -> Option<&VerificationOutcome> {
        match self {
            ProfileCheckResult::CategoriesResult(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProfileCheckResult::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Per-profile status published to observers during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProfileCheckStatus {
    #[default]
    Idle,
    Checking,
    Success,
    Error,
}

impl ProfileCheckStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProfileCheckStatus::Success | ProfileCheckStatus::Error)
    }
}

impl fmt::Display for ProfileCheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfileCheckStatus::Idle => "idle",
            ProfileCheckStatus::Checking => "checking",
            ProfileCheckStatus::Success => "success",
            ProfileCheckStatus::Error => "error",
        };
        f.write_str(s)
    }
}
