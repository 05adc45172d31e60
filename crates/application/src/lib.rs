//! Sots Application Layer
pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export for convenience
pub use sots_domain::{DomainError, Profile, ProfileCheckResult, VerificationOutcome};
