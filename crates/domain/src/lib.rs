//! Sots Domain Layer
pub mod check_result;
pub mod config;
pub mod errors;
pub mod probe;
pub mod probe_catalog;
pub mod profile;
pub mod service_state;
pub mod session;

pub use check_result::{ProfileCheckResult, ProfileCheckStatus};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use probe::{CategoryOutcome, ProbeOutcome, ProbeTarget, ServiceCategoryTag, VerificationOutcome};
pub use probe_catalog::ProbeCatalog;
pub use profile::{Profile, ProviderCategory, ServiceCategory};
pub use service_state::ServiceRunState;
pub use session::{
    EntryNote, ProviderInfo, Session, SessionEntry, SessionHandle, SessionHeader,
    ALL_SERVICES_LABEL,
};

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
