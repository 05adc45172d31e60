pub mod errors;
pub mod launcher;
pub mod logging;
pub mod paths;
pub mod probe;
pub mod root;
pub mod service;

pub use errors::ConfigError;
pub use launcher::LauncherConfig;
pub use logging::LoggingConfig;
pub use paths::PathsConfig;
pub use probe::ProbeConfig;
pub use root::{CliOverrides, Config};
pub use service::ServiceConfig;
