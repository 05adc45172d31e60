mod connectivity_probe;
mod process_control;
mod profile_args_resolver;
mod profile_catalog;
mod profile_launcher;
mod provider_detector;
mod reachability;
mod service_scripts;
mod service_state_controller;
mod session_log_writer;

pub use connectivity_probe::ConnectivityProbe;
pub use process_control::{KillOutcome, ProcessControl, ProcessHandle};
pub use profile_args_resolver::ProfileArgsResolver;
pub use profile_catalog::ProfileCatalog;
pub use profile_launcher::ProfileLauncher;
pub use provider_detector::ProviderDetector;
pub use reachability::ReachabilityPort;
pub use service_scripts::ServiceScriptPort;
pub use service_state_controller::ServiceStateController;
pub use session_log_writer::SessionLogWriter;
