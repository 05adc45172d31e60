pub mod process_control;
pub mod service_scripts;

pub use process_control::SystemProcessControl;
pub use service_scripts::PowerShellServiceScripts;
