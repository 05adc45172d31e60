pub mod connectivity_probe;
pub mod process_utils;
pub mod profile_launcher;
pub mod service_state_controller;
pub mod status_board;

pub use connectivity_probe::ConcurrentConnectivityProbe;
pub use profile_launcher::SupervisedProfileLauncher;
pub use service_state_controller::ScriptedServiceStateController;
pub use status_board::{CategoryStatusMap, ProfileStatusMap, StatusBoard, StatusUpdate};
