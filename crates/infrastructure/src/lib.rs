//! Sots Infrastructure Layer
pub mod logging;
pub mod network;
pub mod profiles;
pub mod system;
