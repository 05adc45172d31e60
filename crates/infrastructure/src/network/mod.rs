pub mod provider_detector;
pub mod reachability;

pub use provider_detector::IpApiProviderDetector;
pub use reachability::NetworkReachability;
