pub mod check_profile;
pub mod service_lifecycle;

pub use check_profile::CheckProfileUseCase;
pub use service_lifecycle::ServiceLifecycleUseCase;
