pub mod verification;

pub use verification::{CheckProfileUseCase, ServiceLifecycleUseCase};
