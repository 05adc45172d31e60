pub mod auto_verification;
pub mod runner;

pub use auto_verification::{AutoVerificationJob, SuccessCallback};
pub use runner::VerificationRunner;
