use async_trait::async_trait;
use sots_domain::DomainError;
use std::path::Path;

/// A live child process. Must be destroyed by whoever acquired it.
#[async_trait]
pub trait ProcessHandle: Send + Sync {
    fn pid(&self) -> Option<u32>;

    async fn destroy(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    Killed(usize),
    NotFound,
}

/// OS process primitives, addressed by executable name.
#[async_trait]
pub trait ProcessControl: Send + Sync {
    async fn spawn(
        &self,
        executable: &Path,
        args: &[String],
    ) -> Result<Box<dyn ProcessHandle>, DomainError>;

    async fn is_running(&self, process_name: &str) -> Result<bool, DomainError>;

    async fn kill_by_name(&self, process_name: &str) -> Result<KillOutcome, DomainError>;
}
