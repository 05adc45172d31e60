use async_trait::async_trait;
use sots_domain::DomainError;

#[async_trait]
pub trait ProfileArgsResolver: Send + Sync {
    /// Turns a stored profile into the raw argument string for the filtering executable.
    async fn resolve_launch_args(&self, file_name: &str) -> Result<String, DomainError>;
}
