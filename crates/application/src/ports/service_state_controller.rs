use async_trait::async_trait;
use sots_domain::{DomainError, ServiceRunState};

/// Lifecycle of the single OS service hosting the filtering executable.
#[async_trait]
pub trait ServiceStateController: Send + Sync {
    fn service_name(&self) -> &str;

    async fn query_status(&self, service_name: &str) -> ServiceRunState;

    async fn create_and_start(&self, profile_args: &str) -> Result<(), DomainError>;

    /// Deletes the service. An already absent service is a success.
    async fn stop(&self, service_name: &str) -> Result<(), DomainError>;

    async fn start_or_reconcile(&self, profile_args: &str) -> Result<(), DomainError>;

    async fn restart(&self, profile_args: &str) -> Result<(), DomainError>;

    async fn is_any_running(&self, service_names: &[&str]) -> bool;
}
