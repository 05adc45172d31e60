use async_trait::async_trait;
use std::path::Path;

/// Administrative scripts wrapping the OS service manager.
///
/// Each call returns the raw script output, or `None` when the script could not run.
#[async_trait]
pub trait ServiceScriptPort: Send + Sync {
    async fn check_service_status(&self, service_name: &str) -> Option<String>;

    async fn create_service(
        &self,
        service_name: &str,
        executable: &Path,
        arguments: &str,
    ) -> Option<String>;

    async fn delete_service(&self, service_name: &str) -> Option<String>;
}
