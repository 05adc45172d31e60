use super::ProcessHandle;
use async_trait::async_trait;
use sots_domain::DomainError;
use std::path::Path;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait ProfileLauncher: Send + Sync {
    /// Starts the executable and returns once the process is confirmed running.
    ///
    /// The returned handle must be passed to `teardown` on every exit path.
    async fn launch_and_wait_ready(
        &self,
        executable: &Path,
        args: &str,
        cancel: &CancellationToken,
    ) -> Result<Box<dyn ProcessHandle>, DomainError>;

    /// Destroys the handle (if any) and kills stray instances by name.
    async fn teardown(&self, handle: Option<Box<dyn ProcessHandle>>);
}
