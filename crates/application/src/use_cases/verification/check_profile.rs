use crate::ports::{ConnectivityProbe, ProcessHandle, ProfileLauncher};
use crate::services::process_utils::sleep_or_cancel;
use sots_domain::{DomainError, ProbeCatalog, Profile, VerificationOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Launches one profile, waits for it to settle, probes the catalog and tears the process down.
pub struct CheckProfileUseCase {
    launcher: Arc<dyn ProfileLauncher>,
    probe: Arc<dyn ConnectivityProbe>,
    catalog: Arc<ProbeCatalog>,
    executable: PathBuf,
    stabilization_delay: Duration,
}

impl CheckProfileUseCase {
    pub fn new(
        launcher: Arc<dyn ProfileLauncher>,
        probe: Arc<dyn ConnectivityProbe>,
        catalog: Arc<ProbeCatalog>,
        executable: impl Into<PathBuf>,
    ) -> Self {
        Self {
            launcher,
            probe,
            catalog,
            executable: executable.into(),
            stabilization_delay: Duration::from_secs(2),
        }
    }

    pub fn with_stabilization_delay(mut self, delay: Duration) -> Self {
        self.stabilization_delay = delay;
        self
    }

    pub fn catalog(&self) -> &ProbeCatalog {
        &self.catalog
    }

    /// The launched process is gone when this returns, whatever the result.
    #[instrument(skip(self, args, cancel), fields(profile = %profile.id()))]
    pub async fn execute(
        &self,
        profile: &Profile,
        args: &str,
        cancel: &CancellationToken,
    ) -> Result<VerificationOutcome, DomainError> {
        let handle = match self
            .launcher
            .launch_and_wait_ready(&self.executable, args, cancel)
            .await
        {
            Ok(handle) => handle,
            Err(e) => {
                self.launcher.teardown(None).await;
                return Err(e);
            }
        };

        let result = self.verify(cancel).await;
        self.release(handle).await;

        if let Ok(outcome) = &result {
            info!(
                all_success = outcome.is_all_success(),
                any_success = outcome.has_any_success(),
                "Profile verified"
            );
        }
        result
    }

    async fn verify(&self, cancel: &CancellationToken) -> Result<VerificationOutcome, DomainError> {
        sleep_or_cancel(self.stabilization_delay, cancel).await?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DomainError::CancelledByUser),
            outcome = self.probe.probe_catalog(&self.catalog) => Ok(outcome),
        }
    }

    async fn release(&self, handle: Box<dyn ProcessHandle>) {
        debug!(pid = ?handle.pid(), "Tearing down filtering process");
        self.launcher.teardown(Some(handle)).await;
    }
}
