use crate::ports::{ProcessControl, ProcessHandle, ProfileLauncher};
use crate::services::process_utils::{
    kill_quietly, split_launch_args, validate_launch_args, wait_for_exit, wait_for_process,
};
use async_trait::async_trait;
use sots_domain::config::LauncherConfig;
use sots_domain::DomainError;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Starts the filtering executable with bounded retries and readiness polling.
///
/// At most one instance of the executable is alive at a time: every instance is
/// killed by name before the first attempt and after each failed one, and a new
/// spawn only happens once the process table no longer lists any of them.
pub struct SupervisedProfileLauncher {
    control: Arc<dyn ProcessControl>,
    config: LauncherConfig,
}

impl SupervisedProfileLauncher {
    pub fn new(control: Arc<dyn ProcessControl>, config: LauncherConfig) -> Self {
        Self { control, config }
    }

    fn process_name(&self) -> &str {
        &self.config.executable_name
    }

    /// Kills every instance by name and waits until none is listed anymore.
    async fn terminate_instances(&self, cancel: &CancellationToken) -> Result<(), DomainError> {
        kill_quietly(self.control.as_ref(), self.process_name()).await;

        let exited = wait_for_exit(
            self.control.as_ref(),
            self.process_name(),
            self.config.poll_timeout(),
            self.config.poll_interval(),
            cancel,
        )
        .await?;
        if exited {
            Ok(())
        } else {
            warn!(process = %self.process_name(), "Killed process is still listed");
            Err(DomainError::ProcessStillRunning(
                self.process_name().to_string(),
            ))
        }
    }
}

#[async_trait]
impl ProfileLauncher for SupervisedProfileLauncher {
    #[instrument(skip(self, args, cancel), fields(executable = %executable.display()))]
    async fn launch_and_wait_ready(
        &self,
        executable: &Path,
        args: &str,
        cancel: &CancellationToken,
    ) -> Result<Box<dyn ProcessHandle>, DomainError> {
        validate_launch_args(args)?;
        let argv = split_launch_args(args);
        let max_attempts = self.config.max_attempts.max(1);

        self.terminate_instances(cancel).await?;

        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                return Err(DomainError::CancelledByUser);
            }

            debug!(attempt, max_attempts, "Spawning filtering process");
            let mut handle = self.control.spawn(executable, &argv).await?;

            let ready = wait_for_process(
                self.control.as_ref(),
                self.process_name(),
                self.config.poll_timeout(),
                self.config.poll_interval(),
                cancel,
            )
            .await;

            match ready {
                Ok(true) => {
                    info!(attempt, pid = ?handle.pid(), "Filtering process is running");
                    return Ok(handle);
                }
                Ok(false) => {
                    warn!(attempt, max_attempts, "Process did not show up in time");
                    handle.destroy().await;
                    self.terminate_instances(cancel).await?;
                }
                Err(e) => {
                    handle.destroy().await;
                    let released = CancellationToken::new();
                    if let Err(still_running) = self.terminate_instances(&released).await {
                        warn!(error = %still_running, "Cancelled launch left a process behind");
                    }
                    return Err(e);
                }
            }
        }

        Err(DomainError::ProcessNotConfirmed {
            process: self.process_name().to_string(),
            attempts: max_attempts,
        })
    }

    async fn teardown(&self, handle: Option<Box<dyn ProcessHandle>>) {
        if let Some(mut handle) = handle {
            handle.destroy().await;
        }
        if let Err(e) = self.terminate_instances(&CancellationToken::new()).await {
            error!(error = %e, "Teardown left the filtering process running");
        }
    }
}
