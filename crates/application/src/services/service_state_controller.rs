use crate::ports::{ServiceScriptPort, ServiceStateController};
use crate::services::process_utils::{sleep_or_cancel, validate_launch_args};
use async_trait::async_trait;
use sots_domain::config::ServiceConfig;
use sots_domain::{DomainError, ServiceRunState};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

const CREATED_MARKER: &str = "Service created and started";
const ALREADY_EXISTS_MARKER: &str = "Service already exists";
const DELETED_MARKER: &str = "Service deleted";
const NOT_FOUND_MARKER: &str = "Service not found";

/// Drives the OS service through the administrative scripts.
///
/// Callers serialize lifecycle operations; the controller itself keeps no state.
/// The settle delay after creation ends early with `CancelledByUser` once the
/// cancellation token fires.
pub struct ScriptedServiceStateController {
    scripts: Arc<dyn ServiceScriptPort>,
    executable: PathBuf,
    config: ServiceConfig,
    shutdown: CancellationToken,
}

impl ScriptedServiceStateController {
    pub fn new(
        scripts: Arc<dyn ServiceScriptPort>,
        executable: impl Into<PathBuf>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            scripts,
            executable: executable.into(),
            config,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }
}

#[async_trait]
impl ServiceStateController for ScriptedServiceStateController {
    fn service_name(&self) -> &str {
        &self.config.name
    }

    async fn query_status(&self, service_name: &str) -> ServiceRunState {
        let output = self.scripts.check_service_status(service_name).await;
        ServiceRunState::from_status_output(output.as_deref())
    }

    #[instrument(skip(self, profile_args), fields(service = %self.config.name))]
    async fn create_and_start(&self, profile_args: &str) -> Result<(), DomainError> {
        validate_launch_args(profile_args)?;
        let name = self.service_name();

        let output = self
            .scripts
            .create_service(name, &self.executable, profile_args)
            .await;

        let output = match output {
            Some(out) if out.contains(ALREADY_EXISTS_MARKER) => {
                error!(output = %out.trim(), "Service already exists");
                return Err(DomainError::ServiceAlreadyExists(out.trim().to_string()));
            }
            Some(out) => out,
            None => {
                error!("Service creation script did not run");
                return Err(DomainError::ServiceCreationFailed(
                    "creation script produced no output".to_string(),
                ));
            }
        };
        if !output.contains(CREATED_MARKER) {
            error!(output = %output.trim(), "Service creation failed");
            return Err(DomainError::ServiceCreationFailed(output.trim().to_string()));
        }
        info!("Service created and started");

        if let Err(e) = sleep_or_cancel(self.config.settle_delay(), &self.shutdown).await {
            warn!("Cancelled while waiting for the service to settle");
            return Err(e);
        }

        if self.query_status(name).await == ServiceRunState::Stopped {
            error!("Service stopped right after start, removing it");
            if let Err(e) = self.stop(name).await {
                warn!(error = %e, "Failed to remove stopped service");
            }
            return Err(DomainError::ServiceLaunchStopped(name.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop(&self, service_name: &str) -> Result<(), DomainError> {
        let Some(output) = self.scripts.delete_service(service_name).await else {
            error!("Service deletion script did not run");
            return Err(DomainError::ServiceDeletionFailed(
                "deletion script produced no output".to_string(),
            ));
        };
        if !output.contains(DELETED_MARKER) && !output.contains(NOT_FOUND_MARKER) {
            error!(output = %output.trim(), "Service deletion failed");
            return Err(DomainError::ServiceDeletionFailed(output.trim().to_string()));
        }
        info!("Service removed");
        Ok(())
    }

    #[instrument(skip(self, profile_args), fields(service = %self.config.name))]
    async fn start_or_reconcile(&self, profile_args: &str) -> Result<(), DomainError> {
        let name = self.service_name();
        match self.query_status(name).await {
            ServiceRunState::Running => {
                info!("Service already running, nothing to do");
                Ok(())
            }
            ServiceRunState::Stopped => {
                info!("Service stopped, recreating it");
                self.stop(name).await?;
                self.create_and_start(profile_args).await
            }
            ServiceRunState::NotFound => {
                info!("Service not found, creating it");
                self.create_and_start(profile_args).await
            }
            ServiceRunState::ErrorUnknown => {
                error!("Failed to determine service status");
                Err(DomainError::ServiceStatusUnknown(name.to_string()))
            }
        }
    }

    #[instrument(skip(self, profile_args), fields(service = %self.config.name))]
    async fn restart(&self, profile_args: &str) -> Result<(), DomainError> {
        if let Err(e) = self.stop(self.service_name()).await {
            warn!(error = %e, "Failed to stop service before restart");
        }
        self.create_and_start(profile_args).await
    }

    async fn is_any_running(&self, service_names: &[&str]) -> bool {
        for name in service_names {
            // Unreadable states count as present.
            if self.query_status(name).await != ServiceRunState::NotFound {
                return true;
            }
        }
        false
    }
}
