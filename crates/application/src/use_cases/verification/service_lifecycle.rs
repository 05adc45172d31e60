use crate::ports::{ProfileArgsResolver, ServiceStateController};
use sots_domain::{DomainError, ServiceRunState};
use std::sync::Arc;
use tracing::info;

/// Runs a profile persistently as the OS service.
pub struct ServiceLifecycleUseCase {
    controller: Arc<dyn ServiceStateController>,
    args_resolver: Arc<dyn ProfileArgsResolver>,
}

impl ServiceLifecycleUseCase {
    pub fn new(
        controller: Arc<dyn ServiceStateController>,
        args_resolver: Arc<dyn ProfileArgsResolver>,
    ) -> Self {
        Self {
            controller,
            args_resolver,
        }
    }

    pub async fn status(&self) -> ServiceRunState {
        self.controller
            .query_status(self.controller.service_name())
            .await
    }

    pub async fn start(&self, profile_file_name: &str) -> Result<(), DomainError> {
        let args = self.args_resolver.resolve_launch_args(profile_file_name).await?;
        info!(profile = %profile_file_name, "Starting service");
        self.controller.start_or_reconcile(&args).await
    }

    pub async fn restart(&self, profile_file_name: &str) -> Result<(), DomainError> {
        let args = self.args_resolver.resolve_launch_args(profile_file_name).await?;
        info!(profile = %profile_file_name, "Restarting service");
        self.controller.restart(&args).await
    }

    pub async fn stop(&self) -> Result<(), DomainError> {
        self.controller.stop(self.controller.service_name()).await
    }
}
