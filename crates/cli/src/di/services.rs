use super::Adapters;
use sots_application::ports::{ConnectivityProbe, ProfileLauncher, ServiceStateController};
use sots_application::services::{
    ConcurrentConnectivityProbe, ScriptedServiceStateController, StatusBoard,
    SupervisedProfileLauncher,
};
use sots_application::use_cases::{CheckProfileUseCase, ServiceLifecycleUseCase};
use sots_domain::{Config, ProbeCatalog};
use sots_jobs::{AutoVerificationJob, VerificationRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Services {
    pub adapters: Adapters,
    pub status: Arc<StatusBoard>,
    pub lifecycle: Arc<ServiceLifecycleUseCase>,
    pub runner: Arc<VerificationRunner>,
}

impl Services {
    pub fn new(config: &Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let probe_catalog = Arc::new(ProbeCatalog::builtin());
        let adapters = Adapters::new(config, probe_catalog.clone())?;
        let executable = config.executable_path();

        let launcher: Arc<dyn ProfileLauncher> = Arc::new(SupervisedProfileLauncher::new(
            adapters.process_control.clone(),
            config.launcher.clone(),
        ));
        let probe: Arc<dyn ConnectivityProbe> = Arc::new(ConcurrentConnectivityProbe::new(
            adapters.reachability.clone(),
            config.probe.clone(),
        ));
        let controller: Arc<dyn ServiceStateController> =
            Arc::new(
                ScriptedServiceStateController::new(
                    adapters.service_scripts.clone(),
                    executable.clone(),
                    config.service.clone(),
                )
                .with_cancellation(shutdown.clone()),
            );

        let check_profile = Arc::new(
            CheckProfileUseCase::new(launcher.clone(), probe, probe_catalog, executable)
                .with_stabilization_delay(config.launcher.stabilization_delay()),
        );
        let lifecycle = Arc::new(ServiceLifecycleUseCase::new(
            controller.clone(),
            adapters.args_resolver.clone(),
        ));

        let status = Arc::new(StatusBoard::new());
        let job = AutoVerificationJob::new(
            check_profile,
            adapters.args_resolver.clone(),
            launcher,
            controller,
            adapters.session_log.clone(),
            status.clone(),
        )
        .with_provider_detector(adapters.provider_detector.clone());
        let runner = Arc::new(VerificationRunner::new(job).with_shutdown_token(shutdown));

        Ok(Self {
            adapters,
            status,
            lifecycle,
            runner,
        })
    }
}
