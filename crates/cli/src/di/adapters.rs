use sots_application::ports::{
    ProcessControl, ProfileArgsResolver, ProfileCatalog, ProviderDetector, ReachabilityPort,
    ServiceScriptPort, SessionLogWriter,
};
use sots_domain::{Config, ProbeCatalog};
use sots_infrastructure::logging::FileSessionLogWriter;
use sots_infrastructure::network::{IpApiProviderDetector, NetworkReachability};
use sots_infrastructure::profiles::{DirectoryProfileCatalog, FileProfileArgsResolver, ProfileAdapter};
use sots_infrastructure::system::{PowerShellServiceScripts, SystemProcessControl};
use std::sync::Arc;

pub struct Adapters {
    pub process_control: Arc<dyn ProcessControl>,
    pub reachability: Arc<dyn ReachabilityPort>,
    pub service_scripts: Arc<dyn ServiceScriptPort>,
    pub args_resolver: Arc<dyn ProfileArgsResolver>,
    pub profile_catalog: Arc<dyn ProfileCatalog>,
    pub provider_detector: Arc<dyn ProviderDetector>,
    pub session_log: Arc<dyn SessionLogWriter>,
}

impl Adapters {
    pub fn new(config: &Config, probe_catalog: Arc<ProbeCatalog>) -> anyhow::Result<Self> {
        let paths = &config.paths;
        let adapter = ProfileAdapter::new(paths, &config.launcher.executable_name);

        let http_client = reqwest::Client::builder()
            .user_agent(config.probe.user_agent.as_str())
            .build()?;

        Ok(Self {
            process_control: Arc::new(SystemProcessControl::new()),
            reachability: Arc::new(NetworkReachability::new(&config.probe)?),
            service_scripts: Arc::new(PowerShellServiceScripts::new(
                config.service.powershell.clone(),
                paths.scripts_dir(),
            )),
            args_resolver: Arc::new(FileProfileArgsResolver::new(
                paths.profiles_dir(),
                paths.custom_profiles_dir(),
                adapter,
            )),
            profile_catalog: Arc::new(DirectoryProfileCatalog::new(
                paths.profiles_dir(),
                paths.custom_profiles_dir(),
            )),
            provider_detector: Arc::new(IpApiProviderDetector::new(http_client)),
            session_log: Arc::new(FileSessionLogWriter::new(
                paths.session_logs_dir(),
                probe_catalog,
            )),
        })
    }
}
