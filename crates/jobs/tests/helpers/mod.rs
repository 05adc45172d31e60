#![allow(dead_code)]

pub mod mock_components;

pub use mock_components::*;

use sots_application::services::StatusBoard;
use sots_application::use_cases::CheckProfileUseCase;
use sots_domain::{
    CategoryOutcome, ProbeCatalog, ProbeTarget, Profile, ServiceCategoryTag, VerificationOutcome,
};
use sots_jobs::AutoVerificationJob;
use std::sync::Arc;
use std::time::Duration;

pub const EXECUTABLE: &str = "/opt/sots/bin/winws.exe";

pub struct Harness {
    pub launcher: Arc<MockProfileLauncher>,
    pub probe: Arc<MockConnectivityProbe>,
    pub service: Arc<MockServiceController>,
    pub log: Arc<MockSessionLog>,
    pub resolver: Arc<MockArgsResolver>,
    pub status: Arc<StatusBoard>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            launcher: Arc::new(MockProfileLauncher::new()),
            probe: Arc::new(MockConnectivityProbe::new()),
            service: Arc::new(MockServiceController::new()),
            log: Arc::new(MockSessionLog::new()),
            resolver: Arc::new(MockArgsResolver::new()),
            status: Arc::new(StatusBoard::new()),
        }
    }

    pub fn job(&self) -> AutoVerificationJob {
        let check = Arc::new(
            CheckProfileUseCase::new(
                self.launcher.clone(),
                self.probe.clone(),
                Arc::new(ProbeCatalog::builtin()),
                EXECUTABLE,
            )
            .with_stabilization_delay(Duration::from_millis(1)),
        );
        AutoVerificationJob::new(
            check,
            self.resolver.clone(),
            self.launcher.clone(),
            self.service.clone(),
            self.log.clone(),
            self.status.clone(),
        )
    }
}

pub fn profiles(names: &[&str]) -> Vec<Profile> {
    names.iter().map(|n| Profile::new(*n)).collect()
}

pub fn all_reachable() -> VerificationOutcome {
    VerificationOutcome::from_categories(ServiceCategoryTag::ALL.iter().map(|tag| {
        CategoryOutcome {
            category: *tag,
            failed_targets: Vec::new(),
        }
    }))
}

pub fn nothing_reachable() -> VerificationOutcome {
    VerificationOutcome::from_categories(ServiceCategoryTag::ALL.iter().map(|tag| {
        CategoryOutcome {
            category: *tag,
            failed_targets: vec![ProbeTarget::http("https://example.invalid")],
        }
    }))
}

/// Discord reachable, everything else blocked.
pub fn only_discord_reachable() -> VerificationOutcome {
    VerificationOutcome::from_categories(ServiceCategoryTag::ALL.iter().map(|tag| {
        CategoryOutcome {
            category: *tag,
            failed_targets: if *tag == ServiceCategoryTag::Discord {
                Vec::new()
            } else {
                vec![ProbeTarget::http("https://example.invalid")]
            },
        }
    }))
}
