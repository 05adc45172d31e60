use chrono::Local;
use sots_application::ports::{
    ProfileArgsResolver, ProfileLauncher, ProviderDetector, ServiceStateController,
    SessionLogWriter,
};
use sots_application::services::StatusBoard;
use sots_application::use_cases::CheckProfileUseCase;
use sots_domain::{
    DomainError, EntryNote, Profile, ProfileCheckResult, ProfileCheckStatus, ProviderInfo,
    Session, SessionEntry, SessionHandle, SessionHeader, APP_VERSION,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Invoked for every profile that passes its check.
pub type SuccessCallback = Arc<dyn Fn(&Profile) + Send + Sync>;

/// Verifies an ordered list of profiles one at a time.
///
/// Profiles are checked strictly sequentially so that at most one instance of the
/// filtering executable exists. Cancellation is observed before each profile and at
/// every suspension point inside a check; either way the process and the OS service
/// are released before `run_session` returns.
#[derive(Clone)]
pub struct AutoVerificationJob {
    check_profile: Arc<CheckProfileUseCase>,
    args_resolver: Arc<dyn ProfileArgsResolver>,
    launcher: Arc<dyn ProfileLauncher>,
    service: Arc<dyn ServiceStateController>,
    log_writer: Arc<dyn SessionLogWriter>,
    provider_detector: Option<Arc<dyn ProviderDetector>>,
    status: Arc<StatusBoard>,
    shutdown: CancellationToken,
}

impl AutoVerificationJob {
    pub fn new(
        check_profile: Arc<CheckProfileUseCase>,
        args_resolver: Arc<dyn ProfileArgsResolver>,
        launcher: Arc<dyn ProfileLauncher>,
        service: Arc<dyn ServiceStateController>,
        log_writer: Arc<dyn SessionLogWriter>,
        status: Arc<StatusBoard>,
    ) -> Self {
        Self {
            check_profile,
            args_resolver,
            launcher,
            service,
            log_writer,
            provider_detector: None,
            status,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_provider_detector(mut self, detector: Arc<dyn ProviderDetector>) -> Self {
        self.provider_detector = Some(detector);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn status_board(&self) -> &Arc<StatusBoard> {
        &self.status
    }

    pub async fn run_session(
        &self,
        profiles: Vec<Profile>,
        label: &str,
        on_success: Option<SuccessCallback>,
    ) -> Session {
        let mut session = Session::start(label);
        if profiles.is_empty() {
            warn!(label = %label, "Verification session requested without profiles");
            session.finish(false);
            return session;
        }

        info!(label = %label, profiles = profiles.len(), "Starting verification session");
        self.status.reset(&profiles);

        let log = self.open_log(label, profiles.len(), &session).await;
        self.release_resources().await;

        for profile in &profiles {
            if self.shutdown.is_cancelled() {
                info!(label = %label, "Verification session cancelled");
                break;
            }

            let entry = self.check_one(profile).await;

            if entry.result.is_success() {
                if let Some(callback) = &on_success {
                    callback(profile);
                }
            }
            if let Some(handle) = &log {
                if let Err(e) = self.log_writer.append_entry(handle, &entry).await {
                    warn!(profile = %profile.id(), error = %e, "Failed to append session log entry");
                }
            }
            session.record(entry);
        }

        self.release_resources().await;

        let cancelled = self.shutdown.is_cancelled();
        session.finish(cancelled);
        if let Some(handle) = log {
            if let Err(e) = self.log_writer.close_session(handle).await {
                warn!(error = %e, "Failed to close session log");
            }
        }
        self.status.finish_session(label, cancelled);

        info!(
            label = %label,
            checked = session.entries().len(),
            succeeded = session.success_count(),
            cancelled,
            "Verification session finished"
        );
        session
    }

    async fn check_one(&self, profile: &Profile) -> SessionEntry {
        info!(profile = %profile.id(), "Checking profile");
        self.status
            .set_profile_status(&profile.file_name, ProfileCheckStatus::Checking);

        let (result, note, launch_args) = match self
            .args_resolver
            .resolve_launch_args(profile.id())
            .await
        {
            Ok(args) => {
                info!(profile = %profile.id(), args = %args, "Launch arguments resolved");
                let (result, note) = match self
                    .check_profile
                    .execute(profile, &args, &self.shutdown)
                    .await
                {
                    Ok(outcome) => (ProfileCheckResult::CategoriesResult(outcome), EntryNote::None),
                    Err(e) => classify_failure(profile, e),
                };
                (result, note, args)
            }
            Err(e) => {
                let (result, note) = classify_failure(profile, e);
                (result, note, String::new())
            }
        };

        if let Some(outcome) = result.outcome() {
            self.status
                .set_category_statuses(&profile.file_name, outcome.category_statuses());
        }
        let status = result.status();
        info!(profile = %profile.id(), status = %status, "Profile check finished");
        self.status.set_profile_status(&profile.file_name, status);

        SessionEntry {
            profile: profile.clone(),
            result,
            launch_args,
            note,
            recorded_at: Local::now(),
        }
    }

    async fn open_log(
        &self,
        label: &str,
        profile_count: usize,
        session: &Session,
    ) -> Option<SessionHandle> {
        let handle = match self.log_writer.open_session(label).await {
            Ok(handle) => handle,
            Err(e) => {
                error!(error = %e, "Failed to open session log, continuing without it");
                return None;
            }
        };

        let header = SessionHeader {
            label: Arc::clone(&session.label),
            started_at: session.started_at,
            app_version: APP_VERSION,
            provider: self.detect_provider().await,
            profile_count,
        };
        if let Err(e) = self.log_writer.write_header(&handle, &header).await {
            warn!(error = %e, "Failed to write session log header");
        }
        Some(handle)
    }

    async fn detect_provider(&self) -> Option<ProviderInfo> {
        let detector = self.provider_detector.as_ref()?;
        match detector.detect_provider().await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "Provider detection failed");
                None
            }
        }
    }

    /// Kills any instance of the executable and removes the OS service.
    async fn release_resources(&self) {
        self.launcher.teardown(None).await;
        if let Err(e) = self.service.stop(self.service.service_name()).await {
            warn!(error = %e, "Failed to remove service");
        }
    }
}

fn classify_failure(profile: &Profile, error: DomainError) -> (ProfileCheckResult, EntryNote) {
    if error.is_cancellation() {
        info!(profile = %profile.id(), "Profile check cancelled by user");
        (ProfileCheckResult::from_error(&error), EntryNote::CancelledByUser)
    } else {
        error!(profile = %profile.id(), error = %error, "Profile check failed");
        (
            ProfileCheckResult::from_error(&error),
            EntryNote::Failure(error.to_string()),
        )
    }
}
