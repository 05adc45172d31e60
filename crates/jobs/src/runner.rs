use crate::auto_verification::{AutoVerificationJob, SuccessCallback};
use sots_domain::{Profile, Session};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

struct RunningSession {
    label: String,
    token: CancellationToken,
    handle: JoinHandle<Session>,
}

/// Owns the verification job and keeps at most one session in flight.
pub struct VerificationRunner {
    job: AutoVerificationJob,
    shutdown: CancellationToken,
    current: Mutex<Option<RunningSession>>,
}

impl VerificationRunner {
    pub fn new(job: AutoVerificationJob) -> Self {
        Self {
            job,
            shutdown: CancellationToken::new(),
            current: Mutex::new(None),
        }
    }

    /// Sessions started by this runner are cancelled when `token` is.
    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn job(&self) -> &AutoVerificationJob {
        &self.job
    }

    /// Starts a session after cancelling and draining the previous one.
    ///
    /// Returns the token that cancels the new session.
    pub async fn start(
        &self,
        profiles: Vec<Profile>,
        label: &str,
        on_success: Option<SuccessCallback>,
    ) -> CancellationToken {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            info!(label = %previous.label, "Cancelling previous verification session");
            drain(previous).await;
        }

        let token = self.shutdown.child_token();
        let job = self.job.clone().with_cancellation(token.clone());
        let session_label = label.to_string();
        let handle = tokio::spawn(async move {
            job.run_session(profiles, &session_label, on_success).await
        });

        *current = Some(RunningSession {
            label: label.to_string(),
            token: token.clone(),
            handle,
        });
        token
    }

    /// Cancels the running session and waits for its teardown.
    pub async fn cancel(&self) -> Option<Session> {
        let running = self.current.lock().await.take()?;
        drain(running).await
    }

    /// Waits for the running session to finish on its own.
    pub async fn wait(&self) -> Option<Session> {
        let running = self.current.lock().await.take()?;
        match running.handle.await {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(label = %running.label, error = %e, "Verification session task failed");
                None
            }
        }
    }

    pub async fn is_running(&self) -> bool {
        self.current
            .lock()
            .await
            .as_ref()
            .is_some_and(|s| !s.handle.is_finished())
    }
}

async fn drain(running: RunningSession) -> Option<Session> {
    running.token.cancel();
    match running.handle.await {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(label = %running.label, error = %e, "Verification session task failed");
            None
        }
    }
}
