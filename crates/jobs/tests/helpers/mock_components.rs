#![allow(dead_code)]

use async_trait::async_trait;
use sots_application::ports::{
    ConnectivityProbe, ProcessHandle, ProfileArgsResolver, ProfileLauncher, ProviderDetector,
    ServiceStateController, SessionLogWriter,
};
use sots_domain::{
    CategoryOutcome, DomainError, ProbeCatalog, ProbeTarget, ProviderInfo, ServiceCategoryTag,
    ServiceRunState, SessionEntry, SessionHandle, SessionHeader, VerificationOutcome,
};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

// ── Launcher ────────────────────────────────────────────────────────────────

/// Counts live processes. Arguments containing `fail` never confirm.
pub struct MockProfileLauncher {
    alive: Arc<AtomicI64>,
    max_alive: Arc<AtomicI64>,
    launch_count: AtomicU64,
    teardown_count: AtomicU64,
}

impl MockProfileLauncher {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicI64::new(0)),
            max_alive: Arc::new(AtomicI64::new(0)),
            launch_count: AtomicU64::new(0),
            teardown_count: AtomicU64::new(0),
        }
    }

    pub fn alive(&self) -> i64 {
        self.alive.load(Ordering::SeqCst)
    }

    pub fn max_alive(&self) -> i64 {
        self.max_alive.load(Ordering::SeqCst)
    }

    pub fn launch_count(&self) -> u64 {
        self.launch_count.load(Ordering::SeqCst)
    }

    pub fn teardown_count(&self) -> u64 {
        self.teardown_count.load(Ordering::SeqCst)
    }
}

impl Default for MockProfileLauncher {
    fn default() -> Self {
        Self::new()
    }
}

struct MockHandle {
    alive: Arc<AtomicI64>,
    destroyed: bool,
}

#[async_trait]
impl ProcessHandle for MockHandle {
    fn pid(&self) -> Option<u32> {
        Some(4242)
    }

    async fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.alive.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl ProfileLauncher for MockProfileLauncher {
    async fn launch_and_wait_ready(
        &self,
        _executable: &Path,
        args: &str,
        cancel: &CancellationToken,
    ) -> Result<Box<dyn ProcessHandle>, DomainError> {
        self.launch_count.fetch_add(1, Ordering::SeqCst);
        if cancel.is_cancelled() {
            return Err(DomainError::CancelledByUser);
        }
        if args.contains("fail") {
            return Err(DomainError::ProcessNotConfirmed {
                process: "winws.exe".to_string(),
                attempts: 3,
            });
        }
        let now = self.alive.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_alive.fetch_max(now, Ordering::SeqCst);
        Ok(Box::new(MockHandle {
            alive: Arc::clone(&self.alive),
            destroyed: false,
        }))
    }

    async fn teardown(&self, handle: Option<Box<dyn ProcessHandle>>) {
        self.teardown_count.fetch_add(1, Ordering::SeqCst);
        if let Some(mut handle) = handle {
            handle.destroy().await;
        }
    }
}

// ── Probe ───────────────────────────────────────────────────────────────────

/// Returns queued outcomes in order, then all-reachable.
pub struct MockConnectivityProbe {
    outcomes: RwLock<VecDeque<VerificationOutcome>>,
    delay: RwLock<Duration>,
    call_count: AtomicU64,
}

impl MockConnectivityProbe {
    pub fn new() -> Self {
        Self {
            outcomes: RwLock::new(VecDeque::new()),
            delay: RwLock::new(Duration::ZERO),
            call_count: AtomicU64::new(0),
        }
    }

    pub async fn push_outcome(&self, outcome: VerificationOutcome) {
        self.outcomes.write().await.push_back(outcome);
    }

    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockConnectivityProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectivityProbe for MockConnectivityProbe {
    async fn probe_catalog(&self, catalog: &ProbeCatalog) -> VerificationOutcome {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match self.outcomes.write().await.pop_front() {
            Some(outcome) => outcome,
            None => VerificationOutcome::from_categories(catalog.categories().map(|category| {
                CategoryOutcome {
                    category,
                    failed_targets: Vec::new(),
                }
            })),
        }
    }

    async fn probe_category(
        &self,
        category: ServiceCategoryTag,
        _targets: &[ProbeTarget],
    ) -> CategoryOutcome {
        CategoryOutcome {
            category,
            failed_targets: Vec::new(),
        }
    }
}

// ── Service ─────────────────────────────────────────────────────────────────

pub struct MockServiceController {
    present: AtomicBool,
    stop_count: AtomicU64,
}

impl MockServiceController {
    pub fn new() -> Self {
        Self {
            present: AtomicBool::new(false),
            stop_count: AtomicU64::new(0),
        }
    }

    pub fn installed() -> Self {
        let controller = Self::new();
        controller.present.store(true, Ordering::SeqCst);
        controller
    }

    pub fn stop_count(&self) -> u64 {
        self.stop_count.load(Ordering::SeqCst)
    }
}

impl Default for MockServiceController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceStateController for MockServiceController {
    fn service_name(&self) -> &str {
        "sots"
    }

    async fn query_status(&self, _service_name: &str) -> ServiceRunState {
        if self.present.load(Ordering::SeqCst) {
            ServiceRunState::Running
        } else {
            ServiceRunState::NotFound
        }
    }

    async fn create_and_start(&self, _profile_args: &str) -> Result<(), DomainError> {
        self.present.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self, _service_name: &str) -> Result<(), DomainError> {
        self.stop_count.fetch_add(1, Ordering::SeqCst);
        self.present.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn start_or_reconcile(&self, profile_args: &str) -> Result<(), DomainError> {
        self.create_and_start(profile_args).await
    }

    async fn restart(&self, profile_args: &str) -> Result<(), DomainError> {
        self.create_and_start(profile_args).await
    }

    async fn is_any_running(&self, _service_names: &[&str]) -> bool {
        self.present.load(Ordering::SeqCst)
    }
}

// ── Session log ─────────────────────────────────────────────────────────────

pub struct MockSessionLog {
    events: RwLock<Vec<String>>,
    headers: RwLock<Vec<SessionHeader>>,
    entries: RwLock<Vec<SessionEntry>>,
    should_fail_open: RwLock<bool>,
}

impl MockSessionLog {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            headers: RwLock::new(Vec::new()),
            entries: RwLock::new(Vec::new()),
            should_fail_open: RwLock::new(false),
        }
    }

    pub async fn set_should_fail_open(&self, should_fail: bool) {
        *self.should_fail_open.write().await = should_fail;
    }

    pub async fn events(&self) -> Vec<String> {
        self.events.read().await.clone()
    }

    pub async fn headers(&self) -> Vec<SessionHeader> {
        self.headers.read().await.clone()
    }

    pub async fn entries(&self) -> Vec<SessionEntry> {
        self.entries.read().await.clone()
    }
}

impl Default for MockSessionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionLogWriter for MockSessionLog {
    async fn open_session(&self, label: &str) -> Result<SessionHandle, DomainError> {
        if *self.should_fail_open.read().await {
            return Err(DomainError::IoError("read-only file system".to_string()));
        }
        self.events.write().await.push(format!("open:{}", label));
        Ok(SessionHandle {
            label: Arc::from(label),
            location: PathBuf::from(format!("/tmp/{}.log", label)),
        })
    }

    async fn write_header(
        &self,
        _handle: &SessionHandle,
        header: &SessionHeader,
    ) -> Result<(), DomainError> {
        self.events.write().await.push("header".to_string());
        self.headers.write().await.push(header.clone());
        Ok(())
    }

    async fn append_entry(
        &self,
        _handle: &SessionHandle,
        entry: &SessionEntry,
    ) -> Result<(), DomainError> {
        self.events
            .write()
            .await
            .push(format!("entry:{}", entry.profile.id()));
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn close_session(&self, handle: SessionHandle) -> Result<(), DomainError> {
        self.events
            .write()
            .await
            .push(format!("close:{}", handle.label));
        Ok(())
    }
}

// ── Arguments and provider ──────────────────────────────────────────────────

/// Resolves `<name>` to `--profile=<name>`; unknown names are missing.
pub struct MockArgsResolver {
    args: RwLock<HashMap<String, String>>,
    missing: RwLock<Vec<String>>,
}

impl MockArgsResolver {
    pub fn new() -> Self {
        Self {
            args: RwLock::new(HashMap::new()),
            missing: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_args(&self, file_name: &str, args: &str) {
        self.args
            .write()
            .await
            .insert(file_name.to_string(), args.to_string());
    }

    pub async fn set_missing(&self, file_name: &str) {
        self.missing.write().await.push(file_name.to_string());
    }
}

impl Default for MockArgsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileArgsResolver for MockArgsResolver {
    async fn resolve_launch_args(&self, file_name: &str) -> Result<String, DomainError> {
        if self.missing.read().await.iter().any(|m| m == file_name) {
            return Err(DomainError::ProfileNotFound(file_name.to_string()));
        }
        Ok(self
            .args
            .read()
            .await
            .get(file_name)
            .cloned()
            .unwrap_or_else(|| format!("--profile={}", file_name)))
    }
}

pub struct MockProviderDetector {
    should_fail: bool,
}

impl MockProviderDetector {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn failing() -> Self {
        Self { should_fail: true }
    }
}

#[async_trait]
impl ProviderDetector for MockProviderDetector {
    async fn detect_provider(&self) -> Result<ProviderInfo, DomainError> {
        if self.should_fail {
            return Err(DomainError::ProbeTimeout {
                target: "ip-api.com".to_string(),
            });
        }
        Ok(ProviderInfo {
            isp: "Example Telecom".to_string(),
            org: Some("Example Org".to_string()),
            country: Some("Nowhere".to_string()),
            ip: "203.0.113.7".to_string(),
        })
    }
}
