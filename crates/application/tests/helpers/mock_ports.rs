#![allow(dead_code)]

use async_trait::async_trait;
use sots_application::ports::{
    KillOutcome, ProcessControl, ProcessHandle, ProfileArgsResolver, ReachabilityPort,
    ServiceScriptPort,
};
use sots_domain::DomainError;
use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ── Processes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct MockProcess {
    name: String,
    args: Vec<String>,
    visible: bool,
    alive: bool,
    listed_until: Option<Instant>,
}

impl MockProcess {
    fn is_listed(&self) -> bool {
        (self.alive && self.visible) || self.listed_until.is_some_and(|t| Instant::now() < t)
    }
}

#[derive(Default)]
struct ProcessTable {
    processes: Vec<MockProcess>,
    max_alive: usize,
}

impl ProcessTable {
    fn alive_count(&self) -> usize {
        self.processes.iter().filter(|p| p.alive).count()
    }
}

/// In-memory process table. Spawned processes become visible from the configured
/// spawn number on; earlier ones exit right away.
#[derive(Clone)]
pub struct MockProcessControl {
    table: Arc<Mutex<ProcessTable>>,
    visible_from_spawn: Arc<Mutex<Option<u64>>>,
    spawn_error: Arc<Mutex<Option<DomainError>>>,
    spawn_count: Arc<AtomicU64>,
    kill_count: Arc<AtomicU64>,
    destroy_count: Arc<AtomicU64>,
    exit_delay: Arc<Mutex<Duration>>,
}

impl MockProcessControl {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(ProcessTable::default())),
            visible_from_spawn: Arc::new(Mutex::new(Some(1))),
            spawn_error: Arc::new(Mutex::new(None)),
            spawn_count: Arc::new(AtomicU64::new(0)),
            kill_count: Arc::new(AtomicU64::new(0)),
            destroy_count: Arc::new(AtomicU64::new(0)),
            exit_delay: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Processes killed by name stay listed for `delay` after the kill returns.
    pub fn set_exit_delay(&self, delay: Duration) {
        *self.exit_delay.lock().unwrap() = delay;
    }

    pub fn never_visible() -> Self {
        let control = Self::new();
        *control.visible_from_spawn.lock().unwrap() = None;
        control
    }

    pub fn visible_from_spawn(spawn: u64) -> Self {
        let control = Self::new();
        *control.visible_from_spawn.lock().unwrap() = Some(spawn);
        control
    }

    pub fn fail_spawn_with(&self, error: DomainError) {
        *self.spawn_error.lock().unwrap() = Some(error);
    }

    /// Adds a process started outside the launcher.
    pub fn add_stray(&self, name: &str) {
        let mut table = self.table.lock().unwrap();
        table.processes.push(MockProcess {
            name: name.to_string(),
            args: Vec::new(),
            visible: true,
            alive: true,
            listed_until: None,
        });
        table.max_alive = table.max_alive.max(table.alive_count());
    }

    pub fn spawn_count(&self) -> u64 {
        self.spawn_count.load(Ordering::SeqCst)
    }

    pub fn kill_count(&self) -> u64 {
        self.kill_count.load(Ordering::SeqCst)
    }

    pub fn destroy_count(&self) -> u64 {
        self.destroy_count.load(Ordering::SeqCst)
    }

    pub fn alive_count(&self) -> usize {
        self.table.lock().unwrap().alive_count()
    }

    pub fn max_alive(&self) -> usize {
        self.table.lock().unwrap().max_alive
    }

    pub fn last_args(&self) -> Option<Vec<String>> {
        self.table
            .lock()
            .unwrap()
            .processes
            .last()
            .map(|p| p.args.clone())
    }
}

impl Default for MockProcessControl {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MockProcessHandle {
    pid: u32,
    table: Arc<Mutex<ProcessTable>>,
    destroy_count: Arc<AtomicU64>,
}

#[async_trait]
impl ProcessHandle for MockProcessHandle {
    fn pid(&self) -> Option<u32> {
        Some(self.pid)
    }

    async fn destroy(&mut self) {
        self.destroy_count.fetch_add(1, Ordering::SeqCst);
        if let Some(process) = self.table.lock().unwrap().processes.get_mut(self.pid as usize) {
            process.alive = false;
        }
    }
}

#[async_trait]
impl ProcessControl for MockProcessControl {
    async fn spawn(
        &self,
        executable: &Path,
        args: &[String],
    ) -> Result<Box<dyn ProcessHandle>, DomainError> {
        let spawn_number = self.spawn_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(error) = self.spawn_error.lock().unwrap().clone() {
            return Err(error);
        }

        let visible = self
            .visible_from_spawn
            .lock()
            .unwrap()
            .is_some_and(|from| spawn_number >= from);
        let name = executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut table = self.table.lock().unwrap();
        let pid = table.processes.len() as u32;
        table.processes.push(MockProcess {
            name,
            args: args.to_vec(),
            visible,
            alive: visible,
            listed_until: None,
        });
        table.max_alive = table.max_alive.max(table.alive_count());

        Ok(Box::new(MockProcessHandle {
            pid,
            table: Arc::clone(&self.table),
            destroy_count: Arc::clone(&self.destroy_count),
        }))
    }

    async fn is_running(&self, process_name: &str) -> Result<bool, DomainError> {
        let table = self.table.lock().unwrap();
        Ok(table
            .processes
            .iter()
            .any(|p| p.is_listed() && p.name == process_name))
    }

    async fn kill_by_name(&self, process_name: &str) -> Result<KillOutcome, DomainError> {
        self.kill_count.fetch_add(1, Ordering::SeqCst);
        let exit_delay = *self.exit_delay.lock().unwrap();
        let mut table = self.table.lock().unwrap();
        let mut killed = 0;
        for process in table
            .processes
            .iter_mut()
            .filter(|p| p.alive && p.name == process_name)
        {
            process.alive = false;
            if !exit_delay.is_zero() {
                process.listed_until = Some(Instant::now() + exit_delay);
            }
            killed += 1;
        }
        Ok(if killed == 0 {
            KillOutcome::NotFound
        } else {
            KillOutcome::Killed(killed)
        })
    }
}

// ── Reachability ────────────────────────────────────────────────────────────

/// Scripted HTTP and ICMP answers. Unknown URLs answer 200, unknown IPs reply.
#[derive(Clone)]
pub struct MockReachability {
    http: Arc<Mutex<HashMap<String, VecDeque<Result<u16, DomainError>>>>>,
    icmp: Arc<Mutex<HashMap<IpAddr, bool>>>,
    http_calls: Arc<Mutex<HashMap<String, u64>>>,
    icmp_calls: Arc<AtomicU64>,
    delay: Arc<Mutex<Duration>>,
}

impl MockReachability {
    pub fn new() -> Self {
        Self {
            http: Arc::new(Mutex::new(HashMap::new())),
            icmp: Arc::new(Mutex::new(HashMap::new())),
            http_calls: Arc::new(Mutex::new(HashMap::new())),
            icmp_calls: Arc::new(AtomicU64::new(0)),
            delay: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Answers are consumed in order; the last one repeats.
    pub fn set_http(&self, url: &str, answers: Vec<Result<u16, DomainError>>) {
        self.http
            .lock()
            .unwrap()
            .insert(url.to_string(), answers.into());
    }

    pub fn set_http_status(&self, url: &str, status: u16) {
        self.set_http(url, vec![Ok(status)]);
    }

    pub fn set_unreachable(&self, url: &str) {
        self.set_http(
            url,
            vec![Err(DomainError::ProbeUnreachable {
                target: url.to_string(),
                reason: "connection reset".to_string(),
            })],
        );
    }

    pub fn set_icmp(&self, ip: IpAddr, reply: bool) {
        self.icmp.lock().unwrap().insert(ip, reply);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn http_calls(&self, url: &str) -> u64 {
        self.http_calls
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_http_calls(&self) -> u64 {
        self.http_calls.lock().unwrap().values().sum()
    }

    pub fn icmp_calls(&self) -> u64 {
        self.icmp_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockReachability {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReachabilityPort for MockReachability {
    async fn http_get(&self, url: &str, _timeout: Duration) -> Result<u16, DomainError> {
        *self
            .http_calls
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut http = self.http.lock().unwrap();
        match http.get_mut(url) {
            Some(answers) if answers.len() > 1 => answers.pop_front().unwrap_or(Ok(200)),
            Some(answers) => answers.front().cloned().unwrap_or(Ok(200)),
            None => Ok(200),
        }
    }

    async fn icmp_echo(&self, ip: IpAddr, _timeout: Duration) -> Result<bool, DomainError> {
        self.icmp_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.icmp.lock().unwrap().get(&ip).copied().unwrap_or(true))
    }
}

// ── Service scripts ─────────────────────────────────────────────────────────

/// Scripted service manager. Status answers are consumed in order; the last repeats.
#[derive(Clone)]
pub struct MockServiceScripts {
    status: Arc<Mutex<VecDeque<Option<String>>>>,
    create_output: Arc<Mutex<Option<String>>>,
    delete_output: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockServiceScripts {
    pub fn new() -> Self {
        Self {
            status: Arc::new(Mutex::new(VecDeque::from([Some("NOT_FOUND".to_string())]))),
            create_output: Arc::new(Mutex::new(Some(
                "Service created and started".to_string(),
            ))),
            delete_output: Arc::new(Mutex::new(Some("Service deleted".to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_status(&self, answers: Vec<Option<&str>>) {
        *self.status.lock().unwrap() = answers
            .into_iter()
            .map(|a| a.map(str::to_string))
            .collect();
    }

    pub fn set_create_output(&self, output: Option<&str>) {
        *self.create_output.lock().unwrap() = output.map(str::to_string);
    }

    pub fn set_delete_output(&self, output: Option<&str>) {
        *self.delete_output.lock().unwrap() = output.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl Default for MockServiceScripts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServiceScriptPort for MockServiceScripts {
    async fn check_service_status(&self, service_name: &str) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("status:{}", service_name));
        let mut status = self.status.lock().unwrap();
        if status.len() > 1 {
            status.pop_front().flatten()
        } else {
            status.front().cloned().flatten()
        }
    }

    async fn create_service(
        &self,
        service_name: &str,
        executable: &Path,
        arguments: &str,
    ) -> Option<String> {
        self.calls.lock().unwrap().push(format!(
            "create:{}:{}:{}",
            service_name,
            executable.display(),
            arguments
        ));
        self.create_output.lock().unwrap().clone()
    }

    async fn delete_service(&self, service_name: &str) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete:{}", service_name));
        self.delete_output.lock().unwrap().clone()
    }
}

// ── Profile arguments ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockArgsResolver {
    args: Arc<Mutex<HashMap<String, String>>>,
}

impl MockArgsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, file_name: &str, args: &str) -> Self {
        self.args
            .lock()
            .unwrap()
            .insert(file_name.to_string(), args.to_string());
        self
    }
}

#[async_trait]
impl ProfileArgsResolver for MockArgsResolver {
    async fn resolve_launch_args(&self, file_name: &str) -> Result<String, DomainError> {
        self.args
            .lock()
            .unwrap()
            .get(file_name)
            .cloned()
            .ok_or_else(|| DomainError::ProfileNotFound(file_name.to_string()))
    }
}
