use async_trait::async_trait;
use sots_application::ports::{KillOutcome, ProcessControl, ProcessHandle};
use sots_domain::DomainError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use sysinfo::{ProcessesToUpdate, System};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

const DESTROY_WAIT: Duration = Duration::from_secs(2);

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Process control backed by the OS process table.
pub struct SystemProcessControl;

impl SystemProcessControl {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemProcessControl {
    fn default() -> Self {
        Self::new()
    }
}

struct ChildHandle {
    child: Child,
    pid: Option<u32>,
}

#[async_trait]
impl ProcessHandle for ChildHandle {
    fn pid(&self) -> Option<u32> {
        self.pid
    }

    async fn destroy(&mut self) {
        if let Err(e) = self.child.start_kill() {
            debug!(pid = ?self.pid, error = %e, "Process already exited");
            return;
        }
        if tokio::time::timeout(DESTROY_WAIT, self.child.wait())
            .await
            .is_err()
        {
            warn!(pid = ?self.pid, "Process did not exit after kill");
        }
    }
}

#[async_trait]
impl ProcessControl for SystemProcessControl {
    async fn spawn(
        &self,
        executable: &Path,
        args: &[String],
    ) -> Result<Box<dyn ProcessHandle>, DomainError> {
        if !executable.is_file() {
            return Err(DomainError::ExecutableNotFound(
                executable.display().to_string(),
            ));
        }

        let mut command = Command::new(executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = executable.parent() {
            command.current_dir(dir);
        }
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let child = command.spawn().map_err(|e| DomainError::SpawnError {
            process: executable.display().to_string(),
            reason: e.to_string(),
        })?;
        let pid = child.id();
        debug!(pid = ?pid, executable = %executable.display(), "Process spawned");

        Ok(Box::new(ChildHandle { child, pid }))
    }

    async fn is_running(&self, process_name: &str) -> Result<bool, DomainError> {
        let name = process_name.to_string();
        tokio::task::spawn_blocking(move || {
            refreshed_system()
                .processes_by_exact_name(OsStr::new(&name))
                .next()
                .is_some()
        })
        .await
        .map_err(|e| DomainError::IoError(format!("process lookup failed: {}", e)))
    }

    async fn kill_by_name(&self, process_name: &str) -> Result<KillOutcome, DomainError> {
        let name = process_name.to_string();
        let killed = tokio::task::spawn_blocking(move || {
            let system = refreshed_system();
            system
                .processes_by_exact_name(OsStr::new(&name))
                .filter(|process| process.kill())
                .count()
        })
        .await
        .map_err(|e| DomainError::IoError(format!("process kill failed: {}", e)))?;

        if killed == 0 {
            Ok(KillOutcome::NotFound)
        } else {
            debug!(process = %process_name, killed, "Killed processes by name");
            Ok(KillOutcome::Killed(killed))
        }
    }
}

fn refreshed_system() -> System {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);
    system
}
