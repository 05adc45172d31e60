use async_trait::async_trait;
use sots_application::ports::ServiceScriptPort;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, warn};

const SCRIPT_TIMEOUT: Duration = Duration::from_secs(60);

const CHECK_SCRIPT: ScriptAsset = ScriptAsset {
    file_name: "check_sots_service.ps1",
    contents: include_str!("../../scripts/check_sots_service.ps1"),
};
const CREATE_SCRIPT: ScriptAsset = ScriptAsset {
    file_name: "create_sots_service.ps1",
    contents: include_str!("../../scripts/create_sots_service.ps1"),
};
const DELETE_SCRIPT: ScriptAsset = ScriptAsset {
    file_name: "delete_sots_service.ps1",
    contents: include_str!("../../scripts/delete_sots_service.ps1"),
};

struct ScriptAsset {
    file_name: &'static str,
    contents: &'static str,
}

/// Runs the bundled service administration scripts through PowerShell.
///
/// Scripts are written to `scripts_dir` before each run so the installed copy always
/// matches the binary.
pub struct PowerShellServiceScripts {
    powershell: String,
    scripts_dir: PathBuf,
    timeout: Duration,
}

impl PowerShellServiceScripts {
    pub fn new(powershell: impl Into<String>, scripts_dir: impl Into<PathBuf>) -> Self {
        Self {
            powershell: powershell.into(),
            scripts_dir: scripts_dir.into(),
            timeout: SCRIPT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn install(&self, asset: &ScriptAsset) -> Option<PathBuf> {
        let path = self.scripts_dir.join(asset.file_name);
        if let Err(e) = tokio::fs::create_dir_all(&self.scripts_dir).await {
            error!(dir = %self.scripts_dir.display(), error = %e, "Cannot create scripts directory");
            return None;
        }
        if let Err(e) = tokio::fs::write(&path, asset.contents).await {
            error!(script = %path.display(), error = %e, "Cannot write script");
            return None;
        }
        Some(path)
    }

    async fn run(&self, asset: &ScriptAsset, args: &[&str]) -> Option<String> {
        let script = self.install(asset).await?;
        run_script(&self.powershell, &script, args, self.timeout).await
    }
}

/// Runs one script and returns its combined, trimmed output.
async fn run_script(
    powershell: &str,
    script: &Path,
    args: &[&str],
    timeout: Duration,
) -> Option<String> {
    let mut command = Command::new(powershell);
    command
        .args(["-NoProfile", "-ExecutionPolicy", "Bypass", "-File"])
        .arg(script)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            error!(script = %script.display(), error = %e, "Failed to run script");
            return None;
        }
        Err(_) => {
            warn!(script = %script.display(), "Script timed out");
            return None;
        }
    };

    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        text.push('\n');
        text.push_str(&stderr);
    }
    debug!(
        script = %script.display(),
        status = ?output.status.code(),
        "Script finished"
    );
    Some(text.trim().to_string())
}

#[async_trait]
impl ServiceScriptPort for PowerShellServiceScripts {
    async fn check_service_status(&self, service_name: &str) -> Option<String> {
        self.run(&CHECK_SCRIPT, &[service_name]).await
    }

    async fn create_service(
        &self,
        service_name: &str,
        executable: &Path,
        arguments: &str,
    ) -> Option<String> {
        let executable = executable.display().to_string();
        self.run(
            &CREATE_SCRIPT,
            &[
                "-ServiceName",
                service_name,
                "-ExecutablePath",
                &executable,
                "-Arguments",
                arguments,
            ],
        )
        .await
    }

    async fn delete_service(&self, service_name: &str) -> Option<String> {
        self.run(&DELETE_SCRIPT, &[service_name]).await
    }
}
