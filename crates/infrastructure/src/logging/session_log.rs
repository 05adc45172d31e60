use async_trait::async_trait;
use chrono::Local;
use sots_application::ports::SessionLogWriter;
use sots_domain::{
    DomainError, EntryNote, ProbeCatalog, ProfileCheckResult, SessionEntry, SessionHandle,
    SessionHeader,
};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const FILE_PREFIX: &str = "profile_check_session_";
const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(24 * 60 * 60);

type ProfileArguments = Vec<(String, String)>;

/// Writes one human-readable log file per verification session.
///
/// Launch arguments of every entry are kept until `close_session`, which lists
/// them in the footer. Sessions never closed are dropped once older than
/// `stale_after`, checked whenever a new session opens.
pub struct FileSessionLogWriter {
    logs_dir: PathBuf,
    catalog: Arc<ProbeCatalog>,
    stale_after: Duration,
    arguments: Mutex<HashMap<PathBuf, (Instant, ProfileArguments)>>,
}

impl FileSessionLogWriter {
    pub fn new(logs_dir: impl Into<PathBuf>, catalog: Arc<ProbeCatalog>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            catalog,
            stale_after: DEFAULT_STALE_AFTER,
            arguments: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    fn render_entry(&self, label: &str, entry: &SessionEntry) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "[{}] Profile: {} ({})",
            entry.recorded_at.format("%Y-%m-%d %H:%M:%S%.3f"),
            entry.profile.file_name,
            entry.profile.display_name.as_deref().unwrap_or("no displayName")
        );
        let _ = writeln!(out, "Domain: {}", label);

        match &entry.result {
            ProfileCheckResult::Success => out.push_str("Result: Success\n"),
            ProfileCheckResult::Error(message) => {
                let _ = writeln!(out, "Result: Error: {}", message);
            }
            ProfileCheckResult::CategoriesResult(outcome) => {
                out.push_str("> Starting config...\n> Running tests...\n\n");
                for (category, targets) in self.catalog.entries() {
                    let category = outcome.get(*category);
                    for target in targets {
                        let ok = category.is_some_and(|c| !c.has_failed(target));
                        let status = if ok { "OK" } else { "Failed" };
                        let _ = writeln!(out, "{}: {}", target.display_name(), status);
                    }
                }
            }
        }

        match &entry.note {
            EntryNote::None => {}
            EntryNote::CancelledByUser => out.push_str("\nCancelled by user\n"),
            EntryNote::Failure(detail) => {
                let _ = write!(out, "\nFailure: {}\n", detail);
            }
        }
        let _ = writeln!(out, "Arguments: {}", entry.launch_args);
        out.push('\n');
        out
    }
}

/// Replaces path separators and drive colons in a session label.
pub fn safe_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '_',
            c => c,
        })
        .collect()
}

async fn append(path: &Path, text: &str) -> Result<(), DomainError> {
    let io_error = |e: std::io::Error| DomainError::IoError(format!("{}: {}", path.display(), e));
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(io_error)?;
    file.write_all(text.as_bytes()).await.map_err(io_error)?;
    file.flush().await.map_err(io_error)
}

#[async_trait]
impl SessionLogWriter for FileSessionLogWriter {
    async fn open_session(&self, label: &str) -> Result<SessionHandle, DomainError> {
        tokio::fs::create_dir_all(&self.logs_dir)
            .await
            .map_err(|e| DomainError::IoError(format!("{}: {}", self.logs_dir.display(), e)))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let location = self
            .logs_dir
            .join(format!("{}{}_{}.log", FILE_PREFIX, safe_label(label), stamp));
        append(&location, "").await?;

        let mut arguments = self.arguments.lock().await;
        let before = arguments.len();
        arguments.retain(|_, (opened, _)| opened.elapsed() < self.stale_after);
        let evicted = before - arguments.len();
        if evicted > 0 {
            warn!(evicted, "Dropped arguments of sessions that were never closed");
        }
        arguments.insert(location.clone(), (Instant::now(), Vec::new()));
        drop(arguments);
        info!(path = %location.display(), "Session log opened");

        Ok(SessionHandle {
            label: Arc::from(label),
            location,
        })
    }

    async fn write_header(
        &self,
        handle: &SessionHandle,
        header: &SessionHeader,
    ) -> Result<(), DomainError> {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Profile check session started: {}",
            header.started_at.format("%H:%M:%S")
        );
        let _ = writeln!(out, "Service domain: {}", header.label);
        let _ = writeln!(out, "App version: {}", header.app_version);
        let _ = writeln!(out, "Profiles: {}", header.profile_count);
        match &header.provider {
            Some(provider) => {
                out.push_str("Provider info:\n");
                let _ = writeln!(out, "  ISP: {}", provider.isp);
                let _ = writeln!(out, "  Org: {}", provider.org.as_deref().unwrap_or("-"));
                let _ = writeln!(
                    out,
                    "  Country: {}",
                    provider.country.as_deref().unwrap_or("-")
                );
            }
            None => out.push_str("Provider info: unavailable\n"),
        }
        out.push('\n');
        append(&handle.location, &out).await
    }

    async fn append_entry(
        &self,
        handle: &SessionHandle,
        entry: &SessionEntry,
    ) -> Result<(), DomainError> {
        let text = self.render_entry(&handle.label, entry);
        append(&handle.location, &text).await?;

        let mut arguments = self.arguments.lock().await;
        let (_, list) = arguments
            .entry(handle.location.clone())
            .or_insert_with(|| (Instant::now(), Vec::new()));
        let name = entry.profile.file_name.to_string();
        match list.iter_mut().find(|(n, _)| *n == name) {
            Some((_, args)) => *args = entry.launch_args.clone(),
            None => list.push((name, entry.launch_args.clone())),
        }
        debug!(profile = %entry.profile.id(), "Session log entry written");
        Ok(())
    }

    async fn close_session(&self, handle: SessionHandle) -> Result<(), DomainError> {
        let arguments = self
            .arguments
            .lock()
            .await
            .remove(&handle.location)
            .map(|(_, list)| list)
            .unwrap_or_default();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Profile check session completed: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        );
        out.push_str("Profile arguments:\n");
        for (name, args) in &arguments {
            let _ = write!(out, "\n{} \\/\n{}\n", name, args);
        }
        out.push('\n');
        append(&handle.location, &out).await?;

        info!(path = %handle.location.display(), "Session log closed");
        Ok(())
    }
}
