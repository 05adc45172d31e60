use crate::check_result::ProfileCheckResult;
use crate::profile::Profile;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Label used when a session covers every service category.
pub const ALL_SERVICES_LABEL: &str = "all";

/// Internet provider details recorded in session headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub isp: String,
    pub org: Option<String>,
    pub country: Option<String>,
    pub ip: String,
}

/// Opaque handle to an open session log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub label: Arc<str>,
    pub location: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SessionHeader {
    pub label: Arc<str>,
    pub started_at: DateTime<Local>,
    pub app_version: &'static str,
    pub provider: Option<ProviderInfo>,
    pub profile_count: usize,
}

/// How a profile's check ended, recorded next to its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryNote {
    None,
    CancelledByUser,
    Failure(String),
}

#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub profile: Profile,
    pub result: ProfileCheckResult,
    pub launch_args: String,
    pub note: EntryNote,
    pub recorded_at: DateTime<Local>,
}

/// One verification run over an ordered list of profiles.
#[derive(Debug, Clone)]
pub struct Session {
    pub label: Arc<str>,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    pub cancelled: bool,
    entries: Vec<SessionEntry>,
}

impl Session {
    pub fn start(label: impl Into<Arc<str>>) -> Self {
        Self {
            label: label.into(),
            started_at: Local::now(),
            finished_at: None,
            cancelled: false,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: SessionEntry) {
        self.entries.push(entry);
    }

    pub fn finish(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
        self.finished_at = Some(Local::now());
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn successful_profiles(&self) -> impl Iterator<Item = &Profile> {
        self.entries
            .iter()
            .filter(|e| e.result.is_success())
            .map(|e| &e.profile)
    }

    pub fn success_count(&self) -> usize {
        self.successful_profiles().count()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }
}
