use sots_domain::{Profile, ProfileCheckStatus, ServiceCategoryTag};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::debug;

const EVENT_CAPACITY: usize = 256;

pub type ProfileStatusMap = HashMap<Arc<str>, ProfileCheckStatus>;
pub type CategoryStatusMap = HashMap<Arc<str>, HashMap<ServiceCategoryTag, bool>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    ProfileStatus {
        profile_id: Arc<str>,
        status: ProfileCheckStatus,
    },
    CategoryStatuses {
        profile_id: Arc<str>,
        statuses: HashMap<ServiceCategoryTag, bool>,
    },
    SessionFinished {
        label: Arc<str>,
        cancelled: bool,
    },
}

/// Observable per-profile and per-category status of the current session.
///
/// Snapshots are kept in watch channels so late subscribers see the current state.
/// Every change is also broadcast as a `StatusUpdate`.
pub struct StatusBoard {
    profiles: watch::Sender<ProfileStatusMap>,
    categories: watch::Sender<CategoryStatusMap>,
    events: broadcast::Sender<StatusUpdate>,
}

impl StatusBoard {
    pub fn new() -> Self {
        let (profiles, _) = watch::channel(HashMap::new());
        let (categories, _) = watch::channel(HashMap::new());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            profiles,
            categories,
            events,
        }
    }

    /// Marks every profile of a new session as idle and forgets old category results.
    pub fn reset(&self, profiles: &[Profile]) {
        let idle: ProfileStatusMap = profiles
            .iter()
            .map(|p| (Arc::clone(&p.file_name), ProfileCheckStatus::Idle))
            .collect();
        self.profiles.send_replace(idle);
        self.categories.send_replace(HashMap::new());

        for profile in profiles {
            self.publish(StatusUpdate::ProfileStatus {
                profile_id: Arc::clone(&profile.file_name),
                status: ProfileCheckStatus::Idle,
            });
        }
    }

    pub fn set_profile_status(&self, profile_id: &Arc<str>, status: ProfileCheckStatus) {
        self.profiles.send_modify(|map| {
            map.insert(Arc::clone(profile_id), status);
        });
        self.publish(StatusUpdate::ProfileStatus {
            profile_id: Arc::clone(profile_id),
            status,
        });
    }

    pub fn set_category_statuses(
        &self,
        profile_id: &Arc<str>,
        statuses: HashMap<ServiceCategoryTag, bool>,
    ) {
        self.categories.send_modify(|map| {
            map.insert(Arc::clone(profile_id), statuses.clone());
        });
        self.publish(StatusUpdate::CategoryStatuses {
            profile_id: Arc::clone(profile_id),
            statuses,
        });
    }

    pub fn finish_session(&self, label: &str, cancelled: bool) {
        self.publish(StatusUpdate::SessionFinished {
            label: Arc::from(label),
            cancelled,
        });
    }

    pub fn status_of(&self, profile_id: &str) -> ProfileCheckStatus {
        self.profiles
            .borrow()
            .get(profile_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn profile_statuses(&self) -> ProfileStatusMap {
        self.profiles.borrow().clone()
    }

    pub fn category_statuses(&self) -> CategoryStatusMap {
        self.categories.borrow().clone()
    }

    pub fn subscribe_profiles(&self) -> watch::Receiver<ProfileStatusMap> {
        self.profiles.subscribe()
    }

    pub fn subscribe_categories(&self) -> watch::Receiver<CategoryStatusMap> {
        self.categories.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StatusUpdate> {
        self.events.subscribe()
    }

    fn publish(&self, update: StatusUpdate) {
        if self.events.send(update).is_err() {
            debug!("No status subscribers");
        }
    }
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}
