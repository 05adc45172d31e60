use async_trait::async_trait;
use serde::Deserialize;
use sots_application::ports::ProfileCatalog;
use sots_domain::{DomainError, Profile, ProviderCategory, ServiceCategory};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const META_FILE: &str = "profiles_meta.json";
const LAST_PROFILE_FILE: &str = "last.txt";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileMeta {
    #[serde(default)]
    service: i32,
    #[serde(default)]
    provider: i32,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Profiles stored as files in the profiles directory and its custom subdirectory.
///
/// Built-in profiles are `.txt` files, categorized through `profiles_meta.json`.
/// Custom profiles may also be `.bat` files and are always `Custom`.
/// A name is listed once, following the resolver's lookup order.
pub struct DirectoryProfileCatalog {
    profiles_dir: PathBuf,
    custom_profiles_dir: PathBuf,
}

impl DirectoryProfileCatalog {
    pub fn new(profiles_dir: impl Into<PathBuf>, custom_profiles_dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            custom_profiles_dir: custom_profiles_dir.into(),
        }
    }

    async fn load_meta(&self) -> HashMap<String, ProfileMeta> {
        let path = self.profiles_dir.join(META_FILE);
        let Ok(raw) = tokio::fs::read_to_string(&path).await else {
            return HashMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(meta) => meta,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid profile metadata");
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl ProfileCatalog for DirectoryProfileCatalog {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let meta = self.load_meta().await;

        let main = list_stems(&self.profiles_dir, &["txt"]).await?;
        let custom = list_stems(&self.custom_profiles_dir, &["txt", "bat"]).await?;

        let mut profiles: Vec<Profile> = main
            .into_iter()
            .map(|stem| {
                let profile = Profile::new(stem.as_str());
                match meta.get(&stem) {
                    Some(m) => apply_meta(profile, m),
                    None => profile,
                }
            })
            .collect();
        let main_count = profiles.len();

        let mut seen: HashSet<String> = profiles.iter().map(|p| p.id().to_string()).collect();
        for stem in custom {
            if !seen.insert(stem.clone()) {
                warn!(
                    profile = %stem,
                    "Custom profile shadowed by an earlier file with the same name"
                );
                continue;
            }
            profiles.push(Profile::new(stem).with_service_category(ServiceCategory::Custom));
        }

        info!(
            main = main_count,
            custom = profiles.len() - main_count,
            "Profiles loaded"
        );
        Ok(profiles)
    }
}

fn apply_meta(profile: Profile, meta: &ProfileMeta) -> Profile {
    let mut profile = profile
        .with_service_category(ServiceCategory::from_code(meta.service))
        .with_provider_category(ProviderCategory::from_code(meta.provider));
    if let Some(name) = &meta.display_name {
        profile = profile.with_display_name(name.as_str());
    }
    if let Some(description) = &meta.description {
        profile = profile.with_description(description.as_str());
    }
    profile
}

/// File stems with one of `extensions`, sorted by name then extension order.
/// A missing directory is empty.
async fn list_stems(dir: &Path, extensions: &[&str]) -> Result<Vec<String>, DomainError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(DomainError::IoError(format!("{}: {}", dir.display(), e))),
    };

    let mut stems: Vec<(String, usize)> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| DomainError::IoError(format!("{}: {}", dir.display(), e)))?
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.eq_ignore_ascii_case(LAST_PROFILE_FILE) {
            continue;
        }
        let rank = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| extensions.iter().position(|x| e.eq_ignore_ascii_case(x)));
        if let (Some(rank), Some(stem)) = (rank, path.file_stem().and_then(|s| s.to_str())) {
            stems.push((stem.to_string(), rank));
        }
    }
    stems.sort();
    Ok(stems.into_iter().map(|(stem, _)| stem).collect())
}
