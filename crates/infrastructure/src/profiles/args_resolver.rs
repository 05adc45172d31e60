use super::adapter::ProfileAdapter;
use async_trait::async_trait;
use sots_application::ports::ProfileArgsResolver;
use sots_domain::DomainError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads profile files from disk and adapts them into launch arguments.
///
/// Lookup order: `<profiles>/<name>.txt`, `<custom>/<name>.txt`, `<custom>/<name>.bat`.
pub struct FileProfileArgsResolver {
    profiles_dir: PathBuf,
    custom_profiles_dir: PathBuf,
    adapter: ProfileAdapter,
}

impl FileProfileArgsResolver {
    pub fn new(
        profiles_dir: impl Into<PathBuf>,
        custom_profiles_dir: impl Into<PathBuf>,
        adapter: ProfileAdapter,
    ) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            custom_profiles_dir: custom_profiles_dir.into(),
            adapter,
        }
    }

    fn locate(&self, file_name: &str) -> Option<PathBuf> {
        [
            self.profiles_dir.join(format!("{}.txt", file_name)),
            self.custom_profiles_dir.join(format!("{}.txt", file_name)),
            self.custom_profiles_dir.join(format!("{}.bat", file_name)),
        ]
        .into_iter()
        .find(|path| path.is_file())
    }
}

#[async_trait]
impl ProfileArgsResolver for FileProfileArgsResolver {
    async fn resolve_launch_args(&self, file_name: &str) -> Result<String, DomainError> {
        let Some(path) = self.locate(file_name) else {
            warn!(profile = %file_name, "Profile file not found");
            return Err(DomainError::ProfileNotFound(file_name.to_string()));
        };

        let content = read_profile(&path).await?;
        let args = self.adapter.adapt(&content);
        if args.is_empty() {
            return Err(DomainError::ArgsInvalid(format!(
                "profile {} has no arguments",
                file_name
            )));
        }

        debug!(profile = %file_name, path = %path.display(), "Profile arguments resolved");
        Ok(args)
    }
}

async fn read_profile(path: &Path) -> Result<String, DomainError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
