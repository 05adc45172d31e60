use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "Sots";

/// Installation layout. Every derived directory can be overridden individually;
/// unset ones are resolved against `base_dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default)]
    pub profiles_dir: Option<PathBuf>,

    #[serde(default)]
    pub custom_profiles_dir: Option<PathBuf>,

    #[serde(default)]
    pub bin_dir: Option<PathBuf>,

    #[serde(default)]
    pub whitelist_dir: Option<PathBuf>,

    #[serde(default)]
    pub session_logs_dir: Option<PathBuf>,

    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,

    #[serde(default)]
    pub tls_fake_bin: Option<PathBuf>,

    #[serde(default = "default_game_filter")]
    pub game_filter: String,
}

impl PathsConfig {
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.resolve(&self.profiles_dir, "profiles")
    }

    pub fn custom_profiles_dir(&self) -> PathBuf {
        self.custom_profiles_dir
            .clone()
            .unwrap_or_else(|| self.profiles_dir().join("custom profiles"))
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.resolve(&self.bin_dir, "win")
    }

    pub fn whitelist_dir(&self) -> PathBuf {
        self.resolve(&self.whitelist_dir, "whitelist")
    }

    pub fn session_logs_dir(&self) -> PathBuf {
        self.session_logs_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("logs").join("autoCheckLogs"))
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.resolve(&self.scripts_dir, "scripts")
    }

    pub fn tls_fake_bin(&self) -> PathBuf {
        self.tls_fake_bin.clone().unwrap_or_else(|| {
            self.bin_dir()
                .join("blockcheck")
                .join("zapret")
                .join("files")
                .join("fake")
                .join("tls_clienthello_iana_org.bin")
        })
    }

    pub fn executable_path(&self, executable_name: &str) -> PathBuf {
        self.bin_dir().join(executable_name)
    }

    fn resolve(&self, explicit: &Option<PathBuf>, relative: &str) -> PathBuf {
        explicit
            .clone()
            .unwrap_or_else(|| self.base_dir.join(relative))
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            profiles_dir: None,
            custom_profiles_dir: None,
            bin_dir: None,
            whitelist_dir: None,
            session_logs_dir: None,
            scripts_dir: None,
            tls_fake_bin: None,
            game_filter: default_game_filter(),
        }
    }
}

/// `%LOCALAPPDATA%\Sots` on Windows, `$HOME/.local/share/Sots` elsewhere.
pub fn default_base_dir() -> PathBuf {
    if let Some(local) = std::env::var_os("LOCALAPPDATA") {
        return PathBuf::from(local).join(APP_DIR);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".local").join("share").join(APP_DIR),
        None => PathBuf::from(APP_DIR),
    }
}

fn default_game_filter() -> String {
    "1024-65535".to_string()
}
