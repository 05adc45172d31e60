use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::ConfigError;
use super::launcher::LauncherConfig;
use super::logging::LoggingConfig;
use super::paths::{default_base_dir, PathsConfig};
use super::probe::ProbeConfig;
use super::service::ServiceConfig;

const LOCAL_CONFIG_FILE: &str = "sots.toml";

/// Main configuration structure for Sots
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Installation layout
    #[serde(default)]
    pub paths: PathsConfig,

    /// Supervised process start
    #[serde(default)]
    pub launcher: LauncherConfig,

    /// Reachability probing
    #[serde(default)]
    pub probe: ProbeConfig,

    /// OS service wrapper
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sots.toml in current directory
    /// 3. config.toml in the per-user data directory
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(Path::new(path))?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(base_dir) = overrides.base_dir {
            self.paths.base_dir = base_dir;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(name) = overrides.service_name {
            self.service.name = name;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.launcher.executable_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Executable name cannot be empty".to_string(),
            ));
        }

        if self.launcher.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "launcher.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.launcher.poll_interval_ms == 0 || self.launcher.poll_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "launcher poll interval and timeout must be positive".to_string(),
            ));
        }

        if self.probe.http_attempts == 0 {
            return Err(ConfigError::Validation(
                "probe.http_attempts must be at least 1".to_string(),
            ));
        }

        if self.probe.http_timeout_ms == 0 || self.probe.icmp_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "probe timeouts must be positive".to_string(),
            ));
        }

        if self.service.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Service name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        let user = default_base_dir().join("config.toml");
        if user.exists() {
            Some(user)
        } else {
            None
        }
    }

    pub fn executable_path(&self) -> PathBuf {
        self.paths.executable_path(&self.launcher.executable_name)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub base_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub service_name: Option<String>,
}
