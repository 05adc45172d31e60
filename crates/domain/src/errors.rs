use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid launch arguments: {0}")]
    ArgsInvalid(String),

    #[error("Process {process} was not confirmed running after {attempts} attempts")]
    ProcessNotConfirmed { process: String, attempts: u32 },

    #[error("Process {0} is still running after being killed")]
    ProcessStillRunning(String),

    #[error("Failed to spawn {process}: {reason}")]
    SpawnError { process: String, reason: String },

    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("Service already exists or error during creation: {0}")]
    ServiceAlreadyExists(String),

    #[error("Error during service creation or start: {0}")]
    ServiceCreationFailed(String),

    #[error("Error deleting service: {0}")]
    ServiceDeletionFailed(String),

    #[error("Service {0} was created but stopped right away, check the profile")]
    ServiceLaunchStopped(String),

    #[error("Failed to determine status of service {0}")]
    ServiceStatusUnknown(String),

    #[error("Probe of {target} timed out")]
    ProbeTimeout { target: String },

    #[error("Target {target} is unreachable: {reason}")]
    ProbeUnreachable { target: String, reason: String },

    #[error("The checking was stopped by the user")]
    CancelledByUser,

    #[error("Profile file not found: {0}")]
    ProfileNotFound(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, DomainError::CancelledByUser)
    }

    /// Per-target probe failures are collected into outcomes, never propagated.
    pub fn is_probe_failure(&self) -> bool {
        matches!(
            self,
            DomainError::ProbeTimeout { .. } | DomainError::ProbeUnreachable { .. }
        )
    }
}
