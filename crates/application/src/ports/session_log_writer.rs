use async_trait::async_trait;
use sots_domain::{DomainError, SessionEntry, SessionHandle, SessionHeader};

/// Append-only, per-session verification log.
#[async_trait]
pub trait SessionLogWriter: Send + Sync {
    async fn open_session(&self, label: &str) -> Result<SessionHandle, DomainError>;

    async fn write_header(
        &self,
        handle: &SessionHandle,
        header: &SessionHeader,
    ) -> Result<(), DomainError>;

    async fn append_entry(
        &self,
        handle: &SessionHandle,
        entry: &SessionEntry,
    ) -> Result<(), DomainError>;

    async fn close_session(&self, handle: SessionHandle) -> Result<(), DomainError>;
}
