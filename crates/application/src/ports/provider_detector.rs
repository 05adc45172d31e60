use async_trait::async_trait;
use sots_domain::{DomainError, ProviderInfo};

#[async_trait]
pub trait ProviderDetector: Send + Sync {
    async fn detect_provider(&self) -> Result<ProviderInfo, DomainError>;
}
