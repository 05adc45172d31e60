use async_trait::async_trait;
use sots_domain::{DomainError, Profile};

#[async_trait]
pub trait ProfileCatalog: Send + Sync {
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError>;
}
