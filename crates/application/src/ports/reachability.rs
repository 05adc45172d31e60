use async_trait::async_trait;
use sots_domain::DomainError;
use std::net::IpAddr;
use std::time::Duration;

#[async_trait]
pub trait ReachabilityPort: Send + Sync {
    /// Performs a GET, following redirects, and returns the final status code.
    async fn http_get(&self, url: &str, timeout: Duration) -> Result<u16, DomainError>;

    async fn icmp_echo(&self, ip: IpAddr, timeout: Duration) -> Result<bool, DomainError>;
}
