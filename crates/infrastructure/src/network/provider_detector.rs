use async_trait::async_trait;
use serde::Deserialize;
use sots_application::ports::ProviderDetector;
use sots_domain::{DomainError, ProviderInfo};
use std::time::Duration;
use tracing::debug;

const IP_API_URL: &str = "http://ip-api.com/json/";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    isp: Option<String>,
    #[serde(default)]
    org: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    query: Option<String>,
}

impl IpApiResponse {
    fn into_provider(self) -> Result<ProviderInfo, DomainError> {
        if self.status != "success" {
            return Err(DomainError::ProbeUnreachable {
                target: IP_API_URL.to_string(),
                reason: self.message.unwrap_or_else(|| self.status.clone()),
            });
        }
        Ok(ProviderInfo {
            isp: self.isp.unwrap_or_default(),
            org: self.org.filter(|s| !s.is_empty()),
            country: self.country.filter(|s| !s.is_empty()),
            ip: self.query.unwrap_or_default(),
        })
    }
}

/// Looks up the current ISP through the public ip-api.com endpoint.
pub struct IpApiProviderDetector {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl IpApiProviderDetector {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            url: IP_API_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProviderDetector for IpApiProviderDetector {
    async fn detect_provider(&self) -> Result<ProviderInfo, DomainError> {
        let unreachable = |reason: String| DomainError::ProbeUnreachable {
            target: self.url.clone(),
            reason,
        };

        let body = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?
            .text()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let info = parse_provider_response(&body)?;
        debug!(isp = %info.isp, "Provider detected");
        Ok(info)
    }
}

pub fn parse_provider_response(body: &str) -> Result<ProviderInfo, DomainError> {
    let response: IpApiResponse = serde_json::from_str(body).map_err(|e| {
        DomainError::ProbeUnreachable {
            target: IP_API_URL.to_string(),
            reason: format!("invalid response: {}", e),
        }
    })?;
    response.into_provider()
}
