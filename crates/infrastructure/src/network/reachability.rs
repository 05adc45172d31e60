use async_trait::async_trait;
use sots_application::ports::ReachabilityPort;
use sots_domain::config::ProbeConfig;
use sots_domain::DomainError;
use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const MAX_REDIRECTS: usize = 10;

/// HTTP probing through reqwest and ICMP through the system `ping` binary.
pub struct NetworkReachability {
    client: reqwest::Client,
    ping_program: String,
}

impl NetworkReachability {
    pub fn new(config: &ProbeConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.http_timeout())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| DomainError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            ping_program: "ping".to_string(),
        })
    }

    pub fn with_ping_program(mut self, program: impl Into<String>) -> Self {
        self.ping_program = program.into();
        self
    }
}

#[async_trait]
impl ReachabilityPort for NetworkReachability {
    async fn http_get(&self, url: &str, timeout: Duration) -> Result<u16, DomainError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::ProbeTimeout {
                        target: url.to_string(),
                    }
                } else {
                    DomainError::ProbeUnreachable {
                        target: url.to_string(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        debug!(url = %url, status, "HTTP probe answered");
        Ok(status)
    }

    async fn icmp_echo(&self, ip: IpAddr, timeout: Duration) -> Result<bool, DomainError> {
        let mut command = Command::new(&self.ping_program);
        command
            .args(ping_args(ip, timeout))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let target = format!("PING:{}", ip);
        let grace = timeout + Duration::from_secs(1);
        match tokio::time::timeout(grace, command.status()).await {
            Ok(Ok(status)) => Ok(status.success()),
            Ok(Err(e)) => Err(DomainError::ProbeUnreachable {
                target,
                reason: format!("cannot run ping: {}", e),
            }),
            Err(_) => Err(DomainError::ProbeTimeout { target }),
        }
    }
}

/// Single echo request with a reply timeout, in the local `ping` dialect.
pub fn ping_args(ip: IpAddr, timeout: Duration) -> Vec<String> {
    let mut args = if cfg!(windows) {
        vec![
            "-n".to_string(),
            "1".to_string(),
            "-w".to_string(),
            timeout.as_millis().to_string(),
        ]
    } else if cfg!(target_os = "macos") {
        vec![
            "-c".to_string(),
            "1".to_string(),
            "-W".to_string(),
            timeout.as_millis().to_string(),
        ]
    } else {
        // Linux ping takes whole seconds.
        let secs = timeout.as_secs_f64().ceil().max(1.0) as u64;
        vec![
            "-c".to_string(),
            "1".to_string(),
            "-W".to_string(),
            secs.to_string(),
        ]
    };
    if ip.is_ipv6() && !cfg!(windows) {
        args.insert(0, "-6".to_string());
    }
    args.push(ip.to_string());
    args
}
