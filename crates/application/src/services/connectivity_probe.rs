use crate::ports::{ConnectivityProbe, ReachabilityPort};
use async_trait::async_trait;
use futures::future::join_all;
use sots_domain::config::ProbeConfig;
use sots_domain::{
    CategoryOutcome, DomainError, ProbeCatalog, ProbeOutcome, ProbeTarget, ServiceCategoryTag,
    VerificationOutcome,
};
use std::net::IpAddr;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const ACCEPTED_STATUS: RangeInclusive<u16> = 200..=399;

/// Probes every target of a category concurrently.
///
/// Each target runs on its own task. If the caller stops waiting, in-flight probes
/// finish in the background and their results are dropped.
pub struct ConcurrentConnectivityProbe {
    reachability: Arc<dyn ReachabilityPort>,
    config: Arc<ProbeConfig>,
}

impl ConcurrentConnectivityProbe {
    pub fn new(reachability: Arc<dyn ReachabilityPort>, config: ProbeConfig) -> Self {
        Self {
            reachability,
            config: Arc::new(config),
        }
    }
}

#[async_trait]
impl ConnectivityProbe for ConcurrentConnectivityProbe {
    #[instrument(skip_all, fields(categories = catalog.entries().len()))]
    async fn probe_catalog(&self, catalog: &ProbeCatalog) -> VerificationOutcome {
        let categories = catalog
            .entries()
            .iter()
            .map(|(tag, targets)| self.probe_category(*tag, targets));

        VerificationOutcome::from_categories(join_all(categories).await)
    }

    async fn probe_category(
        &self,
        category: ServiceCategoryTag,
        targets: &[ProbeTarget],
    ) -> CategoryOutcome {
        let tasks = targets.iter().cloned().map(|target| {
            let reachability = Arc::clone(&self.reachability);
            let config = Arc::clone(&self.config);
            let fallback = target.clone();
            async move {
                tokio::spawn(probe_target(reachability, config, target))
                    .await
                    .unwrap_or_else(|e| ProbeOutcome::failed(fallback, e.to_string()))
            }
        });

        let outcomes = join_all(tasks).await;
        let outcome = CategoryOutcome::from_outcomes(category, &outcomes);
        debug!(
            category = %category,
            failed = outcome.failed_targets.len(),
            total = targets.len(),
            "Category probed"
        );
        outcome
    }
}

async fn probe_target(
    reachability: Arc<dyn ReachabilityPort>,
    config: Arc<ProbeConfig>,
    target: ProbeTarget,
) -> ProbeOutcome {
    let result = match &target {
        ProbeTarget::Http(url) => probe_http(reachability.as_ref(), &config, url).await,
        ProbeTarget::Icmp(ip) => probe_icmp(reachability.as_ref(), &config, *ip).await,
    };

    match result {
        Ok(()) => ProbeOutcome::reachable(target),
        Err(e) if e.is_probe_failure() => {
            debug!(probe = %target, error = %e, "Probe failed");
            ProbeOutcome::failed(target, e.to_string())
        }
        Err(e) => {
            warn!(probe = %target, error = %e, "Probe could not run");
            ProbeOutcome::failed(target, e.to_string())
        }
    }
}

async fn probe_http(
    reachability: &dyn ReachabilityPort,
    config: &ProbeConfig,
    url: &str,
) -> Result<(), DomainError> {
    let attempts = config.http_attempts.max(1);
    let timeout = config.http_timeout();
    let mut last_error = None;

    for attempt in 1..=attempts {
        let response = tokio::time::timeout(timeout, reachability.http_get(url, timeout)).await;

        let error = match response {
            Ok(Ok(status)) if ACCEPTED_STATUS.contains(&status) => return Ok(()),
            Ok(Ok(status)) => DomainError::ProbeUnreachable {
                target: url.to_string(),
                reason: format!("HTTP status {}", status),
            },
            Ok(Err(e)) => e,
            Err(_) => DomainError::ProbeTimeout {
                target: url.to_string(),
            },
        };
        last_error = Some(error);

        if attempt < attempts {
            tokio::time::sleep(config.http_retry_backoff()).await;
        }
    }

    Err(last_error.unwrap_or_else(|| DomainError::ProbeUnreachable {
        target: url.to_string(),
        reason: "no attempt made".to_string(),
    }))
}

async fn probe_icmp(
    reachability: &dyn ReachabilityPort,
    config: &ProbeConfig,
    ip: IpAddr,
) -> Result<(), DomainError> {
    let timeout = config.icmp_timeout();
    let target = ProbeTarget::Icmp(ip).to_string();

    match tokio::time::timeout(timeout * 2, reachability.icmp_echo(ip, timeout)).await {
        Ok(Ok(true)) => Ok(()),
        Ok(Ok(false)) => Err(DomainError::ProbeUnreachable {
            target,
            reason: "no echo reply".to_string(),
        }),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(DomainError::ProbeTimeout { target }),
    }
}
