use async_trait::async_trait;
use sots_domain::{
    CategoryOutcome, ProbeCatalog, ProbeTarget, ServiceCategoryTag, VerificationOutcome,
};

#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Probes every category; the result has an entry for each of them.
    async fn probe_catalog(&self, catalog: &ProbeCatalog) -> VerificationOutcome;

    async fn probe_category(
        &self,
        category: ServiceCategoryTag,
        targets: &[ProbeTarget],
    ) -> CategoryOutcome;
}
