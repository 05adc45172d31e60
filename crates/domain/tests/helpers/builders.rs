#![allow(dead_code)]
use sots_domain::{
    CategoryOutcome, ProbeOutcome, ProbeTarget, ServiceCategoryTag, VerificationOutcome,
};

pub fn http(url: &str) -> ProbeTarget {
    ProbeTarget::http(url)
}

pub fn icmp(ip: &str) -> ProbeTarget {
    ProbeTarget::icmp(ip.parse().unwrap())
}

/// Builds a `VerificationOutcome` category by category.
pub struct OutcomeBuilder {
    categories: Vec<CategoryOutcome>,
}

impl OutcomeBuilder {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    pub fn passing(mut self, tag: ServiceCategoryTag, targets: &[ProbeTarget]) -> Self {
        let outcomes: Vec<ProbeOutcome> = targets
            .iter()
            .cloned()
            .map(ProbeOutcome::reachable)
            .collect();
        self.categories
            .push(CategoryOutcome::from_outcomes(tag, &outcomes));
        self
    }

    pub fn failing(mut self, tag: ServiceCategoryTag, targets: &[ProbeTarget]) -> Self {
        let outcomes: Vec<ProbeOutcome> = targets
            .iter()
            .cloned()
            .map(|t| ProbeOutcome::failed(t, "unreachable"))
            .collect();
        self.categories
            .push(CategoryOutcome::from_outcomes(tag, &outcomes));
        self
    }

    pub fn all_passing() -> VerificationOutcome {
        let mut builder = Self::new();
        for tag in ServiceCategoryTag::ALL {
            builder = builder.passing(tag, &[http("https://example.com")]);
        }
        builder.build()
    }

    pub fn build(self) -> VerificationOutcome {
        VerificationOutcome::from_categories(self.categories)
    }
}
