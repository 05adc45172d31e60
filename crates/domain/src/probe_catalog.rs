use crate::probe::{ProbeTarget, ServiceCategoryTag, VerificationOutcome};
use std::net::{IpAddr, Ipv4Addr};

/// Static mapping of category → ordered targets.
///
/// Order only matters for display; every category listed here must be present in a
/// well-formed `VerificationOutcome`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCatalog {
    entries: Vec<(ServiceCategoryTag, Vec<ProbeTarget>)>,
}

impl ProbeCatalog {
    pub fn new(entries: Vec<(ServiceCategoryTag, Vec<ProbeTarget>)>) -> Self {
        let mut merged: Vec<(ServiceCategoryTag, Vec<ProbeTarget>)> = Vec::new();
        for (tag, targets) in entries {
            match merged.iter_mut().find(|(t, _)| *t == tag) {
                Some((_, existing)) => existing.extend(targets),
                None => merged.push((tag, targets)),
            }
        }
        Self { entries: merged }
    }

    /// The built-in catalog of public endpoints.
    pub fn builtin() -> Self {
        Self::new(vec![
            (
                ServiceCategoryTag::Discord,
                vec![ProbeTarget::http("https://discord.com")],
            ),
            (
                ServiceCategoryTag::Youtube,
                vec![
                    ProbeTarget::http("https://www.youtube.com"),
                    ProbeTarget::http("https://youtu.be"),
                ],
            ),
            (
                ServiceCategoryTag::Google,
                vec![ProbeTarget::http("https://www.google.com")],
            ),
            (
                ServiceCategoryTag::Riot,
                vec![
                    ProbeTarget::http("https://riotgames.com"),
                    ProbeTarget::http("https://www.riotgames.com"),
                ],
            ),
            (
                ServiceCategoryTag::Cloudflare,
                vec![
                    ProbeTarget::http("https://www.cloudflare.com"),
                    ProbeTarget::http("https://cdnjs.cloudflare.com"),
                    ProbeTarget::icmp(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1))),
                    ProbeTarget::icmp(IpAddr::V4(Ipv4Addr::new(1, 0, 0, 1))),
                ],
            ),
        ])
    }

    pub fn entries(&self) -> &[(ServiceCategoryTag, Vec<ProbeTarget>)] {
        &self.entries
    }

    pub fn categories(&self) -> impl Iterator<Item = ServiceCategoryTag> + '_ {
        self.entries.iter().map(|(tag, _)| *tag)
    }

    pub fn targets(&self, category: ServiceCategoryTag) -> &[ProbeTarget] {
        self.entries
            .iter()
            .find(|(tag, _)| *tag == category)
            .map(|(_, targets)| targets.as_slice())
            .unwrap_or(&[])
    }

    pub fn target_count(&self) -> usize {
        self.entries.iter().map(|(_, targets)| targets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when `outcome` has an entry for every category of this catalog.
    pub fn covers(&self, outcome: &VerificationOutcome) -> bool {
        self.categories().all(|tag| outcome.get(tag).is_some())
    }
}

impl Default for ProbeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
