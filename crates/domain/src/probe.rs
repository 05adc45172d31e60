use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

const PING_PREFIX: &str = "PING:";

/// External product whose endpoints are probed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceCategoryTag {
    Discord,
    Youtube,
    Google,
    Riot,
    Cloudflare,
}

impl ServiceCategoryTag {
    pub const ALL: [ServiceCategoryTag; 5] = [
        ServiceCategoryTag::Discord,
        ServiceCategoryTag::Youtube,
        ServiceCategoryTag::Google,
        ServiceCategoryTag::Riot,
        ServiceCategoryTag::Cloudflare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategoryTag::Discord => "DISCORD",
            ServiceCategoryTag::Youtube => "YOUTUBE",
            ServiceCategoryTag::Google => "GOOGLE",
            ServiceCategoryTag::Riot => "RIOT",
            ServiceCategoryTag::Cloudflare => "CLOUDFLARE",
        }
    }
}

impl fmt::Display for ServiceCategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reachability check unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProbeTarget {
    /// Scheme + host, probed with HTTP GET.
    Http(Arc<str>),
    /// Bare IP, probed with an ICMP echo.
    Icmp(IpAddr),
}

impl ProbeTarget {
    pub fn http(url: impl Into<Arc<str>>) -> Self {
        ProbeTarget::Http(url.into())
    }

    pub fn icmp(ip: IpAddr) -> Self {
        ProbeTarget::Icmp(ip)
    }

    /// Parses the catalog notation: `PING:<ip>` for ICMP, anything else is an HTTP URL.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.strip_prefix(PING_PREFIX) {
            Some(ip) => ip.trim().parse().ok().map(ProbeTarget::Icmp),
            None => Some(ProbeTarget::Http(Arc::from(raw))),
        }
    }

    pub fn is_icmp(&self) -> bool {
        matches!(self, ProbeTarget::Icmp(_))
    }

    /// Short human name used in session logs.
    pub fn display_name(&self) -> String {
        if let Some(name) = known_target_name(self) {
            return name.to_string();
        }
        match self {
            ProbeTarget::Http(url) => url
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .split('/')
                .next()
                .filter(|host| !host.is_empty())
                .unwrap_or(url)
                .to_string(),
            ProbeTarget::Icmp(ip) => ip.to_string(),
        }
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeTarget::Http(url) => f.write_str(url),
            ProbeTarget::Icmp(ip) => write!(f, "{}{}", PING_PREFIX, ip),
        }
    }
}

fn known_target_name(target: &ProbeTarget) -> Option<&'static str> {
    let key = target.to_string();
    let name = match key.as_str() {
        "https://discord.com" => "DiscordMain",
        "https://gateway.discord.gg" => "DiscordGateway",
        "https://cdn.discordapp.com" => "DiscordCDN",
        "https://updates.discord.com" => "DiscordUpdates",
        "https://www.youtube.com" => "YouTubeWeb",
        "https://youtu.be" => "YouTubeShort",
        "https://i.ytimg.com" => "YouTubeImage",
        "https://redirector.googlevideo.com" => "YouTubeVideoRedirect",
        "https://www.google.com" => "GoogleMain",
        "https://www.gstatic.com" => "GoogleGstatic",
        "https://riotgames.com" => "RiotMain",
        "https://www.riotgames.com" => "RiotWeb",
        "https://www.cloudflare.com" => "CloudflareWeb",
        "https://cdnjs.cloudflare.com" => "CloudflareCDN",
        "PING:1.1.1.1" => "CloudflareDNS1111",
        "PING:1.0.0.1" => "CloudflareDNS1001",
        "PING:8.8.8.8" => "GoogleDNS8888",
        "PING:8.8.4.4" => "GoogleDNS8844",
        "PING:9.9.9.9" => "Quad9DNS9999",
        _ => return None,
    };
    Some(name)
}

/// Result of probing one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub target: ProbeTarget,
    pub success: bool,
    pub detail: Option<String>,
}

impl ProbeOutcome {
    pub fn reachable(target: ProbeTarget) -> Self {
        Self {
            target,
            success: true,
            detail: None,
        }
    }

    pub fn failed(target: ProbeTarget, detail: impl Into<String>) -> Self {
        Self {
            target,
            success: false,
            detail: Some(detail.into()),
        }
    }
}

/// Aggregate of one category. Success is derived from `failed_targets`, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub category: ServiceCategoryTag,
    pub failed_targets: Vec<ProbeTarget>,
}

impl CategoryOutcome {
    pub fn from_outcomes(category: ServiceCategoryTag, outcomes: &[ProbeOutcome]) -> Self {
        let mut failed_targets: Vec<ProbeTarget> = Vec::new();
        for outcome in outcomes.iter().filter(|o| !o.success) {
            if !failed_targets.contains(&outcome.target) {
                failed_targets.push(outcome.target.clone());
            }
        }
        Self {
            category,
            failed_targets,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed_targets.is_empty()
    }

    pub fn has_failed(&self, target: &ProbeTarget) -> bool {
        self.failed_targets.contains(target)
    }
}

/// Per-category verdicts for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerificationOutcome {
    categories: HashMap<ServiceCategoryTag, CategoryOutcome>,
}

impl VerificationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(outcomes: impl IntoIterator<Item = CategoryOutcome>) -> Self {
        let mut result = Self::new();
        for outcome in outcomes {
            result.insert(outcome);
        }
        result
    }

    pub fn insert(&mut self, outcome: CategoryOutcome) {
        self.categories.insert(outcome.category, outcome);
    }

    pub fn get(&self, category: ServiceCategoryTag) -> Option<&CategoryOutcome> {
        self.categories.get(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryOutcome> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn is_all_success(&self) -> bool {
        self.categories.values().all(CategoryOutcome::is_success)
    }

    pub fn has_any_success(&self) -> bool {
        self.categories.values().any(CategoryOutcome::is_success)
    }

    /// Category → success flags, the shape published to status observers.
    pub fn category_statuses(&self) -> HashMap<ServiceCategoryTag, bool> {
        self.categories
            .iter()
            .map(|(tag, outcome)| (*tag, outcome.is_success()))
            .collect()
    }
}
