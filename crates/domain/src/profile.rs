use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Product family a profile was authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Custom,
    #[default]
    Universal,
    Youtube,
    Discord,
}

impl ServiceCategory {
    /// Maps the integer codes used by the profile catalog. Unknown codes fall back to `Universal`.
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => ServiceCategory::Custom,
            1 => ServiceCategory::Youtube,
            2 => ServiceCategory::Discord,
            _ => ServiceCategory::Universal,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ServiceCategory::Custom => -1,
            ServiceCategory::Universal => 0,
            ServiceCategory::Youtube => 1,
            ServiceCategory::Discord => 2,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "custom" => Some(ServiceCategory::Custom),
            "universal" => Some(ServiceCategory::Universal),
            "youtube" => Some(ServiceCategory::Youtube),
            "discord" => Some(ServiceCategory::Discord),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Custom => "custom",
            ServiceCategory::Universal => "universal",
            ServiceCategory::Youtube => "youtube",
            ServiceCategory::Discord => "discord",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ISP-specific variant of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    #[default]
    Unknown,
    Rostelecom,
    Mgts,
    Ttk,
    Tls,
}

impl ProviderCategory {
    /// Code 1 is shared by two ISPs in the catalog; both map to `Rostelecom`.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => ProviderCategory::Rostelecom,
            2 => ProviderCategory::Mgts,
            3 => ProviderCategory::Ttk,
            4 => ProviderCategory::Tls,
            _ => ProviderCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderCategory::Unknown => "unknown",
            ProviderCategory::Rostelecom => "rostelecom",
            ProviderCategory::Mgts => "mgts",
            ProviderCategory::Ttk => "ttk",
            ProviderCategory::Tls => "tls",
        }
    }
}

/// A named launch-argument template for the filtering executable.
///
/// `file_name` is the unique key. Profiles are read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub file_name: Arc<str>,
    pub display_name: Option<Arc<str>>,
    pub description: Arc<str>,
    pub service_category: ServiceCategory,
    pub provider_category: ProviderCategory,
}

impl Profile {
    pub fn new(file_name: impl Into<Arc<str>>) -> Self {
        Self {
            file_name: file_name.into(),
            display_name: None,
            description: Arc::from(""),
            service_category: ServiceCategory::default(),
            provider_category: ProviderCategory::default(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<Arc<str>>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_service_category(mut self, category: ServiceCategory) -> Self {
        self.service_category = category;
        self
    }

    pub fn with_provider_category(mut self, provider: ProviderCategory) -> Self {
        self.provider_category = provider;
        self
    }

    pub fn id(&self) -> &str {
        &self.file_name
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.file_name)
    }
}
