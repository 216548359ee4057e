use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_WEB_BASE_URL: &str = "https://github.com";
pub const DEFAULT_ORGANIZATION: &str = "Hotmart-Org";
pub const DEFAULT_DOMAIN_SUFFIX: &str = "buildstaging.com";
pub const DEFAULT_CONFIG_PATH: &str = "src/main/resources/application.yml";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 4;

/// Effective settings after defaults, TOML file and CLI flags are merged.
#[derive(Clone)]
pub struct CheckSettings {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub web_base_url: String,
    pub organization: String,
    pub domain_suffix: String,
    pub config_path: String,
    pub timeout_seconds: u64,
    pub concurrent_requests: usize,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            domain_suffix: DEFAULT_DOMAIN_SUFFIX.to_string(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
        }
    }
}

// token 不輸出到日誌
impl std::fmt::Debug for CheckSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckSettings")
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("api_base_url", &self.api_base_url)
            .field("web_base_url", &self.web_base_url)
            .field("organization", &self.organization)
            .field("domain_suffix", &self.domain_suffix)
            .field("config_path", &self.config_path)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("concurrent_requests", &self.concurrent_requests)
            .finish()
    }
}

impl ConfigProvider for CheckSettings {
    fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref().filter(|t| !t.is_empty())
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn web_base_url(&self) -> &str {
        &self.web_base_url
    }

    fn organization(&self) -> &str {
        &self.organization
    }

    fn domain_suffix(&self) -> &str {
        &self.domain_suffix
    }

    fn config_path(&self) -> &str {
        &self.config_path
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

impl Validate for CheckSettings {
    fn validate(&self) -> Result<()> {
        validate_url("github.api_url", &self.api_base_url)?;
        validate_url("github.web_url", &self.web_base_url)?;
        validate_non_empty_string("github.organization", &self.organization)?;
        validate_non_empty_string("check.domain_suffix", &self.domain_suffix)?;
        validate_non_empty_string("check.config_path", &self.config_path)?;
        validate_range("check.timeout_seconds", self.timeout_seconds, 1, 300)?;
        validate_range("check.concurrent_requests", self.concurrent_requests, 1, 64)?;
        Ok(())
    }
}
