use crate::config::settings::CheckSettings;
use crate::utils::error::{CheckError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub github: Option<GithubConfig>,
    pub check: Option<CheckConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GithubConfig {
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub web_url: Option<String>,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    pub domain_suffix: Option<String>,
    pub config_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub concurrent_requests: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CheckError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GITHUB_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CheckError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 覆蓋到既有設定上，只改有填寫的欄位
    pub fn apply_to(&self, settings: &mut CheckSettings) {
        if let Some(github) = &self.github {
            if let Some(token) = &github.token {
                // 未展開的 ${VAR} 視為沒有 token
                if !token.starts_with("${") {
                    settings.github_token = Some(token.clone());
                }
            }
            if let Some(api_url) = &github.api_url {
                settings.api_base_url = api_url.clone();
            }
            if let Some(web_url) = &github.web_url {
                settings.web_base_url = web_url.clone();
            }
            if let Some(organization) = &github.organization {
                settings.organization = organization.clone();
            }
        }

        if let Some(check) = &self.check {
            if let Some(domain_suffix) = &check.domain_suffix {
                settings.domain_suffix = domain_suffix.clone();
            }
            if let Some(config_path) = &check.config_path {
                settings.config_path = config_path.clone();
            }
            if let Some(timeout) = check.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
            if let Some(concurrent) = check.concurrent_requests {
                settings.concurrent_requests = concurrent;
            }
        }
    }

    pub fn into_settings(self) -> CheckSettings {
        let mut settings = CheckSettings::default();
        self.apply_to(&mut settings);
        settings
    }
}
