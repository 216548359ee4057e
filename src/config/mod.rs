pub mod settings;
pub mod toml_config;

pub use settings::CheckSettings;

#[cfg(feature = "cli")]
use crate::config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "pr-circular-deps")]
#[command(about = "Warn when a pull request adds a service that already depends on this repository")]
pub struct CliConfig {
    /// Pull request URL, e.g. https://github.com/<org>/<repo>/pull/<number>
    #[arg(long)]
    pub pr_url: String,

    /// JSON file with the changed files ([{"filename": ..., "patch": ...}]); fetched from GitHub when omitted
    #[arg(long)]
    pub files: Option<String>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long)]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub organization: Option<String>,

    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Write the comment here instead of stdout (ignored with --publish)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Post the comment on the pull request (also with --files)
    #[arg(long)]
    pub publish: bool,

    /// Render the comment but never publish or write it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 → TOML 檔 → 命令列參數
    pub fn settings(&self) -> Result<CheckSettings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => CheckSettings::default(),
        };

        if let Some(token) = &self.github_token {
            settings.github_token = Some(token.clone());
        }
        if let Some(api_base_url) = &self.api_base_url {
            settings.api_base_url = api_base_url.clone();
        }
        if let Some(organization) = &self.organization {
            settings.organization = organization.clone();
        }
        if let Some(concurrent) = self.concurrent_requests {
            settings.concurrent_requests = concurrent;
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout_seconds = timeout;
        }

        Ok(settings)
    }
}
