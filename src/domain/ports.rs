use crate::domain::model::{ChangedFile, ServiceName};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn github_token(&self) -> Option<&str>;
    fn api_base_url(&self) -> &str;
    fn web_base_url(&self) -> &str;
    fn organization(&self) -> &str;
    fn domain_suffix(&self) -> &str;
    fn config_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn concurrent_requests(&self) -> usize;
}

/// Reads a service's own configuration file.
#[async_trait]
pub trait DependencySource: Send + Sync {
    async fn fetch_service_config(&self, service: &ServiceName) -> Result<String>;
}

/// The version-control side: changed files in, comment out.
#[async_trait]
pub trait PullRequestProvider: Send + Sync {
    async fn changed_files(&self, pr_url: &str) -> Result<Vec<ChangedFile>>;
    async fn publish_comment(&self, pr_url: &str, body: &str) -> Result<()>;
}
