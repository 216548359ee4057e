use crate::core::checker::CircularDependencyChecker;
use crate::core::{CheckOutcome, DependencySource, PullRequestProvider, Result};

/// Loads the PR's changed files, runs the check, and publishes the warning.
pub struct CircularDepsRunner<P: PullRequestProvider, D: DependencySource> {
    provider: P,
    checker: CircularDependencyChecker<D>,
    dry_run: bool,
}

impl<P: PullRequestProvider, D: DependencySource> CircularDepsRunner<P, D> {
    pub fn new(provider: P, checker: CircularDependencyChecker<D>) -> Self {
        Self {
            provider,
            checker,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Only a failed publish is returned as an error; everything before it degrades to
    /// `Skipped` or `NoFindings`.
    pub async fn run(&self, pr_url: &str) -> Result<CheckOutcome> {
        tracing::info!("Running circular dependency check for {}", pr_url);

        let files = match self.provider.changed_files(pr_url).await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("Error loading changed files for {}: {}", pr_url, e);
                return Ok(CheckOutcome::Skipped {
                    reason: e.to_string(),
                });
            }
        };
        tracing::debug!("Loaded {} changed file(s)", files.len());

        let Some(comment) = self.checker.check(pr_url, &files).await else {
            tracing::info!("No circular dependencies detected");
            return Ok(CheckOutcome::NoFindings);
        };

        if self.dry_run {
            tracing::info!("🔍 Dry run: circular dependencies detected, comment not published");
            return Ok(CheckOutcome::DryRun { comment });
        }

        tracing::info!("Circular dependencies detected, posting warning comment");
        self.provider.publish_comment(pr_url, &comment).await?;
        tracing::info!("✅ Circular dependency warning posted successfully");

        Ok(CheckOutcome::Published { comment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckSettings;
    use crate::core::{ChangedFile, ServiceName};
    use crate::utils::error::CheckError;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockProvider {
        files: Option<Vec<ChangedFile>>,
        fail_publish: bool,
        published: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl PullRequestProvider for MockProvider {
        async fn changed_files(&self, _pr_url: &str) -> Result<Vec<ChangedFile>> {
            self.files.clone().ok_or_else(|| CheckError::RemoteStatusError {
                status: 502,
                message: "Bad Gateway".to_string(),
            })
        }

        async fn publish_comment(&self, _pr_url: &str, body: &str) -> Result<()> {
            if self.fail_publish {
                return Err(CheckError::RemoteStatusError {
                    status: 403,
                    message: "Forbidden".to_string(),
                });
            }
            self.published.lock().await.push(body.to_string());
            Ok(())
        }
    }

    struct StaticSource;

    #[async_trait]
    impl DependencySource for StaticSource {
        async fn fetch_service_config(&self, service: &ServiceName) -> Result<String> {
            match service.as_str() {
                "api-club-settings" => Ok("url: https://api-club-content.buildstaging.com".into()),
                _ => Ok("url: https://api-elsewhere.buildstaging.com".into()),
            }
        }
    }

    const PR_URL: &str = "https://github.com/Hotmart-Org/api-club-content/pull/42";

    fn runner(provider: MockProvider) -> CircularDepsRunner<MockProvider, StaticSource> {
        let checker = CircularDependencyChecker::new(StaticSource, &CheckSettings::default()).unwrap();
        CircularDepsRunner::new(provider, checker)
    }

    fn cyclic_files() -> Vec<ChangedFile> {
        vec![ChangedFile::new(
            "src/main/resources/application.yml",
            "+  url: https://api-club-settings.buildstaging.com\n+  url: https://api-other.buildstaging.com",
        )]
    }

    #[tokio::test]
    async fn test_publishes_only_confirmed_services() {
        let provider = MockProvider {
            files: Some(cyclic_files()),
            ..Default::default()
        };
        let published = provider.published.clone();

        let outcome = runner(provider).run(PR_URL).await.unwrap();

        assert!(matches!(outcome, CheckOutcome::Published { .. }));
        let posted = published.lock().await;
        assert_eq!(posted.len(), 1);
        assert!(posted[0].contains("`api-club-settings`"));
        assert!(!posted[0].contains("api-other"));
    }

    #[tokio::test]
    async fn test_no_findings_publishes_nothing() {
        let provider = MockProvider {
            files: Some(vec![ChangedFile::new("pom.xml", "+<version>2</version>")]),
            ..Default::default()
        };
        let published = provider.published.clone();

        let outcome = runner(provider).run(PR_URL).await.unwrap();

        assert_eq!(outcome, CheckOutcome::NoFindings);
        assert!(published.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_loading_failure_is_skipped() {
        let outcome = runner(MockProvider::default()).run(PR_URL).await.unwrap();
        assert!(matches!(outcome, CheckOutcome::Skipped { .. }));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_publish() {
        let provider = MockProvider {
            files: Some(cyclic_files()),
            ..Default::default()
        };
        let published = provider.published.clone();

        let outcome = runner(provider).with_dry_run(true).run(PR_URL).await.unwrap();

        assert!(matches!(outcome, CheckOutcome::DryRun { .. }));
        assert!(published.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_is_returned() {
        let provider = MockProvider {
            files: Some(cyclic_files()),
            fail_publish: true,
            ..Default::default()
        };

        let result = runner(provider).run(PR_URL).await;
        assert!(matches!(
            result,
            Err(CheckError::RemoteStatusError { status: 403, .. })
        ));
    }
}
