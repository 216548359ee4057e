use crate::core::comment::CommentFormatter;
use crate::core::extractor::ServiceUrlExtractor;
use crate::core::prober::ReverseDependencyProber;
use crate::core::repo::resolve_repo_name;
use crate::core::scanner::find_config_changes;
use crate::core::{ChangedFile, ConfigProvider, DependencySource, Result};

/// Depth-1 cycle check: services newly referenced by the PR that already reference the PR's repo.
pub struct CircularDependencyChecker<D: DependencySource> {
    extractor: ServiceUrlExtractor,
    prober: ReverseDependencyProber<D>,
    formatter: CommentFormatter,
}

impl<D: DependencySource> CircularDependencyChecker<D> {
    pub fn new<C: ConfigProvider>(source: D, config: &C) -> Result<Self> {
        Ok(Self {
            extractor: ServiceUrlExtractor::new(config.domain_suffix())?,
            prober: ReverseDependencyProber::new(
                source,
                config.domain_suffix(),
                config.concurrent_requests(),
            ),
            formatter: CommentFormatter::new(config.web_base_url(), config.organization()),
        })
    }

    /// Returns the warning comment, or `None` when nothing circular was confirmed.
    pub async fn check(&self, pr_url: &str, files: &[ChangedFile]) -> Option<String> {
        let config_changes = find_config_changes(files);
        if config_changes.is_empty() {
            tracing::debug!("No application.yml changes in {} file(s)", files.len());
            return None;
        }

        let services = self.extractor.extract(config_changes);
        if services.is_empty() {
            tracing::debug!("No service URLs added in application config changes");
            return None;
        }

        let current_repo = resolve_repo_name(pr_url);
        if current_repo.is_empty() {
            tracing::warn!("Could not resolve repository name from {}", pr_url);
            return None;
        }

        tracing::info!(
            "Probing {} service(s) for references back to {}",
            services.len(),
            current_repo
        );
        let circular = self.prober.find_circular(&current_repo, &services).await;
        if circular.is_empty() {
            return None;
        }
        tracing::info!(
            "Confirmed {} circular dependency(ies) for {}",
            circular.len(),
            current_repo
        );

        Some(self.formatter.render(&current_repo, &circular.services))
    }
}
