use crate::core::{CircularDependencyResult, DependencySource, ProbeOutcome, ServiceName};
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;

/// Checks whether each service's own configuration points back at the origin repository.
pub struct ReverseDependencyProber<D: DependencySource> {
    source: D,
    domain_suffix: String,
    concurrent_requests: usize,
}

impl<D: DependencySource> ReverseDependencyProber<D> {
    pub fn new(source: D, domain_suffix: impl Into<String>, concurrent_requests: usize) -> Self {
        Self {
            source,
            domain_suffix: domain_suffix.into(),
            concurrent_requests: concurrent_requests.max(1),
        }
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub async fn probe(&self, current_repo: &str, service: &ServiceName) -> ProbeOutcome {
        let needle = format!("{}.{}", current_repo, self.domain_suffix);

        match self.source.fetch_service_config(service).await {
            Ok(content) if content.contains(&needle) => ProbeOutcome::Confirmed,
            Ok(_) => ProbeOutcome::Clear,
            Err(e) => ProbeOutcome::Failed(e.to_string()),
        }
    }

    /// Probes every service once, at most `concurrent_requests` at a time.
    /// A failed probe counts as "no dependency" and never stops the others.
    pub async fn find_circular(
        &self,
        current_repo: &str,
        services: &BTreeSet<ServiceName>,
    ) -> CircularDependencyResult {
        let outcomes: Vec<(&ServiceName, ProbeOutcome)> = stream::iter(services.iter())
            .map(|service| async move { (service, self.probe(current_repo, service).await) })
            .buffered(self.concurrent_requests)
            .collect()
            .await;

        let mut result = CircularDependencyResult::default();
        for (service, outcome) in outcomes {
            match outcome {
                ProbeOutcome::Confirmed => {
                    tracing::info!("🔁 {} references {} back", service, current_repo);
                    result.services.push(service.clone());
                }
                ProbeOutcome::Clear => {
                    tracing::debug!("{} has no reference to {}", service, current_repo);
                }
                ProbeOutcome::Failed(reason) => {
                    tracing::warn!("Could not check dependency for {}: {}", service, reason);
                }
            }
        }

        result
    }
}
