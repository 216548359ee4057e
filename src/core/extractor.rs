use crate::core::{ChangedFile, Result, ServiceName};
use crate::utils::error::CheckError;
use regex::Regex;
use std::collections::BTreeSet;

/// Pulls service names out of `url:` lines added by a diff.
#[derive(Debug, Clone)]
pub struct ServiceUrlExtractor {
    pattern: Regex,
}

impl ServiceUrlExtractor {
    pub fn new(domain_suffix: &str) -> Result<Self> {
        let pattern = Regex::new(&format!(
            r#"url:\s*["']?https?://([^.\s]+)\.{}"#,
            regex::escape(domain_suffix)
        ))
        .map_err(|e| CheckError::ConfigError {
            message: format!("Invalid domain suffix '{}': {}", domain_suffix, e),
        })?;
        Ok(Self { pattern })
    }

    /// Only added lines (`+`) carrying `url:` count; removed or context lines are ignored.
    pub fn extract<'a, I>(&self, files: I) -> BTreeSet<ServiceName>
    where
        I: IntoIterator<Item = &'a ChangedFile>,
    {
        let mut services = BTreeSet::new();

        for file in files {
            for line in file.patch.split('\n') {
                if !(line.starts_with('+') && line.contains("url:")) {
                    continue;
                }
                for caps in self.pattern.captures_iter(line) {
                    services.insert(ServiceName::new(&caps[1]));
                }
            }
        }

        tracing::debug!("Extracted {} service name(s) from diff", services.len());
        services
    }
}
