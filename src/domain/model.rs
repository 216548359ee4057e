use serde::{Deserialize, Serialize};
use std::fmt;

/// A file touched by a pull request, with its unified diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    #[serde(default)]
    pub patch: String,
}

impl ChangedFile {
    pub fn new(filename: impl Into<String>, patch: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            patch: patch.into(),
        }
    }
}

/// Short service token taken from a hostname, e.g. `api-club-settings`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Result of probing one service for a reference back to the origin repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The service configuration mentions the origin repository host.
    Confirmed,
    /// Configuration was read and does not mention the origin.
    Clear,
    /// The configuration could not be read; treated as "not a dependency".
    Failed(String),
}

/// Services confirmed to point back at the origin repository, in probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircularDependencyResult {
    pub services: Vec<ServiceName>,
}

impl CircularDependencyResult {
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }
}

/// `owner/repo#number` parsed from a pull request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No circular dependency was confirmed; nothing published.
    NoFindings,
    /// A warning comment was rendered and handed to the publisher.
    Published { comment: String },
    /// A warning comment was rendered but publishing was disabled.
    DryRun { comment: String },
    /// The changed files could not be loaded.
    Skipped { reason: String },
}
