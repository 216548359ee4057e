use crate::core::{PullRequestRef, Result};
use crate::utils::error::CheckError;
use regex::Regex;
use std::sync::OnceLock;

fn repo_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/([^/]+)/pull/").expect("valid repo pattern"))
}

fn pull_request_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/([^/]+)/([^/]+)/pull/(\d+)").expect("valid pull request pattern")
    })
}

/// Repository segment before `/pull/`; empty when the URL has no such segment.
pub fn resolve_repo_name(pr_url: &str) -> String {
    repo_pattern()
        .captures(pr_url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

impl PullRequestRef {
    /// Parses `https://<host>/<owner>/<repo>/pull/<number>[/...]`.
    pub fn parse(pr_url: &str) -> Result<Self> {
        let invalid = || CheckError::InvalidPullRequestUrl {
            url: pr_url.to_string(),
        };

        let caps = pull_request_pattern().captures(pr_url).ok_or_else(invalid)?;
        let number = caps[3].parse::<u64>().map_err(|_| invalid())?;

        Ok(Self {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            number,
        })
    }
}
