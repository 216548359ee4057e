use crate::core::ServiceName;

/// Renders the Markdown warning posted on the pull request.
#[derive(Debug, Clone)]
pub struct CommentFormatter {
    web_base_url: String,
    organization: String,
}

impl CommentFormatter {
    pub fn new(web_base_url: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            web_base_url: web_base_url.into().trim_end_matches('/').to_string(),
            organization: organization.into(),
        }
    }

    pub fn render(&self, current_repo: &str, circular_deps: &[ServiceName]) -> String {
        let deps_list = circular_deps
            .iter()
            .map(|dep| format!("- `{}`", dep))
            .collect::<Vec<_>>()
            .join("\n");

        let repo_links = circular_deps
            .iter()
            .map(|dep| format!("- {}/{}/{}", self.web_base_url, self.organization, dep))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "## ⚠️ Circular Dependency Warning

This PR introduces dependencies to services that already depend on `{current_repo}`:

**Potential circular dependencies detected:**
{deps_list}

**Impact:**
- This may create circular dependencies between services
- Could cause deployment issues or runtime problems
- May affect service startup order

**Recommendation:**
Please review the architecture and consider:
1. Breaking the circular dependency through an intermediary service
2. Using event-driven communication instead of direct API calls
3. Refactoring to remove the bidirectional dependency

**Services checked:**
{repo_links}
"
        )
    }
}
