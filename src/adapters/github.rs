//! GitHub REST client.
//!
//! - contents API: reads a service's `application.yml`
//! - pull request files: paginated diff listing
//! - issue comments: publishes the warning

use crate::core::{
    ChangedFile, ConfigProvider, DependencySource, PullRequestProvider, PullRequestRef, Result,
    ServiceName,
};
use crate::utils::error::CheckError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FILES_PER_PAGE: usize = 100;
// GitHub stops listing after 3000 files
const MAX_FILE_PAGES: usize = 30;

#[derive(Debug, Clone, Deserialize)]
struct ContentsResponse {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PullRequestFile {
    filename: String,
    #[serde(default)]
    patch: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base_url: String,
    organization: String,
    config_path: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url().trim_end_matches('/').to_string(),
            organization: config.organization().to_string(),
            config_path: config.config_path().trim_start_matches('/').to_string(),
            token: config.github_token().map(str::to_string),
        })
    }

    pub fn contents_url(&self, service: &ServiceName) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base_url, self.organization, service, self.config_path
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/vnd.github+json");
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(CheckError::RemoteStatusError {
            status: status.as_u16(),
            message,
        })
    }

    async fn list_files(&self, pr: &PullRequestRef) -> Result<Vec<ChangedFile>> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.api_base_url, pr.owner, pr.repo, pr.number
        );
        let mut files = Vec::new();

        for page in 1..=MAX_FILE_PAGES {
            tracing::debug!("Fetching {} page {}", url, page);
            let response = self
                .authorize(self.client.get(&url))
                .query(&[
                    ("per_page", FILES_PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?;
            let batch: Vec<PullRequestFile> = Self::ensure_success(response).await?.json().await?;
            let last_page = batch.len() < FILES_PER_PAGE;

            files.extend(batch.into_iter().map(|file| ChangedFile {
                filename: file.filename,
                // binary or oversized diffs come without a patch
                patch: file.patch.unwrap_or_default(),
            }));

            if last_page {
                break;
            }
        }

        Ok(files)
    }
}

/// GitHub wraps base64 content at 60 columns.
pub fn decode_file_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

#[async_trait]
impl DependencySource for GitHubClient {
    async fn fetch_service_config(&self, service: &ServiceName) -> Result<String> {
        let url = self.contents_url(service);
        tracing::debug!("Fetching service config: {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        tracing::debug!("Contents API response status for {}: {}", service, response.status());

        // 只接受 200，其他一律視為讀不到
        if response.status() != reqwest::StatusCode::OK {
            return Err(CheckError::RemoteStatusError {
                status: response.status().as_u16(),
                message: format!("unexpected response for {}", url),
            });
        }

        let body: ContentsResponse = response.json().await?;
        if let Some(encoding) = body.encoding.as_deref() {
            if encoding != "base64" {
                return Err(CheckError::UnsupportedEncoding {
                    encoding: encoding.to_string(),
                });
            }
        }

        decode_file_content(&body.content)
    }
}

#[async_trait]
impl PullRequestProvider for GitHubClient {
    async fn changed_files(&self, pr_url: &str) -> Result<Vec<ChangedFile>> {
        let pr = PullRequestRef::parse(pr_url)?;
        let files = self.list_files(&pr).await?;
        tracing::info!("{} changed {} file(s)", pr, files.len());
        Ok(files)
    }

    async fn publish_comment(&self, pr_url: &str, body: &str) -> Result<()> {
        let pr = PullRequestRef::parse(pr_url)?;
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base_url, pr.owner, pr.repo, pr.number
        );

        let response = self
            .authorize(self.client.post(&url))
            .json(&CreateCommentRequest { body })
            .send()
            .await?;
        Self::ensure_success(response).await?;

        tracing::debug!("Comment published on {}", pr);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckSettings;
    use httpmock::prelude::*;

    fn settings(server: &MockServer, token: Option<&str>) -> CheckSettings {
        CheckSettings {
            api_base_url: server.base_url(),
            github_token: token.map(str::to_string),
            ..Default::default()
        }
    }

    fn encoded(text: &str) -> String {
        // mimic GitHub's line wrapping
        let raw = BASE64.encode(text);
        raw.as_bytes()
            .chunks(60)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_decode_wrapped_content() {
        let text = "spring:\n  application:\n    name: api-club-settings\nclients:\n  url: https://api-club-content.buildstaging.com\n";
        assert_eq!(decode_file_content(&encoded(text)).unwrap(), text);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_file_content("!!!not-base64!!!"),
            Err(CheckError::DecodeError(_))
        ));
        // valid base64, invalid UTF-8
        assert!(matches!(
            decode_file_content(&BASE64.encode([0xff, 0xfe, 0xfd])),
            Err(CheckError::Utf8Error(_))
        ));
    }

    #[test]
    fn test_contents_url() {
        let config = CheckSettings::default();
        let client = GitHubClient::new(&config).unwrap();
        assert_eq!(
            client.contents_url(&ServiceName::from("api-club-settings")),
            "https://api.github.com/repos/Hotmart-Org/api-club-settings/contents/src/main/resources/application.yml"
        );
    }

    #[tokio::test]
    async fn test_fetch_service_config_with_token() {
        let server = MockServer::start();
        let content = "url: https://api-club-content.buildstaging.com";

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/Hotmart-Org/api-club-settings/contents/src/main/resources/application.yml")
                .header("Authorization", "Bearer ghp_test");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "name": "application.yml",
                    "encoding": "base64",
                    "content": encoded(content),
                }));
        });

        let client = GitHubClient::new(&settings(&server, Some("ghp_test"))).unwrap();
        let fetched = client
            .fetch_service_config(&ServiceName::from("api-club-settings"))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(fetched, content);
    }

    #[tokio::test]
    async fn test_fetch_service_config_not_found() {
        let server = MockServer::start();

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/Hotmart-Org/api-gone/contents/src/main/resources/application.yml");
            then.status(404)
                .json_body(serde_json::json!({"message": "Not Found"}));
        });

        let client = GitHubClient::new(&settings(&server, None)).unwrap();
        let result = client.fetch_service_config(&ServiceName::from("api-gone")).await;

        api_mock.assert();
        assert!(matches!(
            result,
            Err(CheckError::RemoteStatusError { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_service_config_malformed_json() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/Hotmart-Org/api-odd/contents/src/main/resources/application.yml");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{\"unexpected\": true}");
        });

        let client = GitHubClient::new(&settings(&server, None)).unwrap();
        let result = client.fetch_service_config(&ServiceName::from("api-odd")).await;

        assert!(matches!(result, Err(CheckError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_fetch_service_config_unsupported_encoding() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/Hotmart-Org/api-large/contents/src/main/resources/application.yml");
            then.status(200)
                .json_body(serde_json::json!({"encoding": "none", "content": ""}));
        });

        let client = GitHubClient::new(&settings(&server, None)).unwrap();
        let result = client.fetch_service_config(&ServiceName::from("api-large")).await;

        match result {
            Err(CheckError::UnsupportedEncoding { encoding }) => assert_eq!(encoding, "none"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_changed_files_paginates() {
        let server = MockServer::start();

        let first_page: Vec<serde_json::Value> = (0..100)
            .map(|i| serde_json::json!({"filename": format!("src/file{}.java", i), "patch": "+x"}))
            .collect();

        let page_one = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/Hotmart-Org/api-club-content/pulls/42/files")
                .query_param("page", "1")
                .query_param("per_page", "100");
            then.status(200).json_body(serde_json::Value::Array(first_page));
        });
        let page_two = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/Hotmart-Org/api-club-content/pulls/42/files")
                .query_param("page", "2");
            then.status(200).json_body(serde_json::json!([
                {"filename": "src/main/resources/application.yml", "patch": "+  url: https://api-a.buildstaging.com"},
                {"filename": "logo.png"}
            ]));
        });

        let client = GitHubClient::new(&settings(&server, None)).unwrap();
        let files = client
            .changed_files("https://github.com/Hotmart-Org/api-club-content/pull/42")
            .await
            .unwrap();

        page_one.assert();
        page_two.assert();
        assert_eq!(files.len(), 102);
        assert_eq!(files[100].filename, "src/main/resources/application.yml");
        assert_eq!(files[101].patch, "");
    }

    #[tokio::test]
    async fn test_changed_files_rejects_bad_url() {
        let server = MockServer::start();
        let client = GitHubClient::new(&settings(&server, None)).unwrap();

        let result = client.changed_files("https://github.com/Hotmart-Org").await;
        assert!(matches!(
            result,
            Err(CheckError::InvalidPullRequestUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_publish_comment() {
        let server = MockServer::start();

        let comment_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/Hotmart-Org/api-club-content/issues/42/comments")
                .header("Authorization", "Bearer ghp_test")
                .json_body(serde_json::json!({"body": "hello"}));
            then.status(201).json_body(serde_json::json!({"id": 1}));
        });

        let client = GitHubClient::new(&settings(&server, Some("ghp_test"))).unwrap();
        client
            .publish_comment("https://github.com/Hotmart-Org/api-club-content/pull/42", "hello")
            .await
            .unwrap();

        comment_mock.assert();
    }

    #[tokio::test]
    async fn test_publish_comment_forbidden() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST)
                .path("/repos/Hotmart-Org/api-club-content/issues/42/comments");
            then.status(403).body("Resource not accessible by integration");
        });

        let client = GitHubClient::new(&settings(&server, None)).unwrap();
        let result = client
            .publish_comment("https://github.com/Hotmart-Org/api-club-content/pull/42", "hello")
            .await;

        match result {
            Err(CheckError::RemoteStatusError { status, message }) => {
                assert_eq!(status, 403);
                assert!(message.contains("not accessible"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
