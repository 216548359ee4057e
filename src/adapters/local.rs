use crate::core::{ChangedFile, PullRequestProvider, Result};
use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Changed files from a JSON file on disk; comments go to a file or stdout.
#[derive(Debug, Clone)]
pub struct LocalPullRequest {
    files_path: PathBuf,
    output_path: Option<PathBuf>,
}

impl LocalPullRequest {
    pub fn new(files_path: impl Into<PathBuf>, output_path: Option<PathBuf>) -> Self {
        Self {
            files_path: files_path.into(),
            output_path,
        }
    }

    pub fn read_files(path: &Path) -> Result<Vec<ChangedFile>> {
        let data = fs::read(path)?;
        let files: Vec<ChangedFile> = serde_json::from_slice(&data)?;
        Ok(files)
    }
}

#[async_trait]
impl PullRequestProvider for LocalPullRequest {
    async fn changed_files(&self, _pr_url: &str) -> Result<Vec<ChangedFile>> {
        tracing::debug!("Reading changed files from {}", self.files_path.display());
        Self::read_files(&self.files_path)
    }

    async fn publish_comment(&self, _pr_url: &str, body: &str) -> Result<()> {
        write_comment(self.output_path.as_deref(), body)
    }
}

/// Changed files from disk, comments through `publisher` (usually GitHub).
#[derive(Debug, Clone)]
pub struct LocalFilesPublisher<P> {
    files: LocalPullRequest,
    publisher: P,
}

impl<P: PullRequestProvider> LocalFilesPublisher<P> {
    pub fn new(files_path: impl Into<PathBuf>, publisher: P) -> Self {
        Self {
            files: LocalPullRequest::new(files_path, None),
            publisher,
        }
    }
}

#[async_trait]
impl<P: PullRequestProvider> PullRequestProvider for LocalFilesPublisher<P> {
    async fn changed_files(&self, pr_url: &str) -> Result<Vec<ChangedFile>> {
        self.files.changed_files(pr_url).await
    }

    async fn publish_comment(&self, pr_url: &str, body: &str) -> Result<()> {
        self.publisher.publish_comment(pr_url, body).await
    }
}

/// Writes the comment to `output`, or stdout when no path is given.
pub fn write_comment(output: Option<&Path>, body: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, body)?;
            tracing::info!("📁 Comment saved to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
