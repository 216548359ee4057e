// Adapters layer: concrete implementations of the domain ports.

pub mod github;
pub mod local;

pub use github::GitHubClient;
pub use local::{LocalFilesPublisher, LocalPullRequest};
