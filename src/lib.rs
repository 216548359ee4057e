pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GitHubClient, LocalFilesPublisher, LocalPullRequest};
pub use config::CheckSettings;
pub use crate::core::{checker::CircularDependencyChecker, runner::CircularDepsRunner};
pub use utils::error::{CheckError, Result};
