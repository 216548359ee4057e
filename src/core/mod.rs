pub mod checker;
pub mod comment;
pub mod extractor;
pub mod prober;
pub mod repo;
pub mod runner;
pub mod scanner;

pub use crate::domain::model::{
    ChangedFile, CheckOutcome, CircularDependencyResult, ProbeOutcome, PullRequestRef,
    ServiceName,
};
pub use crate::domain::ports::{ConfigProvider, DependencySource, PullRequestProvider};
pub use crate::utils::error::Result;
