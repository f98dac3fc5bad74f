//! Observation logic: read the remote world, produce commit records.
//!
//! Sources never fail loudly. Transport and payload errors are logged where
//! they happen and come back as an empty list.

mod github;

pub use github::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE, GitHubClient};

use crate::model::CommitRecord;

/// Something that can report a repository's newest commits.
///
/// Called from a background thread, hence `Send + Sync`.
pub trait CommitSource: Send + Sync + 'static {
    /// Newest commits first, in upstream order. Empty on any failure.
    fn fetch_recent_commits(&self) -> Vec<CommitRecord>;
}
