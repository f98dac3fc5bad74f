//! The pet's mutable record.

use jiff::Timestamp;

use super::{CommitRecord, MoodTier};

/// Everything the pet remembers between ticks.
///
/// Owned by the UI thread. Mutated through [`crate::pet::Pet`] so every
/// change is followed by a redraw notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetState {
    /// Committer time of the newest commit seen so far.
    pub last_commit_time: Option<Timestamp>,

    /// When the last fetch was issued (not completed).
    pub last_poll_time: Timestamp,

    pub mood: MoodTier,

    /// Animation counter, advanced by the animation tick.
    pub frame_index: u64,

    /// The most recent non-empty fetch, newest first.
    pub commits: Vec<CommitRecord>,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            last_commit_time: None,
            last_poll_time: Timestamp::MIN,
            mood: MoodTier::Neutral,
            frame_index: 0,
            commits: Vec::new(),
        }
    }
}

/// Result of one trip to the commit source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Commits in upstream order, newest first. May be empty.
    Fetched(Vec<CommitRecord>),

    FetchFailed,
}

impl PollOutcome {
    /// Wrap a provider result; an empty sequence means the fetch failed.
    pub fn from_commits(commits: Vec<CommitRecord>) -> Self {
        if commits.is_empty() {
            PollOutcome::FetchFailed
        } else {
            PollOutcome::Fetched(commits)
        }
    }

    /// The commits carried by this outcome, if any.
    pub fn commits(&self) -> &[CommitRecord] {
        match self {
            PollOutcome::Fetched(commits) => commits,
            PollOutcome::FetchFailed => &[],
        }
    }
}
