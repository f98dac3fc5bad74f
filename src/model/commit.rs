//! Commit records and the counts derived from them.

use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

/// Window for the "commits today" count.
const DAY: SignedDuration = SignedDuration::from_hours(24);

/// Window for the "commits this week" count.
const WEEK: SignedDuration = SignedDuration::from_hours(24 * 7);

/// The two timestamps the pet cares about for a single commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRecord {
    /// When the change was originally authored.
    pub author_time: Timestamp,

    /// When the commit landed on the branch. Drives the mood.
    pub committer_time: Timestamp,
}

/// How many commits were authored recently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitCounts {
    pub last_24h: usize,
    pub last_7d: usize,
}

/// Count commits authored within the last day and the last week of `now`.
///
/// A commit counts when `now - author_time` is strictly below the window.
/// Commits dated ahead of `now` (clock skew) count toward both windows.
pub fn count_recent(commits: &[CommitRecord], now: Timestamp) -> CommitCounts {
    commits
        .iter()
        .map(|c| now.duration_since(c.author_time))
        .fold(CommitCounts::default(), |mut counts, elapsed| {
            if elapsed < DAY {
                counts.last_24h += 1;
            }
            if elapsed < WEEK {
                counts.last_7d += 1;
            }
            counts
        })
}
