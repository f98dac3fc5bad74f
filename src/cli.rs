//! Command line interface.
//!
//! With no subcommand the TUI starts. `status` fetches once and prints the
//! pet's mood without taking over the terminal; `init` writes a starter
//! config file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use serde::Serialize;

use crate::format::format_elapsed;
use crate::model::{CommitCounts, MoodTier, PollOutcome};
use crate::observe::CommitSource;
use crate::pet::{Pet, RedrawFlag};

/// Tuxagotchi: a terminal pet that gets hungry when you stop committing.
#[derive(Debug, Parser)]
#[command(name = "tuxagotchi", version)]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Don't start the audio visualizer.
    #[arg(long)]
    pub no_visualizer: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch once and print the pet's mood.
    Status {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Write a starter config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Snapshot printed by `tuxagotchi status`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub repo: String,
    pub mood: MoodTier,
    pub last_commit: Option<Timestamp>,
    pub seconds_since_commit: Option<i64>,
    pub seconds_until_next_mood: Option<i64>,
    pub commits: CommitCounts,
}

impl StatusReport {
    /// Fetch once from `source` and describe the resulting pet.
    pub fn collect<S: CommitSource>(source: &S, repo: &str, now: Timestamp) -> Self {
        let mut pet = Pet::new(RedrawFlag::default());
        pet.record_poll(now);
        let outcome = PollOutcome::from_commits(source.fetch_recent_commits());
        if matches!(outcome, PollOutcome::FetchFailed) {
            tracing::warn!(repo, "no commits fetched");
        }
        pet.apply_outcome(&outcome, now);

        Self {
            repo: repo.to_string(),
            mood: pet.mood(),
            last_commit: pet.state().last_commit_time,
            seconds_since_commit: pet.time_since_commit(now).map(|d| d.as_secs()),
            seconds_until_next_mood: pet.time_until_next_mood(now).map(|d| d.as_secs()),
            commits: pet.commit_counts(now),
        }
    }

    /// Human-readable form, one field per line.
    pub fn to_text(&self) -> String {
        let committed = self.seconds_since_commit.map_or_else(
            || "unknown".to_string(),
            |s| format!("{} ago", format_elapsed(jiff::SignedDuration::from_secs(s))),
        );
        let mut out = format!(
            "mood:      {}\nrepo:      {}\ncommitted: {committed}\ncommits:   {} today, {} this week\n",
            self.mood, self.repo, self.commits.last_24h, self.commits.last_7d,
        );
        if let Some(s) = self.seconds_until_next_mood {
            out.push_str(&format!(
                "hungry in: {}\n",
                format_elapsed(jiff::SignedDuration::from_secs(s))
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::SignedDuration;

    use crate::model::CommitRecord;

    struct Fixed(Vec<CommitRecord>);

    impl CommitSource for Fixed {
        fn fetch_recent_commits(&self) -> Vec<CommitRecord> {
            self.0.clone()
        }
    }

    fn t() -> Timestamp {
        "2025-06-10T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn parses_subcommands_and_flags() {
        let cli = Cli::try_parse_from(["tuxagotchi", "--no-visualizer"]).unwrap();
        assert!(cli.no_visualizer);
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["tuxagotchi", "status", "--json", "--config", "x.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Some(Command::Status { json: true })));

        let cli = Cli::try_parse_from(["tuxagotchi", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Init { force: true })));
    }

    #[test]
    fn status_of_a_recent_commit() {
        let at = t() - SignedDuration::from_hours(1);
        let source = Fixed(vec![CommitRecord {
            author_time: at,
            committer_time: at,
        }]);
        let report = StatusReport::collect(&source, "tux", t());

        assert_eq!(report.mood, MoodTier::Happy);
        assert_eq!(report.seconds_since_commit, Some(3600));
        assert_eq!(report.seconds_until_next_mood, Some(3 * 3600));
        assert_eq!(report.commits.last_24h, 1);

        let text = report.to_text();
        assert!(text.contains("mood:      happy"));
        assert!(text.contains("committed: 1h ago"));
        assert!(text.contains("hungry in: 3h"));
    }

    #[test]
    fn status_without_commits_is_unknown() {
        let report = StatusReport::collect(&Fixed(Vec::new()), "tux", t());
        assert_eq!(report.mood, MoodTier::Neutral);
        assert_eq!(report.last_commit, None);
        assert!(report.to_text().contains("committed: unknown"));
        assert!(!report.to_text().contains("hungry in"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mood"], "neutral");
        assert!(json["last_commit"].is_null());
    }
}
