//! GitHub commit source: the newest commits on a repository's default branch.
//!
//! Fetches `GET /repos/{owner}/{repo}/commits` over the REST API. Every
//! failure stays inside this module: callers get commits or an empty list.

use std::time::Duration;

use jiff::Timestamp;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::config::GitHubConfig;
use crate::model::CommitRecord;

use super::CommitSource;

/// Public API root, overridable for GitHub Enterprise.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Matches the API's own default page size.
pub const DEFAULT_PAGE_SIZE: u8 = 30;

/// Covers connect and body read.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a fetch produced no commits. Logged, never surfaced to the pet.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("bad commit date {date:?}: {source}")]
    Date {
        date: String,
        #[source]
        source: jiff::Error,
    },

    #[error("invalid token: {0}")]
    Token(#[from] reqwest::header::InvalidHeaderValue),
}

/// Blocking REST client for one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    url: String,
    page_size: u8,
}

impl GitHubClient {
    /// Build a client for the configured repository.
    ///
    /// Fails only when the token is not a valid header value or the TLS
    /// backend cannot be initialised.
    pub fn new(config: &GitHubConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("tuxagotchi/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            url: commits_url(&config.api_url, &config.username, &config.repo),
            page_size: config.per_page,
        })
    }

    fn try_fetch(&self) -> Result<Vec<CommitRecord>, FetchError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("per_page", self.page_size)])
            .send()?;

        let status = response.status();
        tracing::debug!(%status, url = %self.url, "commits response");
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        parse_commits(&response.text()?)
    }
}

impl CommitSource for GitHubClient {
    fn fetch_recent_commits(&self) -> Vec<CommitRecord> {
        match self.try_fetch() {
            Ok(commits) => {
                tracing::debug!(count = commits.len(), "fetched commits");
                commits
            }
            Err(e) => {
                tracing::debug!(error = %e, url = %self.url, "failed to fetch commits");
                Vec::new()
            }
        }
    }
}

fn commits_url(api_url: &str, owner: &str, repo: &str) -> String {
    format!("{}/repos/{owner}/{repo}/commits", api_url.trim_end_matches('/'))
}

// ── Payload ──

/// One element of the commits listing. Only the dates are read.
#[derive(Deserialize)]
struct GhCommitItem {
    commit: GhCommit,
}

#[derive(Deserialize)]
struct GhCommit {
    author: GhSignature,
    committer: GhSignature,
}

#[derive(Deserialize)]
struct GhSignature {
    date: String,
}

/// Parse a commits listing, preserving upstream order.
///
/// Dates must carry an offset (`...Z`); a naive date rejects the payload.
fn parse_commits(body: &str) -> Result<Vec<CommitRecord>, FetchError> {
    let items: Vec<GhCommitItem> = serde_json::from_str(body)?;
    items
        .into_iter()
        .map(|item| {
            Ok(CommitRecord {
                author_time: parse_date(&item.commit.author.date)?,
                committer_time: parse_date(&item.commit.committer.date)?,
            })
        })
        .collect()
}

fn parse_date(date: &str) -> Result<Timestamp, FetchError> {
    date.parse::<Timestamp>().map_err(|source| FetchError::Date {
        date: date.to_string(),
        source,
    })
}
