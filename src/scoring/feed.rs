//! Live scores feed
//!
//! Parses a current-matches feed shaped as
//! `{"status": "success", "data": [{"name", "venue", "status", "score": [...]}]}`.
//! Innings entries use the short keys `r`, `w` and `o`; the long forms are also accepted.

use std::{fmt, fs, io, path::PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Status the feed reports when the body carries data.
pub const FEED_SUCCESS: &str = "success";

/// Feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed could not be fetched.
    #[error("failed to fetch scores: {0}")]
    Io(#[from] io::Error),

    /// The body was not a valid feed.
    #[error("malformed scores feed: {0}")]
    Json(#[from] serde_json::Error),

    /// The feed reported a failure.
    #[error("scores feed returned {status}: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Status {
        /// Reported status
        status: String,

        /// Reason given, if any
        reason: Option<String>,
    },
}

/// One innings on a scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsScore {
    /// Innings label, such as "India Inning 1"
    pub inning: String,

    /// Runs
    #[serde(rename = "r", alias = "runs", default)]
    pub runs: u32,

    /// Wickets
    #[serde(rename = "w", alias = "wickets", default)]
    pub wickets: u32,

    /// Overs, as reported (`19.4`)
    #[serde(rename = "o", alias = "overs", default, with = "rust_decimal::serde::float")]
    pub overs: Decimal,
}

impl fmt::Display for InningsScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.runs, self.wickets, self.overs)
    }
}

/// A match in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Match name
    pub name: String,

    /// Ground
    #[serde(default)]
    pub venue: String,

    /// Match status text
    #[serde(default)]
    pub status: String,

    /// Innings scores so far
    #[serde(default)]
    pub score: Vec<InningsScore>,
}

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    status: String,

    #[serde(default)]
    reason: Option<String>,

    #[serde(default)]
    data: Vec<MatchSummary>,
}

/// Parses a feed body into match summaries.
///
/// # Errors
///
/// Returns an error if the body is malformed or reports a non-success status.
pub fn parse_feed(body: &str) -> Result<Vec<MatchSummary>, FeedError> {
    let envelope: FeedEnvelope = serde_json::from_str(body)?;

    if envelope.status != FEED_SUCCESS {
        return Err(FeedError::Status {
            status: envelope.status,
            reason: envelope.reason,
        });
    }

    Ok(envelope.data)
}

/// Somewhere to fetch the raw feed body from.
pub trait ScoresSource {
    /// Fetches the current feed body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be fetched.
    fn fetch(&self) -> Result<String, FeedError>;
}

impl<F> ScoresSource for F
where
    F: Fn() -> Result<String, FeedError>,
{
    fn fetch(&self) -> Result<String, FeedError> {
        self()
    }
}

/// Reads the feed from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// A source reading `path` on every fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoresSource for FileSource {
    fn fetch(&self) -> Result<String, FeedError> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// The last good list of live matches.
#[derive(Debug, Clone, Default)]
pub struct LiveScores {
    matches: Vec<MatchSummary>,
    last_error: Option<String>,
}

impl LiveScores {
    /// An empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches from the last successful refresh.
    pub fn matches(&self) -> &[MatchSummary] {
        &self.matches
    }

    /// Message from the last failed refresh, cleared by a successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetches and parses the feed, returning the number of matches.
    ///
    /// On failure the previous matches are kept and the error is recorded.
    ///
    /// # Errors
    ///
    /// Returns the fetch or parse error.
    pub fn refresh(&mut self, source: &impl ScoresSource) -> Result<usize, FeedError> {
        match source.fetch().and_then(|body| parse_feed(&body)) {
            Ok(matches) => {
                debug!(matches = matches.len(), "live scores refreshed");
                self.matches = matches;
                self.last_error = None;

                Ok(self.matches.len())
            }
            Err(error) => {
                warn!(%error, "live scores refresh failed");
                self.last_error = Some(error.to_string());

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const FEED: &str = r#"{
        "status": "success",
        "data": [
            {
                "name": "India vs Australia, 2nd ODI",
                "venue": "Wankhede Stadium, Mumbai",
                "status": "India opt to bat",
                "score": [
                    {"inning": "India Inning 1", "r": 287, "w": 6, "o": 47.3}
                ]
            },
            {
                "name": "England vs South Africa, 1st Test",
                "status": "Match not started"
            }
        ]
    }"#;

    #[test]
    fn parses_matches_and_innings() -> TestResult {
        let matches = parse_feed(FEED)?;

        assert_eq!(matches.len(), 2);

        let innings = matches
            .first()
            .and_then(|summary| summary.score.first())
            .ok_or("missing innings")?;

        assert_eq!(innings.to_string(), "287/6 (47.3)");
        assert!(matches.get(1).is_some_and(|summary| summary.score.is_empty()));

        Ok(())
    }

    #[test]
    fn accepts_long_innings_keys() -> TestResult {
        let body = r#"{"status":"success","data":[{"name":"Final","score":[{"inning":"A","runs":12,"wickets":1,"overs":2.1}]}]}"#;

        let matches = parse_feed(body)?;
        let innings = matches
            .first()
            .and_then(|summary| summary.score.first())
            .ok_or("missing innings")?;

        assert_eq!(innings.runs, 12);
        assert_eq!(innings.wickets, 1);

        Ok(())
    }

    #[test]
    fn failure_status_is_an_error() {
        let body = r#"{"status":"failure","reason":"hits today exceeded"}"#;

        assert!(matches!(
            parse_feed(body),
            Err(FeedError::Status { status, reason }) if status == "failure" && reason.as_deref() == Some("hits today exceeded")
        ));
    }

    #[test]
    fn failed_refresh_keeps_previous_matches() -> TestResult {
        let mut scores = LiveScores::new();

        scores.refresh(&|| Ok::<_, FeedError>(FEED.to_string()))?;
        assert_eq!(scores.matches().len(), 2);

        let result = scores.refresh(&|| Err::<String, _>(FeedError::Io(io::Error::other("offline"))));

        assert!(result.is_err());
        assert_eq!(scores.matches().len(), 2);
        assert_eq!(scores.last_error(), Some("failed to fetch scores: offline"));

        scores.refresh(&|| Ok::<_, FeedError>(r#"{"status":"success","data":[]}"#.to_string()))?;

        assert!(scores.matches().is_empty());
        assert_eq!(scores.last_error(), None);

        Ok(())
    }

    #[test]
    fn file_source_reads_the_body() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("current_matches.json");
        fs::write(&path, FEED)?;

        let mut scores = LiveScores::new();

        assert_eq!(scores.refresh(&FileSource::new(path))?, 2);

        Ok(())
    }
}
