//! Live match scoring
//!
//! A [`Scoreboard`] holds at most one [`LiveMatch`]:
//! `absent -> in progress -> ended -> absent`. Scoring operations against an absent or
//! ended match are rejected and leave the board untouched.

use thiserror::Error;
use tracing::debug;

pub mod feed;
mod live_match;
mod overs;

pub use live_match::{Delivery, ExtraKind, LiveMatch, MatchDetails};
pub use overs::{BALLS_PER_OVER, Overs};

/// Scoring errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScoringError {
    /// A match detail was left blank.
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),

    /// No match has been created.
    #[error("no match in progress")]
    NoMatch,

    /// The match has ended and can no longer be scored.
    #[error("the match has ended")]
    MatchEnded,
}

/// Holds the match being scored.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    current: Option<LiveMatch>,
}

fn clamp_runs(runs: i64) -> u32 {
    u32::try_from(runs.max(0)).unwrap_or(u32::MAX)
}

impl Scoreboard {
    /// An empty scoreboard
    pub fn new() -> Self {
        Self::default()
    }

    /// The match on the board, if any.
    pub fn current(&self) -> Option<&LiveMatch> {
        self.current.as_ref()
    }

    fn in_progress(&mut self) -> Result<&mut LiveMatch, ScoringError> {
        match self.current.as_mut() {
            None => Err(ScoringError::NoMatch),
            Some(live) if live.is_ended() => Err(ScoringError::MatchEnded),
            Some(live) => Ok(live),
        }
    }

    /// Starts a match, replacing whatever was on the board.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::MissingField`] if any detail is blank; the board is unchanged.
    pub fn create_match(&mut self, details: MatchDetails) -> Result<&LiveMatch, ScoringError> {
        if let Some(field) = details.first_blank_field() {
            return Err(ScoringError::MissingField(field));
        }

        let live = LiveMatch::new(details);

        debug!(id = %live.id(), name = live.name(), "match created");

        Ok(self.current.insert(live))
    }

    /// Records a legal delivery. Negative runs count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NoMatch`] or [`ScoringError::MatchEnded`].
    pub fn add_ball(&mut self, runs: i64, wicket: bool) -> Result<&LiveMatch, ScoringError> {
        let live = self.in_progress()?;

        live.record_ball(clamp_runs(runs), wicket);

        Ok(live)
    }

    /// Records extra runs without a legal ball.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NoMatch`] or [`ScoringError::MatchEnded`].
    pub fn add_extra(&mut self, runs: i64) -> Result<&LiveMatch, ScoringError> {
        self.add_extra_of(ExtraKind::Unspecified, runs)
    }

    /// Records a wide or no ball.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NoMatch`] or [`ScoringError::MatchEnded`].
    pub fn add_extra_of(&mut self, kind: ExtraKind, runs: i64) -> Result<&LiveMatch, ScoringError> {
        let live = self.in_progress()?;

        live.record_extra(clamp_runs(runs), kind);

        Ok(live)
    }

    /// Ends the match. Ending an already ended match is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NoMatch`] if there is no match.
    pub fn end_match(&mut self) -> Result<&LiveMatch, ScoringError> {
        let live = self.current.as_mut().ok_or(ScoringError::NoMatch)?;

        if !live.is_ended() {
            debug!(id = %live.id(), score = %live.scoreline(), "match ended");
            live.end();
        }

        Ok(live)
    }

    /// Clears the board, returning the match that was on it.
    pub fn start_new_match(&mut self) -> Option<LiveMatch> {
        self.current.take()
    }
}
