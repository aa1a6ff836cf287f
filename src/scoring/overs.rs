//! Overs

use std::fmt;

/// Legal deliveries in an over.
pub const BALLS_PER_OVER: u32 = 6;

/// Balls bowled, displayed as completed overs and balls into the current over (`3.4`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Overs {
    balls: u32,
}

impl Overs {
    /// Overs for a count of legal balls.
    #[must_use]
    pub const fn from_balls(balls: u32) -> Self {
        Self { balls }
    }

    /// Legal balls bowled
    #[must_use]
    pub const fn balls(self) -> u32 {
        self.balls
    }

    /// Completed overs
    #[must_use]
    pub const fn completed(self) -> u32 {
        self.balls / BALLS_PER_OVER
    }

    /// Balls bowled in the over in progress
    #[must_use]
    pub const fn remainder(self) -> u32 {
        self.balls % BALLS_PER_OVER
    }
}

impl From<u32> for Overs {
    fn from(balls: u32) -> Self {
        Self::from_balls(balls)
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed(), self.remainder())
    }
}
