//! Live match

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use smallvec::SmallVec;
use uuid::Uuid;

use super::overs::{BALLS_PER_OVER, Overs};

/// Details entered when a match is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchDetails {
    /// Match name
    pub name: String,

    /// First team
    pub team_a: String,

    /// Second team
    pub team_b: String,

    /// Toss result, as entered
    pub toss: String,
}

impl MatchDetails {
    /// Details from the four form fields.
    pub fn new(
        name: impl Into<String>,
        team_a: impl Into<String>,
        team_b: impl Into<String>,
        toss: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            team_a: team_a.into(),
            team_b: team_b.into(),
            toss: toss.into(),
        }
    }

    /// The first field left blank, by name.
    pub fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("team_a", &self.team_a),
            ("team_b", &self.team_b),
            ("toss", &self.toss),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// Kind of extra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraKind {
    /// Wide
    Wide,

    /// No ball
    NoBall,

    /// Recorded without a kind
    Unspecified,
}

impl fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtraKind::Wide => "wd",
            ExtraKind::NoBall => "nb",
            ExtraKind::Unspecified => "x",
        })
    }
}

/// One entry in the delivery log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Runs scored off the delivery
    pub runs: u32,

    /// Whether a wicket fell
    pub wicket: bool,

    /// Set for extras, which do not count as a legal ball
    pub extra: Option<ExtraKind>,
}

impl Delivery {
    /// Whether the delivery counts towards the over.
    pub fn is_legal(&self) -> bool {
        self.extra.is_none()
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.extra, self.wicket) {
            (Some(kind), _) => write!(f, "{}{kind}", self.runs),
            (None, true) if self.runs == 0 => f.write_str("W"),
            (None, true) => write!(f, "{}W", self.runs),
            (None, false) => write!(f, "{}", self.runs),
        }
    }
}

/// A match being scored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveMatch {
    id: Uuid,
    details: MatchDetails,
    runs: u32,
    wickets: u32,
    balls: u32,
    ended: bool,
    deliveries: Vec<Delivery>,
}

impl LiveMatch {
    pub(crate) fn new(details: MatchDetails) -> Self {
        Self {
            id: Uuid::now_v7(),
            details,
            runs: 0,
            wickets: 0,
            balls: 0,
            ended: false,
            deliveries: Vec::new(),
        }
    }

    /// Match id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Details the match was created with.
    pub fn details(&self) -> &MatchDetails {
        &self.details
    }

    /// Match name
    pub fn name(&self) -> &str {
        &self.details.name
    }

    /// Runs scored
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Wickets fallen
    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    /// Legal balls bowled
    pub fn balls(&self) -> u32 {
        self.balls
    }

    /// Overs bowled
    pub fn overs(&self) -> Overs {
        Overs::from_balls(self.balls)
    }

    /// Whether the match has ended.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Every delivery, in order.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Deliveries bowled in the over in progress, extras included. Empty between overs.
    pub fn this_over(&self) -> SmallVec<[Delivery; 8]> {
        let boundary = self.overs().completed() * BALLS_PER_OVER;
        let mut legal = 0;

        let start = if boundary == 0 {
            0
        } else {
            self.deliveries
                .iter()
                .position(|delivery| {
                    if delivery.is_legal() {
                        legal += 1;
                    }

                    legal == boundary
                })
                .map_or(0, |idx| idx + 1)
        };

        self.deliveries.iter().skip(start).copied().collect()
    }

    /// Runs per over, to two places. `None` before the first legal ball.
    pub fn run_rate(&self) -> Option<Decimal> {
        if self.balls == 0 {
            return None;
        }

        let rate = Decimal::from(self.runs) * Decimal::from(BALLS_PER_OVER) / Decimal::from(self.balls);

        Some(rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Score as `runs/wickets (overs)`.
    pub fn scoreline(&self) -> String {
        format!("{}/{} ({})", self.runs, self.wickets, self.overs())
    }

    pub(crate) fn record_ball(&mut self, runs: u32, wicket: bool) {
        self.runs = self.runs.saturating_add(runs);

        if wicket {
            self.wickets = self.wickets.saturating_add(1);
        }

        self.balls = self.balls.saturating_add(1);
        self.deliveries.push(Delivery {
            runs,
            wicket,
            extra: None,
        });
    }

    pub(crate) fn record_extra(&mut self, runs: u32, kind: ExtraKind) {
        self.runs = self.runs.saturating_add(runs);
        self.deliveries.push(Delivery {
            runs,
            wicket: false,
            extra: Some(kind),
        });
    }

    pub(crate) fn end(&mut self) {
        self.ended = true;
    }
}
