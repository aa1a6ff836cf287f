use std::{io::Write, str::FromStr};

use clap::Args;
use crichub::scoring::{ExtraKind, LiveMatch, MatchDetails, Scoreboard, ScoringError};
use thiserror::Error;

#[derive(Debug, Args)]
pub(crate) struct ScoreArgs {
    /// Match name
    #[arg(long)]
    name: String,

    /// First team
    #[arg(long)]
    team_a: String,

    /// Second team
    #[arg(long)]
    team_b: String,

    /// Toss result
    #[arg(long)]
    toss: String,

    /// Deliveries in order: runs (`4`), wicket (`W`, `1W`), extras (`wd`, `2nb`, `1x`), or `end`
    #[arg(allow_hyphen_values = true)]
    events: Vec<ScoreEvent>,
}

/// A scoring event typed at the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScoreEvent {
    Ball { runs: i64, wicket: bool },
    Extra { kind: ExtraKind, runs: i64 },
    End,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised delivery {0:?}")]
pub(crate) struct ParseEventError(String);

impl FromStr for ScoreEvent {
    type Err = ParseEventError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let lower = token.trim().to_ascii_lowercase();

        if lower == "end" {
            return Ok(ScoreEvent::End);
        }

        let digits = lower.len() - lower.trim_start_matches(|c: char| c.is_ascii_digit() || c == '-').len();
        let (runs, suffix) = lower.split_at(digits);

        let runs = match runs {
            "" => 0,
            runs => runs
                .parse::<i64>()
                .map_err(|error| ParseEventError(format!("{token}: {error}")))?,
        };

        match suffix {
            "" if digits > 0 => Ok(ScoreEvent::Ball { runs, wicket: false }),
            "w" => Ok(ScoreEvent::Ball { runs, wicket: true }),
            "wd" => Ok(ScoreEvent::Extra {
                kind: ExtraKind::Wide,
                runs: if digits == 0 { 1 } else { runs },
            }),
            "nb" => Ok(ScoreEvent::Extra {
                kind: ExtraKind::NoBall,
                runs: if digits == 0 { 1 } else { runs },
            }),
            "x" => Ok(ScoreEvent::Extra {
                kind: ExtraKind::Unspecified,
                runs,
            }),
            _ => Err(ParseEventError(token.to_string())),
        }
    }
}

fn apply(board: &mut Scoreboard, event: ScoreEvent) -> Result<&LiveMatch, ScoringError> {
    match event {
        ScoreEvent::Ball { runs, wicket } => board.add_ball(runs, wicket),
        ScoreEvent::Extra { kind, runs } => board.add_extra_of(kind, runs),
        ScoreEvent::End => board.end_match(),
    }
}

pub(crate) fn run(args: &ScoreArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut board = Scoreboard::new();

    let created = board.create_match(MatchDetails::new(
        args.name.as_str(),
        args.team_a.as_str(),
        args.team_b.as_str(),
        args.toss.as_str(),
    ))?;

    writeln!(
        out,
        "{}: {} v {} ({})",
        created.name(),
        created.details().team_a,
        created.details().team_b,
        created.details().toss
    )?;

    for event in &args.events {
        if let Err(error) = apply(&mut board, *event) {
            writeln!(out, "ignored {event:?}: {error}")?;
        }
    }

    let live = board.current().ok_or(ScoringError::NoMatch)?;

    writeln!(out, "Score: {}", live.scoreline())?;
    writeln!(out, "Overs: {}", live.overs())?;

    if let Some(rate) = live.run_rate() {
        writeln!(out, "Run rate: {rate}")?;
    }

    let this_over = live
        .this_over()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");

    if !this_over.is_empty() {
        writeln!(out, "This over: {this_over}")?;
    }

    if live.is_ended() {
        writeln!(out, "Match ended.")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_runs_wickets_and_extras() -> TestResult {
        assert_eq!("4".parse::<ScoreEvent>()?, ScoreEvent::Ball { runs: 4, wicket: false });
        assert_eq!("W".parse::<ScoreEvent>()?, ScoreEvent::Ball { runs: 0, wicket: true });
        assert_eq!("1w".parse::<ScoreEvent>()?, ScoreEvent::Ball { runs: 1, wicket: true });
        assert_eq!(
            "wd".parse::<ScoreEvent>()?,
            ScoreEvent::Extra { kind: ExtraKind::Wide, runs: 1 }
        );
        assert_eq!(
            "5NB".parse::<ScoreEvent>()?,
            ScoreEvent::Extra { kind: ExtraKind::NoBall, runs: 5 }
        );
        assert_eq!("End".parse::<ScoreEvent>()?, ScoreEvent::End);

        Ok(())
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!("six".parse::<ScoreEvent>().is_err());
        assert!("".parse::<ScoreEvent>().is_err());
    }

    #[test]
    fn run_prints_the_final_score() -> TestResult {
        let args = ScoreArgs {
            name: "M".to_string(),
            team_a: "A".to_string(),
            team_b: "B".to_string(),
            toss: "Heads".to_string(),
            events: ["4", "W", "1x", "end", "6"]
                .into_iter()
                .map(str::parse)
                .collect::<Result<_, _>>()?,
        };

        let mut out = Vec::new();
        run(&args, &mut out)?;
        let output = String::from_utf8(out)?;

        assert!(output.contains("Score: 5/1 (0.2)"));
        assert!(output.contains("ignored Ball { runs: 6, wicket: false }: the match has ended"));
        assert!(output.contains("Match ended."));

        Ok(())
    }
}
