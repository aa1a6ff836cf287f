use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::Args;
use crichub::scoring::feed::{FileSource, LiveScores};
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Args)]
pub(crate) struct LiveArgs {
    /// Feed body saved as JSON
    path: PathBuf,
}

pub(crate) fn run(args: &LiveArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let mut scores = LiveScores::new();

    scores
        .refresh(&FileSource::new(&args.path))
        .with_context(|| format!("failed to read live scores from {}", args.path.display()))?;

    if scores.matches().is_empty() {
        writeln!(out, "No live matches.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Match", "Venue", "Status", "Score"]);

    for summary in scores.matches() {
        let score = summary
            .score
            .iter()
            .map(|innings| format!("{} {innings}", innings.inning))
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            summary.name.clone(),
            summary.venue.clone(),
            summary.status.clone(),
            score,
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());

    writeln!(out, "{table}")?;

    Ok(())
}
