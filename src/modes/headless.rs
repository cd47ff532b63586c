//! Scripted, non-interactive driver
//!
//! Replays a fixed list of turns, one per tick, and writes every snapshot
//! as a line of JSON. Handy for piping a game into another renderer or for
//! checking a line of play without a terminal.
//!
//! # Output
//!
//! Line `0` is the starting position. Each following line is
//!
//! ```json
//! {"tick":1,"outcome":"Moved","snapshot":{"snake":[{"x":3,"y":2}], ...}}
//! ```
//!
//! The run stops after `max_ticks` ticks or as soon as the game is over.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    path::Path,
};

use crate::game::{GameEngine, GameStatus, ScriptStep, Snapshot, TickOutcome};

#[derive(Serialize)]
struct TickRecord<'a> {
    tick: usize,
    outcome: Option<TickOutcome>,
    snapshot: &'a Snapshot,
}

/// How a headless run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSummary {
    /// Ticks actually played
    pub ticks: usize,
    pub last: Snapshot,
}

pub struct HeadlessMode {
    engine: GameEngine,
    script: Vec<ScriptStep>,
    max_ticks: usize,
}

impl HeadlessMode {
    /// `max_ticks` defaults to the script length; ticks past the end of the
    /// script keep the current heading.
    pub fn new(engine: GameEngine, script: Vec<ScriptStep>, max_ticks: Option<usize>) -> Self {
        let max_ticks = max_ticks.unwrap_or(script.len());
        Self {
            engine,
            script,
            max_ticks,
        }
    }

    /// Write to `path`, or to stdout when there is none
    pub fn run_to(&mut self, path: Option<&Path>) -> Result<HeadlessSummary> {
        match path {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                self.run(file)
            }
            None => self.run(stdout().lock()),
        }
    }

    pub fn run<W: Write>(&mut self, out: W) -> Result<HeadlessSummary> {
        let mut out = BufWriter::new(out);
        let mut ticks = 0;

        self.emit(&mut out, 0, None)?;

        for tick in 1..=self.max_ticks {
            if let Some(Some(direction)) = self.script.get(tick - 1) {
                self.engine.set_heading(*direction);
            }

            let outcome = self.engine.tick();
            ticks = tick;
            self.emit(&mut out, tick, Some(outcome))?;

            if self.engine.status() == GameStatus::GameOver {
                break;
            }
        }

        out.flush().context("Failed to flush output")?;

        let last = self.engine.snapshot();
        info!(
            "headless run finished after {ticks} ticks, score {}, {:?}",
            last.score(),
            last.status
        );

        Ok(HeadlessSummary { ticks, last })
    }

    fn emit<W: Write>(&self, out: &mut W, tick: usize, outcome: Option<TickOutcome>) -> Result<()> {
        let snapshot = self.engine.snapshot();
        let record = TickRecord {
            tick,
            outcome,
            snapshot: &snapshot,
        };

        serde_json::to_writer(&mut *out, &record).context("Failed to serialize snapshot")?;
        writeln!(out).context("Failed to write snapshot")?;
        Ok(())
    }
}
