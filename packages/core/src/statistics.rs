//! Observational counters.
//!
//! Nothing in the engine reads these back; they exist for callers and for
//! the human-readable report.

use std::fmt;

use serde::Serialize;

/// Per-tape counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TapeStatistics {
    pub reads: u64,
    pub writes: u64,
    pub moves_left: u64,
    pub moves_right: u64,
}

/// A snapshot of everything a machine has counted so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// State bindings registered (rebuilding a state registers it again).
    pub states: u64,
    pub rules_declared: u64,
    pub rules_built: u64,
    /// Transitions taken, halts included.
    pub transitions: u64,
    pub input_tapes: Vec<TapeStatistics>,
    pub output_tapes: Vec<TapeStatistics>,
}

impl Statistics {
    /// Sum of the counters over every input tape.
    pub fn input_totals(&self) -> TapeStatistics {
        total(&self.input_tapes)
    }

    /// Sum of the counters over every output tape.
    pub fn output_totals(&self) -> TapeStatistics {
        total(&self.output_tapes)
    }
}

fn total(tapes: &[TapeStatistics]) -> TapeStatistics {
    tapes.iter().fold(TapeStatistics::default(), |acc, t| TapeStatistics {
        reads: acc.reads + t.reads,
        writes: acc.writes + t.writes,
        moves_left: acc.moves_left + t.moves_left,
        moves_right: acc.moves_right + t.moves_right,
    })
}

fn write_tapes(f: &mut fmt::Formatter<'_>, label: &str, tapes: &[TapeStatistics]) -> fmt::Result {
    for (index, tape) in tapes.iter().enumerate() {
        writeln!(f, "    {} tape {} reads: {}", label, index, tape.reads)?;
        writeln!(f, "    {} tape {} writes: {}", label, index, tape.writes)?;
        writeln!(f, "    {} tape {} moves (left): {}", label, index, tape.moves_left)?;
        writeln!(f, "    {} tape {} moves (right): {}", label, index, tape.moves_right)?;
    }
    Ok(())
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "    states: {}", self.states)?;
        writeln!(f, "    rules declared: {}", self.rules_declared)?;
        writeln!(f, "    rules built: {}", self.rules_built)?;
        writeln!(f, "    total state transitions: {}", self.transitions)?;
        write_tapes(f, "input", &self.input_tapes)?;
        write_tapes(f, "output", &self.output_tapes)
    }
}

/// Machine-wide counters; tape counters live on the tapes themselves.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub states: u64,
    pub rules_declared: u64,
    pub rules_built: u64,
    pub transitions: u64,
}
