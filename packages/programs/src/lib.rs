//! # tapeworks-programs
//!
//! Ready-made machines built on `tapeworks-core`.
//!
//! - `increment`: binary increment from declarative rules
//! - `beaver`: the three- and four-state busy beavers
//! - `acceptor`: a rule-built prefix acceptor and a two-stage sequencer
//! - `handwritten`: an "abc" acceptor written as raw state actions
//! - `countdown`: bare trampoline chains with no machine at all
//! - `text`: turn a string into tape-ready cells
//!
//! ```rust
//! use tapeworks_core::MachineConfig;
//! use tapeworks_programs::beaver;
//!
//! let report = beaver::three_state(MachineConfig::default()).unwrap();
//! assert_eq!(report.tape, vec![1; 6]);
//! ```

use std::fmt::Display;

use serde::Serialize;
use tapeworks_core::{Machine, Result, Statistics, Symbol};

pub mod acceptor;
pub mod beaver;
pub mod countdown;
pub mod handwritten;
pub mod increment;
pub mod text;

/// Final state of a program's active input tape, plus counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<S> {
    pub tape: Vec<S>,
    pub head: usize,
    /// The tape as `a, [b], c`, blanks spelled out.
    pub rendered: String,
    pub statistics: Statistics,
}

impl<S: Symbol + Display> Report<S> {
    /// Snapshot the active input tape of `machine`.
    pub fn capture<O: Symbol>(machine: &Machine<S, O>) -> Result<Self> {
        let tape = machine.input_tape(None)?;
        Ok(Self {
            tape: tape.storage().to_vec(),
            head: tape.head(),
            rendered: machine.render_input(None)?,
            statistics: machine.statistics(),
        })
    }
}
