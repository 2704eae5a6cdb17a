//! Prefix acceptor built from rules.
//!
//! For a target of length `n`, states `0..n` each match one target symbol
//! and step toward the back of the tape. The last one jumps to [`SUCCESS`];
//! any mismatch falls back to [`FAILURE`]. Both are raw states that record
//! the verdict on the output tape.

use serde::Serialize;
use tapeworks_core::{Machine, MachineConfig, Result, Rule, Sequence, StateId, Symbol};

pub const SUCCESS: StateId = -1;
pub const FAILURE: StateId = -2;

/// Where the input head ended up, and whether the target matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Acceptance {
    pub head: usize,
    pub accepted: bool,
}

/// Check whether `input`, read from `head`, starts with `target`.
///
/// On success the head lands just past the matched prefix. Running out of
/// input extends the tape with `T::default()` and reads that.
pub fn accept<T: Symbol + Default>(head: usize, input: &Sequence<T>, target: &Sequence<T>) -> Result<Acceptance> {
    accept_with(MachineConfig::default(), head, input, target)
}

/// Like [`accept`] with an explicit config. `reset_after_execution` is
/// ignored; a fresh machine is built per call.
pub fn accept_with<T: Symbol + Default>(
    config: MachineConfig,
    head: usize,
    input: &Sequence<T>,
    target: &Sequence<T>,
) -> Result<Acceptance> {
    // The verdict is read off the tapes after the run.
    let mut m: Machine<T, bool> = Machine::with_config(config.reset_after_execution(false));
    m.set_blank(T::default(), false);

    m.add_state(FAILURE, |m| {
        m.write_output(false)?;
        m.transition_stop()
    });
    m.add_state(SUCCESS, |m| {
        m.move_input_left()?;
        m.write_output(true)?;
        m.transition_stop()
    });

    let last = target.count().saturating_sub(1);
    for (index, symbol) in target.iter().enumerate() {
        let state = index as StateId;
        let rule = Rule::new(state, symbol.clone()).otherwise_next(FAILURE);
        let rule = if index == last {
            rule.next(SUCCESS)
        } else {
            rule.move_left().next(state + 1)
        };
        m.add_rule(rule);
    }
    m.build()?;

    m.add_tape();
    m.set_output_tape(None, vec![false], None)?;
    m.set_output_default(None, vec![false])?;
    m.set_input_tape(None, input.clone(), Some(head))?;
    m.execute_state(0)?;

    let accepted = *m.output_tape(None)?.storage().node_at(0)?;
    let head = m.input_tape(None)?.head();
    tracing::debug!(accepted, head, "acceptor finished");
    Ok(Acceptance { head, accepted })
}

/// Accept `first` from the start of `input`, then `second` from wherever
/// `first` left the head. Stops at the first rejection.
pub fn accept_sequence<T: Symbol + Default>(
    input: &Sequence<T>,
    first: &Sequence<T>,
    second: &Sequence<T>,
) -> Result<Acceptance> {
    accept_sequence_with(MachineConfig::default(), input, first, second)
}

pub fn accept_sequence_with<T: Symbol + Default>(
    config: MachineConfig,
    input: &Sequence<T>,
    first: &Sequence<T>,
    second: &Sequence<T>,
) -> Result<Acceptance> {
    let a = accept_with(config, 0, input, first)?;
    if !a.accepted {
        return Ok(a);
    }
    accept_with(config, a.head, input, second)
}
