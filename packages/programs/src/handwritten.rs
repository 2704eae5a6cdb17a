//! An "abc" acceptor written directly as state actions, no rules.
//!
//! Entry is the default state, so every check goes through
//! `execute_default`. The machine is kept between checks and reset after
//! each one.

use tapeworks_core::{Machine, MachineConfig, Result, StateId, DEFAULT_STATE};

use crate::text;

const AFTER_A: StateId = 0;
const AFTER_B: StateId = 1;
const REJECT: StateId = 2;

pub struct Handwritten {
    machine: Machine<String, bool>,
}

impl Handwritten {
    /// Build the acceptor. `reset_after_execution` is ignored: `check`
    /// resets once it has read the verdict.
    pub fn new(config: MachineConfig) -> Result<Self> {
        let mut m: Machine<String, bool> = Machine::with_config(config.reset_after_execution(false));
        m.set_blank(String::new(), false);

        m.add_state(DEFAULT_STATE, |m| {
            if m.read_input()? == "a" {
                m.move_input_left()?;
                m.transition_to(Some(AFTER_A))
            } else {
                m.transition_to(Some(REJECT))
            }
        });
        m.add_state(AFTER_A, |m| {
            if m.read_input()? == "b" {
                m.move_input_left()?;
                m.transition_to(Some(AFTER_B))
            } else {
                m.transition_to(Some(REJECT))
            }
        });
        m.add_state(AFTER_B, |m| {
            if m.read_input()? == "c" {
                m.write_output(true)?;
                m.transition_stop()
            } else {
                m.transition_to(Some(REJECT))
            }
        });
        m.add_state(REJECT, |m| {
            m.write_output(false)?;
            m.transition_stop()
        });

        m.add_tape();
        m.set_output_tape(None, vec![false], None)?;
        m.set_output_default(None, vec![false])?;
        Ok(Self { machine: m })
    }

    /// Whether `input` starts with "abc". Tapes are reset afterwards.
    pub fn check(&mut self, input: &str) -> Result<bool> {
        self.machine.set_input_tape(None, text::sequence(input), Some(0))?;
        self.machine.execute_default()?;
        let accepted = *self.machine.output_tape(None)?.storage().node_at(0)?;
        tracing::debug!(input, accepted, "handwritten acceptor finished");
        self.machine.reset();
        Ok(accepted)
    }

    pub fn machine(&self) -> &Machine<String, bool> {
        &self.machine
    }
}
