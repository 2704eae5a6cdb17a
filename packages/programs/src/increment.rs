//! Binary increment over string cells.
//!
//! Input digits are laid out after a leading blank and the run starts on
//! that blank. State 0 decides from the cell under the head; state 1 walks
//! toward the back of the tape to the trailing blank and halts on the last
//! digit.

use tapeworks_core::{InputOnlyMachine, Machine, MachineConfig, Result, Rule};

use crate::text;
use crate::Report;

pub const BLANK: &str = " ";

/// Which rule set to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// State 1 only moves while returning.
    #[default]
    Plain,
    /// State 1 also flips each digit it passes.
    Flipping,
}

fn cell(s: &str) -> String {
    s.to_string()
}

/// Declare the rules for `variant` on `machine`.
pub fn declare(machine: &mut InputOnlyMachine<String>, variant: Variant) {
    machine.add_rule(Rule::new(0, cell(BLANK)).move_left().next(1));
    machine.add_rule(Rule::new(0, cell("0")).write_symbol(cell("1")).move_right().next(1));
    machine.add_rule(Rule::new(0, cell("1")).write_symbol(cell("0")).move_right().next(0));
    machine.add_rule(Rule::new(1, cell(BLANK)).move_right());
    match variant {
        Variant::Plain => {
            machine.add_rule(Rule::new(1, cell("0")).move_left().next(1));
            machine.add_rule(Rule::new(1, cell("1")).move_left().next(1));
        }
        Variant::Flipping => {
            machine.add_rule(Rule::new(1, cell("0")).write_symbol(cell("1")).move_left().next(1));
            machine.add_rule(Rule::new(1, cell("1")).write_symbol(cell("0")).move_left().next(1));
        }
    }
}

/// Run the increment program on `digits` (for example `"001"`).
pub fn run(digits: &str, variant: Variant, config: MachineConfig) -> Result<Report<String>> {
    let mut machine: InputOnlyMachine<String> = Machine::with_config(config);
    machine.set_input_blank(cell(BLANK));
    machine.add_input_tape();
    let mut tape = text::sequence(digits);
    tape.append_first(cell(BLANK));
    machine.set_input_tape(None, tape, None)?;

    declare(&mut machine, variant);
    machine.build()?;
    machine.execute_state(0)?;
    Report::capture(&machine)
}
