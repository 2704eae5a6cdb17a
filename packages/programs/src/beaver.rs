//! Busy beavers over `i32` cells.
//!
//! Both machines start on a single blank cell. Symbol `0` never appears on
//! the tape, but each state still declares a rule for it that blanks the
//! cell and jumps to state 0.

use tapeworks_core::{InputOnlyMachine, Machine, MachineConfig, Result, Rule};

use crate::Report;

pub const BLANK: i32 = -1;

fn machine(config: MachineConfig) -> Result<InputOnlyMachine<i32>> {
    let mut machine: InputOnlyMachine<i32> = Machine::with_config(config);
    machine.set_input_blank(BLANK);
    machine.add_input_tape();
    machine.set_input_tape(None, vec![BLANK], None)?;
    Ok(machine)
}

fn run(mut machine: InputOnlyMachine<i32>) -> Result<Report<i32>> {
    machine.build()?;
    machine.execute_state(0)?;
    let report = Report::capture(&machine)?;
    tracing::debug!(
        ones = ones(&report),
        transitions = report.statistics.transitions,
        "busy beaver halted"
    );
    Ok(report)
}

/// Number of `1` cells left on the tape.
pub fn ones(report: &Report<i32>) -> usize {
    report.tape.iter().filter(|&&cell| cell == 1).count()
}

/// Three states, six ones, fourteen transitions.
pub fn three_state(config: MachineConfig) -> Result<Report<i32>> {
    let mut m = machine(config)?;
    m.add_rule(Rule::new(0, BLANK).write_symbol(1).move_left().next(1));
    m.add_rule(Rule::new(0, 0).write_symbol(BLANK).next(0));
    m.add_rule(Rule::new(0, 1).write_symbol(1));
    m.add_rule(Rule::new(1, BLANK).write_symbol(BLANK).move_left().next(2));
    m.add_rule(Rule::new(1, 0).write_symbol(BLANK).next(0));
    m.add_rule(Rule::new(1, 1).write_symbol(1).move_left().next(1));
    m.add_rule(Rule::new(2, BLANK).write_symbol(1).move_right().next(2));
    m.add_rule(Rule::new(2, 0).write_symbol(BLANK).next(0));
    m.add_rule(Rule::new(2, 1).write_symbol(1).move_right().next(0));
    run(m)
}

/// Four states; halts after 107 transitions with twelve ones.
pub fn four_state(config: MachineConfig) -> Result<Report<i32>> {
    let mut m = machine(config)?;
    m.add_rule(Rule::new(0, BLANK).write_symbol(1).move_right().next(1));
    m.add_rule(Rule::new(0, 0).write_symbol(BLANK).next(0));
    m.add_rule(Rule::new(0, 1).write_symbol(1).move_left().next(1));
    m.add_rule(Rule::new(1, BLANK).write_symbol(1).move_left().next(0));
    m.add_rule(Rule::new(1, 0).write_symbol(BLANK).next(0));
    m.add_rule(Rule::new(1, 1).write_symbol(BLANK).move_left().next(2));
    m.add_rule(Rule::new(2, BLANK));
    m.add_rule(Rule::new(2, 0).write_symbol(BLANK).next(0));
    m.add_rule(Rule::new(2, 1).write_symbol(1).move_left().next(3));
    m.add_rule(Rule::new(3, BLANK).write_symbol(1).move_right().next(3));
    m.add_rule(Rule::new(3, 0).write_symbol(BLANK).next(0));
    m.add_rule(Rule::new(3, 1).write_symbol(BLANK).move_right().next(0));
    run(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_state_counts() {
        let report = three_state(MachineConfig::default()).unwrap();
        assert_eq!(report.tape, vec![1; 6]);
        assert_eq!(report.head, 2);
        let stats = &report.statistics;
        assert_eq!(stats.transitions, 14);
        assert_eq!(stats.rules_declared, 9);
        assert_eq!(stats.rules_built, 9);
        assert_eq!(stats.states, 3);
        let tape = stats.input_totals();
        assert_eq!(tape.reads, 14);
        assert_eq!(tape.writes, 6);
        assert_eq!(tape.moves_left, 7);
        assert_eq!(tape.moves_right, 6);
    }

    #[test]
    fn four_state_counts() {
        let report = four_state(MachineConfig::default()).unwrap();
        assert_eq!(ones(&report), 12);
        assert_eq!(report.tape.len(), 14);
        assert_eq!(report.head, 13);
        let stats = &report.statistics;
        assert_eq!(stats.transitions, 107);
        let tape = stats.input_totals();
        assert_eq!(tape.writes, 78);
        assert_eq!(tape.moves_left, 58);
        assert_eq!(tape.moves_right, 48);
    }

    #[test]
    fn three_state_renders_without_blanks() {
        let report = three_state(MachineConfig::default()).unwrap();
        assert_eq!(report.rendered, "1, 1, [1], 1, 1, 1");
    }
}
