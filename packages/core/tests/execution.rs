use std::cell::Cell;
use std::rc::Rc;

use tapeworks_core::{ops, ErrorKind, Machine, MachineConfig, Rule, Transition};

fn increment_machine(blank: char) -> Machine<char, ()> {
    let mut m = Machine::new();
    m.set_input_blank(blank);
    m.add_input_tape();
    m.set_input_tape(None, vec![blank, '0', '0', '1'], None).unwrap();
    m
}

#[test]
fn test_binary_increment_rules() {
    let b = ' ';
    let mut m = increment_machine(b);
    m.add_rule(Rule::new(0, b).move_left().next(1));
    m.add_rule(Rule::new(0, '0').write_symbol('1').move_right().next(1));
    m.add_rule(Rule::new(0, '1').write_symbol('0').move_right().next(0));
    m.add_rule(Rule::new(1, b).move_right());
    m.add_rule(Rule::new(1, '0').move_left().next(1));
    m.add_rule(Rule::new(1, '1').move_left().next(1));
    m.build().unwrap();
    m.execute_state(0).unwrap();

    let tape = m.input_tape(None).unwrap();
    assert_eq!(tape.storage().to_vec(), vec![b, '0', '0', '1', b]);
    assert_eq!(tape.head(), 3);

    let stats = m.statistics();
    assert_eq!(stats.transitions, 5);
    assert_eq!(stats.rules_declared, 6);
    assert_eq!(stats.rules_built, 6);
    assert_eq!(stats.states, 2);
    assert_eq!(stats.input_tapes[0].writes, 0);
    assert_eq!(stats.input_tapes[0].moves_left, 4);
    assert_eq!(stats.input_tapes[0].moves_right, 1);
}

#[test]
fn test_positional_rule_form_matches_builder() {
    let b = ' ';
    let mut m = increment_machine(b);
    m.add_rule_with(0, b, None, None, Some(ops::move_input_left()), Some(1), None);
    m.add_rule_with(1, b, None, None, Some(ops::move_input_right()), None, None);
    m.add_rule_with(1, '0', Some(ops::write_input('1')), None, Some(ops::move_input_left()), Some(1), None);
    m.add_rule_with(1, '1', Some(ops::write_input('0')), None, Some(ops::move_input_left()), Some(1), None);
    m.build().unwrap();
    m.execute_state(0).unwrap();

    let tape = m.input_tape(None).unwrap();
    assert_eq!(tape.storage().to_vec(), vec![b, '1', '1', '0', b]);
    assert_eq!(m.statistics().input_tapes[0].writes, 3);
}

#[test]
fn test_long_run_stays_iterative() {
    const STEPS: u64 = 100_000;
    let mut m: Machine<char, ()> = Machine::new();
    m.add_input_tape();
    m.set_input_tape(None, vec!['a'], None).unwrap();
    m.add_rule(Rule::new(0, 'a').next(1));
    m.build().unwrap();

    let remaining = Rc::new(Cell::new(STEPS));
    let counter = Rc::clone(&remaining);
    m.add_state(1, move |m| {
        counter.set(counter.get() - 1);
        if counter.get() == 0 {
            m.transition_stop()
        } else {
            m.transition_to(Some(0))
        }
    });

    m.execute_state(0).unwrap();
    assert_eq!(remaining.get(), 0);
    assert_eq!(m.statistics().transitions, 2 * STEPS);
    assert_eq!(m.statistics().input_tapes[0].reads, STEPS);
}

#[test]
fn test_raw_state_self_loop() {
    let mut m: Machine<u32, u32> = Machine::new();
    m.set_output_blank(0);
    m.add_output_tape();
    m.set_output_tape(None, vec![0], None).unwrap();
    m.add_state(7, |m| {
        let seen = m.read_output()?;
        if seen == 10 {
            return m.transition_stop();
        }
        m.write_output(seen + 1)?;
        m.transition_current()
    });
    m.execute_state(7).unwrap();
    assert_eq!(m.output_tape(None).unwrap().storage().to_vec(), vec![10]);
    assert_eq!(m.statistics().output_tapes[0].writes, 10);
    assert_eq!(m.statistics().transitions, 11);
}

#[test]
fn test_error_leaves_partial_state() {
    let mut m: Machine<char, ()> = Machine::new();
    m.add_input_tape();
    m.set_input_tape(None, vec!['x', 'x'], None).unwrap();
    m.add_rule(Rule::new(0, 'x').write_symbol('y').move_left().next(0));
    m.build().unwrap();

    let err = m.execute_state(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UninitializedValue);
    assert_eq!(m.input_tape(None).unwrap().storage().to_vec(), vec!['y', 'y']);
    assert_eq!(m.input_tape(None).unwrap().head(), 1);
}

#[test]
fn test_execute_current_resumes() {
    let config = MachineConfig::default().verbose(true);
    let mut m: Machine<char, ()> = Machine::with_config(config);
    m.set_input_blank('_');
    m.add_input_tape();
    m.set_input_tape(None, vec!['a'], None).unwrap();
    m.add_state(0, |m| {
        m.move_input_left()?;
        Ok(Transition::Halt)
    });
    m.execute_state(0).unwrap();
    m.execute_current().unwrap();
    assert_eq!(m.input_tape(None).unwrap().head(), 2);
    assert_eq!(m.render_input(None).unwrap(), "a, blank, [blank]");
    // A raw halt skips the transition primitives, so nothing is counted.
    assert_eq!(m.statistics().transitions, 0);
}
