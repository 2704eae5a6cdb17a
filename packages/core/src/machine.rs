//! The machine façade.
//!
//! [`Machine`] owns every arena the engine needs (input and output tape
//! banks, the state registry, declared rules, compiled dispatch tables and
//! counters) and exposes the operations actions call back into.

use std::convert::Infallible;
use std::fmt::Display;

use tapeworks_ll_store::{Lifo, Sequence};
use tracing::debug;

use crate::config::MachineConfig;
use crate::error::{MachineError, Result};
use crate::observer::{Event, Observer, TapeEvent, TapeOp};
use crate::ops::Op;
use crate::rule::{CompiledExpression, Rule, RuleBuilder};
use crate::state::{Action, StateId, StateRegistry, Transition};
use crate::statistics::{Counters, Statistics};
use crate::tape::{Move, Tape, TapeBank};
use crate::trampoline::{trampoline, Outcome};
use crate::Symbol;

/// A machine that only ever reads and writes input tapes.
pub type InputOnlyMachine<I> = Machine<I, Infallible>;

/// A machine whose states never consult an input tape.
pub type OutputOnlyMachine<O> = Machine<Infallible, O>;

/// A multi-tape abstract machine over input symbols `I` and output
/// symbols `O`.
///
/// Rule-built states read the active input tape to pick a branch. Raw
/// states added with [`Machine::add_state`] can do anything the public API
/// allows and pick their successor through the `transition_*` primitives.
pub struct Machine<I, O> {
    config: MachineConfig,
    inputs: TapeBank<I>,
    outputs: TapeBank<O>,
    states: StateRegistry<I, O>,
    rules: RuleBuilder<I, O>,
    compiled: Lifo<CompiledExpression<I, O>>,
    counters: Counters,
    observer: Option<Observer<I, O>>,
}

impl<I, O> Default for Machine<I, O> {
    fn default() -> Self {
        Self {
            config: MachineConfig::default(),
            inputs: TapeBank::default(),
            outputs: TapeBank::default(),
            states: StateRegistry::default(),
            rules: RuleBuilder::default(),
            compiled: Lifo::default(),
            counters: Counters::default(),
            observer: None,
        }
    }
}

fn read_cell<S: Symbol>(bank: &mut TapeBank<S>, tape: usize) -> Result<(S, TapeEvent<S>)> {
    let value = bank.read(tape)?;
    let event = TapeEvent {
        op: TapeOp::Read,
        tape,
        head: bank.tape(tape)?.head(),
        before: None,
        after: Some(value.clone()),
        extended: false,
    };
    Ok((value, event))
}

fn write_cell<S: Symbol>(bank: &mut TapeBank<S>, tape: usize, value: S) -> Result<Option<TapeEvent<S>>> {
    let after = value.clone();
    let Some(before) = bank.write(tape, value)? else {
        return Ok(None);
    };
    Ok(Some(TapeEvent {
        op: TapeOp::Write,
        tape,
        head: bank.tape(tape)?.head(),
        before: Some(before),
        after: Some(after),
        extended: false,
    }))
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Left,
    Right,
}

fn move_head<S: Symbol>(bank: &mut TapeBank<S>, tape: usize, direction: Direction) -> Result<TapeEvent<S>> {
    let before = bank.tape(tape)?.peek().ok().cloned();
    let (moved, op) = match direction {
        Direction::Left => (bank.move_left(tape)?, TapeOp::MoveLeft),
        Direction::Right => (bank.move_right(tape)?, TapeOp::MoveRight),
    };
    let after = bank.tape(tape)?;
    Ok(TapeEvent {
        op,
        tape,
        head: after.head(),
        before,
        after: after.peek().ok().cloned(),
        extended: moved == Move::Extended,
    })
}

impl<I: Symbol, O: Symbol> Machine<I, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty machine using `config`.
    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Change configuration between runs.
    pub fn config_mut(&mut self) -> &mut MachineConfig {
        &mut self.config
    }

    /// Install a hook that receives every tape operation and transition.
    pub fn set_observer(&mut self, observer: impl FnMut(&Event<I, O>) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the observer, if any.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn record_input(&mut self, event: TapeEvent<I>) {
        if self.config.verbose {
            debug!(
                tape = event.tape,
                head = event.head,
                op = ?event.op,
                before = ?event.before,
                after = ?event.after,
                extended = event.extended,
                "input tape"
            );
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&Event::Input(event));
        }
    }

    fn record_output(&mut self, event: TapeEvent<O>) {
        if self.config.verbose {
            debug!(
                tape = event.tape,
                head = event.head,
                op = ?event.op,
                before = ?event.before,
                after = ?event.after,
                extended = event.extended,
                "output tape"
            );
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&Event::Output(event));
        }
    }

    fn record_transition(&mut self, from: StateId, to: Option<StateId>) {
        self.counters.transitions += 1;
        if self.config.verbose {
            match to {
                Some(to) => debug!(from, to, "transition"),
                None => debug!(from, "transition to halt"),
            }
        }
        if let Some(observer) = self.observer.as_mut() {
            observer(&Event::Transition { from, to });
        }
    }

    // Tapes

    /// Add one input and one output tape, returning their indices.
    pub fn add_tape(&mut self) -> (usize, usize) {
        (self.add_input_tape(), self.add_output_tape())
    }

    /// Add an empty input tape and make it active.
    pub fn add_input_tape(&mut self) -> usize {
        self.inputs.add()
    }

    /// Add an empty output tape and make it active.
    pub fn add_output_tape(&mut self) -> usize {
        self.outputs.add()
    }

    /// Make input tape `index` the one unindexed operations use.
    pub fn select_input_tape(&mut self, index: usize) -> Result<()> {
        self.inputs.select(index)
    }

    /// Make output tape `index` the one unindexed operations use.
    pub fn select_output_tape(&mut self, index: usize) -> Result<()> {
        self.outputs.select(index)
    }

    /// All input tapes with their shared blank.
    pub fn input_tapes(&self) -> &TapeBank<I> {
        &self.inputs
    }

    /// All output tapes with their shared blank.
    pub fn output_tapes(&self) -> &TapeBank<O> {
        &self.outputs
    }

    /// Input tape `index`, or the active one.
    pub fn input_tape(&self, index: Option<usize>) -> Result<&Tape<I>> {
        self.inputs.tape(index.unwrap_or(self.inputs.active()))
    }

    /// Output tape `index`, or the active one.
    pub fn output_tape(&self, index: Option<usize>) -> Result<&Tape<O>> {
        self.outputs.tape(index.unwrap_or(self.outputs.active()))
    }

    fn input_tape_mut(&mut self, index: Option<usize>) -> Result<&mut Tape<I>> {
        let index = index.unwrap_or(self.inputs.active());
        self.inputs.tape_mut(index)
    }

    fn output_tape_mut(&mut self, index: Option<usize>) -> Result<&mut Tape<O>> {
        let index = index.unwrap_or(self.outputs.active());
        self.outputs.tape_mut(index)
    }

    /// Replace the storage of input tape `index` (or the active one),
    /// optionally moving its head.
    pub fn set_input_tape(
        &mut self,
        index: Option<usize>,
        storage: impl Into<Sequence<I>>,
        head: Option<usize>,
    ) -> Result<()> {
        self.input_tape_mut(index)?.set(storage, head);
        Ok(())
    }

    /// Replace the storage of an output tape, `None` meaning the active one.
    ///
    /// The head moves only when `head` is given.
    pub fn set_output_tape(
        &mut self,
        index: Option<usize>,
        storage: impl Into<Sequence<O>>,
        head: Option<usize>,
    ) -> Result<()> {
        self.output_tape_mut(index)?.set(storage, head);
        Ok(())
    }

    /// Point an input tape's head at `head`. It is not checked until the next
    /// read, write or move.
    pub fn set_input_head(&mut self, index: Option<usize>, head: usize) -> Result<()> {
        self.input_tape_mut(index)?.set_head(head);
        Ok(())
    }

    /// Point an output tape's head at `head`.
    pub fn set_output_head(&mut self, index: Option<usize>, head: usize) -> Result<()> {
        self.output_tape_mut(index)?.set_head(head);
        Ok(())
    }

    /// Set the snapshot [`Machine::reset`] restores on input tape `index`.
    pub fn set_input_default(&mut self, index: Option<usize>, storage: impl Into<Sequence<I>>) -> Result<()> {
        self.input_tape_mut(index)?.set_default(storage);
        Ok(())
    }

    /// Snapshot restored into an output tape by [`reset`](Self::reset).
    pub fn set_output_default(&mut self, index: Option<usize>, storage: impl Into<Sequence<O>>) -> Result<()> {
        self.output_tape_mut(index)?.set_default(storage);
        Ok(())
    }

    /// Fill value for input tapes that grow at a boundary.
    pub fn set_input_blank(&mut self, blank: I) {
        self.inputs.set_blank(blank);
    }

    /// Fill value for output tapes that grow at a boundary.
    pub fn set_output_blank(&mut self, blank: O) {
        self.outputs.set_blank(blank);
    }

    /// Set both blanks at once.
    pub fn set_blank(&mut self, input: I, output: O) {
        self.set_input_blank(input);
        self.set_output_blank(output);
    }

    /// Forget the input blank. Boundary moves on input tapes fail until a new
    /// one is set.
    pub fn unset_input_blank(&mut self) {
        self.inputs.unset_blank();
    }

    /// Forget the output blank.
    pub fn unset_output_blank(&mut self) {
        self.outputs.unset_blank();
    }

    /// The input blank, or `UninitializedValue` when unset.
    pub fn input_blank(&self) -> Result<&I> {
        self.inputs
            .blank()
            .ok_or(MachineError::UninitializedValue("input blank"))
    }

    /// The output blank, or `UninitializedValue` when unset.
    pub fn output_blank(&self) -> Result<&O> {
        self.outputs
            .blank()
            .ok_or(MachineError::UninitializedValue("output blank"))
    }

    // Tape operations

    /// Read the cell under the active input tape's head.
    pub fn read_input(&mut self) -> Result<I> {
        self.read_input_at(self.inputs.active())
    }

    /// Read the cell under the head of input tape `tape`.
    pub fn read_input_at(&mut self, tape: usize) -> Result<I> {
        let (value, event) = read_cell(&mut self.inputs, tape)?;
        self.record_input(event);
        Ok(value)
    }

    /// Read the cell under the active output tape's head.
    pub fn read_output(&mut self) -> Result<O> {
        self.read_output_at(self.outputs.active())
    }

    /// Read the cell under the head of output tape `tape`.
    pub fn read_output_at(&mut self, tape: usize) -> Result<O> {
        let (value, event) = read_cell(&mut self.outputs, tape)?;
        self.record_output(event);
        Ok(value)
    }

    /// Write under the active input head; a no-op if the cell already holds
    /// `value`.
    pub fn write_input(&mut self, value: I) -> Result<()> {
        self.write_input_at(self.inputs.active(), value)
    }

    /// Write to input tape `tape`. Writing the value already there is a no-op.
    pub fn write_input_at(&mut self, tape: usize, value: I) -> Result<()> {
        if let Some(event) = write_cell(&mut self.inputs, tape, value)? {
            self.record_input(event);
        }
        Ok(())
    }

    /// Write to the active output tape.
    pub fn write_output(&mut self, value: O) -> Result<()> {
        self.write_output_at(self.outputs.active(), value)
    }

    /// Write to output tape `tape`.
    pub fn write_output_at(&mut self, tape: usize, value: O) -> Result<()> {
        if let Some(event) = write_cell(&mut self.outputs, tape, value)? {
            self.record_output(event);
        }
        Ok(())
    }

    /// Move the active input head toward the back of the tape.
    pub fn move_input_left(&mut self) -> Result<()> {
        self.move_input_left_at(self.inputs.active())
    }

    /// Move input tape `tape` toward its back, appending a blank at the end.
    pub fn move_input_left_at(&mut self, tape: usize) -> Result<()> {
        let event = move_head(&mut self.inputs, tape, Direction::Left)?;
        self.record_input(event);
        Ok(())
    }

    /// Move the active input head toward the front of the tape.
    pub fn move_input_right(&mut self) -> Result<()> {
        self.move_input_right_at(self.inputs.active())
    }

    /// Move input tape `tape` toward its front, prepending a blank at the start.
    pub fn move_input_right_at(&mut self, tape: usize) -> Result<()> {
        let event = move_head(&mut self.inputs, tape, Direction::Right)?;
        self.record_input(event);
        Ok(())
    }

    /// Move the active output tape toward its back.
    pub fn move_output_left(&mut self) -> Result<()> {
        self.move_output_left_at(self.outputs.active())
    }

    /// Move output tape `tape` toward its back, appending a blank at the end.
    pub fn move_output_left_at(&mut self, tape: usize) -> Result<()> {
        let event = move_head(&mut self.outputs, tape, Direction::Left)?;
        self.record_output(event);
        Ok(())
    }

    /// Move the active output tape toward its front.
    pub fn move_output_right(&mut self) -> Result<()> {
        self.move_output_right_at(self.outputs.active())
    }

    /// Move output tape `tape` toward its front, prepending a blank at the start.
    pub fn move_output_right_at(&mut self, tape: usize) -> Result<()> {
        let event = move_head(&mut self.outputs, tape, Direction::Right)?;
        self.record_output(event);
        Ok(())
    }

    // States

    /// Bind a raw action to `state`.
    pub fn add_state<F>(&mut self, state: StateId, action: F)
    where
        F: Fn(&mut Machine<I, O>) -> Result<Transition<I, O>> + 'static,
    {
        self.add_action(state, Action::new(action));
    }

    /// Bind a prebuilt [`Action`] to `state`.
    pub fn add_action(&mut self, state: StateId, action: Action<I, O>) {
        if self.config.verbose {
            debug!(state, "adding state");
        }
        self.states.add(state, action);
        self.counters.states += 1;
    }

    /// The state registry.
    pub fn states(&self) -> &StateRegistry<I, O> {
        &self.states
    }

    /// Id of the state last entered.
    pub fn current_state(&self) -> StateId {
        self.states.current()
    }

    /// Id that [`execute_default`](Self::execute_default) starts from.
    pub fn default_state(&self) -> StateId {
        self.states.default_state()
    }

    fn missing_state(&self, state: StateId) -> MachineError {
        if self.rules.has_state(state) {
            MachineError::UnbuiltState(state)
        } else {
            MachineError::UnknownState(state)
        }
    }

    fn lookup(&self, state: StateId) -> Result<Action<I, O>> {
        self.states
            .get(state)
            .cloned()
            .ok_or_else(|| self.missing_state(state))
    }

    /// Choose the default state. Fails if nothing is bound to `state`.
    pub fn set_default_state(&mut self, state: StateId) -> Result<()> {
        self.lookup(state)?;
        if self.config.verbose {
            debug!(state, "setting default state");
        }
        self.states.set_default(state);
        Ok(())
    }

    /// Drop every state binding and return both pointers to the default id.
    pub fn erase_states(&mut self) {
        if self.config.verbose {
            debug!("erasing states");
        }
        self.states.erase();
    }

    /// Go to `target`, or halt on `None`.
    ///
    /// Re-entering the current state keeps `current` as is. Any other target
    /// must be registered.
    pub fn transition_to(&mut self, target: Option<StateId>) -> Result<Transition<I, O>> {
        let from = self.states.current();
        let transition = match target {
            None => Transition::Halt,
            Some(state) => {
                let action = self.lookup(state)?;
                self.states.set_current(state);
                Transition::Enter(action)
            }
        };
        self.record_transition(from, target);
        Ok(transition)
    }

    /// Re-enter the current state.
    pub fn transition_current(&mut self) -> Result<Transition<I, O>> {
        let current = self.states.current();
        let action = self.lookup(current)?;
        self.record_transition(current, Some(current));
        Ok(Transition::Enter(action))
    }

    /// Switch to the default state.
    pub fn transition_default(&mut self) -> Result<Transition<I, O>> {
        let from = self.states.current();
        let target = self.states.default_state();
        let action = self.lookup(target)?;
        self.states.set_current(target);
        self.record_transition(from, Some(target));
        Ok(Transition::Enter(action))
    }

    /// Halt.
    pub fn transition_stop(&mut self) -> Result<Transition<I, O>> {
        let from = self.states.current();
        self.record_transition(from, None);
        Ok(Transition::Halt)
    }

    // Rules

    /// Declare a rule. Nothing runs it until the state is built.
    pub fn add_rule(&mut self, rule: Rule<I, O>) {
        if self.config.verbose {
            debug!(
                state = rule.state(),
                read = ?rule.read(),
                next = ?rule.next_state(),
                fallback = ?rule.fallback_state(),
                "adding rule"
            );
        }
        self.rules.add(rule);
        self.counters.rules_declared += 1;
    }

    /// Declare a rule from all of its parts.
    #[allow(clippy::too_many_arguments)]
    pub fn add_rule_with(
        &mut self,
        state: StateId,
        read: I,
        write: Option<Op<I, O>>,
        fallback: Option<Op<I, O>>,
        moves: Option<Op<I, O>>,
        next: Option<StateId>,
        fallback_next: Option<StateId>,
    ) {
        self.add_rule(Rule::with_parts(
            state,
            read,
            write,
            fallback,
            moves,
            next,
            fallback_next,
        ));
    }

    /// Rules declared so far.
    pub fn rules(&self) -> &RuleBuilder<I, O> {
        &self.rules
    }

    /// The compiled dispatch table for `state`, if built.
    pub fn compiled(&self, state: StateId) -> Option<&CompiledExpression<I, O>> {
        self.compiled.find(|expression| expression.state() == state)
    }

    /// Compile every declared rule, replacing all previously compiled
    /// tables, and bind one dispatch action per state.
    pub fn build(&mut self) -> Result<()> {
        if self.config.verbose {
            debug!("clearing compiled expressions");
        }
        self.compiled.clear();
        if self.rules.is_empty() {
            return Err(MachineError::EmptyRuleSet);
        }
        for state in self.rules.states() {
            self.install(state)?;
        }
        Ok(())
    }

    /// Compile and bind the rules of a single state.
    pub fn build_state(&mut self, state: StateId) -> Result<()> {
        if self.rules.is_empty() {
            return Err(MachineError::EmptyRuleSet);
        }
        self.install(state)
    }

    fn install(&mut self, state: StateId) -> Result<()> {
        let expression = self
            .rules
            .compile(state)
            .ok_or(MachineError::NoRulesForState(state))?;
        if self.config.verbose {
            debug!(state, rules = expression.len(), "building state");
        }
        if let Some(stale) = self.compiled.position(|e| e.state() == state) {
            self.compiled.remove(stale)?;
        }
        self.counters.rules_built += expression.len() as u64;
        self.compiled.push(expression);
        self.add_action(state, Action::new(Self::dispatch));
        Ok(())
    }

    /// The action every built state runs: read the active input tape and
    /// take the matching branch of the current state's table.
    fn dispatch(&mut self) -> Result<Transition<I, O>> {
        let input = self.read_input()?;
        let state = self.states.current();
        let expression = self
            .compiled(state)
            .ok_or(MachineError::NoCompiledExpression(state))?;
        let action = expression
            .select(&input)
            .cloned()
            .ok_or(MachineError::NoCompiledExpression(state))?;
        action.call(self)
    }

    // Execution

    /// Enter `state` and run until the program halts or fails.
    pub fn execute_state(&mut self, state: StateId) -> Result<()> {
        let action = self.lookup(state)?;
        self.states.set_current(state);
        if self.config.verbose {
            debug!(state, "executing state");
        }
        self.run(action)
    }

    /// Run from the default state.
    pub fn execute_default(&mut self) -> Result<()> {
        self.execute_state(self.states.default_state())
    }

    /// Run from the current state.
    pub fn execute_current(&mut self) -> Result<()> {
        self.execute_state(self.states.current())
    }

    fn run(&mut self, action: Action<I, O>) -> Result<()> {
        match trampoline::<_, _, Result<()>>(Some(action), &mut *self) {
            Outcome::Value(Err(e)) => return Err(e),
            Outcome::Value(Ok(())) | Outcome::Argument(_) => {}
        }
        if self.config.reset_after_execution {
            self.reset();
        }
        Ok(())
    }

    /// Restore every tape from its default snapshot. Rules, compiled tables
    /// and states are left alone.
    pub fn reset(&mut self) {
        if self.config.verbose {
            debug!(
                inputs = self.inputs.len(),
                outputs = self.outputs.len(),
                "resetting tapes"
            );
        }
        self.inputs.reset();
        self.outputs.reset();
    }

    /// Snapshot of every counter.
    pub fn statistics(&self) -> Statistics {
        Statistics {
            states: self.counters.states,
            rules_declared: self.counters.rules_declared,
            rules_built: self.counters.rules_built,
            transitions: self.counters.transitions,
            input_tapes: self.inputs.statistics(),
            output_tapes: self.outputs.statistics(),
        }
    }

    /// Render input tape `index` (or the active one), naming blank cells.
    pub fn render_input(&self, index: Option<usize>) -> Result<String>
    where
        I: Display,
    {
        self.inputs.render(index.unwrap_or(self.inputs.active()))
    }

    /// Render an output tape, `None` meaning the active one.
    pub fn render_output(&self, index: Option<usize>) -> Result<String>
    where
        O: Display,
    {
        self.outputs.render(index.unwrap_or(self.outputs.active()))
    }
}

impl<I: Symbol, O: Symbol> std::fmt::Debug for Machine<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("config", &self.config)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("states", &self.states)
            .field("rules", &self.rules.len())
            .field("compiled", &self.compiled.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ErrorKind;
    use crate::ops;
    use crate::state::DEFAULT_STATE;

    fn machine(cells: &[char]) -> Machine<char, bool> {
        let mut m = Machine::new();
        m.set_blank('_', false);
        m.add_tape();
        m.set_input_tape(None, cells.to_vec(), None).unwrap();
        m.set_output_tape(None, vec![false], None).unwrap();
        m
    }

    fn input(m: &Machine<char, bool>) -> Vec<char> {
        m.input_tape(None).unwrap().storage().to_vec()
    }

    #[test]
    fn write_fires_only_on_change() {
        let mut m = machine(&['a', 'a']);
        m.add_rule(
            Rule::new(0, 'a')
                .write(ops::write_input('a'))
                .move_left()
                .next(1),
        );
        m.add_rule(Rule::new(1, 'a').write(ops::write_input('b')));
        m.build().unwrap();
        m.execute_state(0).unwrap();

        assert_eq!(input(&m), vec!['a', 'b']);
        let stats = m.statistics();
        assert_eq!(stats.input_tapes[0].writes, 1);
        assert_eq!(stats.input_tapes[0].moves_left, 1);
        assert_eq!(stats.input_tapes[0].reads, 2);
        assert_eq!(stats.transitions, 2);
    }

    #[test]
    fn earlier_rule_wins_for_same_symbol() {
        let mut m = machine(&['x']);
        m.add_rule(Rule::new(0, 'x').write_symbol('1'));
        m.add_rule(Rule::new(0, 'x').write_symbol('2'));
        m.build().unwrap();
        m.execute_state(0).unwrap();
        assert_eq!(input(&m), vec!['1']);
    }

    #[test]
    fn miss_uses_first_declared_fallback() {
        let mut m = machine(&['z']);
        m.add_rule(
            Rule::new(0, 'a')
                .otherwise(ops::write_output(true))
                .otherwise_next(5),
        );
        m.add_rule(Rule::new(0, 'b').otherwise_next(6));
        m.add_state(5, |m| {
            m.write_input('5')?;
            m.transition_stop()
        });
        m.add_state(6, |m| {
            m.write_input('6')?;
            m.transition_stop()
        });
        m.build().unwrap();
        m.execute_state(0).unwrap();
        assert_eq!(input(&m), vec!['5']);
        assert_eq!(m.output_tape(None).unwrap().storage().to_vec(), vec![true]);
    }

    #[test]
    fn miss_without_fallback_state_halts() {
        let mut m = machine(&['z']);
        m.add_rule(Rule::new(0, 'a').next(0));
        m.build().unwrap();
        m.execute_state(0).unwrap();
        assert_eq!(m.statistics().transitions, 1);
        assert_eq!(m.current_state(), 0);
    }

    #[test]
    fn unbuilt_state_has_specific_error() {
        let mut m = machine(&['a']);
        m.add_rule(Rule::new(0, 'a').next(1));
        m.build().unwrap();
        m.add_rule(Rule::new(1, 'a'));
        let err = m.execute_state(0).unwrap_err();
        assert_eq!(err, MachineError::UnbuiltState(1));
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let err = m.execute_state(9).unwrap_err();
        assert_eq!(err, MachineError::UnknownState(9));
    }

    #[test]
    fn build_errors() {
        let mut m = machine(&['a']);
        assert_eq!(m.build().unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(m.build_state(0).unwrap_err(), MachineError::EmptyRuleSet);
        m.add_rule(Rule::new(0, 'a'));
        let err = m.build_state(3).unwrap_err();
        assert_eq!(err, MachineError::NoRulesForState(3));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn dispatch_without_compiled_table_is_not_found() {
        let mut m = machine(&['a']);
        m.add_rule(Rule::new(0, 'a'));
        m.build().unwrap();
        m.add_state(4, |m| m.transition_to(Some(0)));
        // Rebuilding an empty set wipes the tables but not the bindings.
        m.rules.clear();
        assert!(m.build().is_err());
        let err = m.execute_state(4).unwrap_err();
        assert_eq!(err, MachineError::NoCompiledExpression(0));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn build_state_replaces_only_its_table() {
        let mut m = machine(&['a']);
        m.add_rule(Rule::new(0, 'a').write_symbol('b'));
        m.add_rule(Rule::new(1, 'a'));
        m.build().unwrap();
        m.add_rule(Rule::new(0, 'a').write_symbol('c'));
        m.build_state(0).unwrap();

        let compiled = m.compiled(0).unwrap();
        assert_eq!(compiled.len(), 2);
        assert!(m.compiled(1).is_some());
        assert_eq!(m.statistics().rules_built, 4);

        m.execute_state(0).unwrap();
        assert_eq!(input(&m), vec!['b']);
    }

    #[test]
    fn missing_blank_surfaces_on_boundary_move() {
        let mut m: Machine<char, bool> = Machine::new();
        m.add_input_tape();
        m.set_input_tape(None, vec!['a'], None).unwrap();
        m.add_rule(Rule::new(0, 'a').move_right());
        m.build().unwrap();
        let err = m.execute_state(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UninitializedValue);
        assert_eq!(input(&m), vec!['a']);
        assert_eq!(
            m.input_blank().unwrap_err(),
            MachineError::UninitializedValue("input blank")
        );
    }

    #[test]
    fn reset_restores_every_tape() {
        let mut m = machine(&['a', 'b']);
        m.set_input_default(None, vec!['d']).unwrap();
        m.set_output_default(None, vec![false, false]).unwrap();
        m.move_input_left().unwrap();
        m.write_input('z').unwrap();
        m.write_output(true).unwrap();
        m.reset();
        assert_eq!(input(&m), vec!['d']);
        assert_eq!(m.input_tape(None).unwrap().head(), 0);
        assert_eq!(m.output_tape(None).unwrap().storage().to_vec(), vec![false, false]);
    }

    #[test]
    fn reset_after_execution_only_on_clean_halt() {
        let config = MachineConfig::default().reset_after_execution(true);
        let mut m: Machine<char, bool> = Machine::with_config(config);
        m.set_blank('_', false);
        m.add_tape();
        m.set_input_tape(None, vec!['a'], None).unwrap();
        m.set_input_default(None, vec!['a']).unwrap();
        m.add_rule(Rule::new(0, 'a').write_symbol('b').next(1));
        m.add_state(1, |m| m.transition_stop());
        m.add_state(2, |m| {
            m.write_input('q')?;
            m.transition_to(Some(99))
        });
        m.build().unwrap();

        m.execute_state(0).unwrap();
        assert_eq!(input(&m), vec!['a']);
        assert_eq!(m.statistics().input_tapes[0].writes, 1);

        assert!(m.execute_state(2).is_err());
        assert_eq!(input(&m), vec!['q']);
    }

    #[test]
    fn default_state_round_trip() {
        let mut m = machine(&['a']);
        assert_eq!(m.default_state(), DEFAULT_STATE);
        m.add_state(DEFAULT_STATE, |m| m.transition_to(Some(3)));
        m.add_state(3, |m| {
            m.write_input('3')?;
            m.transition_stop()
        });
        m.execute_default().unwrap();
        assert_eq!(input(&m), vec!['3']);
        assert_eq!(m.current_state(), 3);

        m.set_default_state(3).unwrap();
        assert_eq!(m.default_state(), 3);
        assert_eq!(m.set_default_state(8).unwrap_err(), MachineError::UnknownState(8));

        m.erase_states();
        assert_eq!(m.current_state(), DEFAULT_STATE);
        assert!(m.execute_current().is_err());
    }

    #[test]
    fn transition_primitives_count() {
        let mut m = machine(&['a']);
        m.add_state(0, |m| m.transition_stop());
        m.add_state(1, |m| m.transition_default());
        m.set_default_state(0).unwrap();
        m.execute_state(1).unwrap();
        assert_eq!(m.current_state(), 0);
        assert_eq!(m.statistics().transitions, 2);
        assert_eq!(m.statistics().states, 2);

        assert!(matches!(m.transition_current(), Ok(Transition::Enter(_))));
        assert_eq!(m.statistics().transitions, 3);
    }

    #[test]
    fn observer_sees_operations_in_order() {
        let mut m = machine(&['a']);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        m.set_observer(move |event| sink.borrow_mut().push(event.clone()));
        m.add_rule(Rule::new(0, 'a').write_symbol('b').move_left());
        m.build().unwrap();
        m.execute_state(0).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4);
        assert!(matches!(&seen[0], Event::Input(e) if e.op == TapeOp::Read && e.after == Some('a')));
        assert!(matches!(&seen[1], Event::Input(e) if e.op == TapeOp::Write && e.before == Some('a')));
        assert!(matches!(
            &seen[2],
            Event::Input(e) if e.op == TapeOp::MoveLeft && e.extended && e.head == 1
        ));
        assert_eq!(seen[3], Event::Transition { from: 0, to: None });
    }

    #[test]
    fn observer_tags_move_direction() {
        let mut m = machine(&['a']);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        m.set_observer(move |event| sink.borrow_mut().push(event.clone()));
        m.move_output_right().unwrap();
        m.move_output_left().unwrap();

        let seen = seen.borrow();
        assert!(matches!(
            &seen[0],
            Event::Output(e) if e.op == TapeOp::MoveRight && e.extended && e.head == 0
        ));
        assert!(matches!(
            &seen[1],
            Event::Output(e) if e.op == TapeOp::MoveLeft && !e.extended && e.head == 1
        ));
    }

    #[test]
    fn render_names_blanks() {
        let mut m = machine(&['a']);
        m.move_input_right().unwrap();
        assert_eq!(m.render_input(None).unwrap(), "[blank], a");
        assert_eq!(m.render_output(None).unwrap(), "[blank]");
    }

    #[test]
    fn input_only_machine_runs() {
        let mut m: InputOnlyMachine<u8> = Machine::new();
        m.set_input_blank(0);
        m.add_input_tape();
        m.set_input_tape(None, vec![1, 1, 1], None).unwrap();
        m.add_rule(Rule::new(0, 1).write_symbol(2).move_left().next(0));
        m.add_rule(Rule::new(0, 0));
        m.build().unwrap();
        m.execute_state(0).unwrap();
        assert_eq!(m.input_tape(None).unwrap().storage().to_vec(), vec![2, 2, 2, 0]);
        assert!(m.output_tapes().is_empty());
    }
}
