//! Declarative rules and their compiled dispatch tables.

use crate::ops::{self, Op};
use crate::state::{Action, StateId};
use crate::Symbol;

/// One transition case: what to do in `state` when the input reads `read`.
///
/// If no rule of a state matches, the machine runs the *first declared*
/// rule's fallback for that state, whichever symbol was read.
///
/// ```rust
/// use tapeworks_core::{ops, Rule};
///
/// let rule: Rule<i32, ()> = Rule::new(0, -1)
///     .write_symbol(1)
///     .moves(ops::move_input_left())
///     .next(1);
/// assert_eq!(rule.next_state(), Some(1));
/// assert!(rule.has_write());
/// ```
#[derive(Debug, Clone)]
pub struct Rule<I, O> {
    state: StateId,
    read: I,
    write: Option<Op<I, O>>,
    fallback: Option<Op<I, O>>,
    moves: Option<Op<I, O>>,
    next: Option<StateId>,
    fallback_next: Option<StateId>,
}

impl<I: Symbol, O: Symbol> Rule<I, O> {
    /// A rule that matches `read` in `state`, does nothing and halts.
    pub fn new(state: StateId, read: I) -> Self {
        Self {
            state,
            read,
            write: None,
            fallback: None,
            moves: None,
            next: None,
            fallback_next: None,
        }
    }

    /// The full positional form.
    #[allow(clippy::too_many_arguments)]
    pub fn with_parts(
        state: StateId,
        read: I,
        write: Option<Op<I, O>>,
        fallback: Option<Op<I, O>>,
        moves: Option<Op<I, O>>,
        next: Option<StateId>,
        fallback_next: Option<StateId>,
    ) -> Self {
        Self {
            state,
            read,
            write,
            fallback,
            moves,
            next,
            fallback_next,
        }
    }

    pub fn write(mut self, op: Op<I, O>) -> Self {
        self.write = Some(op);
        self
    }

    /// Write `value` to the active input tape, unless it is the symbol this
    /// rule reads, in which case no write op is kept at all.
    pub fn write_symbol(mut self, value: I) -> Self {
        self.write = if value == self.read {
            None
        } else {
            Some(ops::write_input(value))
        };
        self
    }

    pub fn moves(mut self, op: Op<I, O>) -> Self {
        self.moves = Some(op);
        self
    }

    pub fn move_left(self) -> Self {
        self.moves(ops::move_input_left())
    }

    pub fn move_right(self) -> Self {
        self.moves(ops::move_input_right())
    }

    pub fn next(mut self, state: StateId) -> Self {
        self.next = Some(state);
        self
    }

    /// Op to run when nothing in this state matched.
    pub fn otherwise(mut self, op: Op<I, O>) -> Self {
        self.fallback = Some(op);
        self
    }

    /// State to enter when nothing in this state matched.
    pub fn otherwise_next(mut self, state: StateId) -> Self {
        self.fallback_next = Some(state);
        self
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn read(&self) -> &I {
        &self.read
    }

    pub fn next_state(&self) -> Option<StateId> {
        self.next
    }

    pub fn fallback_state(&self) -> Option<StateId> {
        self.fallback_next
    }

    pub fn has_write(&self) -> bool {
        self.write.is_some()
    }

    pub fn has_move(&self) -> bool {
        self.moves.is_some()
    }

    /// Write, then move, then go to the declared next state.
    fn on_match(&self) -> Action<I, O> {
        let write = self.write.clone();
        let moves = self.moves.clone();
        let next = self.next;
        Action::new(move |m| {
            if let Some(op) = &write {
                op.apply(m)?;
            }
            if let Some(op) = &moves {
                op.apply(m)?;
            }
            m.transition_to(next)
        })
    }

    /// Run the fallback op, then go to the fallback state or halt.
    fn on_miss(&self) -> Action<I, O> {
        let fallback = self.fallback.clone();
        let next = self.fallback_next;
        Action::new(move |m| {
            if let Some(op) = &fallback {
                op.apply(m)?;
            }
            match next {
                Some(state) => m.transition_to(Some(state)),
                None => m.transition_stop(),
            }
        })
    }
}

/// One compiled case of a [`CompiledExpression`].
#[derive(Debug, Clone)]
struct Entry<I, O> {
    condition: I,
    on_match: Action<I, O>,
    on_miss: Action<I, O>,
}

/// The dispatch table for one state.
#[derive(Debug, Clone)]
pub struct CompiledExpression<I, O> {
    state: StateId,
    entries: Vec<Entry<I, O>>,
}

impl<I: Symbol, O: Symbol> CompiledExpression<I, O> {
    /// Compile `rules`, all of which must belong to `state`. Returns `None`
    /// for an empty group.
    fn compile<'a>(state: StateId, rules: impl IntoIterator<Item = &'a Rule<I, O>>) -> Option<Self> {
        let entries: Vec<_> = rules
            .into_iter()
            .map(|rule| Entry {
                condition: rule.read.clone(),
                on_match: rule.on_match(),
                on_miss: rule.on_miss(),
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(Self { state, entries })
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn conditions(&self) -> impl Iterator<Item = &I> {
        self.entries.iter().map(|entry| &entry.condition)
    }

    /// The first entry matching `input`, else the first entry's miss action.
    pub fn select(&self, input: &I) -> Option<&Action<I, O>> {
        self.entries
            .iter()
            .find(|entry| entry.condition == *input)
            .map(|entry| &entry.on_match)
            .or_else(|| self.entries.first().map(|entry| &entry.on_miss))
    }
}

/// Ordered list of declared rules.
#[derive(Debug, Clone)]
pub struct RuleBuilder<I, O> {
    rules: Vec<Rule<I, O>>,
}

impl<I, O> Default for RuleBuilder<I, O> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<I: Symbol, O: Symbol> RuleBuilder<I, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: Rule<I, O>) {
        self.rules.push(rule);
    }

    pub fn has_state(&self, state: StateId) -> bool {
        self.rules.iter().any(|rule| rule.state == state)
    }

    /// Rules declared for `state`, in declaration order.
    pub fn rules_for(&self, state: StateId) -> impl Iterator<Item = &Rule<I, O>> {
        self.rules.iter().filter(move |rule| rule.state == state)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<I, O>> {
        self.rules.iter()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// Distinct declared states, lowest first.
    pub fn states(&self) -> Vec<StateId> {
        let mut states: Vec<_> = self.rules.iter().map(|rule| rule.state).collect();
        states.sort_unstable();
        states.dedup();
        states
    }

    /// Compile every rule declared for `state`.
    pub fn compile(&self, state: StateId) -> Option<CompiledExpression<I, O>> {
        CompiledExpression::compile(state, self.rules_for(state))
    }
}
