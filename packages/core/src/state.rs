//! State bindings and the actions they run.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::machine::Machine;
use crate::trampoline::{Bounce, Invoke};
use crate::Symbol;

/// Integer state identifier. Halting is `None`, never a reserved id.
pub type StateId = i64;

/// The id both pointers start at in a fresh registry.
pub const DEFAULT_STATE: StateId = -1;

/// Where an action wants the machine to go next.
pub enum Transition<I, O> {
    /// Run this action next.
    Enter(Action<I, O>),
    /// Stop.
    Halt,
}

impl<I, O> fmt::Debug for Transition<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Enter(_) => f.write_str("Enter(..)"),
            Transition::Halt => f.write_str("Halt"),
        }
    }
}

/// The body of a state.
///
/// Actions receive the machine that owns them and return the next
/// [`Transition`]. They are reference-counted so the executor can take one
/// out of the registry before handing the machine to it.
pub struct Action<I, O>(Rc<dyn Fn(&mut Machine<I, O>) -> Result<Transition<I, O>>>);

impl<I, O> Action<I, O> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Machine<I, O>) -> Result<Transition<I, O>> + 'static,
    {
        Action(Rc::new(f))
    }

    pub fn call(&self, machine: &mut Machine<I, O>) -> Result<Transition<I, O>> {
        (self.0)(machine)
    }
}

impl<I, O> Clone for Action<I, O> {
    fn clone(&self) -> Self {
        Action(Rc::clone(&self.0))
    }
}

impl<I, O> fmt::Debug for Action<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

// The machine itself is the trampoline argument. A halt ends the run on the
// argument; an error ends it on a value.
impl<'m, I: Symbol, O: Symbol> Invoke<&'m mut Machine<I, O>, Result<()>> for Action<I, O> {
    fn invoke(self, machine: &'m mut Machine<I, O>) -> Bounce<Self, &'m mut Machine<I, O>, Result<()>> {
        match self.call(machine) {
            Ok(Transition::Enter(next)) => Bounce::Continue(Some(next), machine),
            Ok(Transition::Halt) => Bounce::Continue(None, machine),
            Err(e) => Bounce::Done(Err(e)),
        }
    }
}

/// Ordered state bindings with current and default pointers.
///
/// Duplicate ids are allowed. Lookups search from the most recent binding
/// backwards, so re-registering a state shadows the older action.
pub struct StateRegistry<I, O> {
    bindings: Vec<(StateId, Action<I, O>)>,
    current: StateId,
    default: StateId,
}

impl<I, O> Default for StateRegistry<I, O> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
            current: DEFAULT_STATE,
            default: DEFAULT_STATE,
        }
    }
}

impl<I, O> StateRegistry<I, O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, state: StateId, action: Action<I, O>) {
        self.bindings.push((state, action));
    }

    /// The most recently registered action for `state`.
    pub fn get(&self, state: StateId) -> Option<&Action<I, O>> {
        self.bindings
            .iter()
            .rev()
            .find(|(id, _)| *id == state)
            .map(|(_, action)| action)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.get(state).is_some()
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn default_state(&self) -> StateId {
        self.default
    }

    pub(crate) fn set_current(&mut self, state: StateId) {
        self.current = state;
    }

    pub(crate) fn set_default(&mut self, state: StateId) {
        self.default = state;
    }

    /// Drop every binding and return both pointers to [`DEFAULT_STATE`].
    pub fn erase(&mut self) {
        self.bindings.clear();
        self.current = DEFAULT_STATE;
        self.default = DEFAULT_STATE;
    }

    /// Number of bindings, duplicates included.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Registered ids in registration order, duplicates included.
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bindings.iter().map(|(id, _)| *id)
    }
}

impl<I, O> fmt::Debug for StateRegistry<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRegistry")
            .field("states", &self.ids().collect::<Vec<_>>())
            .field("current", &self.current)
            .field("default", &self.default)
            .finish()
    }
}
