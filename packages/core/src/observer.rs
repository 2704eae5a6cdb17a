//! Structured execution events.
//!
//! A machine with an observer installed reports every tape operation and
//! state transition as it happens. Events carry owned symbols, so the hook
//! may keep them.

use crate::state::StateId;

/// The kind of tape operation an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapeOp {
    Read,
    Write,
    MoveLeft,
    MoveRight,
}

/// One operation on one tape.
///
/// `before` and `after` are the symbols under the head before and after the
/// operation. A read has only `after`; a write that changed nothing is not
/// reported.
#[derive(Debug, Clone, PartialEq)]
pub struct TapeEvent<S> {
    pub op: TapeOp,
    pub tape: usize,
    pub head: usize,
    pub before: Option<S>,
    pub after: Option<S>,
    /// The operation grew the tape with a blank cell.
    pub extended: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event<I, O> {
    Input(TapeEvent<I>),
    Output(TapeEvent<O>),
    /// `to` is `None` for a halt.
    Transition { from: StateId, to: Option<StateId> },
}

/// Hook receiving every [`Event`] a machine emits.
pub type Observer<I, O> = Box<dyn FnMut(&Event<I, O>)>;
