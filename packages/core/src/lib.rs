//! Tapeworks Core: the interpreter engine
//!
//! This layer turns the plain containers of `tapeworks-ll-store` into a
//! multi-tape abstract machine:
//! - `Tape`: a linked sequence with a head cursor and a reset snapshot
//! - `StateRegistry`: state id to action bindings plus current/default pointers
//! - `RuleBuilder`: declarative per-(state, symbol) rules compiled into
//!   dispatch tables
//! - `trampoline`: the loop that follows continuations without growing the
//!   call stack
//! - `Statistics`: read/write/move/transition counters
//!
//! `Machine` ties them together and is the only owner of all of it.
//!
//! # Example
//!
//! ```rust
//! use tapeworks_core::{ops, Machine, Rule};
//!
//! let mut machine: Machine<char, bool> = Machine::new();
//! machine.set_input_blank(' ');
//! machine.add_input_tape();
//! machine.set_input_tape(None, vec!['1', '1'], None).unwrap();
//!
//! // Flip every '1' to '0', walking towards the back of the tape.
//! machine.add_rule(Rule::new(0, '1').write_symbol('0').moves(ops::move_input_left()).next(0));
//! machine.add_rule(Rule::new(0, ' '));
//! machine.build().unwrap();
//! machine.execute_state(0).unwrap();
//!
//! let tape = machine.input_tape(None).unwrap();
//! assert_eq!(tape.storage().to_vec(), vec!['0', '0', ' ']);
//! assert_eq!(machine.statistics().transitions, 3);
//! ```

use std::fmt;

mod config;
mod error;
mod machine;
mod observer;
pub mod ops;
mod rule;
mod state;
mod statistics;
mod tape;
pub mod trampoline;

pub use config::MachineConfig;
pub use error::{ErrorKind, MachineError, Result};
pub use machine::{InputOnlyMachine, Machine, OutputOnlyMachine};
pub use observer::{Event, Observer, TapeEvent, TapeOp};
pub use ops::Op;
pub use rule::{CompiledExpression, Rule, RuleBuilder};
pub use state::{Action, StateId, StateRegistry, Transition, DEFAULT_STATE};
pub use statistics::{Statistics, TapeStatistics};
pub use tape::{Move, Tape, TapeBank};
pub use trampoline::{trampoline, Bounce, Invoke, Outcome, Thunk};

// Re-export LL types for convenience
pub use tapeworks_ll_store::{Lifo, Sequence, StoreError};

/// The element type a machine reads and writes.
///
/// Anything comparable, clonable and printable for traces qualifies.
pub trait Symbol: PartialEq + Clone + fmt::Debug + 'static {}

impl<T: PartialEq + Clone + fmt::Debug + 'static> Symbol for T {}
