//! Tapeworks LL: Low-Level Storage
//!
//! This is the bottom layer of the tapeworks stack. Everything at this level is
//! plain storage - no blanks, no heads, no machine semantics.
//!
//! Two containers live here:
//! - `Sequence`: a doubly-linked, index-addressable list that can grow at
//!   either end. Tapes are built on top of it.
//! - `Lifo`: an indexable stack. Machines keep their tapes and their compiled
//!   dispatch tables in one.
//!
//! # Example
//!
//! ```rust
//! use tapeworks_ll_store::{Lifo, Sequence};
//!
//! let mut cells: Sequence<char> = "bc".chars().collect();
//! cells.append_first('a');
//! cells.append_last('d');
//! assert_eq!(cells.node_at(0).unwrap(), &'a');
//! assert!(cells.is_last(3));
//!
//! let mut stack = Lifo::new();
//! let index = stack.push(cells);
//! assert_eq!(stack.get(index).unwrap().count(), 4);
//! ```

mod error;
mod lifo;
mod sequence;

pub use error::{Result, StoreError};
pub use lifo::Lifo;
pub use sequence::{Iter, Sequence};
