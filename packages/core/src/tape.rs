//! Tapes and tape banks.
//!
//! Direction naming is asymmetric on purpose and rule sets depend on it:
//! "right" walks toward the front of the storage, "left" toward the back.

use std::fmt::{self, Display};

use tapeworks_ll_store::{Lifo, Sequence};

use crate::error::{MachineError, Result};
use crate::statistics::TapeStatistics;
use crate::Symbol;

/// What a head move did to the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// The head moved onto an existing cell.
    Stepped,
    /// A blank cell was added at the boundary.
    Extended,
}

/// A linked sequence of symbols with a head cursor.
///
/// The tape also keeps a `default` snapshot; [`Tape::reset`] copies it back
/// into storage and parks the head at 0.
///
/// # Example
///
/// ```rust
/// use tapeworks_core::{Move, Tape};
///
/// let mut tape = Tape::with_storage(vec![1, 2]);
/// // Moving right from the first cell grows the tape at the front.
/// assert_eq!(tape.move_right(Some(&0)).unwrap(), Move::Extended);
/// assert_eq!(tape.storage().to_vec(), vec![0, 1, 2]);
/// assert_eq!(tape.head(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Tape<S> {
    storage: Sequence<S>,
    head: usize,
    default: Sequence<S>,
    statistics: TapeStatistics,
}

impl<S> Default for Tape<S> {
    fn default() -> Self {
        Self {
            storage: Sequence::new(),
            head: 0,
            default: Sequence::new(),
            statistics: TapeStatistics::default(),
        }
    }
}

impl<S: Symbol> Tape<S> {
    /// Create an empty tape with an empty default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tape holding `storage`, head at 0.
    pub fn with_storage(storage: impl Into<Sequence<S>>) -> Self {
        Self {
            storage: storage.into(),
            ..Self::default()
        }
    }

    /// The cells, front to back.
    pub fn storage(&self) -> &Sequence<S> {
        &self.storage
    }

    /// Index of the cell under the head.
    pub fn head(&self) -> usize {
        self.head
    }

    /// The snapshot [`Tape::reset`] restores.
    pub fn default_storage(&self) -> &Sequence<S> {
        &self.default
    }

    /// Counters for this tape.
    pub fn statistics(&self) -> TapeStatistics {
        self.statistics
    }

    /// Replace the storage, optionally repositioning the head.
    pub fn set(&mut self, storage: impl Into<Sequence<S>>, head: Option<usize>) {
        self.storage = storage.into();
        if let Some(head) = head {
            self.head = head;
        }
    }

    /// Move the head without checking it.
    pub fn set_head(&mut self, head: usize) {
        self.head = head;
    }

    /// Snapshot restored by [`reset`](Self::reset).
    pub fn set_default(&mut self, storage: impl Into<Sequence<S>>) {
        self.default = storage.into();
    }

    fn stale(&self) -> MachineError {
        MachineError::StaleHead {
            head: self.head,
            len: self.storage.count(),
        }
    }

    /// A head past the end of a non-empty tape cannot move.
    fn check_head(&self) -> Result<()> {
        if !self.storage.is_empty() && self.head >= self.storage.count() {
            return Err(self.stale());
        }
        Ok(())
    }

    /// The symbol under the head, without counting a read.
    pub fn peek(&self) -> Result<&S> {
        self.storage.node_at(self.head).map_err(|_| self.stale())
    }

    /// The symbol under the head.
    pub fn read(&mut self) -> Result<&S> {
        let Ok(value) = self.storage.node_at(self.head) else {
            return Err(self.stale());
        };
        self.statistics.reads += 1;
        Ok(value)
    }

    /// Write `value` under the head.
    ///
    /// Returns the replaced symbol, or `None` when the cell already held
    /// `value`. Only an actual change counts as a write.
    pub fn write(&mut self, value: S) -> Result<Option<S>> {
        let stale = self.stale();
        let cell = self.storage.node_at_mut(self.head).map_err(|_| stale)?;
        if *cell == value {
            return Ok(None);
        }
        let old = std::mem::replace(cell, value);
        self.statistics.writes += 1;
        Ok(Some(old))
    }

    /// Move toward the front; grows the front with `blank` at the boundary.
    ///
    /// Fails without touching the tape if a blank is needed but `None`.
    pub fn move_right(&mut self, blank: Option<&S>) -> Result<Move> {
        self.check_head()?;
        let moved = if self.storage.is_empty() || self.storage.is_first(self.head) {
            let blank = blank.ok_or(MachineError::UninitializedValue("blank symbol"))?;
            self.storage.append_first(blank.clone());
            self.head = 0;
            Move::Extended
        } else {
            self.head -= 1;
            Move::Stepped
        };
        self.statistics.moves_right += 1;
        Ok(moved)
    }

    /// Move toward the back; grows the back with `blank` at the boundary.
    ///
    /// An empty tape gets a single blank cell under the head.
    pub fn move_left(&mut self, blank: Option<&S>) -> Result<Move> {
        self.check_head()?;
        let moved = if self.storage.is_empty() {
            let blank = blank.ok_or(MachineError::UninitializedValue("blank symbol"))?;
            self.storage.append_last(blank.clone());
            self.head = 0;
            Move::Extended
        } else if self.storage.is_last(self.head) {
            let blank = blank.ok_or(MachineError::UninitializedValue("blank symbol"))?;
            self.storage.append_last(blank.clone());
            self.head += 1;
            Move::Extended
        } else {
            self.head += 1;
            Move::Stepped
        };
        self.statistics.moves_left += 1;
        Ok(moved)
    }

    /// Restore storage from the default snapshot and park the head at 0.
    pub fn reset(&mut self) {
        self.storage = self.default.clone();
        self.head = 0;
    }

    /// Render as `a, [b], c`, bracketing the head cell and naming blanks.
    pub fn render(&self, blank: Option<&S>) -> String
    where
        S: Display,
    {
        let mut out = String::new();
        for (index, value) in self.storage.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let shown = if blank == Some(value) {
                "blank".to_string()
            } else {
                value.to_string()
            };
            if index == self.head {
                out.push('[');
                out.push_str(&shown);
                out.push(']');
            } else {
                out.push_str(&shown);
            }
        }
        out
    }
}

/// A stack of tapes sharing one blank symbol, with one tape marked active.
#[derive(Debug, Clone)]
pub struct TapeBank<S> {
    tapes: Lifo<Tape<S>>,
    active: usize,
    blank: Option<S>,
}

impl<S> Default for TapeBank<S> {
    fn default() -> Self {
        Self {
            tapes: Lifo::new(),
            active: 0,
            blank: None,
        }
    }
}

impl<S: Symbol> TapeBank<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fresh tape and make it active.
    pub fn add(&mut self) -> usize {
        self.active = self.tapes.push(Tape::new());
        self.active
    }

    /// Make tape `index` active.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.tapes.get(index)?;
        self.active = index;
        Ok(())
    }

    /// Index of the tape unindexed operations use.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.tapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tapes.is_empty()
    }

    /// Tape `index`, or `OutOfRange`.
    pub fn tape(&self, index: usize) -> Result<&Tape<S>> {
        Ok(self.tapes.get(index)?)
    }

    /// Mutable tape `index`, or `OutOfRange`.
    pub fn tape_mut(&mut self, index: usize) -> Result<&mut Tape<S>> {
        Ok(self.tapes.get_mut(index)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tape<S>> {
        self.tapes.iter()
    }

    /// The shared blank, if set.
    pub fn blank(&self) -> Option<&S> {
        self.blank.as_ref()
    }

    /// Set the shared blank.
    pub fn set_blank(&mut self, blank: S) {
        self.blank = Some(blank);
    }

    /// Clear the shared blank.
    pub fn unset_blank(&mut self) {
        self.blank = None;
    }

    /// Read tape `index` and return an owned copy.
    pub fn read(&mut self, index: usize) -> Result<S> {
        Ok(self.tapes.get_mut(index)?.read()?.clone())
    }

    /// Write to tape `index`; returns the replaced value if the cell changed.
    pub fn write(&mut self, index: usize, value: S) -> Result<Option<S>> {
        self.tapes.get_mut(index)?.write(value)
    }

    /// Move tape `index` toward its back.
    pub fn move_left(&mut self, index: usize) -> Result<Move> {
        let blank = self.blank.as_ref();
        self.tapes.get_mut(index)?.move_left(blank)
    }

    /// Move tape `index` toward its front.
    pub fn move_right(&mut self, index: usize) -> Result<Move> {
        let blank = self.blank.as_ref();
        self.tapes.get_mut(index)?.move_right(blank)
    }

    /// Reset every tape to its default snapshot.
    pub fn reset(&mut self) {
        for tape in self.tapes.iter_mut() {
            tape.reset();
        }
    }

    /// Counters per tape, in index order.
    pub fn statistics(&self) -> Vec<TapeStatistics> {
        self.tapes.iter().map(Tape::statistics).collect()
    }

    /// Render tape `index` (see [`Tape::render`]).
    pub fn render(&self, index: usize) -> Result<String>
    where
        S: Display,
    {
        Ok(self.tape(index)?.render(self.blank.as_ref()))
    }
}

impl<S: Symbol + Display> Display for Tape<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn tape(values: &[i32], head: usize) -> Tape<i32> {
        let mut tape = Tape::with_storage(values.to_vec());
        tape.set_head(head);
        tape
    }

    #[test]
    fn read_counts_and_returns_cell() {
        let mut t = tape(&[4, 5, 6], 1);
        assert_eq!(t.read().unwrap(), &5);
        assert_eq!(t.statistics().reads, 1);
    }

    #[test]
    fn read_stale_head_fails() {
        let mut t = tape(&[4], 3);
        let err = t.read().unwrap_err();
        assert_eq!(err, MachineError::StaleHead { head: 3, len: 1 });
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(t.statistics().reads, 0);
    }

    #[test]
    fn stale_head_cannot_move() {
        let mut t = tape(&[4, 5], usize::MAX);
        let err = t.move_left(Some(&0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(t.move_right(Some(&0)).is_err());
        assert_eq!(t.storage().to_vec(), vec![4, 5]);
        assert_eq!(t.statistics().moves_left, 0);
        assert_eq!(t.statistics().moves_right, 0);
    }

    #[test]
    fn write_is_idempotent() {
        let mut t = tape(&[1, 2], 0);
        assert_eq!(t.write(1).unwrap(), None);
        assert_eq!(t.statistics().writes, 0);
        assert_eq!(t.write(9).unwrap(), Some(1));
        assert_eq!(t.statistics().writes, 1);
        assert_eq!(t.storage().to_vec(), vec![9, 2]);
    }

    #[test]
    fn move_right_at_front_prepends_one_blank() {
        let mut t = tape(&[1, 2], 0);
        assert_eq!(t.move_right(Some(&0)).unwrap(), Move::Extended);
        assert_eq!(t.storage().to_vec(), vec![0, 1, 2]);
        assert_eq!(t.head(), 0);
        assert_eq!(t.statistics().moves_right, 1);
    }

    #[test]
    fn move_left_at_back_appends_one_blank() {
        let mut t = tape(&[1, 2], 1);
        assert_eq!(t.move_left(Some(&0)).unwrap(), Move::Extended);
        assert_eq!(t.storage().to_vec(), vec![1, 2, 0]);
        assert_eq!(t.head(), 2);
    }

    #[test]
    fn interior_moves_do_not_resize() {
        let mut t = tape(&[1, 2, 3], 1);
        assert_eq!(t.move_left(None).unwrap(), Move::Stepped);
        assert_eq!(t.head(), 2);
        assert_eq!(t.move_right(None).unwrap(), Move::Stepped);
        assert_eq!(t.move_right(None).unwrap(), Move::Stepped);
        assert_eq!(t.head(), 0);
        assert_eq!(t.storage().count(), 3);
    }

    #[test]
    fn boundary_move_without_blank_fails_cleanly() {
        let mut t = tape(&[1], 0);
        let err = t.move_right(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UninitializedValue);
        assert!(t.move_left(None).is_err());
        assert_eq!(t.storage().to_vec(), vec![1]);
        assert_eq!(t.head(), 0);
        assert_eq!(t.statistics().moves_right, 0);
        assert_eq!(t.statistics().moves_left, 0);
    }

    #[test]
    fn empty_tape_moves_materialize_one_cell() {
        let mut t: Tape<i32> = Tape::new();
        assert_eq!(t.move_left(Some(&7)).unwrap(), Move::Extended);
        assert_eq!(t.storage().to_vec(), vec![7]);
        assert_eq!(t.head(), 0);

        let mut t: Tape<i32> = Tape::new();
        assert_eq!(t.move_right(Some(&7)).unwrap(), Move::Extended);
        assert_eq!(t.storage().to_vec(), vec![7]);
        assert_eq!(t.head(), 0);
    }

    #[test]
    fn reset_restores_default() {
        let mut t = tape(&[1, 2], 1);
        t.set_default(vec![5, 6, 7]);
        t.write(8).unwrap();
        t.move_left(Some(&0)).unwrap();
        t.reset();
        assert_eq!(t.storage().to_vec(), vec![5, 6, 7]);
        assert_eq!(t.head(), 0);

        // The default is a snapshot, not an alias.
        t.write(0).unwrap();
        assert_eq!(t.default_storage().to_vec(), vec![5, 6, 7]);
    }

    #[test]
    fn render_brackets_head_and_names_blank() {
        let t = tape(&[-1, 1, 0], 1);
        assert_eq!(t.render(Some(&-1)), "blank, [1], 0");
        assert_eq!(t.to_string(), "-1, [1], 0");
    }

    #[test]
    fn bank_add_selects_new_tape() {
        let mut bank: TapeBank<char> = TapeBank::new();
        assert_eq!(bank.add(), 0);
        assert_eq!(bank.add(), 1);
        assert_eq!(bank.active(), 1);
        bank.select(0).unwrap();
        assert_eq!(bank.active(), 0);
        assert!(matches!(bank.select(2), Err(MachineError::Store(_))));
    }

    #[test]
    fn bank_moves_use_shared_blank() {
        let mut bank: TapeBank<char> = TapeBank::new();
        let index = bank.add();
        bank.tape_mut(index).unwrap().set(vec!['x'], None);
        assert!(bank.move_left(index).is_err());
        bank.set_blank('_');
        assert_eq!(bank.move_left(index).unwrap(), Move::Extended);
        assert_eq!(bank.render(index).unwrap(), "x, [blank]");
        bank.unset_blank();
        assert!(bank.blank().is_none());
    }

    #[test]
    fn bank_missing_tape_is_out_of_range() {
        let mut bank: TapeBank<u8> = TapeBank::new();
        assert_eq!(bank.read(0).unwrap_err().kind(), ErrorKind::OutOfRange);
    }
}
