//! An indexable last-in first-out store.

use crate::{Result, StoreError};

/// A stack whose entries can also be read by index.
///
/// Index 0 is the bottom (oldest) entry. `push` returns the index the new
/// entry landed at, which callers keep as a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifo<T> {
    items: Vec<T>,
}

impl<T> Default for Lifo<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Lifo<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry and return its index.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Remove and return the top entry.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// The top entry, if any.
    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    /// Read the entry at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(StoreError::OutOfRange { index, len })
    }

    /// Mutably borrow the entry at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(StoreError::OutOfRange { index, len })
    }

    /// Linear search from the bottom; the first match wins.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    /// Index of the first entry matching `predicate`, searching from the bottom.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }

    /// Remove the entry at `index`, shifting everything above it down.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.items.len();
        if index >= len {
            return Err(StoreError::OutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Whether `index` addresses an entry.
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.items.len()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate from bottom to top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutably iterate from bottom to top.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T> FromIterator<T> for Lifo<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Lifo<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
