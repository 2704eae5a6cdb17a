//! A doubly-linked sequence addressable by index.
//!
//! Nodes live in an arena owned by the sequence and point at each other by
//! slot number. Logical position is defined by the links, never by the
//! arena order, so prepending is as cheap as appending.

use std::fmt;

use crate::{Result, StoreError};

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// An ordered list of owned nodes with prev/next links.
///
/// Index lookup is a linear traversal from the first node. This container is
/// built for correctness and indexability, not random access: tapes explore it
/// one head move at a time.
///
/// # Example
///
/// ```rust
/// use tapeworks_ll_store::Sequence;
///
/// let mut seq = Sequence::new();
/// seq.append_last(2);
/// seq.append_first(1);
/// seq.append_last(3);
///
/// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
/// assert!(seq.is_first(0));
/// assert!(seq.node_at(3).is_err());
/// ```
#[derive(Clone)]
pub struct Sequence<T> {
    nodes: Vec<Node<T>>,
    first: Option<usize>,
    last: Option<usize>,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            first: None,
            last: None,
        }
    }
}

impl<T> Sequence<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` in front of the current first node.
    pub fn append_first(&mut self, value: T) {
        let slot = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: None,
            next: self.first,
        });
        match self.first {
            Some(old) => self.nodes[old].prev = Some(slot),
            None => self.last = Some(slot),
        }
        self.first = Some(slot);
    }

    /// Insert `value` after the current last node.
    pub fn append_last(&mut self, value: T) {
        let slot = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: self.last,
            next: None,
        });
        match self.last {
            Some(old) => self.nodes[old].next = Some(slot),
            None => self.first = Some(slot),
        }
        self.last = Some(slot);
    }

    /// Walk the links to the arena slot holding logical position `index`.
    fn slot(&self, index: usize) -> Result<usize> {
        let len = self.count();
        if index >= len {
            return Err(StoreError::OutOfRange { index, len });
        }
        let mut current = self.first;
        for _ in 0..index {
            current = current.and_then(|slot| self.nodes[slot].next);
        }
        current.ok_or(StoreError::OutOfRange { index, len })
    }

    /// Get the value at logical position `index`.
    ///
    /// Fails with `OutOfRange` if traversal cannot reach `index`.
    pub fn node_at(&self, index: usize) -> Result<&T> {
        let slot = self.slot(index)?;
        Ok(&self.nodes[slot].value)
    }

    /// Get a mutable reference to the value at logical position `index`.
    pub fn node_at_mut(&mut self, index: usize) -> Result<&mut T> {
        let slot = self.slot(index)?;
        Ok(&mut self.nodes[slot].value)
    }

    /// Replace the value at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let cell = self.node_at_mut(index)?;
        Ok(std::mem::replace(cell, value))
    }

    /// Whether `index` addresses the first node.
    ///
    /// Always false for an empty sequence.
    pub fn is_first(&self, index: usize) -> bool {
        !self.is_empty() && index == 0
    }

    /// Whether `index` addresses the last node.
    ///
    /// Always false for an empty sequence.
    pub fn is_last(&self, index: usize) -> bool {
        self.count().checked_sub(1) == Some(index)
    }

    /// The first value, if any.
    pub fn first(&self) -> Option<&T> {
        self.first.map(|slot| &self.nodes[slot].value)
    }

    /// The last value, if any.
    pub fn last(&self) -> Option<&T> {
        self.last.map(|slot| &self.nodes[slot].value)
    }

    /// Number of nodes in the sequence.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the sequence has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.first = None;
        self.last = None;
    }

    /// Iterate values from first to last, following the links.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            sequence: self,
            cursor: self.first,
        }
    }

    /// Copy the values out in logical order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// Iterator over a [`Sequence`] in logical order.
pub struct Iter<'a, T> {
    sequence: &'a Sequence<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let sequence = self.sequence;
        let node = &sequence.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append_last(value);
        }
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

// Equality is positional; two sequences built in different orders compare
// equal when their links spell the same values.
impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
