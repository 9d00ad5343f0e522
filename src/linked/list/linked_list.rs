use std::fmt::{self, Debug, Display, Formatter};
use std::mem;
use std::ops::{Index, IndexMut};

use super::cursor::CursorMut;
use super::iter::{IntoIter, Iter, IterMut};
use super::node::NodeRef;
use super::raw::RawList;
use crate::util::result::ResultExtension;

pub use crate::util::error::RangeError;

/// A doubly-linked list over a circular chain with a sentinel node. See [`CursorMut`]
/// for O(1) editing at an arbitrary position.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the list.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front` / `back` | `O(1)` |
/// | `push_front` / `push_back` | `O(1)` |
/// | `pop_front` / `pop_back` | `O(1)` |
/// | `append` / `prepend` | `O(1)` |
/// | `get` | `O(min(i, n-i))` |
/// | `insert` / `remove` | `O(min(i, n-i))` |
/// | `contains` | `O(n)` |
///
/// Modern computer architecture favours contiguous collections: every `O(i)` operation
/// here is mostly cache misses. Prefer [`CowVec`](crate::cow::CowVec) unless the `O(1)`
/// splicing operations are what the workload needs.
pub struct List<T> {
    pub(crate) raw: RawList<T>,
}

impl<T> List<T> {
    pub fn new() -> List<T> {
        List { raw: RawList::new() }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn front(&self) -> Option<&T> {
        if self.raw.is_empty() {
            return None;
        }
        // SAFETY: Non-empty, so the head is a value node.
        Some(unsafe { self.raw.head().value() })
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.raw.is_empty() {
            return None;
        }
        // SAFETY: Non-empty head node, with exclusive access through &mut self.
        Some(unsafe { self.raw.head().value_mut() })
    }

    pub fn back(&self) -> Option<&T> {
        if self.raw.is_empty() {
            return None;
        }
        // SAFETY: Non-empty, so the tail is a value node.
        Some(unsafe { self.raw.tail().value() })
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.raw.is_empty() {
            return None;
        }
        // SAFETY: Non-empty tail node, with exclusive access through &mut self.
        Some(unsafe { self.raw.tail().value_mut() })
    }

    pub fn push_front(&mut self, value: T) {
        let head = self.raw.head();
        // SAFETY: The head (or the sentinel, when empty) belongs to this chain.
        unsafe {
            self.raw.include_before(head, value);
        }
    }

    pub fn push_back(&mut self, value: T) {
        let end = self.raw.end();
        // SAFETY: The sentinel belongs to this chain; splicing before it appends.
        unsafe {
            self.raw.include_before(end, value);
        }
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.raw.is_empty() {
            return None;
        }
        let head = self.raw.head();
        // SAFETY: Non-empty, so the head is a value node of this chain.
        Some(unsafe { self.raw.exclude(head) })
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.raw.is_empty() {
            return None;
        }
        let tail = self.raw.tail();
        // SAFETY: Non-empty, so the tail is a value node of this chain.
        Some(unsafe { self.raw.exclude(tail) })
    }

    /// Moves all of `other`'s elements to the back of this list, leaving `other` empty.
    /// O(1): the chains are spliced, no element is touched.
    pub fn append(&mut self, other: &mut List<T>) {
        let end = self.raw.end();
        // SAFETY: The sentinel belongs to this chain and other is a distinct list.
        unsafe {
            self.raw.splice_before(end, &mut other.raw);
        }
    }

    /// Moves all of `other`'s elements to the front of this list, leaving `other` empty.
    /// O(1).
    pub fn prepend(&mut self, other: &mut List<T>) {
        let head = self.raw.head();
        // SAFETY: The head (or sentinel) belongs to this chain and other is a distinct
        // list.
        unsafe {
            self.raw.splice_before(head, &mut other.raw);
        }
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents of two lists. O(1), no element is touched.
    pub fn swap(&mut self, other: &mut List<T>) {
        mem::swap(self, other);
    }

    /// Returns a reference to the element at `index`, walking from whichever end is
    /// closer.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds. See [`List::try_get`].
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    pub fn try_get(&self, index: usize) -> Result<&T, RangeError> {
        if index >= self.len() {
            return Err(RangeError { index, len: self.len() });
        }
        // SAFETY: index < len, so the seek lands on a value node.
        Ok(unsafe { self.seek(index).value() })
    }

    /// # Panics
    /// Panics if `index` is out of bounds. See [`List::try_get_mut`].
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, RangeError> {
        if index >= self.len() {
            return Err(RangeError { index, len: self.len() });
        }
        // SAFETY: index < len, with exclusive access through &mut self.
        Ok(unsafe { self.seek(index).value_mut() })
    }

    /// Inserts `value` at `index`, shifting later elements one position back.
    ///
    /// # Panics
    /// Panics if `index > len`. See [`List::try_insert`].
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), RangeError> {
        if index > self.len() {
            return Err(RangeError { index, len: self.len() });
        }
        let anchor = self.seek(index);
        // SAFETY: The seek stays within this chain; index == len lands on the sentinel,
        // which appends.
        unsafe {
            self.raw.include_before(anchor, value);
        }
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds. See [`List::try_remove`].
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    pub fn try_remove(&mut self, index: usize) -> Result<T, RangeError> {
        if index >= self.len() {
            return Err(RangeError { index, len: self.len() });
        }
        let node = self.seek(index);
        // SAFETY: index < len, so the seek lands on a value node of this chain.
        Ok(unsafe { self.raw.exclude(node) })
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    /// A mutable cursor parked on the first element (or on the end position of an empty
    /// list).
    pub fn cursor_front(&mut self) -> CursorMut<'_, T> {
        let head = self.raw.head();
        CursorMut::at(self, head)
    }

    /// A mutable cursor parked on the last element (or on the end position of an empty
    /// list).
    pub fn cursor_back(&mut self) -> CursorMut<'_, T> {
        let tail = self.raw.tail();
        CursorMut::at(self, tail)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }

    /// Walks to the node at `index` from whichever end is closer. `index == len` lands
    /// on the sentinel.
    pub(crate) fn seek(&self, index: usize) -> NodeRef<T> {
        let len = self.len();
        debug_assert!(index <= len);

        if index <= len / 2 {
            let mut curr = self.raw.head();
            for _ in 0..index {
                curr = curr.next();
            }
            curr
        } else {
            let mut curr = self.raw.end();
            for _ in index..len {
                curr = curr.prev();
            }
            curr
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for List<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("contents", &ContentsFmt(self))
            .field("len", &self.len())
            .finish()
    }
}

struct ContentsFmt<'a, T>(&'a List<T>);

impl<T: Debug> Debug for ContentsFmt<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Debug> Display for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})",
            self.iter()
                .map(|i| format!("{i:?}"))
                .collect::<crate::cow::CowVec<String>>()
                .join(") -> (")
        )
    }
}
