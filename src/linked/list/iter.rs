use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use super::linked_list::List;
use super::node::NodeRef;

/// Borrowing iterator over a [`List`]. The remaining count bounds both ends, so the two
/// directions never walk past each other.
pub struct Iter<'a, T> {
    front: NodeRef<T>,
    /// One past the last remaining element, walking backwards.
    back: NodeRef<T>,
    remaining: usize,
    _phantom: PhantomData<&'a T>,
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            front: self.raw.head(),
            back: self.raw.end(),
            remaining: self.len(),
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: remaining > 0 guarantees front is a value node; the list is borrowed
        // for 'a.
        let value = unsafe { self.front.value() };
        self.front = self.front.next();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.back = self.back.prev();
        // SAFETY: remaining bounded the walk, so back is now a value node.
        Some(unsafe { self.back.value() })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Mutably borrowing iterator over a [`List`].
pub struct IterMut<'a, T> {
    front: NodeRef<T>,
    back: NodeRef<T>,
    remaining: usize,
    _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            front: self.raw.head(),
            back: self.raw.end(),
            remaining: self.len(),
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: remaining > 0 guarantees front is a value node; each node is yielded
        // once, so the &mut references never alias.
        let value = unsafe { self.front.value_mut() };
        self.front = self.front.next();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.back = self.back.prev();
        // SAFETY: As for next, from the other end.
        Some(unsafe { self.back.value_mut() })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator over a [`List`]: pops elements off either end.
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(list: List<T>) -> IntoIter<T> {
        IntoIter { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.list.len())
            .finish()
    }
}
