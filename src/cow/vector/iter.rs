use std::fmt::{self, Debug, Formatter};
use std::ptr;

use super::CowVec;
use crate::cow::rep::Rep;

/// A draining by-value iterator over a [`CowVec`].
///
/// Taking ownership of a shared representation is impossible, so construction makes the
/// rep unique first (cloning it if needed); elements are then moved out bitwise.
pub struct IntoIter<T> {
    rep: Rep<T>,
    front: usize,
    /// One past the last remaining element.
    back: usize,
}

impl<T: Clone> IntoIter<T> {
    pub(crate) fn new(mut vec: CowVec<T>) -> IntoIter<T> {
        vec.buf.make_unique();
        let rep = vec.buf.take_rep();
        IntoIter {
            front: 0,
            back: rep.len(),
            rep,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back <= len, the slot is initialized, and advancing front
        // marks it as moved out.
        let value = unsafe { self.rep.data().add(self.front).read() };
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: front <= back < original len; the slot is initialized and now marked
        // as moved out.
        Some(unsafe { self.rep.data().add(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: Only [front, back) still holds live elements; everything else was
        // moved out. The rep is uniquely owned, so claiming length 0 and releasing
        // frees the block without touching elements again.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.rep.data().add(self.front),
                self.back - self.front,
            ));
        }
        if !self.rep.is_empty_rep() {
            self.rep.set_len(0);
        }
        self.rep.release();
    }
}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &(self.back - self.front))
            .finish()
    }
}
