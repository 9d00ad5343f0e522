//! Probe types for tests: a zero-sized element and a drop counter.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

/// A zero-sized element type, for checking that buffers never touch payload memory when
/// `size_of::<T>() == 0`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSized;

/// Counts how many times its clones have been dropped, shared through an [`Rc`].
#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }

    /// Reads the count and resets it to zero.
    pub fn take(&self) -> usize {
        self.0.replace(0)
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}
