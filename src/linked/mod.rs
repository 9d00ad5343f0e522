//! Linked containers over a circular, sentinel-terminated chain.

pub(crate) mod list;

pub use list::{CursorMut, EraseEnd, IntoIter, Iter, IterMut, List, RangeError};
