//! Copy-on-write containers over a shared, reference-counted buffer core.
//!
//! [`CowVec`] and [`CowStr`] are thin facades over one buffer implementation: a heap
//! block holding a header and an inline payload, shared between handles until one of
//! them mutates.

pub(crate) mod buffer;
pub(crate) mod rep;

mod string;
mod tests;
mod vector;

pub use string::*;
pub use vector::*;
