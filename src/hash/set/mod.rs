//! A module containing [`HashSet`] and its iterators.
//!
//! There is no mutable iterator over a set's items: mutating an item in place would
//! change its hash without moving it to the right bucket.

mod hash_set;
mod iter;
mod tests;

pub use hash_set::*;
pub use iter::*;
