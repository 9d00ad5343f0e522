//! Hashed containers chained through a doubly-linked entry list.

pub mod set;
pub mod table;

#[doc(inline)]
pub use set::HashSet;
#[doc(inline)]
pub use table::HashTable;
