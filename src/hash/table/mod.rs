mod hash_table;
mod iter;
mod tests;

pub use hash_table::*;
pub use iter::*;
