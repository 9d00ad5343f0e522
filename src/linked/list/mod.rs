mod cursor;
mod iter;
mod linked_list;
pub(crate) mod node;
pub(crate) mod raw;
mod tests;

pub use cursor::*;
pub use iter::*;
pub use linked_list::*;
