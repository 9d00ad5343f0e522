mod iter;
mod vector;

pub use iter::*;
pub use vector::*;
