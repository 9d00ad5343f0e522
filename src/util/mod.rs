#![warn(missing_docs)]

pub mod error;
pub mod hash;
pub mod panic;
pub mod probe;
pub mod result;
