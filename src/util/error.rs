use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index or range end that falls outside the valid bounds of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub index: usize,
    pub len: usize,
}

impl Display for RangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of range for buffer with {} elements!", self.index, self.len)
    }
}

impl Error for RangeError {}

/// A replace operation whose source is the destination buffer itself at a nonzero offset.
///
/// An overlapping replace could read from elements it has already overwritten, so it is
/// rejected outright instead of being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlappingReplace {
    pub offset: usize,
}

impl Display for OverlappingReplace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Can't replace a buffer with itself at nonzero offset {}!", self.offset)
    }
}

impl Error for OverlappingReplace {}

/// An attempt to erase the end (sentinel) position of a list-based container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EraseEnd;

impl Display for EraseEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Can't erase the end element!")
    }
}

impl Error for EraseEnd {}

#[derive(Debug, Display, Error, From, TryInto, IsVariant)]
pub enum CollectionError {
    Range(RangeError),
    OverlappingReplace(OverlappingReplace),
    EraseEnd(EraseEnd),
}
