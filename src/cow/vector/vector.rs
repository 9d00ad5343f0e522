use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::SliceIndex;

use super::IntoIter;
use crate::cow::buffer::CowBuf;
use crate::util::result::ResultExtension;

pub use crate::util::error::{CollectionError, OverlappingReplace, RangeError};

/// A copy-on-write vector.
///
/// Cloning a CowVec is O(1): both handles share one representation block and only a
/// share count changes. The first mutation through either handle clones the block, so
/// aliased handles never observe each other's mutations. Every mutating method makes
/// that decision before touching an element; none of them require the caller to care.
///
/// Not [`Send`] or [`Sync`]: the share count is unsynchronized.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being added or removed.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `clone` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `pop` | `O(1)`*, `O(n)` |
/// | `append` | `O(m)`*, `O(n+m)` |
/// | `insert` | `O(n-i+m)` |
/// | `replace` | `O(m)`*, `O(n)` |
/// | `erase` | `O(n-i)`*, `O(n)` |
/// | `get` | `O(1)` |
///
/// \* When the representation is shared, any mutation first clones it in `O(n)`.
///
/// # Examples
/// ```
/// # use cow_collections::cow::CowVec;
/// let mut a = CowVec::from_slice(&[1, 2, 3]);
/// let b = a.clone();
/// a.push(4);
/// assert_eq!(&*a, &[1, 2, 3, 4]);
/// assert_eq!(&*b, &[1, 2, 3]);
/// ```
pub struct CowVec<T> {
    pub(crate) buf: CowBuf<T>,
}

impl<T> CowVec<T> {
    /// Creates an empty vector. No memory is allocated: all empty vectors share one
    /// static empty representation.
    pub fn new() -> CowVec<T> {
        CowVec { buf: CowBuf::new() }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of element slots in the representation block. Grows in
    /// page-sized strides, so it is usually larger than what was asked for.
    pub fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns true if the vector contains no elements.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns true while another handle shares this vector's representation.
    pub fn is_shared(&self) -> bool {
        self.buf.is_shared()
    }

    /// Const view of the contents. Never clones the representation.
    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds. See [`CowVec::try_get`].
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    pub fn try_get(&self, index: usize) -> Result<&T, RangeError> {
        self.buf.try_get(index)
    }

    /// Returns an iterator over references to the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Swaps the contents of two vectors in O(1).
    pub fn swap(&mut self, other: &mut CowVec<T>) {
        self.buf.swap(&mut other.buf);
    }

    /// Drops all elements, leaving the vector on the shared empty representation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl<T: Clone> CowVec<T> {
    /// Creates a vector holding `len` clones of `value`.
    pub fn filled(len: usize, value: &T) -> CowVec<T> {
        CowVec {
            buf: CowBuf::filled(len, value),
        }
    }

    /// Creates a vector by cloning a slice.
    pub fn from_slice(values: &[T]) -> CowVec<T> {
        CowVec {
            buf: CowBuf::from_slice(values),
        }
    }

    /// Mutable view of the contents, cloning the representation first if it is shared.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.buf.as_mut_slice()
    }

    /// Returns a mutable reference to the element at `index`, cloning a shared
    /// representation first.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds. See [`CowVec::try_get_mut`], or the
    /// `IndexMut` impl for the growing variant.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, RangeError> {
        self.buf.try_get_mut(index)
    }

    /// Appends `value` at the end.
    ///
    /// # Examples
    /// ```
    /// # use cow_collections::cow::CowVec;
    /// let mut vec = CowVec::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) {
        self.buf.push(value);
    }

    /// Removes and returns the last element, or None if the vector is empty. A shared
    /// representation forces the element to be cloned out rather than moved.
    pub fn pop(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Appends clones of `values` at the end; they occupy `[old_len, old_len + m)`.
    pub fn append(&mut self, values: &[T]) {
        self.buf.append(values);
    }

    /// Appends the contents of another vector. `other` may share this vector's
    /// representation.
    pub fn append_vec(&mut self, other: &CowVec<T>) {
        self.buf.append_buf(&other.buf);
    }

    /// Inserts clones of `values` at `index`, shifting the suffix right.
    ///
    /// # Panics
    /// Panics if `index > len`. See [`CowVec::try_insert`].
    ///
    /// # Examples
    /// ```
    /// # use cow_collections::cow::CowVec;
    /// let mut vec = CowVec::from_slice(&[0, 1, 2]);
    /// vec.insert(1, &[100, 200]);
    /// assert_eq!(&*vec, &[0, 100, 200, 1, 2]);
    /// ```
    pub fn insert(&mut self, index: usize, values: &[T]) {
        self.try_insert(index, values).throw()
    }

    pub fn try_insert(&mut self, index: usize, values: &[T]) -> Result<(), RangeError> {
        self.buf.try_insert(index, values)
    }

    /// Inserts the contents of another vector at `index`. `other` may share this
    /// vector's representation; sharing routes the operation through the clone path, so
    /// the source is read from the old block while the new one is assembled.
    pub fn insert_vec(&mut self, index: usize, other: &CowVec<T>) {
        self.try_insert_vec(index, other).throw()
    }

    pub fn try_insert_vec(&mut self, index: usize, other: &CowVec<T>) -> Result<(), RangeError> {
        self.buf.try_insert_buf(index, &other.buf)
    }

    /// Inserts a copy of the vector's entire current content into itself at `index`:
    /// the result is `prefix + whole old content + suffix`.
    ///
    /// # Examples
    /// ```
    /// # use cow_collections::cow::CowVec;
    /// let mut vec = CowVec::from_slice(&[1, 2, 3]);
    /// vec.insert_self(1);
    /// assert_eq!(&*vec, &[1, 1, 2, 3, 2, 3]);
    /// ```
    pub fn insert_self(&mut self, index: usize) {
        self.try_insert_self(index).throw()
    }

    pub fn try_insert_self(&mut self, index: usize) -> Result<(), RangeError> {
        self.buf.try_insert_self(index)
    }

    /// Overwrites `[index, index + m)` with clones of `values`.
    ///
    /// # Panics
    /// Panics if `index + values.len() > len`. See [`CowVec::try_replace`].
    pub fn replace(&mut self, index: usize, values: &[T]) {
        self.try_replace(index, values).throw()
    }

    pub fn try_replace(&mut self, index: usize, values: &[T]) -> Result<(), RangeError> {
        self.buf.try_replace(index, values)
    }

    /// Overwrites part of this vector with another vector's contents. Replacing a
    /// vector with itself at offset 0 is a no-op; doing so at a nonzero offset is
    /// rejected with [`OverlappingReplace`],
    /// since the write could consume its own source.
    pub fn try_replace_vec(&mut self, index: usize, other: &CowVec<T>) -> Result<(), CollectionError> {
        self.buf.try_replace_buf(index, &other.buf)
    }

    /// Overwrites `[index, index + n)` with clones of one value.
    pub fn try_fill_range(&mut self, index: usize, n: usize, value: &T) -> Result<(), RangeError> {
        self.buf.try_assign(index, n, value)
    }

    /// Removes `[index, index + n)`, shifting the tail left. Shrinking below half the
    /// capacity reclaims memory by moving to a right-sized block.
    ///
    /// # Panics
    /// Panics if `index + n > len`. See [`CowVec::try_erase`].
    pub fn erase(&mut self, index: usize, n: usize) {
        self.try_erase(index, n).throw()
    }

    pub fn try_erase(&mut self, index: usize, n: usize) -> Result<(), RangeError> {
        self.buf.try_erase(index, n)
    }

    /// Grows or shrinks the vector to `new_len`, cloning `value` into any new slots.
    pub fn resize(&mut self, new_len: usize, value: &T) {
        self.buf.resize(new_len, value);
    }

    /// Makes this vector share `other`'s representation, releasing its own contents.
    /// No element is copied.
    pub fn assign_from(&mut self, other: &CowVec<T>) {
        self.buf.assign_from(&other.buf);
    }

    /// Returns an iterator over mutable references, cloning a shared representation
    /// first.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Clone for CowVec<T> {
    /// O(1): shares the representation instead of copying elements.
    fn clone(&self) -> Self {
        CowVec {
            buf: self.buf.clone(),
        }
    }
}

impl<T> Default for CowVec<T> {
    fn default() -> Self {
        CowVec::new()
    }
}

impl<T: Clone> From<&[T]> for CowVec<T> {
    fn from(values: &[T]) -> Self {
        CowVec::from_slice(values)
    }
}

impl<T: Clone, const N: usize> From<[T; N]> for CowVec<T> {
    fn from(values: [T; N]) -> Self {
        let mut vec = CowVec::new();
        for value in values {
            vec.push(value);
        }
        vec
    }
}

impl<T: Clone> FromIterator<T> for CowVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = CowVec::new();
        for value in iter {
            vec.push(value);
        }
        vec
    }
}

impl<T: Clone> Extend<T> for CowVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> Deref for CowVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.buf.as_slice()
    }
}

impl<T: Clone> DerefMut for CowVec<T> {
    /// Clone-on-write: a shared representation is cloned before mutable access is
    /// handed out.
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.buf.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for CowVec<T> {
    fn as_ref(&self) -> &[T] {
        self.buf.as_slice()
    }
}

impl<T> Borrow<[T]> for CowVec<T> {
    fn borrow(&self) -> &[T] {
        self.buf.as_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for CowVec<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

/// Mutable indexing auto-resizes: indexing one past the end grows the vector with
/// default values instead of failing, mirroring the const/mutable asymmetry of the
/// historical subscript operator. Const indexing past the end still panics.
impl<T: Clone + Default> IndexMut<usize> for CowVec<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.buf.get_mut_or_grow(index)
    }
}

impl<'a, T> IntoIterator for &'a CowVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a mut CowVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Clone> IntoIterator for CowVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T: PartialEq> PartialEq for CowVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for CowVec<T> {}

impl<T: PartialEq> PartialEq<&[T]> for CowVec<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for CowVec<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Debug> Debug for CowVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowVec")
            .field("contents", &self.as_slice())
            .field("len", &self.len())
            .field("cap", &self.cap())
            .field("shared", &self.is_shared())
            .finish()
    }
}

impl<T: Debug> Display for CowVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
