use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Deref};
use std::str;

use crate::cow::buffer::CowBuf;
use crate::util::result::ResultExtension;

pub use crate::util::error::{CollectionError, RangeError};

/// A copy-on-write byte string.
///
/// Contents are bytes, not guaranteed UTF-8: the mutating operations address byte
/// offsets and never inspect encoding, which keeps them exact mirrors of the vector
/// core. [`CowStr::as_str`] validates on the way out instead, and [`Display`] renders
/// lossily.
///
/// Cloning is O(1) and shares the representation; the first mutation through either
/// handle clones it. Not [`Send`] or [`Sync`].
///
/// # Examples
/// ```
/// # use cow_collections::cow::CowStr;
/// let mut s = CowStr::from("hello");
/// let snapshot = s.clone();
/// s.push_str(" world");
/// assert_eq!(s, "hello world");
/// assert_eq!(snapshot, "hello");
/// ```
pub struct CowStr {
    buf: CowBuf<u8>,
}

impl CowStr {
    /// Creates an empty string on the shared empty representation.
    pub fn new() -> CowStr {
        CowStr { buf: CowBuf::new() }
    }

    /// Creates a string by copying a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> CowStr {
        CowStr {
            buf: CowBuf::from_slice(bytes),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Byte slots in the representation block.
    pub fn cap(&self) -> usize {
        self.buf.cap()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns true while another handle shares this string's representation.
    pub fn is_shared(&self) -> bool {
        self.buf.is_shared()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// The contents as `&str`, or None if they are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(self.as_bytes()).ok()
    }

    /// Returns the byte at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`. See [`CowStr::try_get`].
    pub fn get(&self, index: usize) -> u8 {
        self.try_get(index).throw()
    }

    pub fn try_get(&self, index: usize) -> Result<u8, RangeError> {
        self.buf.try_get(index).copied()
    }

    /// Appends the bytes of `s`.
    pub fn push_str(&mut self, s: &str) {
        self.buf.append(s.as_bytes());
    }

    /// Appends one character, UTF-8 encoded.
    pub fn push(&mut self, c: char) {
        let mut encoded = [0_u8; 4];
        self.buf.append(c.encode_utf8(&mut encoded).as_bytes());
    }

    /// Appends one raw byte.
    pub fn push_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Appends another string. `other` may share this string's representation.
    pub fn append(&mut self, other: &CowStr) {
        self.buf.append_buf(&other.buf);
    }

    /// Inserts the bytes of `s` at byte offset `index`.
    ///
    /// # Panics
    /// Panics if `index > len`. See [`CowStr::try_insert_str`].
    pub fn insert_str(&mut self, index: usize, s: &str) {
        self.try_insert_str(index, s).throw()
    }

    pub fn try_insert_str(&mut self, index: usize, s: &str) -> Result<(), RangeError> {
        self.buf.try_insert(index, s.as_bytes())
    }

    /// Overwrites `[index, index + s.len())` with the bytes of `s`.
    ///
    /// # Panics
    /// Panics if the window runs past the end. See [`CowStr::try_replace_str`].
    pub fn replace_str(&mut self, index: usize, s: &str) {
        self.try_replace_str(index, s).throw()
    }

    pub fn try_replace_str(&mut self, index: usize, s: &str) -> Result<(), RangeError> {
        self.buf.try_replace(index, s.as_bytes())
    }

    /// Overwrites part of this string with another string's contents. Replacing a
    /// string with itself at offset 0 is a no-op; a nonzero offset is rejected with
    /// [`OverlappingReplace`](crate::cow::OverlappingReplace).
    pub fn try_replace_with(&mut self, index: usize, other: &CowStr) -> Result<(), CollectionError> {
        self.buf.try_replace_buf(index, &other.buf)
    }

    /// Removes the bytes `[index, index + n)`.
    ///
    /// # Panics
    /// Panics if `index + n > len`. See [`CowStr::try_erase`].
    pub fn erase(&mut self, index: usize, n: usize) {
        self.try_erase(index, n).throw()
    }

    pub fn try_erase(&mut self, index: usize, n: usize) -> Result<(), RangeError> {
        self.buf.try_erase(index, n)
    }

    /// Grows or shrinks to `new_len` bytes, filling new slots with `fill`.
    pub fn resize(&mut self, new_len: usize, fill: u8) {
        self.buf.resize(new_len, &fill);
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Copies the byte window `[index, index + n)` out into a fresh string.
    pub fn substr(&self, index: usize, n: usize) -> Result<CowStr, RangeError> {
        if index.checked_add(n).is_none_or(|end| end > self.len()) {
            return Err(RangeError { index: index.saturating_add(n), len: self.len() });
        }
        Ok(CowStr::from_bytes(&self.as_bytes()[index..index + n]))
    }

    /// Byte offset of the first occurrence of `byte`.
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        self.as_bytes().iter().position(|b| *b == byte)
    }

    /// Byte offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return Some(0);
        }
        if needle.len() > self.len() {
            return None;
        }
        self.as_bytes()
            .windows(needle.len())
            .position(|window| window == needle)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_bytes().starts_with(prefix.as_bytes())
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.as_bytes().ends_with(suffix.as_bytes())
    }

    /// Swaps the contents of two strings in O(1).
    pub fn swap(&mut self, other: &mut CowStr) {
        self.buf.swap(&mut other.buf);
    }

    /// Makes this string share `other`'s representation. No byte is copied.
    pub fn assign_from(&mut self, other: &CowStr) {
        self.buf.assign_from(&other.buf);
    }
}

impl Clone for CowStr {
    /// O(1): shares the representation instead of copying bytes.
    fn clone(&self) -> Self {
        CowStr {
            buf: self.buf.clone(),
        }
    }
}

impl Default for CowStr {
    fn default() -> Self {
        CowStr::new()
    }
}

impl From<&str> for CowStr {
    fn from(s: &str) -> Self {
        CowStr::from_bytes(s.as_bytes())
    }
}

impl From<&String> for CowStr {
    fn from(s: &String) -> Self {
        CowStr::from_bytes(s.as_bytes())
    }
}

impl Deref for CowStr {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for CowStr {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Borrow<[u8]> for CowStr {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for CowStr {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CowStr {}

impl PartialEq<str> for CowStr {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for CowStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialOrd for CowStr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CowStr {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for CowStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl AddAssign<&str> for CowStr {
    fn add_assign(&mut self, s: &str) {
        self.push_str(s);
    }
}

impl Add<&str> for CowStr {
    type Output = CowStr;

    fn add(mut self, s: &str) -> CowStr {
        self.push_str(s);
        self
    }
}

impl Add<&CowStr> for CowStr {
    type Output = CowStr;

    fn add(mut self, other: &CowStr) -> CowStr {
        self.append(other);
        self
    }
}

impl Display for CowStr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl Debug for CowStr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CowStr")
            .field("contents", &String::from_utf8_lossy(self.as_bytes()))
            .field("len", &self.len())
            .field("cap", &self.cap())
            .field("shared", &self.is_shared())
            .finish()
    }
}
