//! The copy-on-write buffer core shared by the string and vector facades.
//!
//! Every mutating operation follows one pattern: a shared representation is cloned into
//! its final shape before the mutation; an unshared one is mutated in place when the
//! capacity allows, or grown with an in-place `realloc` first. Cloning into final shape
//! means data about to be overwritten is never copied at all.

use std::mem;
use std::ptr;
use std::slice;

use super::rep::{self, Rep};
use crate::util::error::{CollectionError, OverlappingReplace, RangeError};

/// A handle over exactly one [`Rep<T>`]. Never null: the shared empty representation
/// stands in for "no data". Cloning the handle shares the rep; dropping it releases the
/// share.
///
/// Not `Send` or `Sync`: the share count is unsynchronized, so handles over one rep must
/// stay on a single thread. Aliased handles still never observe each other's mutations,
/// by construction.
pub(crate) struct CowBuf<T> {
    rep: Rep<T>,
}

impl<T> CowBuf<T> {
    pub(crate) fn new() -> CowBuf<T> {
        CowBuf { rep: Rep::empty() }
    }

    pub(crate) fn len(&self) -> usize {
        self.rep.len()
    }

    pub(crate) fn cap(&self) -> usize {
        self.rep.cap()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rep.len() == 0
    }

    /// True when another handle shares this buffer's representation.
    pub(crate) fn is_shared(&self) -> bool {
        self.rep.is_shared()
    }

    /// True when both handles point at the same representation block.
    pub(crate) fn shares_block_with(&self, other: &CowBuf<T>) -> bool {
        self.rep.same_block(other.rep)
    }

    /// Const view of the contents. Never clones.
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: The first len slots are always initialized; for the empty rep the
        // pointer is dangling but aligned and the length is 0.
        unsafe { slice::from_raw_parts(self.rep.data(), self.rep.len()) }
    }

    pub(crate) fn try_get(&self, index: usize) -> Result<&T, RangeError> {
        if index < self.len() {
            // SAFETY: index < len, so the slot is initialized.
            Ok(unsafe { &*self.rep.data().add(index) })
        } else {
            Err(RangeError { index, len: self.len() })
        }
    }

    /// Swaps the representations of two buffers. O(1), no element is touched.
    pub(crate) fn swap(&mut self, other: &mut CowBuf<T>) {
        mem::swap(&mut self.rep, &mut other.rep);
    }

    /// Drops this buffer's contents and leaves it empty. Releases the rep outright
    /// rather than shrinking it: an empty buffer goes back to the shared empty rep.
    pub(crate) fn clear(&mut self) {
        self.rep.release();
        self.rep = Rep::empty();
    }

    /// Consumes the handle without releasing its share. Used by the draining iterator,
    /// which takes over ownership of the rep.
    pub(crate) fn take_rep(self) -> Rep<T> {
        let rep = self.rep;
        mem::forget(self);
        rep
    }

    pub(crate) fn from_rep(rep: Rep<T>) -> CowBuf<T> {
        CowBuf { rep }
    }
}

impl<T: Clone> CowBuf<T> {
    /// A buffer of `len` copies of `fill`.
    pub(crate) fn filled(len: usize, fill: &T) -> CowBuf<T> {
        CowBuf {
            rep: Rep::create_filled(len, 0, fill),
        }
    }

    pub(crate) fn from_slice(values: &[T]) -> CowBuf<T> {
        let rep = Rep::create(values.len(), 0);
        // SAFETY: Freshly created with room for values.len() elements, disjoint from
        // any borrowed slice.
        unsafe {
            rep::write_clone_slice(rep.data(), values);
        }
        CowBuf { rep }
    }

    /// Clones the representation if it is shared, so the caller may mutate through raw
    /// access. Every mutator goes through this decision or an equivalent one.
    pub(crate) fn make_unique(&mut self) {
        if self.rep.is_shared() {
            self.rep = self.rep.deep_clone();
        }
    }

    /// Mutable view of the contents. Clones first when shared, because the caller can
    /// write through the result.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        self.make_unique();
        // SAFETY: Uniquely owned after make_unique; the first len slots are initialized.
        unsafe { slice::from_raw_parts_mut(self.rep.data(), self.rep.len()) }
    }

    pub(crate) fn try_get_mut(&mut self, index: usize) -> Result<&mut T, RangeError> {
        if index < self.len() {
            self.make_unique();
            // SAFETY: index < len on a uniquely owned rep.
            Ok(unsafe { &mut *self.rep.data().add(index) })
        } else {
            Err(RangeError { index, len: self.len() })
        }
    }

    /// Mutable access that grows the buffer with default values when indexed past the
    /// end, mirroring the historical convenience of the mutable subscript.
    pub(crate) fn get_mut_or_grow(&mut self, index: usize) -> &mut T
    where
        T: Default,
    {
        if index >= self.len() {
            self.resize(index + 1, &T::default());
        }
        self.make_unique();
        // SAFETY: index < len after the resize, on a uniquely owned rep.
        unsafe { &mut *self.rep.data().add(index) }
    }

    /// Appends clones of `values`; they occupy `[old_len, old_len + values.len())`.
    pub(crate) fn append(&mut self, values: &[T]) {
        if values.is_empty() {
            return;
        }

        let len = self.len();
        let new_len = len + values.len();

        if self.rep.is_shared() {
            self.rep = self.rep.clone_with_tail(values);
            return;
        }
        if new_len > self.cap() {
            self.rep = self.grown(new_len);
        }
        // SAFETY: Unshared with capacity for new_len; the tail slots are uninitialized
        // and disjoint from values (distinct blocks or beyond the borrowed range). The
        // length is only bumped once every slot is written.
        unsafe {
            rep::write_clone_slice(self.rep.data().add(len), values);
        }
        self.rep.set_len(new_len);
    }

    /// Appends another buffer's contents. Sound when `other` shares this buffer's rep:
    /// sharing forces the clone path, which reads the old block while filling the new
    /// one.
    pub(crate) fn append_buf(&mut self, other: &CowBuf<T>) {
        if other.is_empty() {
            return;
        }
        self.append(other.as_slice());
    }

    pub(crate) fn push(&mut self, value: T) {
        let len = self.len();

        if self.rep.is_shared() {
            self.rep = self.rep.clone_grown(len + 1);
        } else {
            if len == self.cap() {
                self.rep = self.grown(len + 1);
            }
            // The slot is claimed up front; the write below cannot panic.
            self.rep.set_len(len + 1);
        }

        // SAFETY: The rep is uniquely owned with room for len + 1 elements and slot len
        // holds no initialized element yet.
        unsafe {
            self.rep.data().add(len).write(value);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let new_len = len - 1;

        if self.rep.is_shared() {
            // The element can't be moved out of a shared block, so it is cloned before
            // the block is replaced by a right-sized copy.
            // SAFETY: new_len < len, so the slot is initialized.
            let value = unsafe { (*self.rep.data().add(new_len)).clone() };
            self.rep = self.rep.clone_truncated(new_len);
            return Some(value);
        }

        // SAFETY: Sole owner: the element is read out bitwise and the length dropped
        // below it before anything else can observe the slot.
        let value = unsafe { self.rep.data().add(new_len).read() };
        self.rep.set_len(new_len);

        if new_len < self.cap() / 2 {
            self.rep = self.rep.clone_truncated(new_len);
        }
        Some(value)
    }

    /// Inserts clones of `values` at `index`, shifting the suffix right.
    pub(crate) fn try_insert(&mut self, index: usize, values: &[T]) -> Result<(), RangeError> {
        if values.is_empty() {
            return Ok(());
        }

        let len = self.len();
        if index > len {
            return Err(RangeError { index, len });
        }
        let n = values.len();
        let new_len = len + n;

        if self.rep.is_shared() {
            self.rep = self.rep.clone_with_gap_filled(index, values);
            return Ok(());
        }
        if new_len > self.cap() {
            self.rep = self.grown(new_len);
        }

        // SAFETY: Unshared with capacity for new_len. The suffix moves right bitwise
        // (copy handles the overlap), then the gap is filled with clones. While the gap
        // is being filled the claimed length is held at index, so an unwinding clone
        // leaks the shifted tail instead of double-dropping it.
        unsafe {
            ptr::copy(
                self.rep.data().add(index),
                self.rep.data().add(index + n),
                len - index,
            );
            self.rep.set_len(index);
            rep::write_clone_slice(self.rep.data().add(index), values);
        }
        self.rep.set_len(new_len);
        Ok(())
    }

    /// Inserts another buffer's contents at `index`. Sharing routes through the clone
    /// path, so aliased handles are safe.
    pub(crate) fn try_insert_buf(
        &mut self,
        index: usize,
        other: &CowBuf<T>,
    ) -> Result<(), RangeError> {
        if other.is_empty() {
            return Ok(());
        }
        self.try_insert(index, other.as_slice())
    }

    /// Inserts a copy of this buffer's entire current content at `index`: the self-
    /// insert. The result is the prefix, the whole old content, then the shifted suffix.
    pub(crate) fn try_insert_self(&mut self, index: usize) -> Result<(), RangeError> {
        let len = self.len();
        if len == 0 {
            return Ok(());
        }
        if index > len {
            return Err(RangeError { index, len });
        }
        let new_len = 2 * len;

        if self.rep.is_shared() {
            // The new block is fresh, so the old payload can be read straight through
            // while it is being assembled. Other handles keep the old block alive for
            // the duration of the call.
            // SAFETY: The slice covers the initialized payload of the (shared, hence
            // not-freed-on-release) source block.
            let values = unsafe { slice::from_raw_parts(self.rep.data(), len) };
            self.rep = self.rep.clone_with_gap_filled(index, values);
            return Ok(());
        }
        if new_len > self.cap() {
            self.rep = self.grown(new_len);
        }

        // All offsets are fixed before anything moves. The suffix [index, len) shifts
        // up to [index + len, 2 * len); the gap is then rebuilt from the prefix (still
        // in place) and the shifted suffix, highest source first never being required
        // because every copy below reads outside its destination.
        // SAFETY: Unshared with capacity for 2 * len elements; the length is pinned at
        // index while the gap holds uninitialized slots.
        unsafe {
            let data = self.rep.data();
            ptr::copy(data.add(index), data.add(index + len), len - index);
            self.rep.set_len(index);
            rep::write_clones(data.add(index), data, index);
            rep::write_clones(data.add(2 * index), data.add(index + len), len - index);
        }
        self.rep.set_len(new_len);
        Ok(())
    }

    /// Overwrites `[index, index + values.len())` with clones of `values`.
    pub(crate) fn try_replace(&mut self, index: usize, values: &[T]) -> Result<(), RangeError> {
        if values.is_empty() {
            return Ok(());
        }

        let len = self.len();
        let n = values.len();
        if index.checked_add(n).is_none_or(|end| end > len) {
            return Err(RangeError { index: index.saturating_add(n), len });
        }

        if self.rep.is_shared() {
            self.rep = self.rep.clone_with_window(index, values);
        } else {
            // SAFETY: Unshared, and the window is inside the initialized range.
            let window = unsafe { slice::from_raw_parts_mut(self.rep.data().add(index), n) };
            window.clone_from_slice(values);
        }
        Ok(())
    }

    /// Overwrites part of this buffer with another buffer's contents. Replacing a
    /// buffer with itself at offset 0 is a no-op; any other offset is rejected, since an
    /// overlapping write could consume its own source.
    pub(crate) fn try_replace_buf(
        &mut self,
        index: usize,
        other: &CowBuf<T>,
    ) -> Result<(), CollectionError> {
        if self.rep.same_block(other.rep) {
            if index != 0 {
                return Err(OverlappingReplace { offset: index }.into());
            }
            return Ok(());
        }
        self.try_replace(index, other.as_slice())?;
        Ok(())
    }

    /// Overwrites `[index, index + n)` with copies of one value.
    pub(crate) fn try_assign(&mut self, index: usize, n: usize, fill: &T) -> Result<(), RangeError> {
        let len = self.len();
        if index.checked_add(n).is_none_or(|end| end > len) {
            return Err(RangeError { index: index.saturating_add(n), len });
        }
        if n == 0 {
            return Ok(());
        }

        if self.rep.is_shared() {
            self.rep = self.rep.clone_with_fill_window(index, n, fill);
        } else {
            // SAFETY: Unshared, window inside the initialized range.
            let window = unsafe { slice::from_raw_parts_mut(self.rep.data().add(index), n) };
            for slot in window {
                slot.clone_from(fill);
            }
        }
        Ok(())
    }

    /// Removes `[index, index + n)`, shifting the tail left.
    ///
    /// Hysteresis: a shared rep, or one whose new length falls below half the capacity,
    /// is cloned into a right-sized block to reclaim memory; otherwise the tail shifts
    /// in place and the capacity is retained.
    pub(crate) fn try_erase(&mut self, index: usize, n: usize) -> Result<(), RangeError> {
        if n == 0 {
            return Ok(());
        }

        let len = self.len();
        if index.checked_add(n).is_none_or(|end| end > len) {
            return Err(RangeError { index: index.saturating_add(n), len });
        }
        let new_len = len - n;

        if self.rep.is_shared() || new_len < self.cap() / 2 {
            self.rep = self.rep.clone_without(index, n);
            return Ok(());
        }

        // SAFETY: Unshared. The length is pinned at index first, so an unwinding drop
        // leaks the tail instead of double-dropping; the survivors then move down
        // bitwise.
        unsafe {
            let data = self.rep.data();
            self.rep.set_len(index);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(data.add(index), n));
            ptr::copy(data.add(index + n), data.add(index), len - index - n);
        }
        self.rep.set_len(new_len);
        Ok(())
    }

    /// Grows or shrinks to `new_len`, filling new slots with clones of `fill`. Shrinking
    /// follows the same hysteresis as erase.
    pub(crate) fn resize(&mut self, new_len: usize, fill: &T) {
        let len = self.len();
        if new_len == len {
            return;
        }

        if self.rep.is_shared() || new_len < self.cap() / 2 {
            self.rep = self.rep.clone_resized(new_len, fill);
            return;
        }
        if new_len > self.cap() {
            self.rep = self.grown(new_len);
        }

        if new_len > len {
            // SAFETY: Unshared with capacity for new_len; slots [len, new_len) are
            // uninitialized and claimed only once every fill is written.
            unsafe {
                rep::fill_clones(self.rep.data().add(len), new_len - len, fill);
            }
            self.rep.set_len(new_len);
        } else {
            self.rep.set_len(new_len);
            // SAFETY: Slots [new_len, len) were initialized and are no longer claimed.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.rep.data().add(new_len),
                    len - new_len,
                ));
            }
        }
    }

    /// Releases the current rep and shares `other`'s instead. No element is copied.
    pub(crate) fn assign_from(&mut self, other: &CowBuf<T>) {
        if self.rep.same_block(other.rep) {
            return;
        }
        self.rep.release();
        self.rep = other.rep.acquire();
    }

    /// Capacity growth for the unshared path: a fresh block when still on the empty
    /// rep, an in-place `realloc` otherwise.
    fn grown(&mut self, new_len: usize) -> Rep<T> {
        if self.rep.is_empty_rep() {
            let rep = Rep::create(new_len, 0);
            rep.set_len(0);
            rep
        } else {
            self.rep.reallocate(new_len)
        }
    }
}

impl<T> Clone for CowBuf<T> {
    /// Shares the representation: a share-count bump, no payload copy.
    fn clone(&self) -> Self {
        CowBuf {
            rep: self.rep.acquire(),
        }
    }
}

impl<T> Drop for CowBuf<T> {
    fn drop(&mut self) {
        self.rep.release();
    }
}

impl<T> Default for CowBuf<T> {
    fn default() -> Self {
        CowBuf::new()
    }
}
