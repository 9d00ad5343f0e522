//! The shared representation block behind every copy-on-write buffer.
//!
//! A [`Rep<T>`] is a thin handle over one heap block laid out as a [`Header`] followed by
//! an aligned inline `[T; cap]` payload. The header tracks the element count, the slot
//! capacity and how many *additional* buffer handles share the block: `shares == 0` means
//! "exactly one owner", not "no owners". A single static empty header stands in for every
//! default-constructed buffer, so handles never need a null check.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::sync::OnceLock;

/// Bookkeeping the allocator keeps in front of every block. Allocating a page-sized block
/// would silently spill onto a second page without accounting for it.
const ALLOC_OVERHEAD: usize = 4 * size_of::<usize>();

const FALLBACK_PAGE_SIZE: usize = 4096;

/// The page granularity used when rounding allocations, queried once from the OS.
pub(crate) fn page_size() -> usize {
    static PAGE: OnceLock<usize> = OnceLock::new();
    *PAGE.get_or_init(|| {
        // SAFETY: sysconf is a pure query with no memory-safety preconditions.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 { size as usize } else { FALLBACK_PAGE_SIZE }
    })
}

#[repr(C)]
pub(crate) struct Header {
    len: usize,
    cap: usize,
    /// Handles sharing the block *beyond* the first. 0 == uniquely owned.
    shares: usize,
}

/// The process-wide empty representation. Never freed, never written to; acquire and
/// release treat it as a no-op so default-constructed buffers cost nothing.
static EMPTY: Header = Header {
    len: 0,
    cap: 0,
    shares: 0,
};

/// Byte offset of the payload within a block: the header size rounded up to `T`'s
/// alignment.
const fn payload_offset<T>() -> usize {
    let align = align_of::<T>();
    (size_of::<Header>() + align - 1) & !(align - 1)
}

/// Layout of a whole block holding `cap` slots of `T`.
///
/// # Panics
/// Panics if the block size would overflow [`isize::MAX`].
fn block_layout<T>(cap: usize) -> Layout {
    let payload = cap
        .checked_mul(size_of::<T>())
        .and_then(|bytes| bytes.checked_add(payload_offset::<T>()))
        .expect("Capacity overflow!");
    let align = if align_of::<T>() > align_of::<Header>() {
        align_of::<T>()
    } else {
        align_of::<Header>()
    };

    Layout::from_size_align(payload, align).expect("Capacity overflow!")
}

/// Handle to one representation block. Plain-old-pointer semantics: copying the handle
/// does not touch the share count, that is [`Rep::acquire`]'s job.
pub(crate) struct Rep<T> {
    ptr: NonNull<Header>,
    _phantom: PhantomData<T>,
}

impl<T> Clone for Rep<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Rep<T> {}

impl<T> Rep<T> {
    /// The shared empty representation.
    pub(crate) fn empty() -> Rep<T> {
        Rep {
            // SAFETY: A reference is always non-null. The pointer is only ever written
            // through after an is_empty_rep check excludes the static.
            ptr: unsafe { NonNull::new_unchecked(&raw const EMPTY as *mut Header) },
            _phantom: PhantomData,
        }
    }

    /// Allocates a block for `len` elements, applying the growth policy against
    /// `old_cap`: amortized doubling for incremental growth, then rounding the whole
    /// allocation up to a page boundary and folding the slack back into usable capacity.
    /// Wasted slack inside a page beats another reallocation later.
    ///
    /// The produced header claims `len` elements; the caller is responsible for
    /// initializing that many slots before the block can be released or read.
    pub(crate) fn create(len: usize, old_cap: usize) -> Rep<T> {
        if len == 0 {
            return Rep::empty();
        }

        let mut cap = len;
        if let Some(doubled) = old_cap.checked_mul(2)
            && cap > old_cap
            && cap < doubled
        {
            cap = doubled;
        }

        if size_of::<T>() > 0 {
            let alloc_size = payload_offset::<T>() + cap * size_of::<T>();
            let adjusted = alloc_size + ALLOC_OVERHEAD;
            let page = page_size();
            if adjusted > page {
                let extra = page - adjusted % page;
                cap += extra / size_of::<T>();
            }
        }

        Rep::allocate(len, cap)
    }

    /// Allocates a block with exactly `cap` slots, no growth policy applied.
    pub(crate) fn allocate(len: usize, cap: usize) -> Rep<T> {
        debug_assert!(len <= cap || size_of::<T>() == 0);

        let layout = block_layout::<T>(cap);
        // SAFETY: The layout covers at least the header, so its size is never zero.
        let raw = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<Header>()) else {
            alloc::handle_alloc_error(layout)
        };

        // SAFETY: Freshly allocated for at least size_of::<Header>() bytes.
        unsafe {
            ptr.as_ptr().write(Header {
                len,
                cap,
                shares: 0,
            });
        }

        Rep {
            ptr,
            _phantom: PhantomData,
        }
    }

    pub(crate) fn len(self) -> usize {
        // SAFETY: The handle always points at a live header (the static one at worst).
        unsafe { (*self.ptr.as_ptr()).len }
    }

    pub(crate) fn cap(self) -> usize {
        // SAFETY: As for len.
        unsafe { (*self.ptr.as_ptr()).cap }
    }

    /// True when at least one other handle shares this block, meaning any mutation must
    /// clone first. The empty rep always reports unshared; it is immutable anyway and
    /// every mutation path either grows (leaving it behind) or is a no-op at length 0.
    pub(crate) fn is_shared(self) -> bool {
        // SAFETY: As for len.
        unsafe { (*self.ptr.as_ptr()).shares > 0 }
    }

    pub(crate) fn is_empty_rep(self) -> bool {
        ptr::eq(self.ptr.as_ptr(), &raw const EMPTY)
    }

    pub(crate) fn same_block(self, other: Rep<T>) -> bool {
        ptr::eq(self.ptr.as_ptr(), other.ptr.as_ptr())
    }

    /// Sets the claimed element count. The caller guarantees slots `[0, len)` are
    /// initialized and that this is not the empty rep.
    pub(crate) fn set_len(self, len: usize) {
        debug_assert!(!self.is_empty_rep());
        debug_assert!(len <= self.cap() || size_of::<T>() == 0);
        // SAFETY: Not the static header, so the block is writable.
        unsafe {
            (*self.ptr.as_ptr()).len = len;
        }
    }

    /// Pointer to the first payload slot. Dangling (but well-aligned) for the empty rep
    /// and for zero-sized element types, where no payload bytes exist to address.
    pub(crate) fn data(self) -> *mut T {
        if size_of::<T>() == 0 || self.cap() == 0 {
            NonNull::dangling().as_ptr()
        } else {
            // SAFETY: Non-empty blocks are allocated with cap slots starting at this
            // offset.
            unsafe { self.ptr.as_ptr().cast::<u8>().add(payload_offset::<T>()).cast::<T>() }
        }
    }

    /// Registers another handle sharing this block. No-op on the empty rep.
    pub(crate) fn acquire(self) -> Rep<T> {
        if !self.is_empty_rep() {
            // SAFETY: Not the static header; the buffer core is not Sync, so there is no
            // concurrent access to the count.
            unsafe {
                (*self.ptr.as_ptr()).shares += 1;
            }
        }
        self
    }

    /// Drops one handle's claim on the block. The sole owner's release drops the live
    /// elements and frees the block. No-op on the empty rep.
    pub(crate) fn release(self) {
        if self.is_empty_rep() {
            return;
        }

        // SAFETY: Not the static header.
        let header = unsafe { &mut *self.ptr.as_ptr() };
        if header.shares > 0 {
            header.shares -= 1;
        } else {
            let len = header.len;
            let cap = header.cap;
            // SAFETY: The first len slots are initialized and no other handle references
            // the block, so the elements can be dropped and the block freed with the
            // layout it was allocated with.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.data(), len));
                alloc::dealloc(self.ptr.as_ptr().cast(), block_layout::<T>(cap));
            }
        }
    }

    /// Grows an unshared, non-empty block in place via `realloc`, applying the same
    /// doubling and page-rounding policy as [`Rep::create`]. Elements move bitwise.
    pub(crate) fn reallocate(self, new_cap: usize) -> Rep<T> {
        debug_assert!(!self.is_shared());
        debug_assert!(!self.is_empty_rep());

        let old_cap = self.cap();
        let mut cap = new_cap;
        if let Some(doubled) = old_cap.checked_mul(2)
            && cap > old_cap
            && cap < doubled
        {
            cap = doubled;
        }

        if size_of::<T>() > 0 {
            let alloc_size = payload_offset::<T>() + cap * size_of::<T>();
            let adjusted = alloc_size + ALLOC_OVERHEAD;
            let page = page_size();
            if adjusted > page {
                let extra = page - adjusted % page;
                cap += extra / size_of::<T>();
            }
        }

        if cap <= old_cap {
            return self;
        }

        let old_layout = block_layout::<T>(old_cap);
        let new_layout = block_layout::<T>(cap);
        // SAFETY: The block was allocated with old_layout and the new size is nonzero.
        let raw = unsafe {
            alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size())
        };
        let Some(ptr) = NonNull::new(raw.cast::<Header>()) else {
            alloc::handle_alloc_error(new_layout)
        };

        // SAFETY: realloc preserved the header contents; only the capacity changes.
        unsafe {
            (*ptr.as_ptr()).cap = cap;
        }

        Rep {
            ptr,
            _phantom: PhantomData,
        }
    }
}

impl<T: Clone> Rep<T> {
    /// Allocates a block of `len` copies of `fill`.
    pub(crate) fn create_filled(len: usize, old_cap: usize, fill: &T) -> Rep<T> {
        let rep = Rep::create(len, old_cap);
        // SAFETY: Freshly created with room for len elements; fill_clones initializes
        // exactly that many.
        unsafe {
            fill_clones(rep.data(), len, fill);
        }
        rep
    }

    /// Bit-for-bit header copy plus an element-wise payload clone at the same capacity.
    /// Releases this handle's share of the source.
    pub(crate) fn deep_clone(self) -> Rep<T> {
        if self.is_empty_rep() {
            return self;
        }

        let rep = Rep::allocate(self.len(), self.cap());
        // SAFETY: The new block has room for len elements; the source slots [0, len) are
        // initialized.
        unsafe {
            write_clones(rep.data(), self.data(), self.len());
        }
        self.release();
        rep
    }

    /// Clone grown to `new_len` claimed elements with only the old payload copied. The
    /// tail slots `[len, new_len)` are left uninitialized: the caller must write them
    /// immediately, with no fallible call in between.
    pub(crate) fn clone_grown(self, new_len: usize) -> Rep<T> {
        let len = self.len();
        debug_assert!(new_len >= len);

        let rep = Rep::create(new_len, self.cap());
        // SAFETY: Room for new_len >= len elements; the source slots [0, len) are
        // initialized and the destination block is fresh.
        unsafe {
            write_clones(rep.data(), self.data(), len);
        }
        self.release();
        rep
    }

    /// Right-sized clone of the first `new_len` elements.
    pub(crate) fn clone_truncated(self, new_len: usize) -> Rep<T> {
        debug_assert!(new_len <= self.len());

        let rep = Rep::create(new_len, self.cap());
        // SAFETY: new_len <= len source slots are initialized; the fresh block holds
        // new_len slots.
        unsafe {
            write_clones(rep.data(), self.data(), new_len);
        }
        self.release();
        rep
    }

    /// Clone sized for an append: old payload followed by `values`. The old bytes about
    /// to be overwritten are never copied twice — only the live payload plus the new
    /// tail.
    pub(crate) fn clone_with_tail(self, values: &[T]) -> Rep<T> {
        let len = self.len();
        let rep = Rep::create(len + values.len(), self.cap());
        // SAFETY: Room for len + values.len() elements; source ranges are initialized
        // and the destination block is fresh (no overlap).
        unsafe {
            write_clones(rep.data(), self.data(), len);
            write_clone_slice(rep.data().add(len), values);
        }
        self.release();
        rep
    }

    /// Clone shaped for an insert at `index`: prefix, `values`, then the old suffix
    /// shifted right. `index <= len` is the caller's range check.
    pub(crate) fn clone_with_gap_filled(self, index: usize, values: &[T]) -> Rep<T> {
        let len = self.len();
        let n = values.len();
        let rep = Rep::create(len + n, self.cap());
        // SAFETY: Room for len + n elements; [0, index) and [index, len) of the source
        // are initialized; destination ranges are disjoint slots of a fresh block.
        unsafe {
            write_clones(rep.data(), self.data(), index);
            write_clone_slice(rep.data().add(index), values);
            write_clones(rep.data().add(index + n), self.data().add(index), len - index);
        }
        self.release();
        rep
    }

    /// Clone shaped for a replace of `[index, index + values.len())`: both flanks are
    /// copied, the window comes from `values`. `index + values.len() <= len` is the
    /// caller's range check.
    pub(crate) fn clone_with_window(self, index: usize, values: &[T]) -> Rep<T> {
        let len = self.len();
        let n = values.len();
        let rep = Rep::create(len, self.cap());
        // SAFETY: As for clone_with_gap_filled, with the window bounded by len.
        unsafe {
            write_clones(rep.data(), self.data(), index);
            write_clone_slice(rep.data().add(index), values);
            write_clones(
                rep.data().add(index + n),
                self.data().add(index + n),
                len - index - n,
            );
        }
        self.release();
        rep
    }

    /// Like [`Rep::clone_with_window`], filling the window with copies of one value.
    pub(crate) fn clone_with_fill_window(self, index: usize, n: usize, fill: &T) -> Rep<T> {
        let len = self.len();
        let rep = Rep::create(len, self.cap());
        // SAFETY: As for clone_with_window.
        unsafe {
            write_clones(rep.data(), self.data(), index);
            fill_clones(rep.data().add(index), n, fill);
            write_clones(
                rep.data().add(index + n),
                self.data().add(index + n),
                len - index - n,
            );
        }
        self.release();
        rep
    }

    /// Clone with `[index, index + n)` dropped on the floor: right-sized for an erase
    /// that wants its memory back. `index + n <= len` is the caller's range check.
    pub(crate) fn clone_without(self, index: usize, n: usize) -> Rep<T> {
        let len = self.len();
        let rep = Rep::create(len - n, self.cap());
        // SAFETY: Both source ranges are initialized; destinations are disjoint slots of
        // a fresh block sized for len - n elements.
        unsafe {
            write_clones(rep.data(), self.data(), index);
            write_clones(
                rep.data().add(index),
                self.data().add(index + n),
                len - index - n,
            );
        }
        self.release();
        rep
    }

    /// Clone at `new_len` elements: a truncating or fill-extending resize.
    pub(crate) fn clone_resized(self, new_len: usize, fill: &T) -> Rep<T> {
        let len = self.len();
        let rep = Rep::create(new_len, self.cap());
        let kept = if new_len < len { new_len } else { len };
        // SAFETY: kept <= len source slots are initialized; the fresh block holds
        // new_len slots.
        unsafe {
            write_clones(rep.data(), self.data(), kept);
            if new_len > len {
                fill_clones(rep.data().add(len), new_len - len, fill);
            }
        }
        self.release();
        rep
    }
}

/// Clone `n` elements from `src` into the uninitialized slots at `dst`.
///
/// # Safety
/// `src` must point at `n` initialized elements, `dst` at `n` writable slots, and the two
/// ranges must not overlap.
pub(crate) unsafe fn write_clones<T: Clone>(dst: *mut T, src: *const T, n: usize) {
    for i in 0..n {
        // SAFETY: i < n, in bounds of both ranges per the contract.
        unsafe {
            dst.add(i).write((*src.add(i)).clone());
        }
    }
}

/// Clone a slice into the uninitialized slots at `dst`.
///
/// # Safety
/// `dst` must point at `values.len()` writable slots disjoint from `values`.
pub(crate) unsafe fn write_clone_slice<T: Clone>(dst: *mut T, values: &[T]) {
    for (i, value) in values.iter().enumerate() {
        // SAFETY: i < values.len(), in bounds per the contract.
        unsafe {
            dst.add(i).write(value.clone());
        }
    }
}

/// Clone one value into `n` uninitialized slots at `dst`.
///
/// # Safety
/// `dst` must point at `n` writable slots not aliasing `fill`.
pub(crate) unsafe fn fill_clones<T: Clone>(dst: *mut T, n: usize, fill: &T) {
    for i in 0..n {
        // SAFETY: i < n, in bounds per the contract.
        unsafe {
            dst.add(i).write(fill.clone());
        }
    }
}
