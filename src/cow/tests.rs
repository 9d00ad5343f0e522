#![cfg(test)]

use super::buffer::CowBuf;
use super::rep::{page_size, Header, Rep};
use crate::util::probe::ZeroSized;

/// Recomputes the size in bytes of a block holding `cap` slots of `T`, including the
/// header and its padding up to `T`'s alignment.
fn block_size<T>(cap: usize) -> usize {
    let align = align_of::<T>();
    let offset = (size_of::<Header>() + align - 1) & !(align - 1);
    offset + cap * size_of::<T>()
}

#[test]
fn test_empty_rep_is_free() {
    let a = CowBuf::<u32>::new();
    let b = a.clone();
    assert_eq!(a.cap(), 0, "The empty rep holds no slots.");
    assert!(
        !a.is_shared() && !b.is_shared(),
        "Handles on the empty rep never count as shared."
    );
    assert!(
        a.shares_block_with(&b),
        "All empty buffers should sit on the one static rep."
    );

    let c = CowBuf::<String>::new();
    assert!(c.as_slice().is_empty());
}

#[test]
fn test_share_counting() {
    let a = CowBuf::from_slice(&[1, 2, 3]);
    assert!(!a.is_shared());

    let b = a.clone();
    let c = b.clone();
    assert!(a.is_shared() && b.is_shared() && c.is_shared());
    assert!(a.shares_block_with(&c));

    drop(b);
    assert!(a.is_shared(), "Two handles remain.");
    drop(c);
    assert!(!a.is_shared(), "The last handle should own the block outright.");
    assert_eq!(a.as_slice(), &[1, 2, 3]);
}

#[test]
fn test_make_unique() {
    let mut a = CowBuf::from_slice(&[1, 2, 3]);
    let b = a.clone();

    a.make_unique();
    assert!(
        !a.shares_block_with(&b),
        "make_unique on a shared buffer should move to a fresh block."
    );
    assert_eq!(a.as_slice(), b.as_slice());

    a.as_mut_slice()[0] = 9;
    assert_eq!(a.as_slice(), &[9, 2, 3]);
    assert_eq!(b.as_slice(), &[1, 2, 3]);

    let before = a.as_slice().as_ptr();
    a.make_unique();
    assert_eq!(
        a.as_slice().as_ptr(),
        before,
        "make_unique on an unshared buffer should be a no-op."
    );
}

#[test]
fn test_page_rounded_allocation() {
    // Small blocks are left exact; only allocations spilling past one page are rounded
    // up, with the slack folded into capacity.
    let small = CowBuf::from_slice(&[0_u64; 4]);
    assert_eq!(small.cap(), 4);

    let large = CowBuf::from_slice(&[0_u64; 1000]);
    assert!(large.cap() >= 1000);
    let overhead = 4 * size_of::<usize>();
    assert_eq!(
        (block_size::<u64>(large.cap()) + overhead) % page_size(),
        0,
        "A large block plus allocator overhead should fill whole pages."
    );
    assert!(
        (block_size::<u64>(large.cap() + 1) + overhead) % page_size() != 0,
        "No usable slot should be left in the slack."
    );
}

#[test]
fn test_filled() {
    let buf = CowBuf::filled(4, &7_i32);
    assert_eq!(buf.as_slice(), &[7, 7, 7, 7]);

    let empty = CowBuf::filled(0, &7_i32);
    assert_eq!(empty.cap(), 0, "A zero-length fill should use the empty rep.");
}

#[test]
fn test_zst_rep() {
    let rep = Rep::<ZeroSized>::create(5, 0);
    assert_eq!(rep.len(), 5);
    assert!(
        rep.cap() >= 5,
        "ZST capacity tracks the claimed count, not page rounding."
    );
    rep.release();

    let buf = CowBuf::filled(3, &ZeroSized);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.as_slice(), &[ZeroSized; 3]);
}

#[test]
fn test_high_alignment() {
    #[derive(Clone, Debug, PartialEq)]
    #[repr(align(64))]
    struct Aligned(u8);

    let mut buf = CowBuf::from_slice(&[Aligned(1), Aligned(2)]);
    assert_eq!(buf.as_slice().as_ptr() as usize % 64, 0);

    buf.push(Aligned(3));
    assert_eq!(buf.as_slice(), &[Aligned(1), Aligned(2), Aligned(3)]);
    assert_eq!(buf.as_slice().as_ptr() as usize % 64, 0);
}
