//! Hashing helpers for tests which need full control over bucket placement.

use std::hash::{BuildHasher, Hash, Hasher};

/// A value paired with a manually chosen hash, for forcing bucket collisions in tests.
/// Equality is decided by the value alone, so two `ManualHash`es can collide without
/// being duplicates.
#[derive(Debug)]
#[allow(unused)]
pub struct ManualHash<T: Eq> {
    hash: u64,
    value: T,
}

impl<T: Eq> ManualHash<T> {
    #[allow(unused)]
    pub const fn new(hash: u64, value: T) -> ManualHash<T> {
        ManualHash {
            hash,
            value,
        }
    }

    #[allow(unused)]
    pub fn value(self) -> T {
        self.value
    }

    #[allow(unused)]
    pub fn value_ref(&self) -> &T {
        &self.value
    }
}

impl<T: Eq> Hash for ManualHash<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl<T: Eq> PartialEq for ManualHash<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for ManualHash<T> {}

/// A hasher that reconstructs the written bytes as a little-endian integer, so hashing a
/// `u64` yields that `u64`. Combined with [`ManualHash`], this makes bucket indices fully
/// predictable: a hash of `h` lands in bucket `h % bucket_count`.
#[derive(Debug)]
pub struct IdentityHasher {
    state: u64,
    offset: u64,
}

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state ^= (*byte as u64) << (self.offset * 8);
            self.offset = (self.offset + 1) % 8;
        }
    }
}

#[derive(Debug, Default)]
pub struct IdentityHasherBuilder;

impl BuildHasher for IdentityHasherBuilder {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher {
            state: 0,
            offset: 0,
        }
    }
}
