use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};

use super::iter::{IntoIter, Iter};
use crate::hash::HashTable;

/// A set of unique items backed by a [`HashTable`] with unit values.
///
/// Iteration order is the table's entry-list order and does not change between
/// iterations. There is no mutable iterator: mutating an item in place would silently
/// change its hash and corrupt its bucket.
pub struct HashSet<T: Hash + Eq, B: BuildHasher = RandomState> {
    pub(crate) table: HashTable<T, (), B>,
}

impl<T: Hash + Eq, B: BuildHasher + Default> HashSet<T, B> {
    pub fn new() -> HashSet<T, B> {
        HashSet {
            table: HashTable::new(),
        }
    }

    pub fn with_buckets(buckets: usize) -> HashSet<T, B> {
        HashSet {
            table: HashTable::with_buckets(buckets),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher> HashSet<T, B> {
    pub fn with_hasher(hasher: B) -> HashSet<T, B> {
        HashSet {
            table: HashTable::with_hasher(hasher),
        }
    }

    pub fn with_buckets_and_hasher(buckets: usize, hasher: B) -> HashSet<T, B> {
        HashSet {
            table: HashTable::with_buckets_and_hasher(buckets, hasher),
        }
    }

    /// Overrides the chain length that triggers a rehash.
    pub fn with_collisions_limit(self, limit: usize) -> HashSet<T, B> {
        HashSet {
            table: self.table.with_collisions_limit(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Inserts `item`, returning true if it was not present. An existing equal item is
    /// left untouched and the new one discarded.
    pub fn insert(&mut self, item: T) -> bool {
        self.table.insert(item, ())
    }

    /// Removes `item`, returning the stored value if it was present.
    pub fn remove<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove_entry(item).map(|(item, ())| item)
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains(item)
    }

    /// Returns a reference to the stored item equal to `item`, or None.
    pub fn get<Q>(&self, item: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get_entry(item).map(|(item, ())| item)
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Exchanges the contents of two sets, hashers included. O(1).
    pub fn swap(&mut self, other: &mut HashSet<T, B>) {
        self.table.swap(&mut other.table);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }
}

impl<T: Hash + Eq> Default for HashSet<T> {
    fn default() -> Self {
        HashSet::new()
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Clone> Clone for HashSet<T, B> {
    fn clone(&self) -> Self {
        HashSet {
            table: self.table.clone(),
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher + Default> FromIterator<T> for HashSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: Hash + Eq, B: BuildHasher> Extend<T> for HashSet<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Hash + Eq, B: BuildHasher> PartialEq for HashSet<T, B> {
    /// Order-independent: equal when each set contains every item of the other.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Hash + Eq, B: BuildHasher> Eq for HashSet<T, B> {}

impl<T: Hash + Eq + Debug, B: BuildHasher> Debug for HashSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSet")
            .field("contents", &ContentsFmt(self))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .finish()
    }
}

struct ContentsFmt<'a, T: Hash + Eq, B: BuildHasher>(&'a HashSet<T, B>);

impl<T: Hash + Eq + Debug, B: BuildHasher> Debug for ContentsFmt<'_, T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl<T: Hash + Eq + Debug, B: BuildHasher> Display for HashSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_set().entries(self.iter()).finish()
    }
}
