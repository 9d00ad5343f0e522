use std::borrow::Borrow;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::mem;

use log::debug;

use super::iter::{IntoKeys, IntoValues, Iter, Keys, Values, ValuesMut};
use crate::cow::CowVec;
use crate::linked::list::node::NodeRef;
use crate::linked::list::raw::RawList;

/// Bucket count used when the first entry arrives into a default-constructed table.
pub(crate) const DEFAULT_BUCKETS: usize = 64;

/// Bucket chains longer than this trigger a rehash into twice as many buckets.
pub(crate) const DEFAULT_COLLISIONS_LIMIT: usize = 8;

/// A hash table that chains collisions through one doubly-linked entry list.
///
/// All entries live on a single circular chain in insertion-history order; the bucket
/// array only holds an anchor into that chain per bucket, plus a chain length. Entries
/// of one bucket are kept contiguous on the list, with the newest insertion in front,
/// so a lookup walks at most `collisions_limit` nodes. Iteration walks the entry list,
/// giving a stable, hash-independent order.
///
/// When any bucket chain outgrows the collisions limit the table rehashes into twice as
/// many buckets. Rehashing relinks the existing nodes; no entry is reallocated or moved
/// in memory, so references obtained before a rehash would still be valid (the API
/// doesn't let any outlive `&mut self`, but node handles inside the crate rely on it).
///
/// It is a logic error for keys to be manipulated in a way that changes their hash.
/// Because of this, the API prevents mutable access to keys.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the table.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`*, `O(n)` on rehash |
/// | `get` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains` | `O(1)`* |
///
/// \* Plus a walk of the bucket chain, which the collisions limit keeps short.
pub struct HashTable<K: Hash + Eq, V, B: BuildHasher = RandomState> {
    pub(crate) entries: RawList<(K, V)>,
    pub(crate) buckets: CowVec<Bucket<K, V>>,
    hasher: B,
    collisions_limit: usize,
}

/// One bucket: the first node of its contiguous chain segment, and the segment length.
pub(crate) struct Bucket<K, V> {
    pub anchor: Option<NodeRef<(K, V)>>,
    pub len: usize,
}

impl<K, V> Bucket<K, V> {
    pub(crate) fn empty() -> Bucket<K, V> {
        Bucket {
            anchor: None,
            len: 0,
        }
    }
}

// Derived impls would demand K: Clone + V: Clone, but a bucket only carries a node
// handle and a count.
impl<K, V> Clone for Bucket<K, V> {
    fn clone(&self) -> Self {
        Bucket {
            anchor: self.anchor,
            len: self.len,
        }
    }
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Bucket::empty()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> HashTable<K, V, B> {
    /// Creates an empty table with the default value for `B`. The bucket array is
    /// allocated on the first insertion.
    pub fn new() -> HashTable<K, V, B> {
        HashTable::with_hasher(B::default())
    }

    /// Creates an empty table with `buckets` buckets preallocated and the default value
    /// for `B`.
    pub fn with_buckets(buckets: usize) -> HashTable<K, V, B> {
        HashTable::with_buckets_and_hasher(buckets, B::default())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashTable<K, V, B> {
    /// Creates an empty table with the provided `hasher`.
    pub fn with_hasher(hasher: B) -> HashTable<K, V, B> {
        HashTable {
            entries: RawList::new(),
            buckets: CowVec::new(),
            hasher,
            collisions_limit: DEFAULT_COLLISIONS_LIMIT,
        }
    }

    /// Creates an empty table with `buckets` buckets preallocated and the provided
    /// `hasher`.
    pub fn with_buckets_and_hasher(buckets: usize, hasher: B) -> HashTable<K, V, B> {
        HashTable {
            entries: RawList::new(),
            buckets: CowVec::filled(buckets, &Bucket::empty()),
            hasher,
            collisions_limit: DEFAULT_COLLISIONS_LIMIT,
        }
    }

    /// Overrides the chain length that triggers a rehash.
    pub fn with_collisions_limit(mut self, limit: usize) -> HashTable<K, V, B> {
        self.collisions_limit = limit.max(1);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The current number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts an entry, returning true if the key was not present. An existing entry
    /// is left untouched (the new key and value are discarded).
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.find_node(&key).is_some() {
            return false;
        }
        self.insert_node(key, value);
        true
    }

    /// Returns a reference to the value for `key`, or None.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_node(key)?;
        // SAFETY: find_node only yields value nodes of the entry chain.
        Some(unsafe { &node.value().1 })
    }

    /// Returns the entry for `key` as a key-value pair, or None.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_node(key)?;
        // SAFETY: As for get.
        let (k, v) = unsafe { node.value() };
        Some((k, v))
    }

    /// Returns a mutable reference to the value for `key`, or None.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_node(key)?;
        // SAFETY: As for get, with exclusive access through &mut self.
        Some(unsafe { &mut node.value_mut().1 })
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()`
    /// first when the key is absent. The subscript operation of this table.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let node = match self.find_node(&key) {
            Some(node) => node,
            None => self.insert_node(key, V::default()),
        };
        // SAFETY: A value node of the entry chain, with exclusive access through
        // &mut self. Node handles survive rehashes: rehashing only relinks.
        unsafe { &mut node.value_mut().1 }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node = self.find_node(key)?;
        let index = self.bucket_index(key);

        let bucket = &mut self.buckets.as_mut_slice()[index];
        bucket.len -= 1;
        if bucket.anchor == Some(node) {
            // The anchor leaves; its successor heads the (possibly now empty) segment.
            bucket.anchor = if bucket.len > 0 { Some(node.next()) } else { None };
        }

        // SAFETY: find_node only yields value nodes of this chain.
        Some(unsafe { self.entries.exclude(node) })
    }

    /// Drops every entry. The bucket array keeps its size.
    pub fn clear(&mut self) {
        self.entries.clear();
        let count = self.buckets.len();
        if count > 0 {
            self.buckets = CowVec::filled(count, &Bucket::empty());
        }
    }

    /// Exchanges the contents of two tables, hashers included. O(1).
    pub fn swap(&mut self, other: &mut HashTable<K, V, B>) {
        mem::swap(self, other);
    }

    /// Iterates entries in entry-list order: per bucket newest first, buckets
    /// interleaved by insertion history. The order does not change between iterations.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self)
    }

    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashTable<K, V, B> {
    /// The bucket an entry with this hash belongs to. Callers check for an empty bucket
    /// array first.
    pub(crate) fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        debug_assert!(!self.buckets.is_empty());
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Walks the bucket chain for `key`, bounded by the bucket's segment length.
    pub(crate) fn find_node<Q>(&self, key: &Q) -> Option<NodeRef<(K, V)>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let bucket = &self.buckets[self.bucket_index(key)];

        let mut node = bucket.anchor?;
        for _ in 0..bucket.len {
            // SAFETY: The segment holds bucket.len value nodes starting at the anchor.
            let (k, _) = unsafe { node.value() };
            if k.borrow() == key {
                return Some(node);
            }
            node = node.next();
        }
        None
    }

    /// Links a new entry in: the node is spliced before the bucket's current anchor (or
    /// at the chain's tail for a fresh bucket) and becomes the new anchor, keeping the
    /// bucket's segment contiguous. The caller has checked the key is absent.
    pub(crate) fn insert_node(&mut self, key: K, value: V) -> NodeRef<(K, V)> {
        if self.buckets.is_empty() {
            self.buckets = CowVec::filled(DEFAULT_BUCKETS, &Bucket::empty());
        }
        let index = self.bucket_index(&key);

        let anchor = match self.buckets[index].anchor {
            Some(anchor) => anchor,
            None => self.entries.end(),
        };
        // SAFETY: The anchor is a node of the entry chain (the sentinel for a fresh
        // bucket).
        let node = unsafe { self.entries.include_before(anchor, (key, value)) };

        let bucket = &mut self.buckets.as_mut_slice()[index];
        bucket.anchor = Some(node);
        bucket.len += 1;

        // More buckets can only help while there are fewer buckets than entries; a
        // chain of equal-hash keys can never be spread out.
        if bucket.len > self.collisions_limit && self.buckets.len() < self.entries.len() {
            let target = self.buckets.len() * 2;
            self.rehash(target);
        }
        node
    }

    /// Rebuilds the bucket array at `bucket_count` buckets, relinking every node. When
    /// the longest chain still exceeds the collisions limit the count doubles and the
    /// rebuild repeats, but never beyond one bucket per entry: past that point more
    /// buckets can't shorten a chain of equal-hash keys.
    pub(crate) fn rehash(&mut self, mut bucket_count: usize) {
        loop {
            debug!(
                "rehashing {} entries into {} buckets",
                self.entries.len(),
                bucket_count
            );

            let mut old = mem::replace(&mut self.entries, RawList::new());
            self.buckets = CowVec::filled(bucket_count, &Bucket::empty());
            let mut longest = 0;

            while !old.is_empty() {
                let node = old.head();
                let index = {
                    // SAFETY: A non-empty chain's head is a value node.
                    let (key, _) = unsafe { node.value() };
                    self.bucket_index(key)
                };

                let anchor = match self.buckets[index].anchor {
                    Some(anchor) => anchor,
                    None => self.entries.end(),
                };
                // SAFETY: node heads the old chain; the anchor belongs to the rebuilt
                // chain.
                unsafe {
                    self.entries.transmit(&mut old, node, anchor);
                }

                let bucket = &mut self.buckets.as_mut_slice()[index];
                bucket.anchor = Some(node);
                bucket.len += 1;
                longest = longest.max(bucket.len);
            }

            if longest <= self.collisions_limit || bucket_count >= self.entries.len() {
                return;
            }
            bucket_count *= 2;
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone, B: BuildHasher + Clone> Clone for HashTable<K, V, B> {
    /// Rebuilds the table entry by entry: node links can't be copied wholesale.
    fn clone(&self) -> Self {
        let mut table = HashTable::with_buckets_and_hasher(self.bucket_count(), self.hasher.clone())
            .with_collisions_limit(self.collisions_limit);
        for (key, value) in self.iter() {
            table.insert(key.clone(), value.clone());
        }
        table
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        HashTable::new()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> FromIterator<(K, V)> for HashTable<K, V, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Extend<(K, V)> for HashTable<K, V, B> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V: PartialEq, B: BuildHasher> PartialEq for HashTable<K, V, B> {
    /// Order-independent: two tables are equal when every entry of one has a matching
    /// entry in the other.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K: Hash + Eq, V: Eq, B: BuildHasher> Eq for HashTable<K, V, B> {}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher> Debug for HashTable<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("contents", &ContentsFmt(self))
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .finish()
    }
}

struct ContentsFmt<'a, K: Hash + Eq, V, B: BuildHasher>(&'a HashTable<K, V, B>);

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher> Debug for ContentsFmt<'_, K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher> Display for HashTable<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map().entries(self.iter()).finish()
    }
}
