use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::mem;

use super::hash_table::HashTable;
use crate::linked::list::node::NodeRef;
use crate::linked::list::raw::RawList;

/// Borrowing iterator over a table's entries, in entry-list order.
pub struct Iter<'a, K, V> {
    front: NodeRef<(K, V)>,
    remaining: usize,
    _phantom: PhantomData<&'a (K, V)>,
}

impl<'a, K: Hash + Eq, V, B: BuildHasher> IntoIterator for &'a HashTable<K, V, B> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            front: self.entries.head(),
            remaining: self.entries.len(),
            _phantom: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: remaining > 0 guarantees front is a value node; the table is borrowed
        // for 'a.
        let (key, value) = unsafe { self.front.value() };
        self.front = self.front.next();
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            remaining: self.remaining,
            _phantom: PhantomData,
        }
    }
}

impl<K, V> Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Mutably borrowing iterator over a table's values. Keys stay inaccessible: changing a
/// key would silently corrupt its bucket.
pub struct ValuesMut<'a, K, V> {
    front: NodeRef<(K, V)>,
    remaining: usize,
    _phantom: PhantomData<&'a mut (K, V)>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(crate) fn new<B: BuildHasher>(table: &'a mut HashTable<K, V, B>) -> ValuesMut<'a, K, V>
    where
        K: Hash + Eq,
    {
        ValuesMut {
            front: table.entries.head(),
            remaining: table.entries.len(),
            _phantom: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // SAFETY: remaining > 0 guarantees front is a value node; each node is yielded
        // once, so the &mut references never alias.
        let value = unsafe { &mut self.front.value_mut().1 };
        self.front = self.front.next();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// Owning iterator: pops entries off the front of the entry chain.
pub struct IntoIter<K, V> {
    entries: RawList<(K, V)>,
}

impl<K: Hash + Eq, V, B: BuildHasher> IntoIterator for HashTable<K, V, B> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter {
            entries: mem::replace(&mut self.entries, RawList::new()),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.entries.is_empty() {
            return None;
        }
        let head = self.entries.head();
        // SAFETY: Non-empty, so the head is a value node of this chain.
        Some(unsafe { self.entries.exclude(head) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.entries.len())
            .finish()
    }
}

pub struct IntoKeys<K, V>(pub(crate) IntoIter<K, V>);

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

pub struct IntoValues<K, V>(pub(crate) IntoIter<K, V>);

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}
