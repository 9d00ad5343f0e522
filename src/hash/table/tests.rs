#![cfg(test)]

use std::hash::RandomState;

use super::*;
use crate::util::hash::{IdentityHasherBuilder, ManualHash};
use crate::util::probe::CountedDrop;

#[test]
fn test_insert_get_remove() {
    let mut table: HashTable<String, i32> = HashTable::new();
    assert!(table.is_empty());
    assert_eq!(table.get("a"), None);

    assert!(table.insert(String::from("a"), 1));
    assert!(table.insert(String::from("b"), 2));
    assert_eq!(table.len(), 2);

    assert!(
        !table.insert(String::from("a"), 99),
        "Inserting an existing key should be rejected."
    );
    assert_eq!(
        table.get("a"),
        Some(&1),
        "A rejected insert should leave the old value in place."
    );

    assert!(table.contains("b"));
    assert!(!table.contains("c"));
    assert_eq!(table.get_entry("b"), Some((&String::from("b"), &2)));

    assert_eq!(table.remove("a"), Some(1));
    assert_eq!(table.remove("a"), None);
    assert_eq!(table.len(), 1);
    assert!(!table.contains("a"));

    assert_eq!(
        table.remove_entry("b"),
        Some((String::from("b"), 2)),
        "Removal should hand back the stored key."
    );
    assert!(table.is_empty());
}

#[test]
fn test_get_mut_and_subscript() {
    let mut table: HashTable<i32, i32> = HashTable::new();
    table.insert(1, 10);

    *table.get_mut(&1).unwrap() += 5;
    assert_eq!(table.get(&1), Some(&15));
    assert_eq!(table.get_mut(&2), None);

    *table.get_or_insert_default(2) += 7;
    assert_eq!(
        table.get(&2),
        Some(&7),
        "The subscript should insert a default for a missing key."
    );
    *table.get_or_insert_default(2) += 1;
    assert_eq!(table.get(&2), Some(&8), "And reuse the entry afterwards.");

    for value in table.values_mut() {
        *value *= 2;
    }
    assert_eq!(table.get(&1), Some(&30));
    assert_eq!(table.get(&2), Some(&16));
}

#[test]
fn test_bucket_chains() {
    // The identity hasher makes bucket placement explicit: hash % bucket_count.
    let mut table = HashTable::with_buckets_and_hasher(4, IdentityHasherBuilder);
    table.insert(ManualHash::new(0, "first"), 0);
    table.insert(ManualHash::new(1, "other"), 1);
    table.insert(ManualHash::new(4, "second"), 2);
    table.insert(ManualHash::new(8, "third"), 3);

    assert_eq!(table.get(&ManualHash::new(0, "first")), Some(&0));
    assert_eq!(table.get(&ManualHash::new(4, "second")), Some(&2));
    assert_eq!(table.get(&ManualHash::new(8, "third")), Some(&3));
    assert_eq!(
        table.get(&ManualHash::new(12, "missing")),
        None,
        "A colliding hash with an unknown value is not a hit."
    );

    assert_eq!(
        table
            .iter()
            .map(|(key, value)| (*key.value_ref(), *value))
            .collect::<Vec<_>>(),
        [("third", 3), ("second", 2), ("first", 0), ("other", 1)],
        "Bucket segments stay contiguous, newest first, in insertion history order."
    );
}

#[test]
fn test_remove_from_chain() {
    let mut table = HashTable::with_buckets_and_hasher(4, IdentityHasherBuilder);
    for (i, name) in ["a", "b", "c"].into_iter().enumerate() {
        table.insert(ManualHash::new(0, name), i);
    }

    // Segment order is newest first: c, b, a. Remove the anchor.
    assert_eq!(table.remove(&ManualHash::new(0, "c")), Some(2));
    assert_eq!(table.get(&ManualHash::new(0, "b")), Some(&1));
    assert_eq!(table.get(&ManualHash::new(0, "a")), Some(&0));

    // Remove the tail of the segment.
    assert_eq!(table.remove(&ManualHash::new(0, "a")), Some(0));
    assert_eq!(table.get(&ManualHash::new(0, "b")), Some(&1));

    assert_eq!(table.remove(&ManualHash::new(0, "b")), Some(1));
    assert!(table.is_empty());
    assert_eq!(
        table.remove(&ManualHash::new(0, "b")),
        None,
        "An emptied bucket should miss cleanly."
    );
}

#[test]
fn test_rehash_grows_buckets() {
    let mut table = HashTable::with_buckets_and_hasher(2, IdentityHasherBuilder)
        .with_collisions_limit(3);

    for i in 0..4_u64 {
        table.insert(ManualHash::new(i * 2, i), i);
    }
    assert_eq!(
        table.bucket_count(),
        4,
        "A chain past the collisions limit should double the bucket count."
    );
    assert_eq!(table.len(), 4);
    for i in 0..4_u64 {
        assert_eq!(
            table.get(&ManualHash::new(i * 2, i)),
            Some(&i),
            "Every entry should survive the rehash."
        );
    }
}

#[test]
fn test_chain_past_default_limit_doubles() {
    // Nine keys land in one of four buckets; at eight buckets they spread over two.
    let mut table = HashTable::with_buckets_and_hasher(4, IdentityHasherBuilder);
    for i in 0..9_u64 {
        table.insert(ManualHash::new(i * 4, i), i);
    }

    assert_eq!(
        table.bucket_count(),
        8,
        "The ninth entry in one bucket should trip the default limit of 8."
    );
    assert_eq!(table.len(), 9);
    for i in 0..9_u64 {
        assert_eq!(table.get(&ManualHash::new(i * 4, i)), Some(&i));
    }
}

#[test]
fn test_rehash_terminates_on_equal_hashes() {
    // Five distinct items sharing one hash can never spread out; the rebuild must stop
    // doubling once more buckets can't help.
    let mut table = HashTable::with_buckets_and_hasher(2, IdentityHasherBuilder)
        .with_collisions_limit(2);

    for i in 0..5 {
        table.insert(ManualHash::new(0, i), i);
    }
    assert_eq!(table.len(), 5);
    assert!(
        table.bucket_count() >= 5 && table.bucket_count() <= 8,
        "Doubling should stop at one bucket per entry."
    );
    for i in 0..5 {
        assert_eq!(table.get(&ManualHash::new(0, i)), Some(&i));
    }
}

#[test]
fn test_clear() {
    let mut table: HashTable<i32, i32> = (0..10).map(|i| (i, i)).collect();
    let buckets = table.bucket_count();

    table.clear();
    assert!(table.is_empty());
    assert_eq!(
        table.bucket_count(),
        buckets,
        "Clearing should keep the bucket array."
    );

    assert!(table.insert(1, 1));
    assert_eq!(table.get(&1), Some(&1), "A cleared table should be usable again.");
}

#[test]
fn test_swap() {
    let mut a: HashTable<i32, i32> = [(1, 10)].into_iter().collect();
    let mut b: HashTable<i32, i32> = [(2, 20), (3, 30)].into_iter().collect();

    a.swap(&mut b);
    assert_eq!(a.len(), 2);
    assert_eq!(a.get(&3), Some(&30));
    assert_eq!(b.get(&1), Some(&10));
}

#[test]
fn test_iterators() {
    let table: HashTable<i32, i32> = (0..6).map(|i| (i, i * 10)).collect();

    assert_eq!(table.iter().len(), 6);
    assert_eq!(table.keys().count(), 6);
    assert_eq!(table.values().map(|v| *v).sum::<i32>(), 150);

    let mut keys: Vec<_> = table.keys().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, [0, 1, 2, 3, 4, 5]);

    let mut pairs: Vec<_> = table.into_iter().collect();
    pairs.sort_unstable();
    assert_eq!(pairs[0], (0, 0));
    assert_eq!(pairs[5], (5, 50));

    let table: HashTable<i32, i32> = (0..3).map(|i| (i, i)).collect();
    let mut values: Vec<_> = table.into_values().collect();
    values.sort_unstable();
    assert_eq!(values, [0, 1, 2]);
}

#[test]
fn test_equality_and_clone() {
    let a: HashTable<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    let b: HashTable<i32, i32> = [(3, 30), (1, 10), (2, 20)].into_iter().collect();

    assert_eq!(a, b, "Equality should ignore insertion order.");
    assert_ne!(a, [(1, 10), (2, 20)].into_iter().collect());
    assert_ne!(a, [(1, 10), (2, 20), (3, 99)].into_iter().collect());

    let cloned = a.clone();
    assert_eq!(a, cloned);

    let mut extended = a.clone();
    extended.extend([(4, 40), (1, 999)]);
    assert_eq!(extended.len(), 4);
    assert_eq!(
        extended.get(&1),
        Some(&10),
        "Extend should reject existing keys like insert does."
    );
}

#[test]
fn test_drop_accounting() {
    let counter = CountedDrop::new(0);

    let table: HashTable<i32, _, RandomState> =
        (0..7).map(|i| (i, counter.clone())).collect();
    drop(table);
    assert_eq!(counter.take(), 7, "Dropping the table should drop every value.");

    let mut table: HashTable<i32, _, RandomState> =
        (0..4).map(|i| (i, counter.clone())).collect();
    drop(table.remove(&0));
    assert_eq!(counter.take(), 1);

    assert!(
        !table.insert(1, counter.clone()),
        "A rejected insert should drop the new value."
    );
    assert_eq!(counter.take(), 1);

    table.clear();
    assert_eq!(counter.take(), 3, "Clearing should drop the remaining values.");

    let mut table: HashTable<i32, _, RandomState> =
        (0..4).map(|i| (i, counter.clone())).collect();
    let mut iter = table.into_iter();
    drop(iter.next());
    assert_eq!(counter.take(), 1);
    drop(iter);
    assert_eq!(
        counter.take(),
        3,
        "Dropping the owning iterator should drop what remains."
    );
}

#[test]
fn test_format() {
    let mut table: HashTable<i32, &str> = HashTable::new();
    table.insert(1, "one");

    assert_eq!(format!("{table}"), "#{1: \"one\"}");

    let empty: HashTable<i32, i32> = HashTable::new();
    assert_eq!(format!("{empty}"), "#{}");
}
