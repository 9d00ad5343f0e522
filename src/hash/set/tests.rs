#![cfg(test)]

use super::*;
use crate::util::hash::{IdentityHasherBuilder, ManualHash};

#[test]
fn test_insert_remove_contains() {
    let mut set: HashSet<String> = HashSet::new();

    assert!(set.insert(String::from("a")));
    assert!(set.insert(String::from("b")));
    assert!(
        !set.insert(String::from("a")),
        "Inserting a duplicate should be rejected."
    );
    assert_eq!(set.len(), 2);

    assert!(set.contains("a"));
    assert!(!set.contains("c"));
    assert_eq!(set.get("b"), Some(&String::from("b")));

    assert_eq!(set.remove("a"), Some(String::from("a")));
    assert_eq!(set.remove("a"), None, "Removing twice should miss.");
    assert_eq!(set.len(), 1);

    set.clear();
    assert!(set.is_empty());
    assert!(set.insert(String::from("a")), "A cleared set accepts old items again.");
}

#[test]
fn test_hash_collisions() {
    let mut set = HashSet::with_buckets_and_hasher(4, IdentityHasherBuilder);
    set.insert(ManualHash::new(0, "zero"));
    set.insert(ManualHash::new(0, "one"));
    set.insert(ManualHash::new(2, "two"));
    set.insert(ManualHash::new(0, "three"));
    set.insert(ManualHash::new(2, "four"));
    set.insert(ManualHash::new(1, "five"));

    assert_eq!(set.len(), 6);
    assert!(
        !set.insert(ManualHash::new(0, "zero")),
        "A colliding duplicate should still be detected."
    );

    set.remove(&ManualHash::new(0, "zero"));
    set.remove(&ManualHash::new(2, "two"));

    assert_eq!(
        set.iter().map(|i| *i.value_ref()).collect::<Vec<_>>(),
        ["three", "one", "four", "five"],
        "No element should be lost to a collision during removal."
    );
    assert!(set.contains(&ManualHash::new(0, "one")));
    assert!(!set.contains(&ManualHash::new(0, "zero")));
}

#[test]
fn test_rehash_keeps_items() {
    let mut set = HashSet::with_buckets_and_hasher(2, IdentityHasherBuilder)
        .with_collisions_limit(2);

    for i in 0..6_u64 {
        set.insert(ManualHash::new(i * 2, i));
    }
    assert!(
        set.bucket_count() > 2,
        "Overlong chains should have forced a rehash."
    );
    for i in 0..6_u64 {
        assert!(set.contains(&ManualHash::new(i * 2, i)));
    }
}

#[test]
fn test_iteration_and_conversion() {
    let set: HashSet<i32> = [3, 1, 2, 1].into_iter().collect();
    assert_eq!(set.len(), 3, "Duplicates should collapse during collection.");

    let mut items: Vec<_> = set.iter().copied().collect();
    items.sort_unstable();
    assert_eq!(items, [1, 2, 3]);

    let mut items: Vec<_> = set.into_iter().collect();
    items.sort_unstable();
    assert_eq!(items, [1, 2, 3]);
}

#[test]
fn test_equality_and_clone() {
    let a: HashSet<i32> = [1, 2, 3].into_iter().collect();
    let mut b: HashSet<i32> = HashSet::new();
    b.extend([3, 2, 1]);

    assert_eq!(a, b, "Equality should ignore insertion order.");
    assert_eq!(a, a.clone());
    assert_ne!(a, [1, 2].into_iter().collect());
    assert_ne!(a, [1, 2, 4].into_iter().collect());
}

#[test]
fn test_format() {
    let mut set: HashSet<i32> = HashSet::new();
    set.insert(7);
    assert_eq!(format!("{set}"), "#{7}");
}
