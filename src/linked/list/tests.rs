#![cfg(test)]

use std::iter;

use super::*;
use crate::util::error::{EraseEnd, RangeError};
use crate::util::panic::assert_panics;
use crate::util::probe::CountedDrop;

#[test]
fn test_push_pop() {
    let mut list = List::new();
    assert!(list.is_empty());
    assert_eq!(list.front(), None);
    assert_eq!(list.back(), None);
    assert_eq!(list.pop_front(), None);
    assert_eq!(list.pop_back(), None);

    list.push_back(2);
    list.push_back(3);
    list.push_front(1);
    assert_eq!(list.len(), 3);
    assert_eq!(list.front(), Some(&1));
    assert_eq!(list.back(), Some(&3));

    assert_eq!(list.pop_front(), Some(1));
    assert_eq!(list.pop_back(), Some(3));
    assert_eq!(list.pop_back(), Some(2));
    assert_eq!(list.pop_back(), None);
    assert!(list.is_empty());

    list.push_back(9);
    assert_eq!(
        list.front(),
        list.back(),
        "A single element is both front and back."
    );
}

#[test]
fn test_get_and_index() {
    let list: List<_> = (0..10).collect();

    assert_eq!(list.get(0), &0);
    assert_eq!(list.get(3), &3, "Seeking in the front half should work.");
    assert_eq!(list.get(8), &8, "Seeking in the back half should work.");
    assert_eq!(list.get(9), &9);
    assert_eq!(list[5], 5);

    assert_eq!(
        list.try_get(10),
        Err(RangeError { index: 10, len: 10 })
    );
    assert_panics!({
        let list: List<i32> = List::new();
        list.get(0);
    });

    let mut list = list;
    *list.get_mut(4) = 40;
    list[6] = 60;
    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [0, 1, 2, 3, 40, 5, 60, 7, 8, 9]
    );
}

#[test]
fn test_insert_remove() {
    let mut list: List<_> = [1, 2, 3].into_iter().collect();

    list.insert(0, 0);
    list.insert(4, 4);
    list.insert(2, 9);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 9, 2, 3, 4]);

    assert_eq!(
        list.try_insert(9, 9),
        Err(RangeError { index: 9, len: 6 }),
        "Inserting past one-past-the-end should be rejected."
    );

    assert_eq!(list.remove(2), 9);
    assert_eq!(list.remove(0), 0);
    assert_eq!(list.remove(3), 4, "Removal near the tail should seek backwards.");
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);

    assert_eq!(
        list.try_remove(3),
        Err(RangeError { index: 3, len: 3 })
    );
}

#[test]
fn test_append_prepend() {
    let mut a: List<_> = (0..3).collect();
    let mut b: List<_> = (3..6).collect();

    a.append(&mut b);
    assert_eq!(a.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4, 5]);
    assert!(b.is_empty(), "The appended list should be left empty.");

    b.push_back(9);
    assert_eq!(
        b.front(),
        Some(&9),
        "An emptied list should be usable again."
    );

    let mut c: List<_> = (6..8).collect();
    a.prepend(&mut c);
    assert_eq!(
        a.iter().copied().collect::<Vec<_>>(),
        [6, 7, 0, 1, 2, 3, 4, 5]
    );
    assert!(c.is_empty());

    let mut empty = List::new();
    a.append(&mut empty);
    assert_eq!(a.len(), 8, "Appending an empty list should change nothing.");

    let mut fresh = List::new();
    fresh.append(&mut a);
    assert_eq!(fresh.len(), 8, "Appending to an empty list should take the chain.");
    assert!(a.is_empty());
}

#[test]
fn test_swap() {
    let mut a: List<_> = [1, 2].into_iter().collect();
    let mut b: List<_> = [3, 4, 5].into_iter().collect();

    a.swap(&mut b);
    assert_eq!(a.iter().copied().collect::<Vec<_>>(), [3, 4, 5]);
    assert_eq!(b.iter().copied().collect::<Vec<_>>(), [1, 2]);
}

#[test]
fn test_cursor_movement() {
    let mut list: List<_> = [1, 2, 3].into_iter().collect();
    let mut cursor = list.cursor_front();

    assert_eq!(cursor.current(), Some(&1));
    assert_eq!(cursor.peek_next(), Some(&2));
    assert_eq!(cursor.peek_prev(), None, "The head's neighbour is the end.");

    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor.current(), Some(&3));
    assert_eq!(cursor.peek_next(), None);

    cursor.move_next();
    assert!(cursor.is_end(), "Stepping past the tail parks on the end.");
    assert_eq!(cursor.current(), None);

    cursor.move_next();
    assert_eq!(
        cursor.current(),
        Some(&1),
        "Stepping again wraps to the head."
    );

    cursor.move_prev();
    cursor.move_prev();
    assert_eq!(cursor.current(), Some(&3), "Backward movement wraps too.");

    let mut cursor = list.cursor_back();
    assert_eq!(cursor.current(), Some(&3));
    cursor.move_prev();
    assert_eq!(cursor.current(), Some(&2));
}

#[test]
fn test_cursor_editing() {
    let mut list: List<_> = [1, 3].into_iter().collect();
    let mut cursor = list.cursor_front();

    cursor.move_next();
    cursor.insert_before(2);
    cursor.insert_after(4);
    assert_eq!(cursor.current(), Some(&3));
    drop(cursor);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);

    let mut cursor = list.cursor_front();
    assert_eq!(cursor.remove_current(), Ok(1));
    assert_eq!(
        cursor.current(),
        Some(&2),
        "Removal should move the cursor to the next element."
    );

    cursor.move_prev();
    assert!(cursor.is_end());
    assert_eq!(
        cursor.remove_current(),
        Err(EraseEnd),
        "The end position can't be erased."
    );

    cursor.insert_before(9);
    drop(cursor);
    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        [2, 3, 4, 9],
        "Inserting before the end should append."
    );

    let mut empty: List<i32> = List::new();
    let mut cursor = empty.cursor_front();
    assert!(cursor.is_end(), "An empty list's cursor starts on the end.");
    cursor.insert_after(5);
    assert_eq!(cursor.peek_next(), Some(&5));

    if let Some(value) = cursor.current_mut() {
        *value += 1;
    }
    assert_eq!(cursor.current(), None, "The end holds no mutable value either.");
}

#[test]
fn test_iterators() {
    let list: List<_> = (0..5).collect();

    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
    assert_eq!(
        list.iter().rev().copied().collect::<Vec<_>>(),
        [4, 3, 2, 1, 0]
    );
    assert_eq!(list.iter().len(), 5);

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&4));
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.next(), Some(&2));
    assert_eq!(iter.next(), None, "The two ends should meet exactly once.");
    assert_eq!(iter.next_back(), None);

    let mut list = list;
    for value in list.iter_mut() {
        *value *= 10;
    }
    assert_eq!(
        list.into_iter().collect::<Vec<_>>(),
        [0, 10, 20, 30, 40]
    );

    let list: List<_> = (0..4).collect();
    assert_eq!(list.into_iter().rev().collect::<Vec<_>>(), [3, 2, 1, 0]);
}

#[test]
fn test_drop_accounting() {
    let counter = CountedDrop::new(0);

    let list: List<_> = iter::repeat_with(|| counter.clone()).take(8).collect();
    drop(list);
    assert_eq!(counter.take(), 8, "Dropping the list should drop every element.");

    let mut list: List<_> = iter::repeat_with(|| counter.clone()).take(5).collect();
    drop(list.pop_front());
    drop(list.pop_back());
    assert_eq!(counter.take(), 2);

    list.clear();
    assert_eq!(counter.take(), 3, "Clearing should drop the remaining elements.");
    assert!(list.is_empty());

    list.push_back(counter.clone());
    drop(list);
    assert_eq!(counter.take(), 1, "A cleared list should still clean up new elements.");

    let list: List<_> = iter::repeat_with(|| counter.clone()).take(4).collect();
    let mut iter = list.into_iter();
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
fn test_equality_and_format() {
    let a: List<_> = [1, 2, 3].into_iter().collect();
    let mut b = List::new();
    b.extend([1, 2, 3]);

    assert_eq!(a, b, "Different construction methods should produce equal lists.");
    assert_eq!(a, a.clone(), "A clone should compare equal to its source.");
    assert_ne!(a, [1, 2].into_iter().collect());
    assert_ne!(a, [1, 2, 4].into_iter().collect());

    assert!(a.contains(&2));
    assert!(!a.contains(&9));

    assert_eq!(format!("{a}"), "(1) -> (2) -> (3)");
}
