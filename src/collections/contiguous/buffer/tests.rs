#![cfg(test)]

use std::iter;

use super::*;
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_insert_remove_flavors() {
    let mut buf = Buffer::<u32>::new();

    buf.push(4);
    buf.push(3);
    assert_eq!(*buf, [4, 3], "push should append in order.");

    buf.insert_ordered(0, 1);
    assert_eq!(*buf, [1, 4, 3], "insert_ordered should shift following elements back.");

    buf.insert_unordered(0, 2);
    assert_eq!(
        *buf,
        [2, 4, 3, 1],
        "insert_unordered should move the displaced element to the tail."
    );

    let mut unordered = buf.clone();
    assert_eq!(unordered.remove_unordered(0), Some(2));
    assert_eq!(
        *unordered,
        [1, 4, 3],
        "remove_unordered at the front should move the last element into the gap."
    );

    assert_eq!(buf.remove_ordered(0), Some(2));
    assert_eq!(*buf, [4, 3, 1], "remove_ordered should shift following elements forward.");

    assert_eq!(buf.remove_unordered(0), Some(4));
    assert_eq!(*buf, [1, 3], "remove_unordered should fill the gap with the last element.");

    assert_eq!(buf.pop(), Some(3));
    assert_eq!(*buf, [1], "pop should remove the last element.");

    buf.insert_array(0, [2, 3]);
    assert_eq!(*buf, [2, 3, 1], "insert_array should keep the inserted items in order.");

    buf.push_array([4, 5, 6]);
    assert_eq!(*buf, [2, 3, 1, 4, 5, 6], "push_array should append all items in order.");

    assert_eq!(buf.len(), 6);
}

#[test]
fn test_removal_matches_slot() {
    let mut buf = Buffer::from_iter(0_u32..20);

    for index in [7, 0, 100, 3, 12] {
        let len = buf.len();
        let expected = buf[cmp_index(index, len)];

        assert_eq!(buf.remove_ordered(index), Some(expected));
        assert_eq!(buf.len(), len - 1, "Removal should decrease the length by exactly one.");

        let len = buf.len();
        let expected = buf[cmp_index(index, len)];

        assert_eq!(buf.remove_unordered(index), Some(expected));
        assert_eq!(buf.len(), len - 1, "Removal should decrease the length by exactly one.");
    }
}

fn cmp_index(index: usize, len: usize) -> usize {
    index.min(len - 1)
}

#[test]
fn test_index_clamping() {
    let mut buf = Buffer::from_iter([1_u8, 2]);

    buf.insert_ordered(50, 3);
    buf.insert_unordered(50, 4);
    buf.insert_array(50, [5, 6]);
    assert_eq!(*buf, [1, 2, 3, 4, 5, 6], "Indices past the end should clamp to len.");

    assert_eq!(buf.remove_ordered(50), Some(6), "Indices past the end should clamp to len - 1.");
    assert_eq!(buf.remove_unordered(50), Some(5));

    let mut empty = Buffer::<u8>::new();
    assert_eq!(empty.remove_ordered(0), None, "Removing from an empty Buffer should give None.");
    assert_eq!(empty.remove_unordered(3), None);
    assert_eq!(empty.pop(), None);
}

#[test]
fn test_ordered_insert_preserves_order() {
    let mut buf = Buffer::from_iter(0_u32..10);
    buf.insert_ordered(4, 100);

    let others: Buffer<_> = buf.iter().copied().filter(|v| *v != 100).collect();
    assert_eq!(*others, *Buffer::from_iter(0_u32..10), "Untouched elements should stay in order.");
    assert_eq!(buf[4], 100);
}

#[test]
fn test_growth_and_shrink_policy() {
    let mut buf = Buffer::<u64>::with_start_cap(4);
    assert_eq!(buf.cap(), 4, "The starting capacity should be allocated up front.");

    buf.push_array(0..4);
    assert_eq!(buf.cap(), 4, "A full Buffer shouldn't grow until another push.");

    buf.push(4);
    assert_eq!(buf.cap(), 8, "Pushing into a full Buffer should double the capacity.");

    buf.pop();
    assert_eq!(buf.cap(), 8, "A single removal after growing shouldn't shrink straight away.");

    buf.pop();
    assert_eq!(
        buf.cap(),
        4,
        "Removing at half occupancy should halve the capacity."
    );
    assert_eq!(*buf, [0, 1, 2]);

    buf.pop();
    buf.pop();
    buf.pop();
    assert_eq!(buf.cap(), 4, "Capacity should never drop below the starting capacity.");
    assert!(buf.is_empty());
}

#[test]
fn test_capacity_invariants_under_mixed_use() {
    let mut buf = Buffer::<usize>::new();

    for round in 0..200 {
        if round % 3 == 2 {
            buf.remove_ordered(round);
        } else if round % 5 == 0 {
            buf.insert_unordered(round / 2, round);
        } else {
            buf.insert_ordered(round / 3, round);
        }
        assert!(buf.cap() >= buf.len(), "Capacity should always cover the length.");
        assert!(buf.cap() >= buf.start_cap(), "Capacity should never drop below the start.");
    }

    while buf.pop().is_some() {
        assert!(buf.cap() >= buf.len());
        assert!(buf.cap() >= buf.start_cap());
    }
    assert_eq!(buf.cap(), 8, "An emptied Buffer should be back at its starting capacity.");
}

#[test]
fn test_start_cap_precondition() {
    assert_panics!({
        let _ = Buffer::<u8>::with_start_cap(0);
    });
    assert_panics!({
        let _ = Buffer::<u8>::try_with_start_cap(0);
    });
}

#[test]
fn test_try_with_start_cap() {
    let buf = Buffer::<u8>::try_with_start_cap(16).expect("16 bytes should be allocatable");
    assert_eq!(buf.cap(), 16);

    assert!(
        Buffer::<u64>::try_with_start_cap(usize::MAX).is_err(),
        "An oversized layout should be reported rather than panicking."
    );
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new();
    let mut buf = Buffer::from_iter(iter::repeat_with(|| counter.clone()).take(10));

    drop(buf.remove_ordered(3));
    drop(buf.remove_unordered(0));
    drop(buf.pop());
    assert_eq!(counter.drops(), 3, "Removed elements should be dropped by their new owner.");

    drop(buf);
    assert_eq!(counter.drops(), 10, "Dropping the Buffer should drop each remaining element.");

    let counter = CountedDrop::new();
    let mut buf = Buffer::from_iter(iter::repeat_with(|| counter.clone()).take(20));
    buf.clear();
    assert_eq!(counter.drops(), 20, "Clearing should drop every element.");
    assert_eq!(buf.cap(), buf.start_cap(), "Clearing should return to the starting capacity.");
}

#[test]
fn test_zst_support() {
    let mut buf = Buffer::<ZeroSizedType>::new();
    let old_ptr = buf.raw.ptr;

    for _ in 0..100 {
        buf.push(ZeroSizedType);
    }
    assert_eq!(buf.len(), 100);
    assert_eq!(buf.raw.ptr, old_ptr, "Pointer shouldn't change when growing for a ZST.");

    assert_eq!(buf.remove_ordered(5), Some(ZeroSizedType));
    assert_eq!(buf.into_iter().count(), 99);
}

#[test]
fn test_iterators() {
    let mut buf = Buffer::from_iter(0_usize..5);

    for value in &mut buf {
        *value *= 2;
    }
    assert_eq!(*buf, [0, 2, 4, 6, 8], "Buffer mutated by iterator should equal this slice.");

    assert_eq!(
        buf,
        Buffer::from_iter(buf.clone()),
        "Cloned and collected Buffer should be equal."
    );

    let mut iter = buf.into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.next_back(), Some(6));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), None);

    let counter = CountedDrop::new();
    let buf = Buffer::from_iter(iter::repeat_with(|| counter.clone()).take(10));
    let mut iter = buf.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(counter.drops(), 10, "Dropping an owned iterator should drop all elements.");
}

#[test]
fn test_clone_keeps_policy() {
    let mut buf = Buffer::with_start_cap(2);
    buf.push_array([1, 2, 3]);

    let clone = buf.clone();
    assert_eq!(clone, buf);
    assert_eq!(clone.cap(), buf.cap());
    assert_eq!(clone.start_cap(), 2, "Clones should share the starting capacity.");
}
