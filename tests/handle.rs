mod common;

use common::DropCounter;
use dlist::{List, ListError};

#[test]
fn test_removed_handle_is_invalidated() {
    let mut list = List::new();
    list.push_back(1).unwrap();
    let handle = list.push_back(2).unwrap();
    list.push_back(3).unwrap();

    assert_eq!(list.remove(handle), Ok(2));

    // Every further use of the handle is rejected, not silently absorbed.
    assert_eq!(list.remove(handle), Err(ListError::InvalidHandle));
    assert_eq!(list.insert_after(handle, 9), Err(ListError::InvalidHandle));
    assert_eq!(list.insert_before(handle, 9), Err(ListError::InvalidHandle));
    assert_eq!(list.get(handle), None);
    assert!(!list.contains(handle));

    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(list.len(), 2);
}

#[test]
fn test_pop_invalidates_end_handles() {
    let mut list = List::new();
    let first = list.push_back(1).unwrap();
    let last = list.push_back(2).unwrap();

    list.pop_front();
    list.pop_back();

    assert_eq!(list.remove(first), Err(ListError::InvalidHandle));
    assert_eq!(list.remove(last), Err(ListError::InvalidHandle));
    assert!(list.is_empty());
}

#[test]
fn test_foreign_handle_is_rejected() {
    let mut list = List::new();
    list.push_back(1).unwrap();
    let mut other = List::new();
    let foreign = other.push_back(10).unwrap();

    assert_eq!(list.remove(foreign), Err(ListError::InvalidHandle));
    assert_eq!(list.insert_after(foreign, 9), Err(ListError::InvalidHandle));
    assert_eq!(list.get(foreign), None);

    // Both lists untouched; the foreign handle still works at home.
    assert_eq!(list.len(), 1);
    assert_eq!(other.get(foreign), Some(&10));
}

#[test]
fn test_anchor_insert_on_empty_list_is_rejected() {
    let mut list = List::new();
    let handle = list.push_back(1).unwrap();
    list.pop_front();

    assert_eq!(list.insert_after(handle, 2), Err(ListError::EmptyAnchor));
    assert_eq!(list.insert_before(handle, 2), Err(ListError::EmptyAnchor));
    assert!(list.is_empty());

    // Only end pushes can populate an empty list.
    list.push_back(2).unwrap();
    assert_eq!(list.len(), 1);
}

#[test]
fn test_stale_handle_survives_address_reuse() {
    let mut list = List::new();
    let stale = list.push_back(0).unwrap();
    assert_eq!(list.remove(stale), Ok(0));

    // Churn the allocator so the freed node's address is likely handed out
    // again; the stale handle must stay invalid either way.
    for round in 0..64 {
        let fresh = list.push_back(round).unwrap();
        assert_eq!(list.remove(stale), Err(ListError::InvalidHandle));
        assert_eq!(list.remove(fresh), Ok(round));
    }
    assert!(list.is_empty());
}

#[test]
fn test_stale_handle_from_dropped_list_rejected_elsewhere() {
    let mut old = List::new();
    let stale = old.push_back(1).unwrap();
    drop(old);

    // A fresh list's first allocation tends to reuse the freed node's
    // address. Tokens are never reissued anywhere in the process, so the
    // stale handle must be rejected here no matter whose address it wears.
    let mut list = List::new();
    for round in 0..64 {
        let fresh = list.push_back(round).unwrap();

        assert!(!list.contains(stale));
        assert_eq!(list.get(stale), None);
        assert_eq!(list.remove(stale), Err(ListError::InvalidHandle));
        assert_eq!(list.insert_after(stale, 9), Err(ListError::InvalidHandle));

        assert_eq!(list.remove(fresh), Ok(round));
    }
    assert!(list.is_empty());
}

#[test]
fn test_stale_handle_from_drained_list_rejected_elsewhere() {
    // Same reuse pattern, but the issuing list stays alive.
    let mut source = List::new();
    let stale = source.push_back(1).unwrap();
    assert_eq!(source.remove(stale), Ok(1));

    let mut other = List::new();
    for round in 0..64 {
        let fresh = other.push_back(round).unwrap();

        assert!(!other.contains(stale));
        assert!(!source.contains(stale));
        assert_eq!(other.remove(stale), Err(ListError::InvalidHandle));

        assert_eq!(other.remove(fresh), Ok(round));
    }
}

#[test]
fn test_handles_survive_unrelated_operations() {
    let mut list = List::new();
    let kept = list.push_back(0).unwrap();

    for i in 1..50 {
        list.push_front(i).unwrap();
        list.push_back(-i).unwrap();
    }
    list.pop_front();
    list.pop_back();

    assert_eq!(list.get(kept), Some(&0));
    assert_eq!(list.remove(kept), Ok(0));
}

#[test]
fn test_failed_operations_drop_nothing() {
    let counter = DropCounter::new();

    let mut list = List::new();
    list.push_back(counter.probe()).unwrap();
    let handle = list.push_back(counter.probe()).unwrap();

    let removed = list.remove(handle).unwrap();
    assert_eq!(counter.dropped(), 0);
    drop(removed);
    assert_eq!(counter.dropped(), 1);

    // A rejected removal must not touch any live element.
    assert!(list.remove(handle).is_err());
    assert_eq!(counter.dropped(), 1);
    assert_eq!(list.len(), 1);
}

#[test]
fn test_handles_are_copy_and_comparable() {
    let mut list = List::new();
    let handle = list.push_back(1).unwrap();
    let copy = handle;

    assert_eq!(handle, copy);
    assert_eq!(list.front(), Some(copy));

    // Invalidating one copy invalidates them all.
    assert_eq!(list.remove(handle), Ok(1));
    assert_eq!(list.remove(copy), Err(ListError::InvalidHandle));
}
