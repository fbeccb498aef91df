mod common;

use common::DropCounter;
use dlist::List;

#[test]
fn test_teardown_releases_every_node_exactly_once() {
    let counter = DropCounter::new();

    let mut list = List::new();
    for _ in 0..100 {
        list.push_back(counter.probe()).unwrap();
    }
    assert_eq!(counter.dropped(), 0);

    drop(list);
    assert_eq!(counter.dropped(), 100);
}

#[test]
fn test_clear_releases_every_node() {
    let counter = DropCounter::new();

    let mut list = List::new();
    for _ in 0..10 {
        list.push_front(counter.probe()).unwrap();
    }

    list.clear();
    assert_eq!(counter.dropped(), 10);
    assert!(list.is_empty());
}

#[test]
fn test_remove_releases_only_the_removed_node() {
    let counter = DropCounter::new();

    let mut list = List::new();
    list.push_back(counter.probe()).unwrap();
    let mid = list.push_back(counter.probe()).unwrap();
    list.push_back(counter.probe()).unwrap();

    drop(list.remove(mid).unwrap());
    assert_eq!(counter.dropped(), 1);

    drop(list);
    assert_eq!(counter.dropped(), 3);
}

#[test]
fn test_partially_consumed_into_iter_releases_the_rest() {
    let counter = DropCounter::new();

    let mut list = List::new();
    for _ in 0..10 {
        list.push_back(counter.probe()).unwrap();
    }

    let mut iter = list.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(counter.dropped(), 2);

    drop(iter);
    assert_eq!(counter.dropped(), 10);
}

#[test]
fn test_teardown_of_long_list_does_not_recurse() {
    // A teardown that recursed through `next` would blow the call stack at
    // this length.
    let mut list = List::new();
    for i in 0..1_000_000u32 {
        list.push_back(i).unwrap();
    }
    assert_eq!(list.len(), 1_000_000);
    drop(list);
}
