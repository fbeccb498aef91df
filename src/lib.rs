//! A single threaded doubly linked list with O(1) handle-addressed
//! insertion and removal.
//!
//! [`List`] owns a chain of heap-allocated nodes and hands out opaque,
//! copyable [`Handle`]s from its insertion operations and from [`Cursor`]s.
//! Passing a handle back into the owning list splices at that position in
//! O(1), without ever scanning from an end. Absent neighbors and the empty
//! list are all modeled by one nullable link type; there are no sentinel
//! nodes.
//!
//! Stale handles (whose node was removed), handles issued by another list,
//! and anchor-relative insertions into an empty list are detected and
//! answered with a [`ListError`] instead of corrupting the chain. A failing
//! call leaves the list exactly as it was.
//!
//! The structure is single-owner and provides no internal synchronization.
//!
//! ```
//! use dlist::List;
//!
//! let mut list = List::new();
//! let one = list.push_back(1).unwrap();
//! list.push_back(2).unwrap();
//! list.push_front(0).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//!
//! let spliced = list.insert_after(one, 99).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 99, 2]);
//!
//! assert_eq!(list.remove(spliced), Ok(99));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//! assert_eq!(list.remove(spliced), Err(dlist::ListError::InvalidHandle));
//! ```

pub mod cursor;
pub mod error;
pub mod iter;
pub mod list;
mod node;

pub use cursor::Cursor;
pub use error::ListError;
pub use iter::{IntoIter, Iter, IterMut};
pub use list::{Handle, List};
