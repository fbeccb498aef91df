//! Cursors into the list, movable back and forth.
//!
//! A cursor points at one node and can step to either neighbor in O(1).
//! Stepping past the last element (or before the first) parks the cursor on
//! a _ghost_ position; while parked there, [`current`] and [`handle`] return
//! `None`, moving forward lands on the **start** of the list, and moving
//! backward lands on the **end**.
//!
//! Unlike an iterator, a cursor can hand out a [`Handle`] to its current
//! node. That is how callers turn a traversal into an O(1) splice: walk to
//! the position once, keep the handle, release the cursor, then pass the
//! handle back into the list.
//!
//! [`current`]: Cursor::current
//! [`handle`]: Cursor::handle

use crate::list::{Handle, List};
use crate::node::Link;

/// A read-only position in a [`List`].
pub struct Cursor<'a, T> {
    node: Link<T>,
    list: &'a List<T>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(node: Link<T>, list: &'a List<T>) -> Self {
        Self { node, list }
    }

    /// Returns a reference to the current element, or `None` on the ghost
    /// position
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: `node` came from the borrowed list, which cannot be
        // spliced while this cursor exists.
        self.node.map(|node| unsafe { &(*node.as_ptr()).data })
    }

    /// Returns a handle to the current node, or `None` on the ghost
    /// position
    pub fn handle(&self) -> Option<Handle<T>> {
        // SAFETY: same as `Self::current`.
        self.node.map(|node| unsafe { self.list.handle_of(node) })
    }

    /// Steps to the next node. From the last node this parks on the ghost
    /// position; from the ghost position it wraps to the start.
    pub fn move_next(&mut self) {
        match self.node {
            None => self.node = self.list.start,
            // SAFETY: same as `Self::current`.
            Some(current) => self.node = unsafe { (*current.as_ptr()).next },
        }
    }

    /// Steps to the previous node. From the first node this parks on the
    /// ghost position; from the ghost position it wraps to the end.
    pub fn move_prev(&mut self) {
        match self.node {
            None => self.node = self.list.end,
            // SAFETY: same as `Self::current`.
            Some(current) => self.node = unsafe { (*current.as_ptr()).prev },
        }
    }
}
