use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::ListError;

/// A raw pointer to a live node.
pub(crate) type Pointer<T> = NonNull<Node<T>>;

/// An optional neighbor link. `None` uniformly marks "no previous node",
/// "no next node" and "empty list"; there is no sentinel node kind.
pub(crate) type Link<T> = Option<Pointer<T>>;

/// A node in the doubly linked list
pub(crate) struct Node<T> {
    pub(crate) data: T,
    /// Minted once at insertion and never reused by the owning list.
    pub(crate) token: u64,
    pub(crate) prev: Link<T>,
    pub(crate) next: Link<T>,
}

impl<T> Node<T> {
    /// Heap-allocates a node, surfacing allocator failure to the caller
    /// instead of aborting. On `Err` nothing has been allocated and `data`
    /// is dropped.
    pub(crate) fn allocate(
        data: T,
        token: u64,
        prev: Link<T>,
        next: Link<T>,
    ) -> Result<Pointer<T>, ListError> {
        // The two link words keep the layout non-zero-sized even when T is.
        let layout = Layout::new::<Node<T>>();
        let raw = unsafe { alloc::alloc(layout) }.cast::<Node<T>>();
        let Some(ptr) = NonNull::new(raw) else {
            return Err(ListError::AllocationFailed);
        };
        unsafe {
            ptr.as_ptr().write(Node {
                data,
                token,
                prev,
                next,
            });
        }
        Ok(ptr)
    }

    /// Frees the node and hands back its element.
    ///
    /// # Safety
    /// `ptr` must have come from [`Node::allocate`] and must not have been
    /// released already.
    pub(crate) unsafe fn release(ptr: Pointer<T>) -> T {
        // The allocation came from the global allocator with the layout of
        // `Node<T>`, so it can be reboxed; the box deallocates at end of scope.
        let reboxed = unsafe { Box::from_raw(ptr.as_ptr()) };
        reboxed.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let ptr = Node::allocate(String::from("abc"), 7, None, None).unwrap();
        unsafe {
            assert_eq!((*ptr.as_ptr()).data, "abc");
            assert_eq!((*ptr.as_ptr()).token, 7);
            assert!((*ptr.as_ptr()).prev.is_none());
            assert!((*ptr.as_ptr()).next.is_none());
            assert_eq!(Node::release(ptr), "abc");
        }
    }

    #[test]
    fn test_zero_sized_element() {
        let ptr = Node::<()>::allocate((), 0, None, None).unwrap();
        unsafe {
            let _ = Node::release(ptr);
        }
    }
}
