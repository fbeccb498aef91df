use std::alloc::{self, Layout};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cursor::Cursor;
use crate::error::ListError;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::node::{Link, Node, Pointer};

/// Source of node tokens, shared by every list in the process. A freed
/// node's address can be handed out again, to this list or any other; a
/// token that is never reissued anywhere keeps the `(pointer, token)`
/// registry key unambiguous across that reuse.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(0);

fn mint_token() -> u64 {
    NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
}

/// An opaque handle to one node of a [`List`].
///
/// Handles are issued by insertion operations and by cursors, and are passed
/// back into the owning list to request O(1) splices at that position. A
/// handle never owns its node: removing the node (or dropping the list)
/// invalidates the handle, and the list rejects invalidated or foreign
/// handles with [`ListError::InvalidHandle`] instead of touching freed
/// memory.
pub struct Handle<T> {
    pub(crate) ptr: Pointer<T>,
    pub(crate) token: u64,
}

impl<T> Handle<T> {
    /// The registry key identifying this handle's node.
    pub(crate) fn key(&self) -> (*const Node<T>, u64) {
        (self.ptr.as_ptr().cast_const(), self.token)
    }
}

// Manual impls: derives would demand `T: Clone` and friends, which a
// non-owning handle does not need.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// A doubly linked list over raw node pointers.
///
/// The list owns every node reachable from `start`; the `prev`/`next` links
/// themselves are non-owning, so a node being referenced from both neighbors
/// never constitutes shared ownership. All structural mutation goes through
/// the list, which keeps both link directions consistent, the length exact,
/// and the registry of live nodes current.
pub struct List<T> {
    pub(crate) start: Link<T>,
    pub(crate) end: Link<T>,
    pub(crate) len: usize,
    /// Live `(node, token)` pairs. Membership is what makes stale, foreign
    /// and address-reused handles detectable without dereferencing them.
    live: HashSet<(*const Node<T>, u64)>,
}

impl<T> List<T> {
    /// Creates a new empty doubly linked list
    #[must_use]
    pub fn new() -> Self {
        List {
            start: None,
            end: None,
            len: 0,
            live: HashSet::new(),
        }
    }

    /// Returns the number of elements in the list
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a handle to the first node, or `None` if the list is empty
    pub fn front(&self) -> Option<Handle<T>> {
        // SAFETY: `start` is either absent or a live node of this list.
        self.start.map(|node| unsafe { self.handle_of(node) })
    }

    /// Returns a handle to the last node, or `None` if the list is empty
    pub fn back(&self) -> Option<Handle<T>> {
        // SAFETY: `end` is either absent or a live node of this list.
        self.end.map(|node| unsafe { self.handle_of(node) })
    }

    /// Returns true if the handle refers to a live node of this list
    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.live.contains(&handle.key())
    }

    /// Returns a reference to the element behind the handle, or `None` if
    /// the handle is stale or foreign
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if !self.contains(handle) {
            return None;
        }
        // SAFETY: the registry vouches that `handle.ptr` is a live node
        // owned by this list.
        unsafe { Some(&(*handle.ptr.as_ptr()).data) }
    }

    /// Returns a mutable reference to the element behind the handle, or
    /// `None` if the handle is stale or foreign
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if !self.contains(handle) {
            return None;
        }
        // SAFETY: same as `Self::get`; `&mut self` excludes other accesses.
        unsafe { Some(&mut (*handle.ptr.as_ptr()).data) }
    }

    /// Adds an element to the front of the list and returns a handle to the
    /// new node
    pub fn push_front(&mut self, value: T) -> Result<Handle<T>, ListError> {
        let token = mint_token();
        let node = Node::allocate(value, token, None, self.start)?;
        // SAFETY: `start` is either absent or a live node of this list.
        unsafe {
            match self.start {
                Some(old_start) => (*old_start.as_ptr()).prev = Some(node),
                // Empty list: the new node is also the last one.
                None => self.end = Some(node),
            }
        }
        self.start = Some(node);
        self.register(node, token);
        Ok(Handle { ptr: node, token })
    }

    /// Adds an element to the back of the list and returns a handle to the
    /// new node
    pub fn push_back(&mut self, value: T) -> Result<Handle<T>, ListError> {
        let token = mint_token();
        let node = Node::allocate(value, token, self.end, None)?;
        // SAFETY: `end` is either absent or a live node of this list.
        unsafe {
            match self.end {
                Some(old_end) => (*old_end.as_ptr()).next = Some(node),
                // Empty list: the new node is also the first one.
                None => self.start = Some(node),
            }
        }
        self.end = Some(node);
        self.register(node, token);
        Ok(Handle { ptr: node, token })
    }

    /// Splices a new element between the anchor's node and its successor and
    /// returns a handle to the new node
    ///
    /// The anchor is validated before anything is allocated, so a failing
    /// call leaves the list untouched.
    pub fn insert_after(&mut self, anchor: Handle<T>, value: T) -> Result<Handle<T>, ListError> {
        if self.is_empty() {
            return Err(ListError::EmptyAnchor);
        }
        let anchor_ptr = self.check(anchor)?;
        // SAFETY: `check` vouches for `anchor_ptr`; a live node's neighbors
        // are live nodes of the same list.
        let after = unsafe { (*anchor_ptr.as_ptr()).next };
        let token = mint_token();
        let node = Node::allocate(value, token, Some(anchor_ptr), after)?;
        unsafe {
            (*anchor_ptr.as_ptr()).next = Some(node);
            match after {
                Some(after) => (*after.as_ptr()).prev = Some(node),
                // Anchor was the last node.
                None => self.end = Some(node),
            }
        }
        self.register(node, token);
        Ok(Handle { ptr: node, token })
    }

    /// Splices a new element between the anchor's node and its predecessor
    /// and returns a handle to the new node
    ///
    /// The anchor is validated before anything is allocated, so a failing
    /// call leaves the list untouched.
    pub fn insert_before(&mut self, anchor: Handle<T>, value: T) -> Result<Handle<T>, ListError> {
        if self.is_empty() {
            return Err(ListError::EmptyAnchor);
        }
        let anchor_ptr = self.check(anchor)?;
        // SAFETY: same as `Self::insert_after`, mirrored.
        let before = unsafe { (*anchor_ptr.as_ptr()).prev };
        let token = mint_token();
        let node = Node::allocate(value, token, before, Some(anchor_ptr))?;
        unsafe {
            (*anchor_ptr.as_ptr()).prev = Some(node);
            match before {
                Some(before) => (*before.as_ptr()).next = Some(node),
                // Anchor was the first node.
                None => self.start = Some(node),
            }
        }
        self.register(node, token);
        Ok(Handle { ptr: node, token })
    }

    /// Unlinks the handle's node and returns its element by ownership
    /// transfer
    ///
    /// The handle (and every copy of it) is invalidated; further use is
    /// answered with [`ListError::InvalidHandle`].
    pub fn remove(&mut self, handle: Handle<T>) -> Result<T, ListError> {
        let ptr = self.check(handle)?;
        // SAFETY: `check` vouches for `ptr`.
        Ok(unsafe { self.remove_node(ptr) })
    }

    /// Removes and returns the element at the front of the list, or `None`
    /// if the list is empty
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.start?;
        // SAFETY: `start` always points at a live node of this list.
        Some(unsafe { self.remove_node(first) })
    }

    /// Removes and returns the element at the back of the list, or `None`
    /// if the list is empty
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.end?;
        // SAFETY: `end` always points at a live node of this list.
        Some(unsafe { self.remove_node(last) })
    }

    /// Removes all elements from the list
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Returns a borrowing, double-ended iterator over the elements
    pub fn iter(&self) -> Iter<'_, T> {
        // SAFETY: the chain is valid and `Iter` borrows the list, so no
        // splice can happen while the iterator is alive.
        unsafe { Iter::new(self.start, self.end, self.len) }
    }

    /// Returns a mutable, double-ended iterator over the elements
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        // SAFETY: same as `Self::iter`; `&mut self` excludes all other
        // access paths.
        unsafe { IterMut::new(self.start, self.end, self.len) }
    }

    /// Returns a cursor parked on the first node
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self.start, self)
    }

    /// Returns a cursor parked on the last node
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor::new(self.end, self)
    }

    /// Builds a handle for a node known to be live.
    ///
    /// # Safety
    /// `ptr` must be a live node owned by this list.
    pub(crate) unsafe fn handle_of(&self, ptr: Pointer<T>) -> Handle<T> {
        // SAFETY: delegated to the caller.
        let token = unsafe { (*ptr.as_ptr()).token };
        Handle { ptr, token }
    }

    /// Resolves a handle against the live-node registry.
    fn check(&self, handle: Handle<T>) -> Result<Pointer<T>, ListError> {
        if self.contains(handle) {
            Ok(handle.ptr)
        } else {
            Err(ListError::InvalidHandle)
        }
    }

    fn register(&mut self, node: Pointer<T>, token: u64) {
        self.live.insert((node.as_ptr().cast_const(), token));
        self.len += 1;
    }

    /// Unlinks one node, frees it, and returns its element.
    ///
    /// # Safety
    /// `ptr` must be a live node owned by this list.
    unsafe fn remove_node(&mut self, ptr: Pointer<T>) -> T {
        // SAFETY: a live node's neighbors are live nodes of the same list.
        unsafe {
            let token = (*ptr.as_ptr()).token;
            let before = (*ptr.as_ptr()).prev;
            let after = (*ptr.as_ptr()).next;

            match (before, after) {
                // The only node.
                (None, None) => {
                    self.start = None;
                    self.end = None;
                }
                // Last node: the predecessor becomes the end.
                (Some(before), None) => {
                    (*before.as_ptr()).next = None;
                    self.end = Some(before);
                }
                // First node: the successor becomes the start.
                (None, Some(after)) => {
                    (*after.as_ptr()).prev = None;
                    self.start = Some(after);
                }
                // Interior node: connect the neighbors directly.
                (Some(before), Some(after)) => {
                    (*before.as_ptr()).next = Some(after);
                    (*after.as_ptr()).prev = Some(before);
                }
            }

            self.live.remove(&(ptr.as_ptr().cast_const(), token));
            self.len -= 1;
            Node::release(ptr)
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        // Iterative teardown; recursing through `next` would grow the call
        // stack to depth `len`.
        while self.pop_front().is_some() {}
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            // No error channel in this trait; allocator failure here is
            // terminal the way it is for the std collections.
            if self.push_back(item).is_err() {
                alloc::handle_alloc_error(Layout::new::<Node<T>>());
            }
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for List<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}
