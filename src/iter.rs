//! Forward and backward traversal over a list.
//!
//! Both borrowing iterators keep a pair of running pointers, one per
//! direction, plus a count of elements not yet yielded. One step of
//! iteration yields the pointee of the running pointer for the requested
//! direction and advances that pointer; once the count reaches zero the two
//! pointers have met and the iterator is exhausted. Traversal never mutates
//! the chain, and because it borrows the list, the chain cannot be spliced
//! while an iterator is outstanding.

use std::marker::PhantomData;

use crate::list::List;
use crate::node::Link;

enum Direction {
    Forward,
    Backward,
}

/// Borrowing iterator over a list's elements, front to back (or back to
/// front via [`DoubleEndedIterator`]).
pub struct Iter<'list, T: 'list> {
    forward: Link<T>,
    backward: Link<T>,
    remaining: usize,
    _bound_to_list: PhantomData<&'list T>,
}

impl<'list, T: 'list> Iter<'list, T> {
    /// # Safety
    ///
    /// `forward` and `backward` must be the start and end of a valid chain
    /// of `remaining` nodes that outlives `'list` and is not mutated while
    /// the iterator exists.
    pub(crate) unsafe fn new(forward: Link<T>, backward: Link<T>, remaining: usize) -> Self {
        Self {
            forward,
            backward,
            remaining,
            _bound_to_list: PhantomData,
        }
    }

    fn next_in_dir(&mut self, direction: Direction) -> Option<&'list T> {
        if self.remaining == 0 {
            return None;
        }

        let node = match direction {
            Direction::Forward => {
                // SAFETY: Delegated to the contract of `Self::new`.
                let node = unsafe { self.forward?.as_ref() };
                self.forward = node.next;
                node
            }
            Direction::Backward => {
                // SAFETY: Delegated to the contract of `Self::new`.
                let node = unsafe { self.backward?.as_ref() };
                self.backward = node.prev;
                node
            }
        };

        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<'list, T: 'list> Iterator for Iter<'list, T> {
    type Item = &'list T;

    fn next(&mut self) -> Option<&'list T> {
        self.next_in_dir(Direction::Forward)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'list, T: 'list> DoubleEndedIterator for Iter<'list, T> {
    fn next_back(&mut self) -> Option<&'list T> {
        self.next_in_dir(Direction::Backward)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutable borrowing iterator over a list's elements.
pub struct IterMut<'list, T: 'list> {
    forward: Link<T>,
    backward: Link<T>,
    remaining: usize,
    _bound_to_list: PhantomData<&'list mut T>,
}

impl<'list, T: 'list> IterMut<'list, T> {
    /// # Safety
    ///
    /// Same as [`Iter::new`], and additionally the chain must not be
    /// aliased for the duration of `'list`.
    pub(crate) unsafe fn new(forward: Link<T>, backward: Link<T>, remaining: usize) -> Self {
        Self {
            forward,
            backward,
            remaining,
            _bound_to_list: PhantomData,
        }
    }

    fn next_in_dir(&mut self, direction: Direction) -> Option<&'list mut T> {
        if self.remaining == 0 {
            return None;
        }

        let node = match direction {
            Direction::Forward => {
                let mut ptr = self.forward?;
                // SAFETY: Delegated to the contract of `Self::new`.
                let node = unsafe { ptr.as_mut() };
                self.forward = node.next;
                node
            }
            Direction::Backward => {
                let mut ptr = self.backward?;
                // SAFETY: Delegated to the contract of `Self::new`.
                let node = unsafe { ptr.as_mut() };
                self.backward = node.prev;
                node
            }
        };

        self.remaining -= 1;
        Some(&mut node.data)
    }
}

impl<'list, T: 'list> Iterator for IterMut<'list, T> {
    type Item = &'list mut T;

    fn next(&mut self) -> Option<&'list mut T> {
        self.next_in_dir(Direction::Forward)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'list, T: 'list> DoubleEndedIterator for IterMut<'list, T> {
    fn next_back(&mut self) -> Option<&'list mut T> {
        self.next_in_dir(Direction::Backward)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator that drains the list from the front (or from the back
/// via [`DoubleEndedIterator`]).
pub struct IntoIter<T>(List<T>);

impl<T> IntoIter<T> {
    pub(crate) fn new(list: List<T>) -> Self {
        IntoIter(list)
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
