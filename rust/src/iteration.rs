//! Iterator and cursor implementations for RbTree.
//!
//! This module contains the borrowing iterators (`Iter`, `Range`), the
//! consuming `IntoIter` and the two cursors. All of them step with the same
//! in-order successor/predecessor routines as the handle API.

use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use crate::compare::TreeCompare;
use crate::types::{Handle, RbTree, END_NODE, NodeId};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// In-order iterator over the elements of an [`RbTree`].
///
/// Reverse iteration (`rbegin`..`rend`) is `iter().rev()`.
pub struct Iter<'a, T, C> {
    tree: &'a RbTree<T, C>,
    front: NodeId,
    /// Exclusive back position.
    back: NodeId,
    remaining: usize,
}

/// In-order iterator over a half-open span of positions.
pub struct Range<'a, T, C> {
    tree: &'a RbTree<T, C>,
    front: NodeId,
    /// Exclusive back position.
    back: NodeId,
}

/// Owning in-order iterator.
pub struct IntoIter<T, C> {
    tree: RbTree<T, C>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

impl<T, C> RbTree<T, C> {
    /// Iterate over the elements in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RbTree;
    ///
    /// let tree: RbTree<i32> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            tree: self,
            front: self.begin,
            back: END_NODE,
            remaining: self.len,
        }
    }

    /// Iterate over the positions `[first, last)`.
    ///
    /// `last` must be reachable from `first`; otherwise forward iteration
    /// runs to the end and reverse iteration runs to the beginning. Stale
    /// handles yield an empty range.
    pub fn range_between(&self, first: Handle, last: Handle) -> Range<'_, T, C> {
        if !self.is_valid(first) || !self.is_valid(last) {
            return Range {
                tree: self,
                front: END_NODE,
                back: END_NODE,
            };
        }
        Range {
            tree: self,
            front: first.0,
            back: last.0,
        }
    }
}

impl<T, C: TreeCompare<T>> RbTree<T, C> {
    /// Iterate over the elements whose keys fall in `range`.
    ///
    /// An empty or inverted range yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RbTree;
    ///
    /// let tree: RbTree<i32> = (0..10).collect();
    /// let mid: Vec<_> = tree.range(3..6).copied().collect();
    /// assert_eq!(mid, [3, 4, 5]);
    /// let tail: Vec<_> = tree.range((std::ops::Bound::Excluded(7), std::ops::Bound::Unbounded)).copied().collect();
    /// assert_eq!(tail, [8, 9]);
    /// ```
    pub fn range<R>(&self, range: R) -> Range<'_, T, C>
    where
        R: RangeBounds<C::Key>,
    {
        let (front, back) = self.resolve_range_bounds(&range);
        Range {
            tree: self,
            front,
            back,
        }
    }

    /// Resolve range bounds into a half-open pair of positions.
    fn resolve_range_bounds<R>(&self, range: &R) -> (NodeId, NodeId)
    where
        R: RangeBounds<C::Key>,
    {
        let empty = match (range.start_bound(), range.end_bound()) {
            (Bound::Included(s), Bound::Included(e)) => self.compare.less(e, s),
            (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) => {
                !self.compare.less(s, e)
            }
            _ => false,
        };
        if empty {
            return (END_NODE, END_NODE);
        }

        let front = match range.start_bound() {
            Bound::Included(key) => self.lower_bound(key).0,
            Bound::Excluded(key) => self.upper_bound(key).0,
            Bound::Unbounded => self.begin,
        };
        let back = match range.end_bound() {
            Bound::Included(key) => self.upper_bound(key).0,
            Bound::Excluded(key) => self.lower_bound(key).0,
            Bound::Unbounded => END_NODE,
        };
        (front, back)
    }
}

// ============================================================================
// ITERATOR IMPLEMENTATIONS
// ============================================================================

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        self.front = self.tree.next_node(x);
        self.remaining -= 1;
        Some(self.tree.node_value(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.tree.prev_node(self.back);
        self.remaining -= 1;
        Some(self.tree.node_value(self.back))
    }
}

impl<'a, T, C> ExactSizeIterator for Iter<'a, T, C> {}

impl<'a, T, C> FusedIterator for Iter<'a, T, C> {}

impl<'a, T, C> Clone for Iter<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, C> Iterator for Range<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back || self.front == END_NODE {
            return None;
        }
        let x = self.front;
        self.front = self.tree.next_node(x);
        Some(self.tree.node_value(x))
    }
}

impl<'a, T, C> DoubleEndedIterator for Range<'a, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back || self.front == END_NODE || self.back == self.tree.begin {
            return None;
        }
        self.back = self.tree.prev_node(self.back);
        Some(self.tree.node_value(self.back))
    }
}

impl<'a, T, C> FusedIterator for Range<'a, T, C> {}

impl<'a, T, C> Clone for Range<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        // Values are moved out in place; the links stay intact for stepping.
        let x = self.front;
        self.front = self.tree.next_node(x);
        self.remaining -= 1;
        self.tree.nodes[x].value.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.back = self.tree.prev_node(self.back);
        self.remaining -= 1;
        self.tree.nodes[self.back].value.take()
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C> FusedIterator for IntoIter<T, C> {}

impl<T, C> IntoIterator for RbTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> IntoIter<T, C> {
        IntoIter {
            front: self.begin,
            back: END_NODE,
            remaining: self.len,
            tree: self,
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RbTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

// ============================================================================
// CURSORS
// ============================================================================

/// Read-only cursor: a position plus a shared borrow of its tree.
///
/// Moving past either edge lands on the end position, and moving again
/// wraps around to the other edge.
pub struct Cursor<'a, T, C> {
    tree: &'a RbTree<T, C>,
    pos: NodeId,
}

/// Cursor that can modify or remove the element it points at.
///
/// A `CursorMut` converts into a [`Cursor`] but never the other way around.
pub struct CursorMut<'a, T, C> {
    tree: &'a mut RbTree<T, C>,
    pos: NodeId,
}

impl<T, C> RbTree<T, C> {
    /// Cursor at `handle`; a stale handle is placed at the end.
    pub fn cursor(&self, handle: Handle) -> Cursor<'_, T, C> {
        let pos = if self.is_valid(handle) { handle.0 } else { END_NODE };
        Cursor { tree: self, pos }
    }

    /// Mutable cursor at `handle`; a stale handle is placed at the end.
    pub fn cursor_mut(&mut self, handle: Handle) -> CursorMut<'_, T, C> {
        let pos = if self.is_valid(handle) { handle.0 } else { END_NODE };
        CursorMut { tree: self, pos }
    }

    /// Cursor at the first element (the end position when empty).
    pub fn cursor_front(&self) -> Cursor<'_, T, C> {
        self.cursor(self.begin())
    }

    /// Cursor at the last element (the end position when empty).
    pub fn cursor_back(&self) -> Cursor<'_, T, C> {
        self.cursor(self.prev(Handle::END))
    }

    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, C> {
        let h = self.begin();
        self.cursor_mut(h)
    }

    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, C> {
        let h = self.prev(Handle::END);
        self.cursor_mut(h)
    }
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub fn move_next(&mut self) {
        self.pos = self.tree.next_node(self.pos);
    }

    pub fn move_prev(&mut self) {
        self.pos = self.tree.prev_node(self.pos);
    }

    /// Element under the cursor, `None` at the end position.
    pub fn current(&self) -> Option<&'a T> {
        self.tree.value(Handle(self.pos))
    }

    pub fn peek_next(&self) -> Option<&'a T> {
        self.tree.value(Handle(self.tree.next_node(self.pos)))
    }

    pub fn peek_prev(&self) -> Option<&'a T> {
        self.tree.value(Handle(self.tree.prev_node(self.pos)))
    }

    /// Handle of the current position.
    pub fn position(&self) -> Handle {
        Handle(self.pos)
    }

    pub fn is_end(&self) -> bool {
        self.pos == END_NODE
    }
}

impl<'a, T, C> Clone for Cursor<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            pos: self.pos,
        }
    }
}

impl<'a, T, C> CursorMut<'a, T, C> {
    pub fn move_next(&mut self) {
        self.pos = self.tree.next_node(self.pos);
    }

    pub fn move_prev(&mut self) {
        self.pos = self.tree.prev_node(self.pos);
    }

    pub fn current(&self) -> Option<&T> {
        self.tree.value(Handle(self.pos))
    }

    /// Mutable element under the cursor.
    ///
    /// Changing the ordering key through this reference is a logic error.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.tree.value_mut(Handle(self.pos))
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.tree.value(Handle(self.tree.next_node(self.pos)))
    }

    pub fn peek_prev(&self) -> Option<&T> {
        self.tree.value(Handle(self.tree.prev_node(self.pos)))
    }

    pub fn position(&self) -> Handle {
        Handle(self.pos)
    }

    pub fn is_end(&self) -> bool {
        self.pos == END_NODE
    }

    /// Read-only view of this cursor for the duration of the borrow.
    pub fn as_cursor(&self) -> Cursor<'_, T, C> {
        Cursor {
            tree: &*self.tree,
            pos: self.pos,
        }
    }

    /// Give up mutable access and keep the position.
    pub fn into_cursor(self) -> Cursor<'a, T, C> {
        Cursor {
            tree: self.tree,
            pos: self.pos,
        }
    }
}

impl<'a, T, C: TreeCompare<T>> CursorMut<'a, T, C> {
    /// Remove the element under the cursor and move to its successor.
    /// Does nothing at the end position.
    pub fn remove_current(&mut self) -> Option<T> {
        let h = Handle(self.pos);
        let next = self.tree.next(h);
        let value = self.tree.take(h)?;
        self.pos = next.0;
        Some(value)
    }
}

impl<'a, T, C> From<CursorMut<'a, T, C>> for Cursor<'a, T, C> {
    fn from(cursor: CursorMut<'a, T, C>) -> Self {
        cursor.into_cursor()
    }
}

cursor_queries!(find, lower_bound, upper_bound);
