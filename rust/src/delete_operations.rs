//! DELETE operations for RbTree.
//!
//! This module contains removal by handle, by key and by range, the popping
//! helpers, `clear` and `swap`. Removing an element frees only that element's
//! node: every other handle stays valid.

use log::{debug, trace};

use crate::compare::TreeCompare;
use crate::error::{ModifyResult, RbTreeError};
use crate::types::{Handle, RbNode, RbTree, END_NODE, NodeId};

impl<T, C: TreeCompare<T>> RbTree<T, C> {
    /// Unlink the live element `x`, free its slot and return its value with
    /// the position that followed it.
    fn unlink(&mut self, x: NodeId) -> (T, NodeId) {
        let next = self.next_node(x);
        if self.begin == x {
            self.begin = next;
        }
        self.len -= 1;
        self.remove_node(x);
        trace!("unlinked node {}, len {}", x, self.len);

        let value = match self.nodes.deallocate(x) {
            Some(RbNode { value: Some(value), .. }) => value,
            _ => unreachable!("node {} was a live element", x),
        };
        self.debug_validate("erase");
        (value, next)
    }

    // ============================================================================
    // ERASE BY POSITION
    // ============================================================================

    /// Remove the element at `handle` and return the position that followed it.
    ///
    /// Returns `None`, leaving the tree alone, for the end position or a
    /// stale handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RbTree;
    ///
    /// let mut tree: RbTree<i32> = (1..=5).collect();
    /// let three = tree.find(&3);
    /// let after = tree.erase(three).unwrap();
    /// assert_eq!(tree.value(after), Some(&4));
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn erase(&mut self, handle: Handle) -> Option<Handle> {
        if !self.is_element(handle.0) {
            return None;
        }
        let (_, next) = self.unlink(handle.0);
        Some(Handle(next))
    }

    /// Remove the element at `handle` and return it.
    pub fn take(&mut self, handle: Handle) -> Option<T> {
        if !self.is_element(handle.0) {
            return None;
        }
        Some(self.unlink(handle.0).0)
    }

    /// Remove `[first, last)` and return `last`.
    ///
    /// Stops early at the end position, so a `last` that does not follow
    /// `first` erases everything from `first` to the end.
    pub fn erase_range(&mut self, mut first: Handle, last: Handle) -> Handle {
        while first != last {
            match self.erase(first) {
                Some(next) => first = next,
                None => break,
            }
        }
        last
    }

    /// Like [`erase`](Self::erase), but reports a bad handle as an error.
    pub fn try_erase(&mut self, handle: Handle) -> ModifyResult<Handle> {
        self.erase(handle)
            .ok_or_else(|| RbTreeError::invalid_handle("try_erase", handle.0))
    }

    // ============================================================================
    // ERASE BY KEY
    // ============================================================================

    /// Remove the element equivalent to `key`, assuming unique keys.
    /// Returns the number of elements removed (0 or 1).
    pub fn erase_key(&mut self, key: &C::Key) -> usize {
        let h = self.find(key);
        usize::from(self.erase(h).is_some())
    }

    /// Remove every element equivalent to `key` and return how many there were.
    pub fn erase_key_multi(&mut self, key: &C::Key) -> usize {
        let before = self.len;
        let (first, last) = self.equal_range_multi(key);
        self.erase_range(first, last);
        before - self.len
    }

    /// Remove the element equivalent to `key` and return it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::{ByFirst, RbTree};
    ///
    /// let mut tree = RbTree::with_comparator(ByFirst);
    /// tree.insert_unique((1, "one"));
    /// assert_eq!(tree.remove(&1), Some((1, "one")));
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &C::Key) -> Option<T> {
        let h = self.find(key);
        self.take(h)
    }

    /// Remove with invariant validation before and after, reporting a
    /// missing key as [`RbTreeError::KeyNotFound`].
    pub fn try_remove(&mut self, key: &C::Key) -> ModifyResult<T> {
        if let Err(e) = self.check_invariants_detailed() {
            return Err(RbTreeError::DataIntegrityError(e));
        }

        let value = self.remove(key).ok_or(RbTreeError::KeyNotFound)?;

        if let Err(e) = self.check_invariants_detailed() {
            return Err(RbTreeError::DataIntegrityError(e));
        }

        Ok(value)
    }

    /// Remove and return the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let h = self.begin();
        self.take(h)
    }

    /// Remove and return the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let h = self.prev(Handle::END);
        self.take(h)
    }
}

impl<T, C> RbTree<T, C> {
    /// Remove every element. Every outstanding handle except the end
    /// position becomes stale.
    pub fn clear(&mut self) {
        debug!("clearing red-black tree with {} elements", self.len);
        self.nodes.clear();
        let end = self.nodes.allocate(RbNode::end());
        debug_assert_eq!(end, END_NODE);
        self.begin = END_NODE;
        self.len = 0;
    }

    /// Exchange the contents of two trees in O(1).
    ///
    /// Handles travel with their elements: a handle into `self` now
    /// addresses the same element inside `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tree: &RbTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn test_erase_returns_successor_and_keeps_other_handles() {
        let mut tree: RbTree<i32> = (1..=9).collect();
        let handles: Vec<Handle> = (1..=9).map(|k| tree.find(&k)).collect();

        let next = tree.erase(handles[4]);
        assert_eq!(next, Some(handles[5]));
        for (k, h) in (1..=9).zip(&handles) {
            if k != 5 {
                assert_eq!(tree.value(*h), Some(&k));
            }
        }
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_erase_begin_and_last() {
        let mut tree: RbTree<i32> = (1..=4).collect();
        let after = tree.erase(tree.begin());
        assert_eq!(after, Some(tree.begin()));
        assert_eq!(tree.first(), Some(&2));

        let last = tree.prev(tree.end());
        assert_eq!(tree.erase(last), Some(Handle::END));
        assert_eq!(keys(&tree), [2, 3]);
    }

    #[test]
    fn test_erase_end_or_stale_is_noop() {
        let mut tree: RbTree<i32> = (1..=3).collect();
        assert_eq!(tree.erase(Handle::END), None);
        let h = tree.find(&2);
        tree.erase(h);
        assert_eq!(tree.erase(h), None);
        assert_eq!(tree.take(h), None);
        assert!(tree.try_erase(h).is_err());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_erase_only_element_resets_to_empty() {
        let mut tree = RbTree::new();
        let (h, _) = tree.insert_unique(1);
        assert_eq!(tree.erase(h), Some(Handle::END));
        assert!(tree.is_empty());
        assert_eq!(tree.begin(), tree.end());
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_erase_key_and_remove() {
        let mut tree: RbTree<i32> = (1..=5).collect();
        assert_eq!(tree.erase_key(&3), 1);
        assert_eq!(tree.erase_key(&3), 0);
        assert_eq!(tree.remove(&4), Some(4));
        assert_eq!(tree.try_remove(&4), Err(RbTreeError::KeyNotFound));
        assert_eq!(tree.try_remove(&5), Ok(5));
        assert_eq!(keys(&tree), [1, 2]);
    }

    #[test]
    fn test_erase_key_multi_removes_all_duplicates() {
        let mut tree = RbTree::new();
        tree.insert_multi_iter([1, 2, 2, 3, 2, 4]);
        assert_eq!(tree.erase_key_multi(&2), 3);
        assert_eq!(tree.erase_key_multi(&2), 0);
        assert_eq!(keys(&tree), [1, 3, 4]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_erase_range_middle() {
        let mut tree: RbTree<i32> = (0..20).collect();
        let first = tree.lower_bound(&5);
        let last = tree.lower_bound(&15);
        assert_eq!(tree.erase_range(first, last), last);
        assert_eq!(keys(&tree), [0, 1, 2, 3, 4, 15, 16, 17, 18, 19]);
        assert!(tree.check_invariants());

        let (b, e) = (tree.begin(), tree.end());
        tree.erase_range(b, e);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_pop_first_and_last() {
        let mut tree: RbTree<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(tree.pop_first(), Some(1));
        assert_eq!(tree.pop_last(), Some(3));
        assert_eq!(tree.pop_last(), Some(2));
        assert_eq!(tree.pop_first(), None);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut tree: RbTree<i32> = (0..100).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.begin(), tree.end());
        tree.insert_unique(7);
        assert_eq!(keys(&tree), [7]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_swap_moves_handles_with_elements() {
        let mut a: RbTree<i32> = (0..5).collect();
        let mut b: RbTree<i32> = (100..103).collect();
        let h = a.find(&3);

        a.swap(&mut b);
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 5);
        assert_eq!(b.value(h), Some(&3));
        assert_eq!(b.next(h), b.find(&4));
        assert_eq!(keys(&a), [100, 101, 102]);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut tree: RbTree<i32> = (0..10).collect();
        let slots = tree.nodes.len();
        tree.erase_key(&3);
        tree.erase_key(&6);
        tree.insert_unique(30);
        tree.insert_unique(60);
        assert_eq!(tree.nodes.len(), slots);
        assert_eq!(tree.nodes.free_count(), 0);
    }
}
