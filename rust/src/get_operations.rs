//! GET operations for RbTree.
//!
//! This module contains all the read operations: key lookup, bound queries,
//! equal ranges, counting, handle dereference and handle stepping.

use crate::compare::TreeCompare;
use crate::error::{KeyResult, RbTreeError};
use crate::types::{Color, Handle, RbTree, END_NODE, NULL_NODE, NodeId};

impl<T, C: TreeCompare<T>> RbTree<T, C> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Position of the element equivalent to `key`, or [`end`](Self::end).
    ///
    /// In a tree with duplicates this is the first of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RbTree;
    ///
    /// let tree: RbTree<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(tree.value(tree.find(&2)), Some(&2));
    /// assert_eq!(tree.find(&9), tree.end());
    /// ```
    pub fn find(&self, key: &C::Key) -> Handle {
        let p = self.lower_bound_from(key, self.root(), END_NODE);
        if p != END_NODE && !self.compare.less(key, self.key_of(p)) {
            Handle(p)
        } else {
            Handle::END
        }
    }

    /// Check if an element equivalent to `key` exists.
    pub fn contains(&self, key: &C::Key) -> bool {
        !self.find(key).is_end()
    }

    /// Get a reference to the element equivalent to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::{ByFirst, RbTree};
    ///
    /// let mut tree = RbTree::with_comparator(ByFirst);
    /// tree.insert_unique((1, "one"));
    /// assert_eq!(tree.get(&1), Some(&(1, "one")));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &C::Key) -> Option<&T> {
        self.value(self.find(key))
    }

    /// Get a mutable reference to the element equivalent to `key`.
    ///
    /// Changing the ordering key through this reference is a logic error:
    /// the tree stays memory safe but lookups may stop finding elements.
    pub fn get_mut(&mut self, key: &C::Key) -> Option<&mut T> {
        let h = self.find(key);
        self.value_mut(h)
    }

    /// Get the element equivalent to `key`, or [`RbTreeError::KeyNotFound`].
    pub fn try_get(&self, key: &C::Key) -> KeyResult<&T> {
        self.get(key).ok_or(RbTreeError::KeyNotFound)
    }

    // ============================================================================
    // BOUND QUERIES
    // ============================================================================

    /// First position whose key is not less than `key`.
    pub fn lower_bound(&self, key: &C::Key) -> Handle {
        Handle(self.lower_bound_from(key, self.root(), END_NODE))
    }

    /// First position whose key is greater than `key`.
    pub fn upper_bound(&self, key: &C::Key) -> Handle {
        Handle(self.upper_bound_from(key, self.root(), END_NODE))
    }

    /// Lower-bound descent of the subtree at `nd`, answering `result` if
    /// nothing in the subtree qualifies.
    pub(crate) fn lower_bound_from(&self, key: &C::Key, mut nd: NodeId, mut result: NodeId) -> NodeId {
        while nd != NULL_NODE {
            if !self.compare.less(self.key_of(nd), key) {
                result = nd;
                nd = self.left(nd);
            } else {
                nd = self.right(nd);
            }
        }
        result
    }

    pub(crate) fn upper_bound_from(&self, key: &C::Key, mut nd: NodeId, mut result: NodeId) -> NodeId {
        while nd != NULL_NODE {
            if self.compare.less(key, self.key_of(nd)) {
                result = nd;
                nd = self.left(nd);
            } else {
                nd = self.right(nd);
            }
        }
        result
    }

    /// Half-open `[first, last)` of the elements equivalent to `key`,
    /// assuming keys are unique: the range holds at most one element.
    pub fn equal_range(&self, key: &C::Key) -> (Handle, Handle) {
        let mut result = END_NODE;
        let mut rt = self.root();
        while rt != NULL_NODE {
            if self.compare.less(key, self.key_of(rt)) {
                result = rt;
                rt = self.left(rt);
            } else if self.compare.less(self.key_of(rt), key) {
                rt = self.right(rt);
            } else {
                let after = if self.right(rt) != NULL_NODE {
                    self.min(self.right(rt))
                } else {
                    result
                };
                return (Handle(rt), Handle(after));
            }
        }
        (Handle(result), Handle(result))
    }

    /// Half-open `[first, last)` of every element equivalent to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert_multi_iter([1, 2, 2, 2, 3]);
    /// let (first, last) = tree.equal_range_multi(&2);
    /// assert_eq!(tree.range_between(first, last).count(), 3);
    /// assert_eq!(tree.value(last), Some(&3));
    /// ```
    pub fn equal_range_multi(&self, key: &C::Key) -> (Handle, Handle) {
        let mut result = END_NODE;
        let mut rt = self.root();
        while rt != NULL_NODE {
            if self.compare.less(key, self.key_of(rt)) {
                result = rt;
                rt = self.left(rt);
            } else if self.compare.less(self.key_of(rt), key) {
                rt = self.right(rt);
            } else {
                let first = self.lower_bound_from(key, self.left(rt), rt);
                let last = self.upper_bound_from(key, self.right(rt), result);
                return (Handle(first), Handle(last));
            }
        }
        (Handle(result), Handle(result))
    }

    /// Number of elements equivalent to `key`, assuming unique keys (0 or 1).
    pub fn count(&self, key: &C::Key) -> usize {
        usize::from(self.contains(key))
    }

    /// Number of elements equivalent to `key`.
    pub fn count_multi(&self, key: &C::Key) -> usize {
        let (first, last) = self.equal_range_multi(key);
        self.range_between(first, last).count()
    }
}

impl<T, C> RbTree<T, C> {
    // ============================================================================
    // HANDLE ACCESS
    // ============================================================================

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest number of elements the node id space can address.
    pub fn max_size(&self) -> usize {
        // Every id but NULL_NODE is usable and one of them is the sentinel.
        (NULL_NODE as usize).saturating_sub(1)
    }

    /// The ordering in use.
    pub fn comparator(&self) -> &C {
        &self.compare
    }

    /// Position of the first element, or [`end`](Self::end) when empty.
    #[inline]
    pub fn begin(&self) -> Handle {
        Handle(self.begin)
    }

    /// One-past-the-last position.
    #[inline]
    pub fn end(&self) -> Handle {
        Handle::END
    }

    /// Position of the root element, or [`end`](Self::end) when empty.
    pub fn root_handle(&self) -> Handle {
        match self.root() {
            NULL_NODE => Handle::END,
            root => Handle(root),
        }
    }

    /// Element at the root, if any.
    pub fn root_value(&self) -> Option<&T> {
        self.value(self.root_handle())
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&T> {
        self.value(self.begin())
    }

    /// Largest element.
    pub fn last(&self) -> Option<&T> {
        self.value(self.prev(Handle::END))
    }

    /// Element at `handle`. `None` for the end position and for stale handles.
    #[inline]
    pub fn value(&self, handle: Handle) -> Option<&T> {
        self.nodes.get(handle.0).and_then(|node| node.value.as_ref())
    }

    /// Mutable element at `handle`.
    ///
    /// Changing the ordering key through this reference is a logic error.
    #[inline]
    pub fn value_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.nodes.get_mut(handle.0).and_then(|node| node.value.as_mut())
    }

    /// True if `handle` is the end position or names a live element.
    #[inline]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.nodes.contains(handle.0)
    }

    /// Step forward in key order. The last element steps to the end and the
    /// end wraps to the first element; a stale handle steps to the end.
    pub fn next(&self, handle: Handle) -> Handle {
        if !self.is_valid(handle) {
            return Handle::END;
        }
        Handle(self.next_node(handle.0))
    }

    /// Step backward in key order. The end steps to the last element and the
    /// first element wraps to the end; a stale handle steps to the end.
    pub fn prev(&self, handle: Handle) -> Handle {
        if !self.is_valid(handle) {
            return Handle::END;
        }
        Handle(self.prev_node(handle.0))
    }

    /// Color of the node at `handle`; the end position is black.
    pub fn color_of(&self, handle: Handle) -> Option<Color> {
        self.nodes.get(handle.0).map(|node| node.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ByFirst;

    fn sample() -> RbTree<i32> {
        [10, 20, 30, 40, 50].into_iter().collect()
    }

    #[test]
    fn test_find_and_contains() {
        let tree = sample();
        assert_eq!(tree.value(tree.find(&30)), Some(&30));
        assert!(tree.find(&35).is_end());
        assert!(tree.contains(&50));
        assert!(!tree.contains(&5));
        assert_eq!(tree.try_get(&5), Err(RbTreeError::KeyNotFound));
        assert_eq!(tree.try_get(&10), Ok(&10));
    }

    #[test]
    fn test_lower_and_upper_bound() {
        let tree = sample();
        assert_eq!(tree.value(tree.lower_bound(&25)), Some(&30));
        assert_eq!(tree.value(tree.lower_bound(&30)), Some(&30));
        assert_eq!(tree.value(tree.upper_bound(&30)), Some(&40));
        assert_eq!(tree.value(tree.lower_bound(&5)), Some(&10));
        assert!(tree.lower_bound(&51).is_end());
        assert!(tree.upper_bound(&50).is_end());
    }

    #[test]
    fn test_bounds_on_empty_tree() {
        let tree: RbTree<i32> = RbTree::new();
        assert!(tree.lower_bound(&1).is_end());
        assert!(tree.upper_bound(&1).is_end());
        assert_eq!(tree.equal_range(&1), (Handle::END, Handle::END));
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
    }

    #[test]
    fn test_equal_range_unique() {
        let tree = sample();
        let (first, last) = tree.equal_range(&30);
        assert_eq!(tree.value(first), Some(&30));
        assert_eq!(tree.value(last), Some(&40));

        let (first, last) = tree.equal_range(&35);
        assert_eq!(first, last);
        assert_eq!(tree.value(first), Some(&40));

        let (first, last) = tree.equal_range(&50);
        assert_eq!(tree.value(first), Some(&50));
        assert!(last.is_end());
    }

    #[test]
    fn test_equal_range_multi_covers_all_duplicates() {
        let mut tree = RbTree::new();
        tree.insert_multi_iter([5, 1, 5, 3, 5, 7, 5]);
        let (first, last) = tree.equal_range_multi(&5);
        assert_eq!(first, tree.lower_bound(&5));
        assert_eq!(last, tree.upper_bound(&5));
        assert_eq!(tree.count_multi(&5), 4);
        assert_eq!(tree.count_multi(&4), 0);
        assert_eq!(tree.count(&5), 1);
        assert_eq!(tree.find(&5), first);
    }

    #[test]
    fn test_get_by_projected_key() {
        let mut tree = RbTree::with_comparator(ByFirst);
        tree.insert_unique((2, String::from("two")));
        tree.insert_unique((1, String::from("one")));
        if let Some(entry) = tree.get_mut(&2) {
            entry.1.push('!');
        }
        assert_eq!(tree.get(&2).map(|e| e.1.as_str()), Some("two!"));
        assert_eq!(tree.first().map(|e| e.0), Some(1));
    }

    #[test]
    fn test_first_last_and_stepping() {
        let tree = sample();
        assert_eq!(tree.first(), Some(&10));
        assert_eq!(tree.last(), Some(&50));
        assert_eq!(tree.value(tree.next(tree.begin())), Some(&20));
        assert_eq!(tree.value(tree.prev(tree.end())), Some(&50));
        assert_eq!(tree.next(tree.end()), tree.begin());
        assert_eq!(tree.prev(tree.begin()), tree.end());
        assert_eq!(tree.value(tree.end()), None);
        assert_eq!(tree.color_of(tree.end()), Some(Color::Black));
    }

    #[test]
    fn test_stale_handle_is_harmless() {
        let mut tree = sample();
        let h = tree.find(&20);
        tree.erase(h);
        assert!(!tree.is_valid(h));
        assert_eq!(tree.value(h), None);
        assert_eq!(tree.next(h), Handle::END);
        assert_eq!(tree.prev(h), Handle::END);
        assert_eq!(tree.color_of(h), None);
    }

    #[test]
    fn test_max_size_and_comparator() {
        let tree = sample();
        assert!(tree.max_size() >= tree.len());
        assert_eq!(*tree.comparator(), crate::compare::Natural);
    }
}
