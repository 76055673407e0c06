//! Construction and initialization logic for RbTree.
//!
//! This module contains the constructors, `Default`, deep copy and the
//! `FromIterator`/`Extend` impls. Every tree owns its own arena whose slot
//! 0 holds the sentinel end node for the whole lifetime of the tree.

use log::debug;

use crate::compact_arena::CompactArena;
use crate::compare::{Natural, TreeCompare};
use crate::types::{RbNode, RbTree, Side, END_NODE, NULL_NODE, NodeId};

/// Number of node slots reserved up front by [`RbTree::new`].
pub const DEFAULT_CAPACITY: usize = 16;

impl<T: Ord> RbTree<T, Natural> {
    /// Create an empty tree ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RbTree;
    ///
    /// let tree: RbTree<i32> = RbTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.begin(), tree.end());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity_and_comparator(DEFAULT_CAPACITY, Natural)
    }

    /// Create an empty tree with room for `capacity` elements before the
    /// node arena has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<T, C> RbTree<T, C> {
    /// Create an empty tree ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::{Descending, RbTree};
    ///
    /// let mut tree = RbTree::with_comparator(Descending);
    /// tree.insert_unique(1);
    /// tree.insert_unique(3);
    /// tree.insert_unique(2);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub fn with_comparator(compare: C) -> Self {
        Self::with_capacity_and_comparator(DEFAULT_CAPACITY, compare)
    }

    /// Create an empty tree ordered by `compare` with room for `capacity`
    /// elements.
    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        let mut nodes = CompactArena::with_capacity(capacity.saturating_add(1));
        let end = nodes.allocate(RbNode::end());
        debug_assert_eq!(end, END_NODE);

        Self {
            nodes,
            begin: END_NODE,
            len: 0,
            compare,
        }
    }
}

impl<T, C: Default> Default for RbTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

// ============================================================================
// DEEP COPY
// ============================================================================

impl<T: Clone, C: Clone> Clone for RbTree<T, C> {
    /// Deep copy preserving shape and colors.
    ///
    /// The copy is built pre-order into a fresh arena, so it is compact even
    /// when the source has freed slots. If cloning a value panics the partial
    /// arena is dropped with everything it holds and `self` is untouched.
    fn clone(&self) -> Self {
        let mut nodes = CompactArena::with_capacity(self.len + 1);
        let end = nodes.allocate(RbNode::end());
        debug_assert_eq!(end, END_NODE);

        // (source node, copied parent, side of the parent to link into)
        let mut stack: Vec<(NodeId, NodeId, Side)> = Vec::new();
        if self.root() != NULL_NODE {
            stack.push((self.root(), END_NODE, Side::Left));
        }

        while let Some((src, parent, side)) = stack.pop() {
            let source = &self.nodes[src];
            let copy = nodes.allocate(RbNode {
                left: NULL_NODE,
                right: NULL_NODE,
                parent,
                color: source.color,
                value: Some(self.node_value(src).clone()),
            });
            match side {
                Side::Left => nodes[parent].left = copy,
                Side::Right => nodes[parent].right = copy,
            }
            if source.right != NULL_NODE {
                stack.push((source.right, copy, Side::Right));
            }
            if source.left != NULL_NODE {
                stack.push((source.left, copy, Side::Left));
            }
        }

        let mut begin = END_NODE;
        while nodes[begin].left != NULL_NODE {
            begin = nodes[begin].left;
        }

        debug!("cloned red-black tree with {} elements", self.len);
        Self {
            nodes,
            begin,
            len: self.len,
            compare: self.compare.clone(),
        }
    }

    /// Replace the contents with a deep copy of `source`.
    ///
    /// The copy is finished before anything is released, so a panicking
    /// value clone leaves `self` as it was.
    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

// ============================================================================
// BULK CONSTRUCTION
// ============================================================================

impl<T, C: TreeCompare<T> + Default> FromIterator<T> for RbTree<T, C> {
    /// Build a tree keeping the first of any run of equivalent values.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, C: TreeCompare<T>> Extend<T> for RbTree<T, C> {
    /// Unique-insert every value, hinting at the end so sorted input runs in
    /// amortized constant time per element.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_unique_iter(iter);
    }
}

impl<'a, T: Copy + 'a, C: TreeCompare<T>> Extend<&'a T> for RbTree<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_unique_iter(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Descending;

    #[test]
    fn test_new_tree_is_empty_sentinel_only() {
        let tree: RbTree<i32> = RbTree::new();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.begin, END_NODE);
        assert_eq!(tree.root(), NULL_NODE);
        assert_eq!(tree.nodes.len(), 1);
        assert!(tree.nodes.capacity() > DEFAULT_CAPACITY);
    }

    #[test]
    fn test_default_uses_default_comparator() {
        let mut tree: RbTree<i32, Descending> = RbTree::default();
        tree.extend([1, 2, 3]);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    }

    #[test]
    fn test_from_iter_drops_duplicates() {
        let tree: RbTree<i32> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_clone_preserves_shape_and_colors() {
        let mut tree: RbTree<i32> = (0..50).collect();
        for key in (0..50).step_by(3) {
            tree.erase_key(&key);
        }
        let copy = tree.clone();

        assert_eq!(copy, tree);
        assert!(copy.check_invariants());
        assert_eq!(copy.nodes.free_count(), 0);
        assert_eq!(copy.nodes.len(), copy.len() + 1);
        assert_eq!(copy.height(), tree.height());
        assert_eq!(copy.black_height(), tree.black_height());
        assert_eq!(copy.color_of(copy.begin()), tree.color_of(tree.begin()));
    }

    #[test]
    fn test_clone_is_independent() {
        let tree: RbTree<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut copy = tree.clone();
        copy.erase_key(&"b".to_string());
        copy.insert_unique("z".to_string());

        assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(copy.iter().cloned().collect::<Vec<_>>(), ["a", "c", "z"]);
    }

    #[test]
    fn test_clone_from_replaces_contents() {
        let source: RbTree<i32> = (0..10).collect();
        let mut target: RbTree<i32> = (100..200).collect();
        target.clone_from(&source);
        assert_eq!(target, source);
        assert!(target.check_invariants());
    }

    #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Fragile(i32);

    impl Clone for Fragile {
        fn clone(&self) -> Self {
            if self.0 == 13 {
                panic!("cannot clone 13");
            }
            Fragile(self.0)
        }
    }

    #[test]
    fn test_clone_from_panicking_value_leaves_both_trees_unchanged() {
        let source: RbTree<Fragile> = (0..20).map(Fragile).collect();
        let mut target: RbTree<Fragile> = (100..105).map(Fragile).collect();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            target.clone_from(&source);
        }));
        assert!(result.is_err());

        assert_eq!(target.len(), 5);
        assert!(target.iter().map(|f| f.0).eq(100..105));
        assert!(target.check_invariants());
        assert_eq!(source.len(), 20);
        assert!(source.iter().map(|f| f.0).eq(0..20));
        assert!(source.check_invariants());
    }

    #[test]
    fn test_clone_of_empty() {
        let tree: RbTree<i32> = RbTree::new();
        let copy = tree.clone();
        assert!(copy.is_empty());
        assert_eq!(copy.begin(), copy.end());
    }
}
