//! INSERT operations for RbTree.
//!
//! This module contains the unique and multi insertion paths, their hinted
//! forms, the range forms and the fallible `try_*` variants. Every insert
//! searches first, allocates second and links last, so a failed allocation
//! leaves the tree exactly as it was.

use log::trace;

use crate::compare::TreeCompare;
use crate::error::{ModifyResult, RbTreeError, RbTreeResultExt};
use crate::types::{Handle, RbNode, RbTree, SearchResult, Side, END_NODE, NULL_NODE, NodeId};

impl<T, C: TreeCompare<T>> RbTree<T, C> {
    // ============================================================================
    // SEARCH FOR AN INSERTION POINT
    // ============================================================================

    /// Locate `key`, or the empty slot where it would be linked.
    pub(crate) fn find_equal(&self, key: &C::Key) -> SearchResult {
        let mut nd = self.root();
        if nd == NULL_NODE {
            return SearchResult::Vacant(END_NODE, Side::Left);
        }
        loop {
            let nd_key = self.compare.key(self.node_value(nd));
            if self.compare.less(key, nd_key) {
                if self.left(nd) == NULL_NODE {
                    return SearchResult::Vacant(nd, Side::Left);
                }
                nd = self.left(nd);
            } else if self.compare.less(nd_key, key) {
                if self.right(nd) == NULL_NODE {
                    return SearchResult::Vacant(nd, Side::Right);
                }
                nd = self.right(nd);
            } else {
                return SearchResult::Found(nd);
            }
        }
    }

    /// Like [`find_equal`](Self::find_equal), but first checks whether `key`
    /// belongs right before or right after `hint`, which costs O(1) when it
    /// does. A bad or stale hint falls back to the full search.
    pub(crate) fn find_equal_hint(&self, hint: NodeId, key: &C::Key) -> SearchResult {
        if hint != END_NODE && !self.is_element(hint) {
            return self.find_equal(key);
        }

        if hint == END_NODE || self.compare.less(key, self.key_of(hint)) {
            // key < *hint
            if hint == self.begin {
                return SearchResult::Vacant(hint, Side::Left);
            }
            let prior = self.prev_node(hint);
            if self.compare.less(self.key_of(prior), key) {
                // *prev(hint) < key < *hint
                return if self.left(hint) == NULL_NODE {
                    SearchResult::Vacant(hint, Side::Left)
                } else {
                    SearchResult::Vacant(prior, Side::Right)
                };
            }
            // key <= *prev(hint)
            return self.find_equal(key);
        }

        if self.compare.less(self.key_of(hint), key) {
            // *hint < key
            let next = self.next_node(hint);
            if next == END_NODE || self.compare.less(key, self.key_of(next)) {
                // *hint < key < *next(hint)
                return if self.right(hint) == NULL_NODE {
                    SearchResult::Vacant(hint, Side::Right)
                } else {
                    SearchResult::Vacant(next, Side::Left)
                };
            }
            // *next(hint) <= key
            return self.find_equal(key);
        }

        SearchResult::Found(hint)
    }

    /// Leaf slot after every element equivalent to `key`.
    pub(crate) fn find_leaf_high(&self, key: &C::Key) -> (NodeId, Side) {
        let mut nd = self.root();
        if nd == NULL_NODE {
            return (END_NODE, Side::Left);
        }
        loop {
            if self.compare.less(key, self.key_of(nd)) {
                if self.left(nd) == NULL_NODE {
                    return (nd, Side::Left);
                }
                nd = self.left(nd);
            } else {
                if self.right(nd) == NULL_NODE {
                    return (nd, Side::Right);
                }
                nd = self.right(nd);
            }
        }
    }

    /// Leaf slot before every element equivalent to `key`.
    pub(crate) fn find_leaf_low(&self, key: &C::Key) -> (NodeId, Side) {
        let mut nd = self.root();
        if nd == NULL_NODE {
            return (END_NODE, Side::Left);
        }
        loop {
            if self.compare.less(self.key_of(nd), key) {
                if self.right(nd) == NULL_NODE {
                    return (nd, Side::Right);
                }
                nd = self.right(nd);
            } else {
                if self.left(nd) == NULL_NODE {
                    return (nd, Side::Left);
                }
                nd = self.left(nd);
            }
        }
    }

    /// Leaf slot for a multi insert near `hint`: directly before `hint` when
    /// the order allows it, otherwise as close to `hint` as the order permits.
    pub(crate) fn find_leaf(&self, hint: NodeId, key: &C::Key) -> (NodeId, Side) {
        if hint != END_NODE && !self.is_element(hint) {
            return self.find_leaf_high(key);
        }

        if hint == END_NODE || !self.compare.less(self.key_of(hint), key) {
            // key <= *hint
            if hint == self.begin {
                return (hint, Side::Left);
            }
            let prior = self.prev_node(hint);
            if !self.compare.less(key, self.key_of(prior)) {
                // *prev(hint) <= key <= *hint
                return if self.left(hint) == NULL_NODE {
                    (hint, Side::Left)
                } else {
                    (prior, Side::Right)
                };
            }
            // key < *prev(hint)
            return self.find_leaf_high(key);
        }
        // *hint < key
        self.find_leaf_low(key)
    }

    #[inline]
    pub(crate) fn key_of(&self, x: NodeId) -> &C::Key {
        self.compare.key(self.node_value(x))
    }

    // ============================================================================
    // LINKING
    // ============================================================================

    /// Link the detached node `id` into the empty `side` slot of `parent`
    /// and rebalance.
    fn insert_node_at(&mut self, parent: NodeId, side: Side, id: NodeId) {
        self.set_parent(id, parent);
        self.set_child(parent, side, id);

        // The new node is the new minimum iff it hangs left of the old one.
        let begin_left = self.left(self.begin);
        if begin_left != NULL_NODE {
            self.begin = begin_left;
        }

        let root = self.root();
        self.balance_after_insert(root, id);
        self.len += 1;
        trace!("linked node {} under {} ({:?}), len {}", id, parent, side, self.len);

        self.debug_validate("insert");
    }

    fn link_new(&mut self, parent: NodeId, side: Side, value: T) -> NodeId {
        let id = self.nodes.allocate(RbNode::leaf(value));
        self.insert_node_at(parent, side, id);
        id
    }

    // ============================================================================
    // PUBLIC INSERT API
    // ============================================================================

    /// Insert `value` unless an equivalent element is present.
    ///
    /// Returns the handle of the inserted element and `true`, or the handle
    /// of the existing equivalent element and `false`; in that case `value`
    /// is dropped and the tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let (first, inserted) = tree.insert_unique(7);
    /// assert!(inserted);
    /// let (again, inserted) = tree.insert_unique(7);
    /// assert!(!inserted);
    /// assert_eq!(first, again);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert_unique(&mut self, value: T) -> (Handle, bool) {
        match self.find_equal(self.compare.key(&value)) {
            SearchResult::Found(id) => (Handle(id), false),
            SearchResult::Vacant(parent, side) => (Handle(self.link_new(parent, side, value)), true),
        }
    }

    /// Insert `value` unless an equivalent element is present, using `hint`
    /// as a guess for the position right after the new element.
    ///
    /// The result is the same as [`insert_unique`](Self::insert_unique); a
    /// good hint only makes it faster.
    pub fn insert_unique_hint(&mut self, hint: Handle, value: T) -> Handle {
        match self.find_equal_hint(hint.0, self.compare.key(&value)) {
            SearchResult::Found(id) => Handle(id),
            SearchResult::Vacant(parent, side) => Handle(self.link_new(parent, side, value)),
        }
    }

    /// Insert `value` after every element equivalent to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree::{ByFirst, RbTree};
    ///
    /// let mut tree = RbTree::with_comparator(ByFirst);
    /// tree.insert_multi((1, "a"));
    /// tree.insert_multi((1, "b"));
    /// tree.insert_multi((0, "c"));
    /// let order: Vec<_> = tree.iter().map(|&(_, v)| v).collect();
    /// assert_eq!(order, ["c", "a", "b"]);
    /// ```
    pub fn insert_multi(&mut self, value: T) -> Handle {
        let (parent, side) = self.find_leaf_high(self.compare.key(&value));
        Handle(self.link_new(parent, side, value))
    }

    /// Insert `value` as close as the order allows to just before `hint`.
    pub fn insert_multi_hint(&mut self, hint: Handle, value: T) -> Handle {
        let (parent, side) = self.find_leaf(hint.0, self.compare.key(&value));
        Handle(self.link_new(parent, side, value))
    }

    /// Unique-insert every value of `iter`, hinting at the end.
    pub fn insert_unique_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_unique_hint(Handle::END, value);
        }
    }

    /// Multi-insert every value of `iter`, hinting at the end.
    pub fn insert_multi_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_multi_hint(Handle::END, value);
        }
    }

    // ============================================================================
    // FALLIBLE INSERT API
    // ============================================================================

    /// Like [`insert_unique`](Self::insert_unique), but reports allocation
    /// failure instead of aborting.
    ///
    /// On error the tree is unchanged and `value` is dropped.
    pub fn try_insert_unique(&mut self, value: T) -> ModifyResult<(Handle, bool)> {
        match self.find_equal(self.compare.key(&value)) {
            SearchResult::Found(id) => Ok((Handle(id), false)),
            SearchResult::Vacant(parent, side) => {
                let id = self
                    .nodes
                    .try_allocate(RbNode::leaf(value))
                    .with_operation("try_insert_unique")?;
                self.insert_node_at(parent, side, id);
                Ok((Handle(id), true))
            }
        }
    }

    /// Like [`insert_multi`](Self::insert_multi), but reports allocation
    /// failure instead of aborting.
    pub fn try_insert_multi(&mut self, value: T) -> ModifyResult<Handle> {
        let (parent, side) = self.find_leaf_high(self.compare.key(&value));
        let id = self
            .nodes
            .try_allocate(RbNode::leaf(value))
            .with_operation("try_insert_multi")?;
        self.insert_node_at(parent, side, id);
        Ok(Handle(id))
    }

    /// Unique insert with full invariant validation before and after.
    pub fn try_insert_checked(&mut self, value: T) -> ModifyResult<(Handle, bool)> {
        if let Err(e) = self.check_invariants_detailed() {
            return Err(RbTreeError::DataIntegrityError(e));
        }

        let result = self.try_insert_unique(value)?;

        if let Err(e) = self.check_invariants_detailed() {
            return Err(RbTreeError::DataIntegrityError(e));
        }

        Ok(result)
    }
}
