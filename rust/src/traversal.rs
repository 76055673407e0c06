//! In-order traversal primitives.
//!
//! `min`/`max` walk one spine; `next`/`prev` move one step in key order and
//! cost amortized O(1) over a full walk. Stepping forward from the last
//! element reaches the sentinel, and the sentinel steps back to the last
//! element, so `end()` behaves as one-past-the-last. Stepping past either
//! edge wraps through the sentinel instead of faulting.

use crate::types::{RbTree, END_NODE, NULL_NODE, NodeId};

impl<T, C> RbTree<T, C> {
    /// Leftmost node of the subtree rooted at `x`.
    #[inline]
    pub(crate) fn min(&self, mut x: NodeId) -> NodeId {
        while self.left(x) != NULL_NODE {
            x = self.left(x);
        }
        x
    }

    /// Rightmost node of the subtree rooted at `x`.
    #[inline]
    pub(crate) fn max(&self, mut x: NodeId) -> NodeId {
        while self.right(x) != NULL_NODE {
            x = self.right(x);
        }
        x
    }

    /// In-order successor. The last element steps to the sentinel and the
    /// sentinel steps to the first element.
    pub(crate) fn next_node(&self, mut x: NodeId) -> NodeId {
        if x == END_NODE {
            return self.begin;
        }
        if self.right(x) != NULL_NODE {
            return self.min(self.right(x));
        }
        while !self.is_left_child(x) {
            x = self.parent(x);
        }
        self.parent(x)
    }

    /// In-order predecessor. The sentinel steps to the last element and the
    /// first element steps to the sentinel.
    pub(crate) fn prev_node(&self, mut x: NodeId) -> NodeId {
        if self.left(x) != NULL_NODE {
            return self.max(self.left(x));
        }
        if x == END_NODE || x == self.begin {
            return END_NODE;
        }
        while self.is_left_child(x) {
            x = self.parent(x);
        }
        self.parent(x)
    }
}
