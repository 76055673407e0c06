//! Node link accessors for RbTree.
//!
//! Every structural algorithm goes through these helpers. Absent children
//! (`NULL_NODE`) read as black and are never written to.

use crate::types::{Color, RbTree, Side, END_NODE, NULL_NODE, NodeId};

impl<T, C> RbTree<T, C> {
    // ============================================================================
    // LINK ACCESS
    // ============================================================================

    #[inline]
    pub(crate) fn left(&self, x: NodeId) -> NodeId {
        self.nodes[x].left
    }

    #[inline]
    pub(crate) fn right(&self, x: NodeId) -> NodeId {
        self.nodes[x].right
    }

    /// Parent link. For the root this is [`END_NODE`]; for the sentinel it is
    /// `NULL_NODE`.
    #[inline]
    pub(crate) fn parent(&self, x: NodeId) -> NodeId {
        self.nodes[x].parent
    }

    #[inline]
    pub(crate) fn set_left(&mut self, x: NodeId, child: NodeId) {
        self.nodes[x].left = child;
    }

    #[inline]
    pub(crate) fn set_right(&mut self, x: NodeId, child: NodeId) {
        self.nodes[x].right = child;
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, x: NodeId, parent: NodeId) {
        self.nodes[x].parent = parent;
    }

    /// Write `child` into the `side` slot of `parent`.
    #[inline]
    pub(crate) fn set_child(&mut self, parent: NodeId, side: Side, child: NodeId) {
        match side {
            Side::Left => self.set_left(parent, child),
            Side::Right => self.set_right(parent, child),
        }
    }

    /// True iff `x` is its parent's left child. The sentinel is nobody's child.
    #[inline]
    pub(crate) fn is_left_child(&self, x: NodeId) -> bool {
        x != END_NODE && self.left(self.parent(x)) == x
    }

    /// Current root, or `NULL_NODE` when empty.
    #[inline]
    pub(crate) fn root(&self) -> NodeId {
        self.left(END_NODE)
    }

    // ============================================================================
    // COLOR ACCESS
    // ============================================================================

    #[inline]
    pub(crate) fn color(&self, x: NodeId) -> Color {
        if x == NULL_NODE {
            Color::Black
        } else {
            self.nodes[x].color
        }
    }

    #[inline]
    pub(crate) fn is_red(&self, x: NodeId) -> bool {
        self.color(x) == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self, x: NodeId) -> bool {
        self.color(x) == Color::Black
    }

    #[inline]
    pub(crate) fn set_color(&mut self, x: NodeId, color: Color) {
        debug_assert!(x != NULL_NODE, "absent children are always black");
        debug_assert!(x != END_NODE || color == Color::Black, "the sentinel is always black");
        self.nodes[x].color = color;
    }

    // ============================================================================
    // VALUE ACCESS
    // ============================================================================

    /// Value stored at `x`. Must be a live, non-sentinel node.
    #[inline]
    pub(crate) fn node_value(&self, x: NodeId) -> &T {
        match &self.nodes[x].value {
            Some(value) => value,
            None => unreachable!("node {} has no value", x),
        }
    }

    /// True if `x` names a live element (not the sentinel, not a free slot).
    #[inline]
    pub(crate) fn is_element(&self, x: NodeId) -> bool {
        x != END_NODE && self.nodes.contains(x)
    }
}
