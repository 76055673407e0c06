//! Core types and data structures for RbTree.
//!
//! This module contains the node layout, the tree container, the position
//! handle and the constants that tie them together.

use crate::compact_arena::CompactArena;
use crate::compare::Natural;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Absent child link.
pub const NULL_NODE: NodeId = u32::MAX;

/// Sentinel slot. Its `left` link is the root; it is also the end position.
pub const END_NODE: NodeId = 0;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// One slot of the node arena.
///
/// Real nodes always carry `Some(value)`. The sentinel at [`END_NODE`] uses
/// the same layout with `value: None`, a permanent black color and only its
/// `left` link populated, so traversal never has to branch on what kind of
/// slot it is looking at.
#[derive(Debug, Clone)]
pub struct RbNode<T> {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
    pub(crate) color: Color,
    pub(crate) value: Option<T>,
}

impl<T> RbNode<T> {
    /// A detached red leaf holding `value`.
    pub(crate) fn leaf(value: T) -> Self {
        Self {
            left: NULL_NODE,
            right: NULL_NODE,
            parent: NULL_NODE,
            color: Color::Red,
            value: Some(value),
        }
    }

    /// The sentinel end node of an empty tree.
    pub(crate) fn end() -> Self {
        Self {
            left: NULL_NODE,
            right: NULL_NODE,
            parent: NULL_NODE,
            color: Color::Black,
            value: None,
        }
    }
}

impl<T> Default for RbNode<T> {
    fn default() -> Self {
        Self::end()
    }
}

/// Red-black tree with STL-style ordered container semantics.
///
/// The tree stores values of type `T` ordered by the comparator `C`
/// (see [`TreeCompare`](crate::TreeCompare)). It backs both set-like use
/// (`T` is the key) and map-like use (`T` is a pair and `C` projects the key).
/// Positions are [`Handle`]s: stable ids that stay valid across inserts and
/// across removal of other elements.
///
/// # Examples
///
/// ```
/// use rbtree::RbTree;
///
/// let mut tree = RbTree::new();
/// for key in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert_unique(key);
/// }
///
/// let (existing, inserted) = tree.insert_unique(5);
/// assert!(!inserted);
/// assert_eq!(tree.value(existing), Some(&5));
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
/// assert_eq!(tree.value(tree.lower_bound(&6)), Some(&7));
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n), at most two rotations
/// - **Lookup / bounds**: O(log n)
/// - **Erase**: O(log n), at most three rotations
/// - **Iteration**: O(n) for a full walk, amortized O(1) per step
/// - **Swap**: O(1)
pub struct RbTree<T, C = Natural> {
    /// Node storage; slot [`END_NODE`] is the sentinel.
    pub(crate) nodes: CompactArena<RbNode<T>>,
    /// Leftmost node, or [`END_NODE`] when empty.
    pub(crate) begin: NodeId,
    /// Number of elements.
    pub(crate) len: usize,
    /// Strict weak ordering over values.
    pub(crate) compare: C,
}

/// A position in an [`RbTree`]: one element, or the end.
///
/// Handles are plain ids and do not borrow the tree. Two handles are equal
/// iff they name the same node. A handle whose element was erased is stale;
/// using it never touches freed memory, but once the slot is reused it names
/// whatever element lives there now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) NodeId);

impl Handle {
    /// The end position of any tree.
    pub const END: Handle = Handle(END_NODE);

    /// Returns true if this is the one-past-the-last position.
    pub fn is_end(self) -> bool {
        self.0 == END_NODE
    }

    /// Return the raw node ID.
    pub fn id(self) -> NodeId {
        self.0
    }
}

/// Where a new node gets linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Result of searching for a unique key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchResult {
    /// An element with an equal key already exists.
    Found(NodeId),
    /// The key belongs in the empty `Side` slot of this parent.
    Vacant(NodeId, Side),
}
