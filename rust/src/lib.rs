//! Red-black tree in Rust with STL-style ordered container semantics.
//!
//! This crate provides the balanced search tree that ordered set, map and
//! multi-key containers are built on: a sentinel end position, stable
//! bidirectional handles, unique and multi-key insertion, bound queries,
//! positional erase that leaves every other position valid, deep copy,
//! O(1) swap and element-wise comparison.
//!
//! Nodes live in a per-tree slot arena and refer to each other by id, so
//! parent back-links need no shared ownership and the whole crate is safe
//! code.
//!
//! # Examples
//!
//! ```
//! use rbtree::{ByFirst, RbTree};
//!
//! // Set-like use: the value is the key.
//! let mut set: RbTree<i32> = [5, 1, 3].into_iter().collect();
//! assert_eq!(set.first(), Some(&1));
//!
//! // Map-like use: pairs ordered by their first component.
//! let mut map = RbTree::with_comparator(ByFirst);
//! map.insert_unique(("b", 2));
//! map.insert_unique(("a", 1));
//! assert_eq!(map.get(&"a"), Some(&("a", 1)));
//!
//! // Positions survive unrelated erasure.
//! let three = set.find(&3);
//! set.erase_key(&1);
//! assert_eq!(set.value(three), Some(&3));
//! ```

#[macro_use]
mod macros;

mod compact_arena;
mod compare;
mod comparison;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
mod rebalance;
mod traversal;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use compare::{ByFirst, Descending, LessBy, Natural, TreeCompare};
pub use construction::DEFAULT_CAPACITY;
pub use error::{KeyResult, ModifyResult, RbTreeError, RbTreeResult, RbTreeResultExt};
pub use iteration::{Cursor, CursorMut, IntoIter, Iter, Range};
pub use types::{Color, Handle, NodeId, RbTree, END_NODE, NULL_NODE};
