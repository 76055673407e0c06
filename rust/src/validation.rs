//! Validation and debugging utilities for RbTree.
//!
//! This module contains the red-black invariant checker, the arena
//! consistency check, shape statistics and a structure dump for debugging.

use std::fmt::Debug;
use std::fmt::Write as _;

use log::warn;

use crate::compact_arena::CompactArenaStats;
use crate::compare::TreeCompare;
use crate::error::{RbTreeError, RbTreeResult, TreeResult};
use crate::types::{Color, RbTree, END_NODE, NULL_NODE, NodeId};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<T, C: TreeCompare<T>> RbTree<T, C> {
    /// Check if the tree maintains all red-black and bookkeeping invariants.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.check_sentinel()?;

        let root = self.root();
        let count = if root == NULL_NODE {
            0
        } else {
            if self.parent(root) != END_NODE {
                return Err(format!("Root {} does not hang off the sentinel", root));
            }
            if self.color(root) != Color::Black {
                return Err(format!("Root {} is red", root));
            }
            let mut count = 0;
            self.check_subtree(root, END_NODE, &mut count)?;
            count
        };

        if count != self.len {
            return Err(format!("Tree reaches {} nodes but len is {}", count, self.len));
        }

        let expected_begin = if root == NULL_NODE { END_NODE } else { self.min(root) };
        if self.begin != expected_begin {
            return Err(format!(
                "Cached begin is {} but the leftmost node is {}",
                self.begin, expected_begin
            ));
        }

        self.check_order()?;
        self.check_arena_tree_consistency().map_err(|e| e.to_string())?;
        Ok(())
    }

    /// The sentinel is black, carries no value and only links to the root.
    fn check_sentinel(&self) -> Result<(), String> {
        let end = self
            .nodes
            .get(END_NODE)
            .ok_or_else(|| "Sentinel slot is not allocated".to_string())?;
        if end.color != Color::Black {
            return Err("Sentinel is red".to_string());
        }
        if end.value.is_some() {
            return Err("Sentinel holds a value".to_string());
        }
        if end.right != NULL_NODE || end.parent != NULL_NODE {
            return Err("Sentinel has a right or parent link".to_string());
        }
        Ok(())
    }

    /// Validate the subtree at `x` and return its black height, counting
    /// absent children as height 0.
    fn check_subtree(&self, x: NodeId, parent: NodeId, count: &mut usize) -> Result<usize, String> {
        let node = self
            .nodes
            .get(x)
            .ok_or_else(|| format!("Node {} is linked but not allocated", x))?;
        if x == END_NODE {
            return Err("Sentinel is linked below the root".to_string());
        }
        if node.parent != parent {
            return Err(format!(
                "Node {} has parent {} but hangs under {}",
                x, node.parent, parent
            ));
        }
        if node.value.is_none() {
            return Err(format!("Node {} has no value", x));
        }
        *count += 1;
        if *count > self.len {
            return Err(format!("More than {} nodes reachable (cycle?)", self.len));
        }

        if node.color == Color::Red && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(format!("Red node {} has a red child", x));
        }

        let left_height = if node.left == NULL_NODE {
            0
        } else {
            self.check_subtree(node.left, x, count)?
        };
        let right_height = if node.right == NULL_NODE {
            0
        } else {
            self.check_subtree(node.right, x, count)?
        };
        if left_height != right_height {
            return Err(format!(
                "Node {} has black height {} on the left and {} on the right",
                x, left_height, right_height
            ));
        }

        Ok(left_height + usize::from(node.color == Color::Black))
    }

    /// In-order sequence must be non-descending under the comparator.
    fn check_order(&self) -> Result<(), String> {
        let mut iter = self.iter();
        let mut prev = match iter.next() {
            Some(value) => value,
            None => return Ok(()),
        };
        for (i, value) in iter.enumerate() {
            if self.compare.less(self.compare.key(value), self.compare.key(prev)) {
                return Err(format!("In-order sequence descends at index {}", i + 1));
            }
            prev = value;
        }
        Ok(())
    }

    /// Check that arena allocation matches tree structure
    fn check_arena_tree_consistency(&self) -> TreeResult<()> {
        let stats = self.arena_stats();
        if stats.allocated_count != self.len + 1 {
            return Err(RbTreeError::arena_error(
                "Node consistency check",
                &format!(
                    "{} elements plus sentinel vs {} in arena",
                    self.len, stats.allocated_count
                ),
            ));
        }
        Ok(())
    }

    /// Returns true if no two adjacent elements are equivalent.
    pub fn has_unique_keys(&self) -> bool {
        let mut iter = self.iter();
        let mut prev = match iter.next() {
            Some(value) => value,
            None => return true,
        };
        for value in iter {
            if !self.compare.less(self.compare.key(prev), self.compare.key(value)) {
                return false;
            }
            prev = value;
        }
        true
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> Result<(), String> {
        self.check_invariants_detailed()
    }

    /// Check if tree is in a valid state for operations
    pub fn validate_for_operation(&self, operation: &str) -> RbTreeResult<()> {
        self.check_invariants_detailed().map_err(|e| {
            warn!("red-black tree failed validation before {}: {}", operation, e);
            RbTreeError::data_integrity(operation, &format!("Validation for {}: {}", operation, e))
        })
    }

    /// Full validation after every mutation in unit tests, or in any build
    /// with the `testing` feature (`cargo test --features testing` turns it on
    /// for the integration tests too).
    #[cfg(any(test, feature = "testing"))]
    pub(crate) fn debug_validate(&self, operation: &str) {
        if let Err(e) = self.check_invariants_detailed() {
            log::error!("invariant violated after {}: {}", operation, e);
            panic!("invariant violated after {}: {}", operation, e);
        }
    }

    #[cfg(not(any(test, feature = "testing")))]
    #[inline(always)]
    pub(crate) fn debug_validate(&self, _operation: &str) {}
}

// ============================================================================
// DEBUGGING AND TESTING UTILITIES
// ============================================================================

impl<T, C> RbTree<T, C> {
    /// Number of black nodes on every root-to-leaf path (0 when empty).
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut x = self.root();
        while x != NULL_NODE {
            if self.is_black(x) {
                height += 1;
            }
            x = self.left(x);
        }
        height
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if self.root() != NULL_NODE {
            stack.push((self.root(), 1));
        }
        while let Some((x, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [self.left(x), self.right(x)] {
                if child != NULL_NODE {
                    stack.push((child, depth + 1));
                }
            }
        }
        deepest
    }

    /// Returns all elements in order as a vector (for testing/debugging).
    pub fn slice(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Statistics of the node arena, sentinel included.
    pub fn arena_stats(&self) -> CompactArenaStats {
        self.nodes.stats()
    }
}

impl<T: Debug, C> RbTree<T, C> {
    /// Indented dump of the tree shape, one node per line, right subtree
    /// first so the output reads as the tree rotated a quarter turn.
    pub fn format_structure(&self) -> String {
        let mut out = String::new();
        if self.root() == NULL_NODE {
            out.push_str("<empty>\n");
        } else {
            self.format_node(self.root(), 0, &mut out);
        }
        out
    }

    /// Prints the tree structure for debugging.
    pub fn print_structure(&self) {
        println!("Tree structure ({} elements):", self.len);
        print!("{}", self.format_structure());
    }

    fn format_node(&self, x: NodeId, depth: usize, out: &mut String) {
        if self.right(x) != NULL_NODE {
            self.format_node(self.right(x), depth + 1, out);
        }
        let color = match self.color(x) {
            Color::Red => 'R',
            Color::Black => 'B',
        };
        let _ = writeln!(out, "{}{}[{}] {:?}", "  ".repeat(depth), color, x, self.node_value(x));
        if self.left(x) != NULL_NODE {
            self.format_node(self.left(x), depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Handle;

    #[test]
    fn test_valid_trees_pass() {
        let empty: RbTree<i32> = RbTree::new();
        assert!(empty.check_invariants());
        assert_eq!(empty.height(), 0);
        assert_eq!(empty.black_height(), 0);

        let tree: RbTree<i32> = (0..100).collect();
        assert_eq!(tree.validate(), Ok(()));
        assert!(tree.validate_for_operation("test").is_ok());
        assert!(tree.has_unique_keys());
        assert_eq!(tree.slice().len(), 100);
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree: RbTree<i32> = (0..3).collect();
        let root = tree.root();
        tree.set_color(root, Color::Red);
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.contains("red"), "{}", err);
    }

    fn node_ids(tree: &RbTree<i32>) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut x = tree.begin;
        while x != END_NODE {
            ids.push(x);
            x = tree.next_node(x);
        }
        ids
    }

    #[test]
    fn test_detects_red_red() {
        let mut tree: RbTree<i32> = (0..7).collect();
        let red = node_ids(&tree)
            .into_iter()
            .find(|&x| tree.is_red(x))
            .expect("seven ascending inserts leave a red node");
        let parent = tree.parent(red);
        tree.set_color(parent, Color::Red);
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree: RbTree<i32> = (0..7).collect();
        let black_leaf = node_ids(&tree)
            .into_iter()
            .find(|&x| {
                x != tree.root()
                    && tree.is_black(x)
                    && tree.left(x) == NULL_NODE
                    && tree.right(x) == NULL_NODE
            })
            .expect("seven ascending inserts leave a black leaf");
        tree.set_color(black_leaf, Color::Red);
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.contains("black height"), "{}", err);
    }

    #[test]
    #[should_panic(expected = "invariant violated after insert")]
    fn test_debug_validate_panics_on_corruption() {
        let mut tree: RbTree<i32> = (0..3).collect();
        let root = tree.root();
        tree.set_color(root, Color::Red);
        tree.debug_validate("insert");
    }

    #[test]
    fn test_mutations_run_debug_validate() {
        let mut tree: RbTree<i32> = (0..50).collect();
        for k in (0..50).step_by(2) {
            tree.erase_key(&k);
        }
        tree.insert_multi(7);
        assert_eq!(tree.len(), 26);
    }

    #[test]
    fn test_detects_broken_parent_link_and_order() {
        let mut tree: RbTree<i32> = (0..7).collect();
        let leaf = tree.begin().id();
        tree.set_parent(leaf, END_NODE);
        let err = tree.validate_for_operation("insert").unwrap_err();
        assert!(err.is_corruption());

        let mut tree: RbTree<i32> = (0..7).collect();
        let first = tree.begin();
        *tree.value_mut(first).unwrap() = 100;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.contains("descends"), "{}", err);
    }

    #[test]
    fn test_detects_stale_begin_and_len() {
        let mut tree: RbTree<i32> = (0..7).collect();
        tree.begin = tree.root();
        assert!(!tree.check_invariants());

        let mut tree: RbTree<i32> = (0..7).collect();
        tree.len += 1;
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_has_unique_keys_for_multi_tree() {
        let mut tree = RbTree::new();
        tree.insert_multi_iter([1, 2, 2]);
        assert!(tree.check_invariants());
        assert!(!tree.has_unique_keys());
    }

    #[test]
    fn test_height_bounds() {
        let tree: RbTree<u32> = (0..1000).collect();
        // 2 * log2(n + 1)
        assert!(tree.height() <= 20);
        assert!(tree.black_height() >= 1);
        assert_eq!(tree.arena_stats().allocated_count, 1001);
    }

    #[test]
    fn test_format_structure() {
        let tree: RbTree<i32> = [10, 20, 30].into_iter().collect();
        let dump = tree.format_structure();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  R"));
        assert!(lines[1].starts_with("B"));
        assert!(lines[1].ends_with("20"));
        assert_eq!(RbTree::<i32>::new().format_structure(), "<empty>\n");
        assert_eq!(tree.value(Handle(tree.root())), Some(&20));
    }
}
