//! Rotations and red-black fix-up.
//!
//! All routines operate on node ids inside the tree's arena. The root lives
//! in the sentinel's `left` slot, so a rotation at the root re-links through
//! the same parent-slot logic as any other rotation.

use log::trace;

use crate::types::{Color, RbTree, NULL_NODE, NodeId};

impl<T, C> RbTree<T, C> {
    // ============================================================================
    // ROTATIONS
    // ============================================================================

    /// Rotate `x` down to the left; its right child takes its place.
    ///
    /// ```text
    ///     x                y
    ///    / \              / \
    ///   a   y     =>     x   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        debug_assert!(y != NULL_NODE, "rotate_left needs a right child");

        let b = self.left(y);
        self.set_right(x, b);
        if b != NULL_NODE {
            self.set_parent(b, x);
        }

        let xp = self.parent(x);
        self.set_parent(y, xp);
        if self.is_left_child(x) {
            self.set_left(xp, y);
        } else {
            self.set_right(xp, y);
        }

        self.set_left(y, x);
        self.set_parent(x, y);
    }

    /// Rotate `x` down to the right; its left child takes its place.
    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        debug_assert!(y != NULL_NODE, "rotate_right needs a left child");

        let b = self.right(y);
        self.set_left(x, b);
        if b != NULL_NODE {
            self.set_parent(b, x);
        }

        let xp = self.parent(x);
        self.set_parent(y, xp);
        if self.is_left_child(x) {
            self.set_left(xp, y);
        } else {
            self.set_right(xp, y);
        }

        self.set_right(y, x);
        self.set_parent(x, y);
    }

    // ============================================================================
    // INSERT FIX-UP
    // ============================================================================

    /// Restore the red-black invariants after `x` was linked as a leaf.
    ///
    /// `root` is the root at the time of linking (`x` itself for the first
    /// element). A red uncle is handled by recoloring and moving two levels
    /// up; a black or absent uncle by one or two rotations, after which the
    /// loop ends.
    pub(crate) fn balance_after_insert(&mut self, root: NodeId, mut x: NodeId) {
        self.set_color(x, if x == root { Color::Black } else { Color::Red });

        while x != root && self.is_red(self.parent(x)) {
            // A red parent is never the root, so the grandparent is a real node.
            let xp = self.parent(x);
            let xpp = self.parent(xp);

            if self.is_left_child(xp) {
                let uncle = self.right(xpp);
                if self.is_red(uncle) {
                    self.set_color(xp, Color::Black);
                    self.set_color(uncle, Color::Black);
                    x = xpp;
                    self.set_color(x, if x == root { Color::Black } else { Color::Red });
                } else {
                    if !self.is_left_child(x) {
                        x = xp;
                        self.rotate_left(x);
                    }
                    x = self.parent(x);
                    self.set_color(x, Color::Black);
                    x = self.parent(x);
                    self.set_color(x, Color::Red);
                    self.rotate_right(x);
                    trace!("insert fix-up rotated right at node {}", x);
                    break;
                }
            } else {
                let uncle = self.left(xpp);
                if self.is_red(uncle) {
                    self.set_color(xp, Color::Black);
                    self.set_color(uncle, Color::Black);
                    x = xpp;
                    self.set_color(x, if x == root { Color::Black } else { Color::Red });
                } else {
                    if self.is_left_child(x) {
                        x = xp;
                        self.rotate_right(x);
                    }
                    x = self.parent(x);
                    self.set_color(x, Color::Black);
                    x = self.parent(x);
                    self.set_color(x, Color::Red);
                    self.rotate_left(x);
                    trace!("insert fix-up rotated left at node {}", x);
                    break;
                }
            }
        }
    }

    // ============================================================================
    // REMOVAL + REMOVE FIX-UP
    // ============================================================================

    /// Unlink `z` from the tree and restore the red-black invariants.
    ///
    /// When `z` has two children its in-order successor `y` is the node that
    /// is physically spliced out; `y` then takes over `z`'s links and color so
    /// that no value moves between slots and every other handle stays valid.
    /// The `z` slot itself is left detached for the caller to free.
    pub(crate) fn remove_node(&mut self, z: NodeId) {
        let mut root = self.root();

        // y: node physically removed from its position.
        let y = if self.left(z) == NULL_NODE || self.right(z) == NULL_NODE {
            z
        } else {
            self.min(self.right(z))
        };
        // x: y's only child (possibly absent) which moves into y's slot.
        let mut x = if self.left(y) != NULL_NODE {
            self.left(y)
        } else {
            self.right(y)
        };
        // w: x's sibling after the splice.
        let mut w = NULL_NODE;

        let yp = self.parent(y);
        if x != NULL_NODE {
            self.set_parent(x, yp);
        }
        if self.is_left_child(y) {
            self.set_left(yp, x);
            if y != root {
                w = self.right(yp);
            } else {
                root = x;
            }
        } else {
            self.set_right(yp, x);
            w = self.left(yp);
        }

        let removed_black = self.is_black(y);

        if y != z {
            // Move y into z's structural position.
            let zp = self.parent(z);
            self.set_parent(y, zp);
            if self.is_left_child(z) {
                self.set_left(zp, y);
            } else {
                self.set_right(zp, y);
            }

            let zl = self.left(z);
            self.set_left(y, zl);
            self.set_parent(zl, y);

            let zr = self.right(z);
            self.set_right(y, zr);
            if zr != NULL_NODE {
                self.set_parent(zr, y);
            }

            let z_color = self.color(z);
            self.set_color(y, z_color);
            if root == z {
                root = y;
            }
        }

        if removed_black && root != NULL_NODE {
            if x != NULL_NODE {
                // A black node with one child: the child is red, paint it black.
                self.set_color(x, Color::Black);
            } else {
                self.balance_after_remove(root, w);
            }
        }

        let detached = &mut self.nodes[z];
        detached.left = NULL_NODE;
        detached.right = NULL_NODE;
        detached.parent = NULL_NODE;
    }

    /// Double-black repair walking up from an absent child whose sibling is `w`.
    fn balance_after_remove(&mut self, mut root: NodeId, mut w: NodeId) {
        loop {
            if !self.is_left_child(w) {
                // x is a left child, w its right sibling.
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    let wp = self.parent(w);
                    self.set_color(wp, Color::Red);
                    self.rotate_left(wp);
                    if root == self.left(w) {
                        root = w;
                    }
                    w = self.right(self.left(w));
                }

                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    self.set_color(w, Color::Red);
                    let x = self.parent(w);
                    if x == root || self.is_red(x) {
                        self.set_color(x, Color::Black);
                        break;
                    }
                    let xp = self.parent(x);
                    w = if self.is_left_child(x) {
                        self.right(xp)
                    } else {
                        self.left(xp)
                    };
                } else {
                    if self.is_black(self.right(w)) {
                        let wl = self.left(w);
                        self.set_color(wl, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.parent(w);
                    }
                    let wp = self.parent(w);
                    let parent_color = self.color(wp);
                    self.set_color(w, parent_color);
                    self.set_color(wp, Color::Black);
                    let wr = self.right(w);
                    self.set_color(wr, Color::Black);
                    self.rotate_left(wp);
                    trace!("remove fix-up rotated left at node {}", wp);
                    break;
                }
            } else {
                // x is a right child, w its left sibling.
                if self.is_red(w) {
                    self.set_color(w, Color::Black);
                    let wp = self.parent(w);
                    self.set_color(wp, Color::Red);
                    self.rotate_right(wp);
                    if root == self.right(w) {
                        root = w;
                    }
                    w = self.left(self.right(w));
                }

                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    self.set_color(w, Color::Red);
                    let x = self.parent(w);
                    if x == root || self.is_red(x) {
                        self.set_color(x, Color::Black);
                        break;
                    }
                    let xp = self.parent(x);
                    w = if self.is_left_child(x) {
                        self.right(xp)
                    } else {
                        self.left(xp)
                    };
                } else {
                    if self.is_black(self.left(w)) {
                        let wr = self.right(w);
                        self.set_color(wr, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.parent(w);
                    }
                    let wp = self.parent(w);
                    let parent_color = self.color(wp);
                    self.set_color(w, parent_color);
                    self.set_color(wp, Color::Black);
                    let wl = self.left(w);
                    self.set_color(wl, Color::Black);
                    self.rotate_right(wp);
                    trace!("remove fix-up rotated right at node {}", wp);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Color, RbTree, END_NODE, NULL_NODE};

    fn keys(tree: &RbTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn test_rotate_left_at_root_relinks_sentinel() {
        let mut tree = RbTree::new();
        let (a, _) = tree.insert_unique(1);
        let (b, _) = tree.insert_unique(2);
        assert_eq!(tree.root(), a.id());

        tree.rotate_left(a.id());
        assert_eq!(tree.root(), b.id());
        assert_eq!(tree.parent(b.id()), END_NODE);
        assert_eq!(tree.left(b.id()), a.id());
        assert_eq!(tree.parent(a.id()), b.id());
        assert_eq!(tree.right(a.id()), NULL_NODE);
        assert_eq!(keys(&tree), [1, 2]);
    }

    #[test]
    fn test_rotations_are_inverse() {
        let mut tree: RbTree<i32> = (1..=7).collect();
        let before = keys(&tree);
        let root = tree.root();
        let child = tree.left(root);

        tree.rotate_right(root);
        assert_eq!(tree.root(), child);
        assert_eq!(keys(&tree), before);

        tree.rotate_left(child);
        assert_eq!(tree.root(), root);
        assert_eq!(keys(&tree), before);
    }

    #[test]
    fn test_ascending_inserts_rotate_to_middle() {
        let mut tree = RbTree::new();
        tree.insert_unique(10);
        tree.insert_unique(20);
        tree.insert_unique(30);

        assert_eq!(*tree.node_value(tree.root()), 20);
        assert_eq!(tree.color(tree.root()), Color::Black);
        assert!(tree.is_red(tree.left(tree.root())));
        assert!(tree.is_red(tree.right(tree.root())));
    }

    #[test]
    fn test_red_uncle_recolors_without_rotation() {
        let mut tree = RbTree::new();
        for key in [20, 10, 30] {
            tree.insert_unique(key);
        }
        let root = tree.root();
        tree.insert_unique(5);

        assert_eq!(tree.root(), root);
        assert!(tree.is_black(tree.left(root)));
        assert!(tree.is_black(tree.right(root)));
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_remove_two_child_node_keeps_successor_slot() {
        let mut tree: RbTree<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
        let seven = tree.find(&7);
        let five = tree.find(&5);

        tree.erase(five);
        assert_eq!(tree.find(&7), seven);
        assert_eq!(keys(&tree), [1, 3, 4, 7, 8, 9]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_remove_black_leaf_triggers_fixup() {
        let mut tree: RbTree<i32> = (1..=15).collect();
        for key in [1, 3, 5, 7, 9, 11, 13, 15] {
            assert_eq!(tree.erase_key(&key), 1);
            assert!(tree.check_invariants(), "after erasing {}", key);
        }
        assert_eq!(keys(&tree), [2, 4, 6, 8, 10, 12, 14]);
    }

    #[test]
    fn test_remove_until_empty_descending() {
        let mut tree: RbTree<i32> = (0..64).collect();
        for key in (0..64).rev() {
            tree.erase_key(&key);
            assert!(tree.check_invariants(), "after erasing {}", key);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root(), NULL_NODE);
    }
}
