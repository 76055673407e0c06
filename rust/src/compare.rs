//! Ordering policies for RbTree.
//!
//! A comparator projects each stored value to its key and orders keys with a
//! strict weak ordering ("less"). Two values are equivalent when neither is
//! less than the other; that is the only notion of equality the tree uses.

use std::marker::PhantomData;

/// Strict weak ordering over the keys of stored values.
pub trait TreeCompare<T> {
    /// The part of `T` the ordering looks at.
    type Key: ?Sized;

    /// Project a stored value to its key.
    fn key<'a>(&self, value: &'a T) -> &'a Self::Key;

    /// Returns true if `a` orders strictly before `b`.
    fn less(&self, a: &Self::Key, b: &Self::Key) -> bool;

    /// Returns true if neither key orders before the other.
    #[inline]
    fn equivalent(&self, a: &Self::Key, b: &Self::Key) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Ascending order by `Ord`; the value is its own key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> TreeCompare<T> for Natural {
    type Key = T;

    #[inline]
    fn key<'a>(&self, value: &'a T) -> &'a T {
        value
    }

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// Descending order by `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descending;

impl<T: Ord> TreeCompare<T> for Descending {
    type Key = T;

    #[inline]
    fn key<'a>(&self, value: &'a T) -> &'a T {
        value
    }

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

/// Orders `(K, V)` pairs by `K` alone, which is what a map stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByFirst;

impl<K: Ord, V> TreeCompare<(K, V)> for ByFirst {
    type Key = K;

    #[inline]
    fn key<'a>(&self, value: &'a (K, V)) -> &'a K {
        &value.0
    }

    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Orders values with a caller-supplied "less" closure.
///
/// ```
/// use rbtree::{LessBy, RbTree};
///
/// let by_len = LessBy::<&str, _>::new(|a: &&str, b: &&str| a.len() < b.len());
/// let mut tree = RbTree::with_comparator(by_len);
/// tree.insert_unique("three");
/// tree.insert_unique("a");
/// tree.insert_unique("xy");
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["a", "xy", "three"]);
/// ```
pub struct LessBy<T, F> {
    less: F,
    _marker: PhantomData<fn(&T, &T) -> bool>,
}

impl<T, F: Fn(&T, &T) -> bool> LessBy<T, F> {
    pub fn new(less: F) -> Self {
        Self {
            less,
            _marker: PhantomData,
        }
    }
}

impl<T, F: Clone> Clone for LessBy<T, F> {
    fn clone(&self) -> Self {
        Self {
            less: self.less.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, F> std::fmt::Debug for LessBy<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LessBy")
    }
}

impl<T, F: Fn(&T, &T) -> bool> TreeCompare<T> for LessBy<T, F> {
    type Key = T;

    #[inline]
    fn key<'a>(&self, value: &'a T) -> &'a T {
        value
    }

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        (self.less)(a, b)
    }
}
