use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rbtree::{Descending, RbTree};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

const TEST_SIZE: usize = 5000;

fn random_keys(seed: u64, n: usize, range: i32) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..range)).collect()
}

#[test]
fn test_insertion_vs_btreeset() {
    let data = random_keys(1, TEST_SIZE, 10_000);

    let mut set = BTreeSet::new();
    let mut tree = RbTree::new();
    for key in &data {
        let inserted = tree.insert_unique(*key).1;
        assert_eq!(inserted, set.insert(*key), "key {}", key);
    }

    assert_eq!(tree.len(), set.len());
    assert!(tree.iter().eq(set.iter()));
    assert!(tree.check_invariants());
}

#[test]
fn test_lookup_and_bounds_vs_btreeset() {
    let data = random_keys(2, TEST_SIZE, 20_000);
    let set: BTreeSet<i32> = data.iter().copied().collect();
    let tree: RbTree<i32> = data.iter().copied().collect();

    for probe in (-10..20_010).step_by(7) {
        assert_eq!(tree.contains(&probe), set.contains(&probe));
        assert_eq!(
            tree.value(tree.lower_bound(&probe)),
            set.range(probe..).next(),
            "lower_bound({})",
            probe
        );
        assert_eq!(
            tree.value(tree.upper_bound(&probe)),
            set.range((Bound::Excluded(probe), Bound::Unbounded)).next(),
            "upper_bound({})",
            probe
        );
    }
}

#[test]
fn test_range_vs_btreeset() {
    let data = random_keys(3, 2000, 5000);
    let set: BTreeSet<i32> = data.iter().copied().collect();
    let tree: RbTree<i32> = data.iter().copied().collect();

    let mut rng = StdRng::seed_from_u64(33);
    for _ in 0..200 {
        let a = rng.gen_range(0..5000);
        let b = rng.gen_range(a..5001);
        assert!(tree.range(a..b).eq(set.range(a..b)), "{}..{}", a, b);
        assert!(tree.range(a..=b).eq(set.range(a..=b)), "{}..={}", a, b);
        assert!(tree.range(a..b).rev().eq(set.range(a..b).rev()));
    }
}

#[test]
fn test_removal_vs_btreeset() {
    let data = random_keys(4, TEST_SIZE, 3000);
    let mut set: BTreeSet<i32> = data.iter().copied().collect();
    let mut tree: RbTree<i32> = data.iter().copied().collect();

    let mut order: Vec<i32> = (0..3000).collect();
    order.shuffle(&mut StdRng::seed_from_u64(44));
    for (i, key) in order.iter().enumerate() {
        assert_eq!(tree.remove(key), set.take(key));
        if i % 250 == 0 {
            assert!(tree.check_invariants(), "after removing {}", key);
            assert!(tree.iter().eq(set.iter()));
        }
    }
    assert!(tree.is_empty());
    assert!(tree.check_invariants());
}

#[test]
fn test_multi_insert_vs_counting_map() {
    let data = random_keys(5, TEST_SIZE, 200);
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    let mut tree = RbTree::new();
    for key in &data {
        tree.insert_multi(*key);
        *counts.entry(*key).or_default() += 1;
    }

    assert_eq!(tree.len(), data.len());
    for (key, count) in &counts {
        assert_eq!(tree.count_multi(key), *count, "key {}", key);
    }

    for key in (0..200).step_by(3) {
        let expected = counts.remove(&key).unwrap_or(0);
        assert_eq!(tree.erase_key_multi(&key), expected);
    }
    let expected: Vec<i32> = counts
        .iter()
        .flat_map(|(k, c)| std::iter::repeat(*k).take(*c))
        .collect();
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
    assert!(tree.check_invariants());
}

#[test]
fn test_descending_order_vs_reversed_btreeset() {
    let data = random_keys(6, 1000, 5000);
    let set: BTreeSet<i32> = data.iter().copied().collect();
    let tree: RbTree<i32, Descending> = data.iter().copied().collect();

    assert!(tree.iter().eq(set.iter().rev()));
    assert_eq!(tree.first(), set.last());
    assert_eq!(tree.last(), set.first());
}

#[test]
fn test_sequential_access_vs_btreeset() {
    let set: BTreeSet<i32> = (0..TEST_SIZE as i32).collect();
    let tree: RbTree<i32> = (0..TEST_SIZE as i32).collect();

    let mut cursor = tree.cursor_back();
    for expected in set.iter().rev() {
        assert_eq!(cursor.current(), Some(expected));
        cursor.move_prev();
    }
    assert!(cursor.is_end());
}
