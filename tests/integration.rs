//! Cross-engine conformance and the randomized structural-invariant
//! scenario. Per-engine unit tests live alongside each engine's source;
//! this suite exercises the shared [`OrderedMap`] contract and the
//! concrete scenarios that name more than one engine.

use quickcheck_macros::quickcheck;
use treeforge::{BPlusTree, BTree, Order, OrderedMap, SplayTree};

fn ascending_from<T: OrderedMap<i32, i32>>(mut tree: T, keys: &[i32]) -> T {
    for &k in keys {
        tree.insert(k, k * 2);
    }
    tree
}

#[test]
fn scenario_s1_btree_ascending_insert_height_and_removal() {
    let mut tree = BTree::with_order(Order::new(4));
    for k in 1..=10 {
        assert!(tree.insert(k, k * 10));
    }
    assert_eq!(tree.height(), 4);
    assert_eq!(
        tree.elements(),
        (1..=10).map(|k| (k, k * 10)).collect::<Vec<_>>()
    );
    assert_eq!(tree.remove(&10), Some(100));
    assert_eq!(OrderedMap::len(&tree), 9);
}

#[test]
fn scenario_s2_bplustree_bulk_load_leaf_chain_and_range() {
    let items: Vec<(i32, i32)> = (1..=16).map(|k| (k, k)).collect();
    let tree = BPlusTree::bulk_load(items, Order::new(4));
    assert_eq!(OrderedMap::len(&tree), 16);
    assert_eq!(
        tree.range(&3, &10),
        (3..=10).map(|k| (k, k)).collect::<Vec<_>>()
    );
}

#[test]
fn scenario_s3_bplustree_stale_separator_is_invisible() {
    let mut tree: BPlusTree<i32, i32> = BPlusTree::with_order(Order::new(4));
    for k in [5, 8, 1, 38, 46, 33, 23, 3, 78, 2, 13] {
        tree.insert(k, k);
    }
    assert_eq!(tree.remove(&33), Some(33));
    assert_eq!(tree.search(&33), None);
    assert!(!OrderedMap::contains_key(&mut tree, &33));
}

#[test]
fn scenario_s4_splay_search_reshapes_to_root() {
    let mut tree: SplayTree<i32, &str> = SplayTree::new();
    tree.insert(2, "two");
    tree.insert(3, "three");
    assert_eq!(tree.search(&2), Some("two"));
    assert_eq!(tree.search(&3), Some("three"));
    assert_eq!(tree.elements(), vec![(2, "two"), (3, "three")]);
}

#[test]
fn scenario_s5_splay_join_and_rejected_overlap() {
    let mut a: SplayTree<i32, i32> = ascending_from(SplayTree::new(), &[1, 2, 3]);
    let mut b: SplayTree<i32, i32> = ascending_from(SplayTree::new(), &[4, 5, 6, 7]);
    assert!(a.join(&mut b));
    assert_eq!(
        a.elements().into_iter().map(|(k, _)| k).collect::<Vec<_>>(),
        (1..=7).collect::<Vec<_>>()
    );
    assert_eq!(OrderedMap::len(&b), 0);

    let mut overlapping: SplayTree<i32, i32> = ascending_from(SplayTree::new(), &[3, 4, 5]);
    assert!(!a.join(&mut overlapping));
}

fn reference_invariants_hold<T: OrderedMap<i32, i32>>(tree: &mut T, expected: &[i32]) {
    assert_eq!(tree.len(), expected.len());
    let got: Vec<i32> = tree.elements().into_iter().map(|(k, _)| k).collect();
    assert_eq!(got, expected, "elements must be sorted and match the reference set");
    for &k in expected {
        assert!(tree.contains_key(&k), "key {k} should be present");
    }
}

/// S6: insert 50 random distinct keys, remove 80% of them at random,
/// checking after every single operation that `elements()` matches a
/// plain `Vec`-backed reference kept in lockstep - across all three
/// engines.
#[quickcheck]
fn scenario_s6_randomized_insert_remove_matches_reference(seed: u64) {
    let mut lcg = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut next = move || {
        lcg = lcg.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (lcg >> 33) as i32
    };

    let mut keys: Vec<i32> = Vec::new();
    while keys.len() < 50 {
        let k = next().rem_euclid(10_000);
        if !keys.contains(&k) {
            keys.push(k);
        }
    }

    let mut reference: Vec<i32> = Vec::new();

    let mut btree = BTree::with_order(Order::new(5));
    let mut bplus: BPlusTree<i32, i32> = BPlusTree::with_order(Order::new(5));
    let mut splay: SplayTree<i32, i32> = SplayTree::new();

    for &k in &keys {
        btree.insert(k, k);
        bplus.insert(k, k);
        splay.insert(k, k);
        reference.push(k);
        reference.sort_unstable();

        reference_invariants_hold(&mut btree, &reference);
        reference_invariants_hold(&mut bplus, &reference);
        reference_invariants_hold(&mut splay, &reference);
    }

    let to_remove = (keys.len() * 4) / 5;
    for &k in keys.iter().take(to_remove) {
        assert_eq!(btree.remove(&k), Some(k));
        assert_eq!(bplus.remove(&k), Some(k));
        assert_eq!(splay.remove(&k), Some(k));
        reference.retain(|&x| x != k);

        reference_invariants_hold(&mut btree, &reference);
        reference_invariants_hold(&mut bplus, &reference);
        reference_invariants_hold(&mut splay, &reference);
    }
}

#[test]
fn all_three_engines_agree_on_a_shared_workload() {
    let keys = [15, 3, 22, 8, 1, 30, 11, 5, 19, 27, 2, 17];

    let mut btree = ascending_from(BTree::new(), &keys);
    let mut bplus: BPlusTree<i32, i32> = ascending_from(BPlusTree::new(), &keys);
    let mut splay: SplayTree<i32, i32> = ascending_from(SplayTree::new(), &keys);

    let mut expected: Vec<i32> = keys.to_vec();
    expected.sort_unstable();

    assert_eq!(btree.elements().into_iter().map(|(k, _)| k).collect::<Vec<_>>(), expected);
    assert_eq!(bplus.elements().into_iter().map(|(k, _)| k).collect::<Vec<_>>(), expected);
    assert_eq!(splay.elements().into_iter().map(|(k, _)| k).collect::<Vec<_>>(), expected);

    for &k in &keys {
        assert_eq!(OrderedMap::search(&mut btree, &k), Some(k * 2));
        assert_eq!(OrderedMap::search(&mut bplus, &k), Some(k * 2));
        assert_eq!(OrderedMap::search(&mut splay, &k), Some(k * 2));
    }

    assert_eq!(btree.min(), Some((1, 2)));
    assert_eq!(bplus.min(), Some((1, 2)));
    assert_eq!(splay.min(), Some((1, 2)));
    assert_eq!(btree.max(), Some((30, 60)));
    assert_eq!(bplus.max(), Some((30, 60)));
    assert_eq!(splay.max(), Some((30, 60)));
}
