// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The B+Tree engine: separators-only internal nodes, values resident
//! only in leaves, leaves chained via a doubly-linked list through a flat
//! pool (see `node.rs` for why the pool exists).

use crate::bplustree::iter::{Iter, RevIter};
use crate::bplustree::node::{BPlusNode, LeafNode};
use crate::btree::node::lower_bound;
use crate::collection::OrderedMap;
use crate::order::Order;

/// A balanced multi-way search tree of order `m` with values resident only
/// in leaves and a doubly-linked leaf chain for ordered scans.
///
/// ## Examples
///
/// ```rust
/// use treeforge::{BPlusTree, OrderedMap};
///
/// let mut tree = BPlusTree::new();
/// tree.insert(1, "a");
/// tree.insert(2, "b");
/// assert_eq!(tree.range(&1, &2), vec![(1, "a"), (2, "b")]);
/// ```
pub struct BPlusTree<K, V> {
    root: Box<BPlusNode<K>>,
    leaves: Vec<Option<LeafNode<K, V>>>,
    free: Vec<usize>,
    order: Order,
    len: usize,
}

impl<K, V> BPlusTree<K, V> {
    pub fn new() -> Self {
        Self::with_order(Order::default())
    }

    pub fn with_order(order: Order) -> Self {
        let mut leaves = Vec::new();
        leaves.push(Some(LeafNode::new(order)));
        BPlusTree {
            root: Box::new(BPlusNode::Leaf { slot: 0 }),
            leaves,
            free: Vec::new(),
            order,
            len: 0,
        }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    fn leaf(&self, slot: usize) -> &LeafNode<K, V> {
        self.leaves[slot].as_ref().expect("live slot")
    }

    fn leaf_mut(&mut self, slot: usize) -> &mut LeafNode<K, V> {
        self.leaves[slot].as_mut().expect("live slot")
    }

    /// First leaf of the chain, or `None` if the tree is empty (single
    /// empty leaf root).
    fn first_leaf_slot(&self) -> usize {
        let mut node = &*self.root;
        loop {
            match node.children() {
                Some(children) => node = &children[0],
                None => return node.leaf_slot().expect("leaf at bottom"),
            }
        }
    }

    /// Last leaf of the chain.
    fn last_leaf_slot(&self) -> usize {
        let mut node = &*self.root;
        loop {
            match node.children() {
                Some(children) => node = children.last().expect("internal node has children"),
                None => return node.leaf_slot().expect("leaf at bottom"),
            }
        }
    }
}

impl<K, V> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> BPlusTree<K, V> {
    /// Build a tree from a sequence sorted ascending by key.
    ///
    /// ## Panics
    ///
    /// Panics (debug builds only) on an out-of-order input - bulk-load's
    /// ordering precondition is a programmer-error check, not a runtime
    /// fallback.
    pub fn bulk_load(items: Vec<(K, V)>, order: Order) -> Self {
        debug_assert!(
            items.windows(2).all(|w| w[0].0 < w[1].0),
            "bulk_load requires a strictly ascending input"
        );

        let mut tree = Self::with_order(order);
        tree.leaves.clear();
        tree.free.clear();

        let n = items.len();
        if n == 0 {
            tree.leaves.push(Some(LeafNode::new(order)));
            return tree;
        }

        let groups = crate::bulk::smallest_valid_group_count(
            n,
            order.min_keys(),
            order.max_keys(),
        );
        let sizes = crate::bulk::even_resident_sizes(n, groups);

        let mut iter = items.into_iter();
        let mut leaf_slots = Vec::with_capacity(groups);
        let mut first_keys = Vec::with_capacity(groups);
        for size in sizes {
            let mut keys = Vec::with_capacity(order.get());
            let mut values = Vec::with_capacity(order.get());
            for _ in 0..size {
                let (k, v) = iter.next().expect("size sums to n");
                keys.push(k);
                values.push(v);
            }
            first_keys.push(keys[0].clone());
            tree.leaves.push(Some(LeafNode {
                keys,
                values,
                prev: None,
                next: None,
            }));
            leaf_slots.push(tree.leaves.len() - 1);
        }

        for w in leaf_slots.windows(2) {
            let (a, b) = (w[0], w[1]);
            tree.leaf_mut(a).next = Some(b);
            tree.leaf_mut(b).prev = Some(a);
        }

        let mut level: Vec<Box<BPlusNode<K>>> = leaf_slots
            .into_iter()
            .map(|slot| Box::new(BPlusNode::Leaf { slot }))
            .collect();
        let mut level_keys = first_keys;

        while level.len() > 1 {
            let groups =
                crate::bulk::smallest_valid_group_count(level.len(), order.min_children(), order.get());
            let sizes = crate::bulk::even_resident_sizes(level.len(), groups);

            let mut node_iter = level.into_iter();
            let mut key_iter = level_keys.into_iter();
            let mut next_level = Vec::with_capacity(groups);
            let mut next_keys = Vec::with_capacity(groups);
            for size in sizes {
                let first_key = key_iter.next().expect("one key per child");
                let mut children = Vec::with_capacity(size);
                children.push(node_iter.next().expect("size sums to level length"));
                let mut keys = Vec::with_capacity(order.max_keys());
                for _ in 1..size {
                    keys.push(key_iter.next().expect("one key per child"));
                    children.push(node_iter.next().expect("size sums to level length"));
                }
                next_keys.push(first_key);
                next_level.push(Box::new(BPlusNode::Internal { keys, children }));
            }
            level = next_level;
            level_keys = next_keys;
        }

        tree.root = level.into_iter().next().expect("at least one node");
        tree.len = n;
        tree
    }
}

impl<K: Ord + Clone, V: Clone> BPlusTree<K, V> {
    /// Look up the value stored for `key`.
    pub fn search(&self, key: &K) -> Option<V> {
        let slot = self.descend_to_leaf(key);
        let leaf = self.leaf(slot);
        lower_bound(&leaf.keys, key).ok().map(|i| leaf.values[i].clone())
    }

    fn descend_to_leaf(&self, key: &K) -> usize {
        let mut node = &*self.root;
        loop {
            match node {
                BPlusNode::Leaf { slot } => return *slot,
                BPlusNode::Internal { .. } => {
                    let i = node.child_index(key);
                    node = &node.children().unwrap()[i];
                }
            }
        }
    }

    /// The least key/value pair, or `None` if the tree is empty.
    pub fn min(&self) -> Option<(K, V)> {
        let leaf = self.leaf(self.first_leaf_slot());
        leaf.keys.first().cloned().map(|k| (k, leaf.values[0].clone()))
    }

    /// The greatest key/value pair, or `None` if the tree is empty.
    pub fn max(&self) -> Option<(K, V)> {
        let mut node = &*self.root;
        loop {
            match node.children() {
                Some(children) => node = children.last().expect("internal node has children"),
                None => {
                    let leaf = self.leaf(node.leaf_slot().expect("leaf"));
                    return leaf.keys.last().cloned().map(|k| {
                        let i = leaf.keys.len() - 1;
                        (k, leaf.values[i].clone())
                    });
                }
            }
        }
    }

    /// Greatest key `<= key`, consulting the previous leaf when `key`
    /// would sort before this leaf's first element.
    pub fn floor(&self, key: &K) -> Option<(K, V)> {
        let slot = self.descend_to_leaf(key);
        let leaf = self.leaf(slot);
        match lower_bound(&leaf.keys, key) {
            Ok(i) => Some((leaf.keys[i].clone(), leaf.values[i].clone())),
            Err(0) => leaf.prev.and_then(|p| self.last_of(p)),
            Err(i) => Some((leaf.keys[i - 1].clone(), leaf.values[i - 1].clone())),
        }
    }

    /// Least key `>= key`, consulting the next leaf when `key` sorts past
    /// this leaf's last element.
    pub fn ceiling(&self, key: &K) -> Option<(K, V)> {
        let slot = self.descend_to_leaf(key);
        let leaf = self.leaf(slot);
        let i = match lower_bound(&leaf.keys, key) {
            Ok(i) => i,
            Err(i) => i,
        };
        if i < leaf.keys.len() {
            Some((leaf.keys[i].clone(), leaf.values[i].clone()))
        } else {
            leaf.next.and_then(|n| self.first_of(n))
        }
    }

    /// Greatest key strictly `< key`.
    pub fn predecessor(&self, key: &K) -> Option<(K, V)> {
        let slot = self.descend_to_leaf(key);
        let leaf = self.leaf(slot);
        let i = match lower_bound(&leaf.keys, key) {
            Ok(i) => i,
            Err(i) => i,
        };
        if i > 0 {
            Some((leaf.keys[i - 1].clone(), leaf.values[i - 1].clone()))
        } else {
            leaf.prev.and_then(|p| self.last_of(p))
        }
    }

    /// Least key strictly `> key`.
    pub fn successor(&self, key: &K) -> Option<(K, V)> {
        let slot = self.descend_to_leaf(key);
        let leaf = self.leaf(slot);
        let i = match lower_bound(&leaf.keys, key) {
            Ok(i) => i + 1,
            Err(i) => i,
        };
        if i < leaf.keys.len() {
            Some((leaf.keys[i].clone(), leaf.values[i].clone()))
        } else {
            leaf.next.and_then(|n| self.first_of(n))
        }
    }

    fn first_of(&self, slot: usize) -> Option<(K, V)> {
        let leaf = self.leaf(slot);
        leaf.keys.first().cloned().map(|k| (k, leaf.values[0].clone()))
    }

    fn last_of(&self, slot: usize) -> Option<(K, V)> {
        let leaf = self.leaf(slot);
        leaf.keys.last().cloned().map(|k| {
            let i = leaf.keys.len() - 1;
            (k, leaf.values[i].clone())
        })
    }

    /// All elements with keys in `[lo, hi]`, walking the leaf chain from
    /// the leaf containing `lo`. O(log n + k).
    pub fn range(&self, lo: &K, hi: &K) -> Vec<(K, V)> {
        let mut out = Vec::new();
        if lo > hi {
            return out;
        }
        let mut slot = Some(self.descend_to_leaf(lo));
        'chain: while let Some(s) = slot {
            let leaf = self.leaf(s);
            for (k, v) in leaf.keys.iter().zip(leaf.values.iter()) {
                if k > hi {
                    break 'chain;
                }
                if k >= lo {
                    out.push((k.clone(), v.clone()));
                }
            }
            slot = leaf.next;
        }
        out
    }

    /// All elements, ascending, via a full leaf-chain walk.
    pub fn elements(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Lazy ascending iterator over borrowed key/value pairs, stepping the
    /// leaf chain one `next` pointer at a time rather than materialising a
    /// `Vec` up front.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let first = if self.len == 0 { None } else { Some(self.first_leaf_slot()) };
        Iter::new(&self.leaves, first)
    }

    /// Lazy descending iterator over borrowed key/value pairs, stepping the
    /// leaf chain via `prev`.
    pub fn iter_rev(&self) -> RevIter<'_, K, V> {
        let last = if self.len == 0 { None } else { Some(self.last_leaf_slot()) };
        RevIter::new(&self.leaves, last)
    }
}

enum SplitOutcome<K> {
    Inserted,
    AlreadyPresent,
    Split { key: K, right: Box<BPlusNode<K>> },
}

impl<K: Ord + Clone, V: Clone> BPlusTree<K, V> {
    /// Insert `key` -> `value` if absent.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let order = self.order;
        match insert_rec(&mut self.root, &mut self.leaves, &mut self.free, order, key, value) {
            SplitOutcome::AlreadyPresent => false,
            SplitOutcome::Inserted => {
                self.len += 1;
                true
            }
            SplitOutcome::Split { key, right } => {
                let left = std::mem::replace(&mut self.root, Box::new(BPlusNode::Leaf { slot: 0 }));
                self.root = Box::new(BPlusNode::Internal {
                    keys: vec![key],
                    children: vec![left, right],
                });
                self.len += 1;
                true
            }
        }
    }
}

fn insert_rec<K: Ord + Clone, V: Clone>(
    node: &mut BPlusNode<K>,
    leaves: &mut Vec<Option<LeafNode<K, V>>>,
    free: &mut Vec<usize>,
    order: Order,
    key: K,
    value: V,
) -> SplitOutcome<K> {
    match node {
        BPlusNode::Leaf { slot } => {
            let slot = *slot;
            let leaf = leaves[slot].as_mut().expect("live slot");
            match lower_bound(&leaf.keys, &key) {
                Ok(_) => SplitOutcome::AlreadyPresent,
                Err(i) => {
                    leaf.keys.insert(i, key);
                    leaf.values.insert(i, value);
                    if leaf.keys.len() >= order.get() {
                        let right_slot = alloc_leaf(leaves, free, order);
                        let split_at = order.min_keys() + 1;
                        let leaf = leaves[slot].as_mut().expect("live slot");
                        let right_keys = leaf.keys.split_off(split_at);
                        let right_values = leaf.values.split_off(split_at);
                        let sep = right_keys[0].clone();
                        let old_next = leaf.next;
                        leaf.next = Some(right_slot);

                        let right = leaves[right_slot].as_mut().expect("fresh slot");
                        right.keys = right_keys;
                        right.values = right_values;
                        right.prev = Some(slot);
                        right.next = old_next;

                        if let Some(n) = old_next {
                            leaves[n].as_mut().expect("live slot").prev = Some(right_slot);
                        }

                        SplitOutcome::Split {
                            key: sep,
                            right: Box::new(BPlusNode::Leaf { slot: right_slot }),
                        }
                    } else {
                        SplitOutcome::Inserted
                    }
                }
            }
        }
        BPlusNode::Internal { keys, children } => {
            let i = node_child_index(keys, &key);
            match insert_rec(&mut children[i], leaves, free, order, key, value) {
                SplitOutcome::Inserted => SplitOutcome::Inserted,
                SplitOutcome::AlreadyPresent => SplitOutcome::AlreadyPresent,
                SplitOutcome::Split { key, right } => {
                    keys.insert(i, key);
                    children.insert(i + 1, right);
                    if keys.len() >= order.get() {
                        let split_at = order.min_keys();
                        let right_keys = keys.split_off(split_at + 1);
                        let right_children = children.split_off(split_at + 1);
                        let sep = keys.pop().expect("overflowed internal node has a middle key");
                        SplitOutcome::Split {
                            key: sep,
                            right: Box::new(BPlusNode::Internal { keys: right_keys, children: right_children }),
                        }
                    } else {
                        SplitOutcome::Inserted
                    }
                }
            }
        }
    }
}

fn node_child_index<K: Ord>(keys: &[K], key: &K) -> usize {
    match lower_bound(keys, key) {
        Ok(i) => i + 1,
        Err(i) => i,
    }
}

fn alloc_leaf<K, V>(leaves: &mut Vec<Option<LeafNode<K, V>>>, free: &mut Vec<usize>, order: Order) -> usize {
    if let Some(slot) = free.pop() {
        leaves[slot] = Some(LeafNode::new(order));
        slot
    } else {
        leaves.push(Some(LeafNode::new(order)));
        leaves.len() - 1
    }
}

impl<K: Ord + Clone, V: Clone> BPlusTree<K, V> {
    /// Remove `key`, returning its value if present. Top-down: before
    /// descending into an under-filled child, pre-repair via borrow-left,
    /// borrow-right, merge-left, merge-right (same preference order as
    /// the B-Tree engine).
    ///
    /// Internal separators may outlive their key's removal from the
    /// leaves - `search`/`contains_key` always resolve authoritatively at
    /// the leaf, so this is invisible to callers.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let order = self.order;
        let removed = remove_rec(&mut self.root, &mut self.leaves, &mut self.free, order, key);
        if removed.is_some() {
            self.len -= 1;
        }
        if let BPlusNode::Internal { keys, children } = &mut *self.root {
            if keys.is_empty() {
                debug_assert_eq!(children.len(), 1);
                self.root = children.pop().expect("empty internal root keeps one child");
            }
        }
        removed
    }
}

fn leaf_above_min<K, V>(leaves: &[Option<LeafNode<K, V>>], slot: usize, order: Order) -> bool {
    leaves[slot].as_ref().expect("live slot").keys.len() > order.min_keys()
}

fn child_above_min<K, V>(node: &BPlusNode<K>, leaves: &[Option<LeafNode<K, V>>], order: Order) -> bool {
    match node {
        BPlusNode::Leaf { slot } => leaf_above_min(leaves, *slot, order),
        BPlusNode::Internal { keys, .. } => keys.len() > order.min_keys(),
    }
}

fn remove_rec<K: Ord + Clone, V: Clone>(
    node: &mut BPlusNode<K>,
    leaves: &mut Vec<Option<LeafNode<K, V>>>,
    free: &mut Vec<usize>,
    order: Order,
    key: &K,
) -> Option<V> {
    match node {
        BPlusNode::Leaf { slot } => {
            let leaf = leaves[*slot].as_mut().expect("live slot");
            match lower_bound(&leaf.keys, key) {
                Ok(i) => {
                    leaf.keys.remove(i);
                    Some(leaf.values.remove(i))
                }
                Err(_) => None,
            }
        }
        BPlusNode::Internal { keys, children } => {
            let i = node_child_index(keys, key);
            if !child_above_min(&children[i], leaves, order) {
                rebalance_in_parent(keys, children, leaves, free, i, order);
            }
            let i = node_child_index(keys, key);
            remove_rec(&mut children[i], leaves, free, order, key)
        }
    }
}

fn rebalance_in_parent<K: Ord + Clone, V: Clone>(
    keys: &mut Vec<K>,
    children: &mut Vec<Box<BPlusNode<K>>>,
    leaves: &mut Vec<Option<LeafNode<K, V>>>,
    free: &mut Vec<usize>,
    i: usize,
    order: Order,
) {
    let has_left = i > 0;
    let has_right = i + 1 < children.len();

    if has_left && child_above_min(&children[i - 1], leaves, order) {
        borrow_from_left(keys, children, leaves, i);
    } else if has_right && child_above_min(&children[i + 1], leaves, order) {
        borrow_from_right(keys, children, leaves, i);
    } else if has_left {
        merge_children(keys, children, leaves, free, i - 1);
    } else {
        debug_assert!(has_right);
        merge_children(keys, children, leaves, free, i);
    }
}

fn borrow_from_left<K: Ord + Clone, V: Clone>(
    keys: &mut [K],
    children: &mut [Box<BPlusNode<K>>],
    leaves: &mut [Option<LeafNode<K, V>>],
    i: usize,
) {
    let (left_slice, right_slice) = children.split_at_mut(i);
    match (&mut *left_slice[i - 1], &mut *right_slice[0]) {
        (BPlusNode::Leaf { slot: left_slot }, BPlusNode::Leaf { slot: right_slot }) => {
            let (l, r) = index_two(leaves, *left_slot, *right_slot);
            let k = l.keys.pop().expect("left sibling above MIN_KEYS");
            let v = l.values.pop().expect("left sibling above MIN_KEYS");
            r.keys.insert(0, k.clone());
            r.values.insert(0, v);
            keys[i - 1] = k;
        }
        (
            BPlusNode::Internal { keys: lk, children: lc },
            BPlusNode::Internal { keys: rk, children: rc },
        ) => {
            let borrowed_key = lk.pop().expect("left sibling above MIN_KEYS");
            let borrowed_child = lc.pop().expect("internal node has children");
            let old_sep = std::mem::replace(&mut keys[i - 1], borrowed_key);
            rk.insert(0, old_sep);
            rc.insert(0, borrowed_child);
        }
        _ => unreachable!("siblings at the same level share leaf-ness"),
    }
}

fn borrow_from_right<K: Ord + Clone, V: Clone>(
    keys: &mut [K],
    children: &mut [Box<BPlusNode<K>>],
    leaves: &mut [Option<LeafNode<K, V>>],
    i: usize,
) {
    let (left_slice, right_slice) = children.split_at_mut(i + 1);
    match (&mut *left_slice[i], &mut *right_slice[0]) {
        (BPlusNode::Leaf { slot: left_slot }, BPlusNode::Leaf { slot: right_slot }) => {
            let (l, r) = index_two(leaves, *left_slot, *right_slot);
            let k = r.keys.remove(0);
            let v = r.values.remove(0);
            l.keys.push(k);
            l.values.push(v);
            keys[i] = r.keys.first().cloned().expect("right sibling kept >= MIN_KEYS + 1 entries before borrow");
        }
        (
            BPlusNode::Internal { keys: lk, children: lc },
            BPlusNode::Internal { keys: rk, children: rc },
        ) => {
            let borrowed_key = rk.remove(0);
            let borrowed_child = rc.remove(0);
            let old_sep = std::mem::replace(&mut keys[i], borrowed_key);
            lk.push(old_sep);
            lc.push(borrowed_child);
        }
        _ => unreachable!("siblings at the same level share leaf-ness"),
    }
}

fn merge_children<K: Ord + Clone, V: Clone>(
    keys: &mut Vec<K>,
    children: &mut Vec<Box<BPlusNode<K>>>,
    leaves: &mut Vec<Option<LeafNode<K, V>>>,
    free: &mut Vec<usize>,
    i: usize,
) {
    let sep = keys.remove(i);
    let right = children.remove(i + 1);
    match (&mut *children[i], *right) {
        (BPlusNode::Leaf { slot: left_slot }, BPlusNode::Leaf { slot: right_slot }) => {
            let (right_keys, right_values, right_next) = {
                let r = leaves[right_slot].as_mut().expect("live slot");
                (std::mem::take(&mut r.keys), std::mem::take(&mut r.values), r.next)
            };
            let l = leaves[*left_slot].as_mut().expect("live slot");
            l.keys.extend(right_keys);
            l.values.extend(right_values);
            l.next = right_next;
            if let Some(n) = right_next {
                leaves[n].as_mut().expect("live slot").prev = Some(*left_slot);
            }
            leaves[right_slot] = None;
            free.push(right_slot);
        }
        (
            BPlusNode::Internal { keys: lk, children: lc },
            BPlusNode::Internal { keys: rk, children: rc },
        ) => {
            lk.push(sep);
            lk.extend(rk);
            lc.extend(rc);
        }
        _ => unreachable!("siblings at the same level share leaf-ness"),
    }
}

fn index_two<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b);
    if a < b {
        let (left, right) = slice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl<K: Ord + Clone, V: Clone> OrderedMap<K, V> for BPlusTree<K, V> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        *self = BPlusTree::with_order(self.order);
    }

    fn search(&mut self, key: &K) -> Option<V> {
        BPlusTree::search(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> bool {
        BPlusTree::insert(self, key, value)
    }

    fn update(&mut self, key: &K, value: V) -> Option<V> {
        let old = BPlusTree::search(self, key)?;
        let _ = BPlusTree::remove(self, key);
        BPlusTree::insert(self, key.clone(), value);
        Some(old)
    }

    fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match BPlusTree::search(self, &key) {
            Some(old) => {
                let _ = BPlusTree::remove(self, &key);
                BPlusTree::insert(self, key, value);
                Some(old)
            }
            None => {
                BPlusTree::insert(self, key, value);
                None
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BPlusTree::remove(self, key)
    }

    fn min(&self) -> Option<(K, V)> {
        BPlusTree::min(self)
    }

    fn max(&self) -> Option<(K, V)> {
        BPlusTree::max(self)
    }

    fn floor(&mut self, key: &K) -> Option<(K, V)> {
        BPlusTree::floor(self, key)
    }

    fn ceiling(&mut self, key: &K) -> Option<(K, V)> {
        BPlusTree::ceiling(self, key)
    }

    fn predecessor(&mut self, key: &K) -> Option<(K, V)> {
        BPlusTree::predecessor(self, key)
    }

    fn successor(&mut self, key: &K) -> Option<(K, V)> {
        BPlusTree::successor(self, key)
    }

    fn range(&mut self, lo: &K, hi: &K) -> Vec<(K, V)> {
        BPlusTree::range(self, lo, hi)
    }

    fn elements(&self) -> Vec<(K, V)> {
        BPlusTree::elements(self)
    }
}

#[cfg(test)]
mod tree_test;
