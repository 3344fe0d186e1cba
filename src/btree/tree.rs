// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The B-Tree engine: a Knuth-order balanced multi-way tree with keys and
//! values present in every node, leaf or internal.

use crate::btree::iter::{Iter, RevIter};
use crate::btree::node::BTreeNode;
use crate::bulk::{even_resident_sizes, smallest_valid_group_count};
use crate::collection::OrderedMap;
use crate::order::Order;

/// A balanced multi-way search tree of order `m`.
///
/// Every node - leaf and internal alike - stores complete key/value pairs;
/// internal keys are real data, not pure separators (contrast
/// [`crate::bplustree::BPlusTree`], where only leaves hold values).
///
/// ## Examples
///
/// ```rust
/// use treeforge::{BTree, OrderedMap};
///
/// let mut tree = BTree::new();
/// assert!(tree.insert(5, "five"));
/// assert!(!tree.insert(5, "duplicate"));
/// assert_eq!(tree.search(&5), Some("five"));
/// ```
pub struct BTree<K, V> {
    root: Box<BTreeNode<K, V>>,
    order: Order,
    len: usize,
}

impl<K, V> BTree<K, V> {
    /// An empty tree of the default order (16).
    pub fn new() -> Self {
        Self::with_order(Order::default())
    }

    /// An empty tree of the given order.
    pub fn with_order(order: Order) -> Self {
        BTree {
            root: Box::new(BTreeNode::new_leaf(order)),
            order,
            len: 0,
        }
    }

    /// The order this tree was constructed with.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Depth of the tree, counting the root as level 1. An empty tree has
    /// height 1 (a single, empty leaf root).
    pub fn height(&self) -> usize {
        fn depth<K, V>(node: &BTreeNode<K, V>) -> usize {
            match node.children() {
                None => 1,
                Some(children) => 1 + depth(&children[0]),
            }
        }
        depth(&self.root)
    }
}

impl<K, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Clone> BTree<K, V> {
    /// Build a tree from a sequence that is already sorted ascending by key.
    ///
    /// ## Panics
    ///
    /// Panics (debug builds only) if `items` is not strictly ascending by
    /// key - bulk-load is a performance shortcut and an out-of-order input
    /// is always a programmer error, per the ordering precondition shared
    /// by both tree engines' bulk constructors.
    pub fn bulk_load(items: Vec<(K, V)>, order: Order) -> Self {
        debug_assert!(
            items.windows(2).all(|w| w[0].0 < w[1].0),
            "bulk_load requires a strictly ascending input"
        );

        let len = items.len();
        if len == 0 {
            return Self::with_order(order);
        }

        let max_keys = order.max_keys();
        if len <= max_keys {
            let mut keys = Vec::with_capacity(order.get());
            let mut values = Vec::with_capacity(order.get());
            for (k, v) in items {
                keys.push(k);
                values.push(v);
            }
            return BTree {
                root: Box::new(BTreeNode::Leaf { keys, values }),
                order,
                len,
            };
        }

        // Level 0: group raw items into leaves.
        let mut level: Vec<Box<BTreeNode<K, V>>> = group_leaves(items, order);

        // Build levels upward until one level fits under a single root.
        while level.len() > order.get() {
            level = group_internal(level, order);
        }

        let root = if level.len() == 1 {
            level.into_iter().next().unwrap()
        } else {
            let (keys, values, children) = pull_up_separators(level);
            Box::new(BTreeNode::Internal {
                keys,
                values,
                children,
            })
        };

        BTree { root, order, len }
    }
}

fn group_leaves<K: Ord, V>(items: Vec<(K, V)>, order: Order) -> Vec<Box<BTreeNode<K, V>>> {
    let n = items.len();
    let groups = smallest_valid_group_count(n, order.min_keys(), order.max_keys());
    let sizes = even_resident_sizes(n, groups);

    let mut iter = items.into_iter();
    sizes
        .into_iter()
        .map(|size| {
            let mut keys = Vec::with_capacity(order.get());
            let mut values = Vec::with_capacity(order.get());
            for _ in 0..size {
                let (k, v) = iter.next().expect("size sums to n");
                keys.push(k);
                values.push(v);
            }
            Box::new(BTreeNode::Leaf { keys, values })
        })
        .collect()
}

/// Group a level of already-built nodes into the next level up, pulling one
/// separator key out of all but the last child of every batch. Reused by
/// both the leaf-to-internal and internal-to-internal bulk-load steps.
fn group_internal<K: Ord + Clone, V: Clone>(
    level: Vec<Box<BTreeNode<K, V>>>,
    order: Order,
) -> Vec<Box<BTreeNode<K, V>>> {
    let n = level.len();
    let groups = smallest_valid_group_count(n, order.min_children(), order.get());
    let sizes = even_resident_sizes(n, groups);

    let mut iter = level.into_iter();
    sizes
        .into_iter()
        .map(|size| {
            let batch: Vec<_> = (0..size).map(|_| iter.next().expect("size sums to n")).collect();
            let (keys, values, children) = pull_up_separators(batch);
            Box::new(BTreeNode::Internal {
                keys,
                values,
                children,
            })
        })
        .collect()
}

/// Given a batch of sibling nodes destined to become one internal node's
/// children, pop one key/value pair out of every child but the last to
/// serve as that internal node's separators. Every node in this engine -
/// leaf or internal - owns real data, so the separator is promoted out of
/// the child, never copied in place.
fn pull_up_separators<K: Ord + Clone, V: Clone>(
    mut batch: Vec<Box<BTreeNode<K, V>>>,
) -> (Vec<K>, Vec<V>, Vec<Box<BTreeNode<K, V>>>) {
    let mut keys = Vec::with_capacity(batch.len().saturating_sub(1));
    let mut values = Vec::with_capacity(batch.len().saturating_sub(1));
    let last = batch.len() - 1;
    for child in batch.iter_mut().take(last) {
        let (k, v) = child.pop_last();
        keys.push(k);
        values.push(v);
    }
    (keys, values, batch)
}

impl<K: Ord + Clone, V: Clone> BTree<K, V> {
    /// Look up the value stored for `key`.
    pub fn search(&self, key: &K) -> Option<V> {
        let mut node = &*self.root;
        loop {
            match node.lower_bound(key) {
                Ok(i) => return Some(node.values()[i].clone()),
                Err(i) => match node.children() {
                    Some(children) => node = &children[i],
                    None => return None,
                },
            }
        }
    }

    /// The least key/value pair, or `None` if the tree is empty.
    pub fn min(&self) -> Option<(K, V)> {
        let mut node = &*self.root;
        loop {
            match node.children() {
                Some(children) => node = &children[0],
                None => {
                    return if node.key_count() == 0 {
                        None
                    } else {
                        Some((node.keys()[0].clone(), node.values()[0].clone()))
                    };
                }
            }
        }
    }

    /// The greatest key/value pair, or `None` if the tree is empty.
    pub fn max(&self) -> Option<(K, V)> {
        let mut node = &*self.root;
        loop {
            match node.children() {
                Some(children) => node = children.last().expect("internal node has children"),
                None => {
                    return if node.key_count() == 0 {
                        None
                    } else {
                        let i = node.key_count() - 1;
                        Some((node.keys()[i].clone(), node.values()[i].clone()))
                    };
                }
            }
        }
    }

    /// Greatest key `<= key`, tracking the last ancestor whose separator
    /// sits on the "floor" side in case the descent path itself doesn't
    /// contain the answer.
    pub fn floor(&self, key: &K) -> Option<(K, V)> {
        let mut node = &*self.root;
        let mut best: Option<(K, V)> = None;
        loop {
            match node.lower_bound(key) {
                Ok(i) => return Some((node.keys()[i].clone(), node.values()[i].clone())),
                Err(i) => {
                    if i > 0 {
                        best = Some((node.keys()[i - 1].clone(), node.values()[i - 1].clone()));
                    }
                    match node.children() {
                        Some(children) => node = &children[i],
                        None => return best,
                    }
                }
            }
        }
    }

    /// Least key `>= key`.
    pub fn ceiling(&self, key: &K) -> Option<(K, V)> {
        let mut node = &*self.root;
        let mut best: Option<(K, V)> = None;
        loop {
            match node.lower_bound(key) {
                Ok(i) => return Some((node.keys()[i].clone(), node.values()[i].clone())),
                Err(i) => {
                    if i < node.key_count() {
                        best = Some((node.keys()[i].clone(), node.values()[i].clone()));
                    }
                    match node.children() {
                        Some(children) => node = &children[i],
                        None => return best,
                    }
                }
            }
        }
    }

    /// Greatest key strictly `< key`.
    pub fn predecessor(&self, key: &K) -> Option<(K, V)> {
        let mut node = &*self.root;
        let mut best: Option<(K, V)> = None;
        loop {
            let i = match node.lower_bound(key) {
                Ok(i) => i,
                Err(i) => i,
            };
            if i > 0 {
                best = Some((node.keys()[i - 1].clone(), node.values()[i - 1].clone()));
            }
            match node.children() {
                Some(children) => node = &children[i],
                None => return best,
            }
        }
    }

    /// Least key strictly `> key`.
    pub fn successor(&self, key: &K) -> Option<(K, V)> {
        let mut node = &*self.root;
        let mut best: Option<(K, V)> = None;
        loop {
            match node.lower_bound(key) {
                Ok(i) => {
                    // key itself is present: the successor is either the
                    // next key in this node, or the leftmost key of the
                    // child to its right.
                    match node.children() {
                        Some(children) => {
                            node = &children[i + 1];
                            loop {
                                match node.children() {
                                    Some(c) => node = &c[0],
                                    None => {
                                        return if node.key_count() == 0 {
                                            best
                                        } else {
                                            Some((node.keys()[0].clone(), node.values()[0].clone()))
                                        };
                                    }
                                }
                            }
                        }
                        None => {
                            return if i + 1 < node.key_count() {
                                Some((node.keys()[i + 1].clone(), node.values()[i + 1].clone()))
                            } else {
                                best
                            };
                        }
                    }
                }
                Err(i) => {
                    if i < node.key_count() {
                        best = Some((node.keys()[i].clone(), node.values()[i].clone()));
                    }
                    match node.children() {
                        Some(children) => node = &children[i],
                        None => return best,
                    }
                }
            }
        }
    }

    /// All elements with keys in the closed range `[lo, hi]`, ascending.
    pub fn range(&self, lo: &K, hi: &K) -> Vec<(K, V)> {
        let mut out = Vec::new();
        if lo > hi {
            return out;
        }
        // Explicit-stack in-order walk seeded by descending to `lo`'s
        // left spine, pushing every node visited on the way down so the
        // walk resumes correctly once it climbs back out of a subtree.
        let mut stack: Vec<(&BTreeNode<K, V>, usize)> = Vec::new();
        let mut node = &*self.root;
        loop {
            let i = match node.lower_bound(lo) {
                Ok(i) => i,
                Err(i) => i,
            };
            stack.push((node, i));
            match node.children() {
                Some(children) => node = &children[i],
                None => break,
            }
        }

        while let Some((node, idx)) = stack.pop() {
            if idx < node.key_count() {
                let k = &node.keys()[idx];
                if k > hi {
                    continue;
                }
                if k >= lo {
                    out.push((k.clone(), node.values()[idx].clone()));
                }
                stack.push((node, idx + 1));
            }
            if let Some(children) = node.children() {
                let child_idx = idx + 1;
                if child_idx < children.len() {
                    let mut n = &*children[child_idx];
                    stack.push((n, 0));
                    loop {
                        match n.children() {
                            Some(c) => {
                                n = &c[0];
                                stack.push((n, 0));
                            }
                            None => break,
                        }
                    }
                }
            }
        }
        out
    }

    /// All elements, ascending.
    pub fn elements(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// All elements, descending.
    pub fn elements_rev(&self) -> Vec<(K, V)> {
        self.iter_rev().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Lazy ascending iterator over borrowed key/value pairs. Doesn't
    /// materialise a `Vec`; unlike `search`/`floor`/etc this engine never
    /// needs `&mut self` for traversal, so this borrows immutably.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// Lazy descending iterator over borrowed key/value pairs.
    pub fn iter_rev(&self) -> RevIter<'_, K, V> {
        RevIter::new(&self.root)
    }
}

/// Result of descending one level during bottom-up insertion: the position
/// the key would occupy in that node, paired with a mutable reference so
/// the caller can come back and fix up separators after a child split.
enum InsertOutcome<K, V> {
    Inserted,
    AlreadyPresent,
    /// A child below overflowed; `key`/`value` are the promoted separator
    /// and `right` the newly created right sibling.
    Split { key: K, value: V, right: Box<BTreeNode<K, V>> },
}

impl<K: Ord + Clone, V: Clone> BTree<K, V> {
    /// Insert `key` -> `value` if absent. Returns whether it was inserted.
    ///
    /// Descends bottom-up (the default per this crate's design; see
    /// [`Self::insert_top_down`] for the pre-splitting alternate), then
    /// repairs overflow on the way back up the call stack.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let order = self.order;
        match insert_rec(&mut self.root, order, key, value) {
            InsertOutcome::AlreadyPresent => false,
            InsertOutcome::Inserted => {
                self.len += 1;
                true
            }
            InsertOutcome::Split { key, value, right } => {
                let left = std::mem::replace(&mut self.root, Box::new(BTreeNode::new_leaf(order)));
                self.root = Box::new(BTreeNode::Internal {
                    keys: vec![key],
                    values: vec![value],
                    children: vec![left, right],
                });
                self.len += 1;
                true
            }
        }
    }

    /// Insert using top-down pre-splitting: any full node encountered on
    /// the way down is split *before* the descent continues, so the
    /// actual leaf insertion never triggers further work.
    ///
    /// ## Panics
    ///
    /// Correctness of preemptive splitting depends on `SPLIT_INDEX`
    /// producing two halves that each satisfy `MIN_KEYS` - which only
    /// holds for even orders. This method panics if the tree's order is
    /// odd; use [`Self::insert`] for odd orders.
    pub fn insert_top_down(&mut self, key: K, value: V) -> bool {
        assert!(
            self.order.get() % 2 == 0,
            "insert_top_down requires an even order; got {}",
            self.order.get()
        );
        let order = self.order;

        if self.root.key_count() == order.max_keys() {
            let (sep_key, sep_value, right) = split_node(&mut self.root, order);
            let left = std::mem::replace(&mut self.root, Box::new(BTreeNode::new_leaf(order)));
            self.root = Box::new(BTreeNode::Internal {
                keys: vec![sep_key],
                values: vec![sep_value],
                children: vec![left, right],
            });
        }

        if insert_top_down_rec(&mut self.root, order, &key, &value) {
            self.len += 1;
            true
        } else {
            false
        }
    }
}

fn insert_rec<K: Ord + Clone, V: Clone>(
    node: &mut BTreeNode<K, V>,
    order: Order,
    key: K,
    value: V,
) -> InsertOutcome<K, V> {
    match node.lower_bound(&key) {
        Ok(_) => InsertOutcome::AlreadyPresent,
        Err(i) => match node {
            BTreeNode::Leaf { keys, values } => {
                keys.insert(i, key);
                values.insert(i, value);
                if keys.len() >= order.get() {
                    let (sep_key, sep_value, right) = split_node_in_place(node, order);
                    return InsertOutcome::Split { key: sep_key, value: sep_value, right };
                }
                InsertOutcome::Inserted
            }
            BTreeNode::Internal { keys, values, children } => {
                match insert_rec(&mut children[i], order, key, value) {
                    InsertOutcome::Inserted => InsertOutcome::Inserted,
                    InsertOutcome::AlreadyPresent => InsertOutcome::AlreadyPresent,
                    InsertOutcome::Split { key, value, right } => {
                        keys.insert(i, key);
                        values.insert(i, value);
                        children.insert(i + 1, right);
                        if keys.len() >= order.get() {
                            let (sep_key, sep_value, right) = split_node_in_place(node, order);
                            InsertOutcome::Split { key: sep_key, value: sep_value, right }
                        } else {
                            InsertOutcome::Inserted
                        }
                    }
                }
            }
        },
    }
}

/// Split an overflowed node (>= `m` keys) at `SPLIT_INDEX = MIN_KEYS`. On
/// return, `node` holds only the left half; the promoted key/value and the
/// new right sibling are returned.
fn split_node_in_place<K: Ord + Clone, V: Clone>(
    node: &mut BTreeNode<K, V>,
    order: Order,
) -> (K, V, Box<BTreeNode<K, V>>) {
    let split_at = order.min_keys();
    match node {
        BTreeNode::Leaf { keys, values } => {
            let right_keys = keys.split_off(split_at + 1);
            let right_values = values.split_off(split_at + 1);
            // Every node in this engine - leaf or internal - stores real
            // data, so the median is promoted, not copied: it moves out of
            // the leaf entirely and up into the parent.
            let sep_key = keys.pop().expect("overflowed leaf has a middle key");
            let sep_value = values.pop().expect("overflowed leaf has a middle value");
            (
                sep_key,
                sep_value,
                Box::new(BTreeNode::Leaf { keys: right_keys, values: right_values }),
            )
        }
        BTreeNode::Internal { keys, values, children } => {
            let right_keys = keys.split_off(split_at + 1);
            let right_values = values.split_off(split_at + 1);
            let right_children = children.split_off(split_at + 1);
            let sep_key = keys.pop().expect("overflowed internal node has a middle key");
            let sep_value = values.pop().expect("overflowed internal node has a middle value");
            (
                sep_key,
                sep_value,
                Box::new(BTreeNode::Internal {
                    keys: right_keys,
                    values: right_values,
                    children: right_children,
                }),
            )
        }
    }
}

/// Split an overflowed node owned by value (used by [`BTree::insert_top_down`]
/// for a full root, which has no parent slot to split in place).
fn split_node<K: Ord + Clone, V: Clone>(
    node: &mut Box<BTreeNode<K, V>>,
    order: Order,
) -> (K, V, Box<BTreeNode<K, V>>) {
    split_node_in_place(node, order)
}

fn insert_top_down_rec<K: Ord + Clone, V: Clone>(
    node: &mut BTreeNode<K, V>,
    order: Order,
    key: &K,
    value: &V,
) -> bool {
    match node.lower_bound(key) {
        Ok(_) => false,
        Err(i) => match node {
            BTreeNode::Leaf { keys, values } => {
                keys.insert(i, key.clone());
                values.insert(i, value.clone());
                true
            }
            BTreeNode::Internal { keys, values, children } => {
                if children[i].key_count() == order.max_keys() {
                    let (sep_key, sep_value, right) = split_node_in_place(&mut children[i], order);
                    keys.insert(i, sep_key);
                    values.insert(i, sep_value);
                    children.insert(i + 1, right);
                    let go_right = match key.cmp(&keys[i]) {
                        std::cmp::Ordering::Greater => true,
                        _ => false,
                    };
                    let next = if go_right { i + 1 } else { i };
                    insert_top_down_rec(&mut children[next], order, key, value)
                } else {
                    insert_top_down_rec(&mut children[i], order, key, value)
                }
            }
        },
    }
}

impl<K: Ord + Clone, V: Clone> BTree<K, V> {
    /// Remove `key`, returning its value if present.
    ///
    /// Top-down by default: before descending into an under-filled child
    /// the path is pre-repaired (borrow-left, borrow-right, merge-left,
    /// merge-right, in that order) so the actual removal at the leaf never
    /// needs to propagate restructuring back up. See
    /// [`Self::remove_bottom_up`] for the alternate that restructures
    /// after the fact; both must agree on the resulting element set.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let order = self.order;
        let removed = remove_top_down(&mut self.root, order, key);
        if removed.is_some() {
            self.len -= 1;
        }
        collapse_root(&mut self.root);
        removed
    }

    /// Remove using bottom-up restructuring: delete at the leaf first,
    /// then fix underflow while unwinding back to the root.
    pub fn remove_bottom_up(&mut self, key: &K) -> Option<V> {
        let order = self.order;
        let (removed, _) = remove_bottom_up_rec(&mut self.root, order, key);
        if removed.is_some() {
            self.len -= 1;
        }
        collapse_root(&mut self.root);
        removed
    }
}

fn collapse_root<K, V>(root: &mut Box<BTreeNode<K, V>>) {
    if let BTreeNode::Internal { keys, children, .. } = &mut **root {
        if keys.is_empty() {
            debug_assert_eq!(children.len(), 1);
            let only_child = children.pop().expect("empty internal root keeps one child");
            *root = only_child;
        }
    }
}

/// `true` if `node` holds more than `MIN_KEYS` keys - i.e. can donate one
/// key (via borrow) without itself underflowing.
fn above_min<K, V>(node: &BTreeNode<K, V>, order: Order) -> bool {
    node.key_count() > order.min_keys()
}

fn remove_top_down<K: Ord + Clone, V: Clone>(
    node: &mut BTreeNode<K, V>,
    order: Order,
    key: &K,
) -> Option<V> {
    match node {
        BTreeNode::Leaf { keys, values } => match lower_bound_eq(keys, key) {
            Some(i) => {
                keys.remove(i);
                Some(values.remove(i))
            }
            None => None,
        },
        BTreeNode::Internal { keys, values, children } => {
            match lower_bound_eq(keys, key) {
                Some(i) => {
                    // Swap with whichever adjacent child has more keys
                    // (predecessor on a tie), then keep descending.
                    let use_predecessor = children[i].key_count() >= children[i + 1].key_count();
                    let fix_idx = if use_predecessor { i } else { i + 1 };
                    if !above_min(&children[fix_idx], order) {
                        rebalance_in_parent(keys, values, children, fix_idx, order);
                    }
                    // A merge during rebalance may have shifted this
                    // node's own key/child indices; recompute `i`.
                    let i = lower_bound_eq(keys, key).expect("key still present in this node");
                    if use_predecessor {
                        let (k, v) = remove_max_td(&mut children[i], order);
                        let removed = std::mem::replace(&mut values[i], v);
                        keys[i] = k;
                        Some(removed)
                    } else {
                        let (k, v) = remove_min_td(&mut children[i + 1], order);
                        let removed = std::mem::replace(&mut values[i], v);
                        keys[i] = k;
                        Some(removed)
                    }
                }
                None => {
                    let i = lower_bound_gt(keys, key);
                    if !above_min(&children[i], order) {
                        rebalance_in_parent(keys, values, children, i, order);
                    }
                    // The rebalance above may have shifted which slot
                    // holds the subtree for `key`; recompute.
                    let i = lower_bound_gt(keys, key);
                    remove_top_down(&mut children[i], order, key)
                }
            }
        }
    }
}

fn lower_bound_eq<K: Ord>(keys: &[K], key: &K) -> Option<usize> {
    crate::btree::node::lower_bound(keys, key).ok()
}

fn lower_bound_gt<K: Ord>(keys: &[K], key: &K) -> usize {
    match crate::btree::node::lower_bound(keys, key) {
        Ok(i) => i,
        Err(i) => i,
    }
}

/// Before descending into `children[i]`, ensure it holds more than
/// `MIN_KEYS` keys: borrow left, then borrow right, then merge left, then
/// merge right with the parent's separator folded in.
fn rebalance_in_parent<K: Ord + Clone, V: Clone>(
    keys: &mut Vec<K>,
    values: &mut Vec<V>,
    children: &mut Vec<Box<BTreeNode<K, V>>>,
    i: usize,
    order: Order,
) {
    let has_left = i > 0;
    let has_right = i + 1 < children.len();

    if has_left && above_min(&children[i - 1], order) {
        borrow_from_left(keys, values, children, i);
    } else if has_right && above_min(&children[i + 1], order) {
        borrow_from_right(keys, values, children, i);
    } else if has_left {
        merge_children(keys, values, children, i - 1);
    } else {
        debug_assert!(has_right, "a node with only one child cannot underflow both sides");
        merge_children(keys, values, children, i);
    }
}

/// Rotate right: the left sibling's last key becomes the new separator in
/// the parent, the parent's current separator moves down to `children[i]`'s
/// head, and (for internal children) the sibling's last child follows.
fn borrow_from_left<K: Ord + Clone, V: Clone>(
    keys: &mut [K],
    values: &mut [V],
    children: &mut [Box<BTreeNode<K, V>>],
    i: usize,
) {
    let (left_slice, right_slice) = children.split_at_mut(i);
    let left = &mut *left_slice[i - 1];
    let right = &mut *right_slice[0];

    match (left, right) {
        (BTreeNode::Leaf { keys: lk, values: lv }, BTreeNode::Leaf { keys: rk, values: rv }) => {
            let borrowed_key = lk.pop().expect("left sibling above MIN_KEYS");
            let borrowed_value = lv.pop().expect("left sibling above MIN_KEYS");
            let old_sep_key = std::mem::replace(&mut keys[i - 1], borrowed_key);
            let old_sep_value = std::mem::replace(&mut values[i - 1], borrowed_value);
            rk.insert(0, old_sep_key);
            rv.insert(0, old_sep_value);
        }
        (
            BTreeNode::Internal { keys: lk, values: lv, children: lc },
            BTreeNode::Internal { keys: rk, values: rv, children: rc },
        ) => {
            let borrowed_key = lk.pop().expect("left sibling above MIN_KEYS");
            let borrowed_value = lv.pop().expect("left sibling above MIN_KEYS");
            let borrowed_child = lc.pop().expect("internal node has children");
            let old_sep_key = std::mem::replace(&mut keys[i - 1], borrowed_key);
            let old_sep_value = std::mem::replace(&mut values[i - 1], borrowed_value);
            rk.insert(0, old_sep_key);
            rv.insert(0, old_sep_value);
            rc.insert(0, borrowed_child);
        }
        _ => unreachable!("siblings at the same level share leaf-ness"),
    }
}

/// Mirror of [`borrow_from_left`]: the right sibling's first key becomes
/// the new separator, the old separator moves down to the end of
/// `children[i]`.
fn borrow_from_right<K: Ord + Clone, V: Clone>(
    keys: &mut [K],
    values: &mut [V],
    children: &mut [Box<BTreeNode<K, V>>],
    i: usize,
) {
    let (left_slice, right_slice) = children.split_at_mut(i + 1);
    let left = &mut *left_slice[i];
    let right = &mut *right_slice[0];

    match (left, right) {
        (BTreeNode::Leaf { keys: lk, values: lv }, BTreeNode::Leaf { keys: rk, values: rv }) => {
            let borrowed_key = rk.remove(0);
            let borrowed_value = rv.remove(0);
            let old_sep_key = std::mem::replace(&mut keys[i], borrowed_key);
            let old_sep_value = std::mem::replace(&mut values[i], borrowed_value);
            lk.push(old_sep_key);
            lv.push(old_sep_value);
        }
        (
            BTreeNode::Internal { keys: lk, values: lv, children: lc },
            BTreeNode::Internal { keys: rk, values: rv, children: rc },
        ) => {
            let borrowed_key = rk.remove(0);
            let borrowed_value = rv.remove(0);
            let borrowed_child = rc.remove(0);
            let old_sep_key = std::mem::replace(&mut keys[i], borrowed_key);
            let old_sep_value = std::mem::replace(&mut values[i], borrowed_value);
            lk.push(old_sep_key);
            lv.push(old_sep_value);
            lc.push(borrowed_child);
        }
        _ => unreachable!("siblings at the same level share leaf-ness"),
    }
}

/// Merge `children[i]` and `children[i + 1]` into a single node, pulling
/// the parent's separator at index `i` down between them, and removing
/// that separator and the now-empty right child slot from the parent.
fn merge_children<K: Ord + Clone, V: Clone>(
    keys: &mut Vec<K>,
    values: &mut Vec<V>,
    children: &mut Vec<Box<BTreeNode<K, V>>>,
    i: usize,
) {
    let sep_key = keys.remove(i);
    let sep_value = values.remove(i);
    let right = children.remove(i + 1);
    let left = &mut *children[i];

    match (left, *right) {
        (BTreeNode::Leaf { keys: lk, values: lv }, BTreeNode::Leaf { keys: rk, values: rv }) => {
            lk.push(sep_key);
            lv.push(sep_value);
            lk.extend(rk);
            lv.extend(rv);
        }
        (
            BTreeNode::Internal { keys: lk, values: lv, children: lc },
            BTreeNode::Internal { keys: rk, values: rv, children: rc },
        ) => {
            lk.push(sep_key);
            lv.push(sep_value);
            lk.extend(rk);
            lv.extend(rv);
            lc.extend(rc);
        }
        _ => unreachable!("siblings at the same level share leaf-ness"),
    }
}

/// Remove and return the in-order predecessor (max of the subtree rooted
/// at `node`), top-down: pre-repairs under-filled children on the way down
/// so the leaf removal at the bottom is always safe.
fn remove_max_td<K: Ord + Clone, V: Clone>(node: &mut BTreeNode<K, V>, order: Order) -> (K, V) {
    match node {
        BTreeNode::Leaf { keys, values } => (
            keys.pop().expect("descended only into non-empty nodes"),
            values.pop().expect("descended only into non-empty nodes"),
        ),
        BTreeNode::Internal { keys: _, values: _, children } => {
            let last = children.len() - 1;
            if !above_min(&children[last], order) {
                rebalance_last_child(node, order);
                return remove_max_td(node, order);
            }
            let last = children.len() - 1;
            remove_max_td(&mut children[last], order)
        }
    }
}

fn remove_min_td<K: Ord + Clone, V: Clone>(node: &mut BTreeNode<K, V>, order: Order) -> (K, V) {
    match node {
        BTreeNode::Leaf { keys, values } => (keys.remove(0), values.remove(0)),
        BTreeNode::Internal { children, .. } => {
            if !above_min(&children[0], order) {
                rebalance_first_child(node, order);
                return remove_min_td(node, order);
            }
            remove_min_td(&mut children[0], order)
        }
    }
}

fn rebalance_last_child<K: Ord + Clone, V: Clone>(node: &mut BTreeNode<K, V>, order: Order) {
    if let BTreeNode::Internal { keys, values, children } = node {
        let i = children.len() - 1;
        rebalance_in_parent(keys, values, children, i, order);
    }
}

fn rebalance_first_child<K: Ord + Clone, V: Clone>(node: &mut BTreeNode<K, V>, order: Order) {
    if let BTreeNode::Internal { keys, values, children } = node {
        rebalance_in_parent(keys, values, children, 0, order);
    }
}

/// Bottom-up leaf deletion plus upward restructuring. Returns the removed
/// value (if present) and whether the node that was just processed is now
/// under-filled and needs its parent's attention.
fn remove_bottom_up_rec<K: Ord + Clone, V: Clone>(
    node: &mut BTreeNode<K, V>,
    order: Order,
    key: &K,
) -> (Option<V>, bool) {
    match node {
        BTreeNode::Leaf { keys, values } => match lower_bound_eq(keys, key) {
            Some(i) => {
                keys.remove(i);
                let removed = values.remove(i);
                let underflowed = keys.len() < order.min_keys();
                (Some(removed), underflowed)
            }
            None => (None, false),
        },
        BTreeNode::Internal { keys, values, children } => match lower_bound_eq(keys, key) {
            Some(i) => {
                let use_predecessor = children[i].key_count() >= children[i + 1].key_count();
                let (k, v, child_underflowed) = if use_predecessor {
                    let (k, v) = remove_max_bu(&mut children[i], order);
                    (k, v, children[i].key_count() < order.min_keys())
                } else {
                    let (k, v) = remove_min_bu(&mut children[i + 1], order);
                    (k, v, children[i + 1].key_count() < order.min_keys())
                };
                let removed = std::mem::replace(&mut values[i], v);
                keys[i] = k;
                if child_underflowed {
                    let fix_idx = if use_predecessor { i } else { i + 1 };
                    rebalance_in_parent(keys, values, children, fix_idx, order);
                }
                let underflowed = keys.len() < order.min_keys();
                (Some(removed), underflowed)
            }
            None => {
                let i = lower_bound_gt(keys, key);
                let (removed, child_underflowed) = remove_bottom_up_rec(&mut children[i], order, key);
                if child_underflowed {
                    rebalance_in_parent(keys, values, children, i, order);
                }
                let underflowed = keys.len() < order.min_keys();
                (removed, underflowed)
            }
        },
    }
}

fn remove_max_bu<K: Ord + Clone, V: Clone>(node: &mut BTreeNode<K, V>, order: Order) -> (K, V) {
    match node {
        BTreeNode::Leaf { keys, values } => (
            keys.pop().expect("non-empty on descent"),
            values.pop().expect("non-empty on descent"),
        ),
        BTreeNode::Internal { keys, values, children } => {
            let last = children.len() - 1;
            let (k, v) = remove_max_bu(&mut children[last], order);
            if children[last].key_count() < order.min_keys() {
                rebalance_in_parent(keys, values, children, last, order);
            }
            (k, v)
        }
    }
}

fn remove_min_bu<K: Ord + Clone, V: Clone>(node: &mut BTreeNode<K, V>, order: Order) -> (K, V) {
    match node {
        BTreeNode::Leaf { keys, values } => (keys.remove(0), values.remove(0)),
        BTreeNode::Internal { keys, values, children } => {
            let (k, v) = remove_min_bu(&mut children[0], order);
            if children[0].key_count() < order.min_keys() {
                rebalance_in_parent(keys, values, children, 0, order);
            }
            (k, v)
        }
    }
}

impl<K: Ord + Clone, V: Clone> OrderedMap<K, V> for BTree<K, V> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.root = Box::new(BTreeNode::new_leaf(self.order));
        self.len = 0;
    }

    fn search(&mut self, key: &K) -> Option<V> {
        BTree::search(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> bool {
        BTree::insert(self, key, value)
    }

    fn update(&mut self, key: &K, value: V) -> Option<V> {
        let old = BTree::search(self, key)?;
        let _ = BTree::remove(self, key);
        BTree::insert(self, key.clone(), value);
        Some(old)
    }

    fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match BTree::search(self, &key) {
            Some(old) => {
                let _ = BTree::remove(self, &key);
                BTree::insert(self, key, value);
                Some(old)
            }
            None => {
                BTree::insert(self, key, value);
                None
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        BTree::remove(self, key)
    }

    fn min(&self) -> Option<(K, V)> {
        BTree::min(self)
    }

    fn max(&self) -> Option<(K, V)> {
        BTree::max(self)
    }

    fn floor(&mut self, key: &K) -> Option<(K, V)> {
        BTree::floor(self, key)
    }

    fn ceiling(&mut self, key: &K) -> Option<(K, V)> {
        BTree::ceiling(self, key)
    }

    fn predecessor(&mut self, key: &K) -> Option<(K, V)> {
        BTree::predecessor(self, key)
    }

    fn successor(&mut self, key: &K) -> Option<(K, V)> {
        BTree::successor(self, key)
    }

    fn range(&mut self, lo: &K, hi: &K) -> Vec<(K, V)> {
        BTree::range(self, lo, hi)
    }

    fn elements(&self) -> Vec<(K, V)> {
        BTree::elements(self)
    }
}

#[cfg(test)]
mod tree_test;
