// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The splay tree engine: a self-adjusting binary search tree with
//! top-down splay on every access path, plus `split`/`join` as first-class
//! structural operations.
//!
//! Unlike the B-Tree and B+Tree engines, reads here are not read-only:
//! `search`, `floor`, `ceiling`, `predecessor`, `successor` and the `lo`
//! descent in `range` all splay the accessed key (or the last node touched
//! on its search path) to the root. `min`/`max`/`elements` are the
//! exception - the ordered-collection contract requires them to take
//! `&self`, so they walk the tree without reshaping it.

use std::cmp::Ordering;

use crate::collection::OrderedMap;
use crate::splay::iter::{Iter, RevIter};
use crate::splay::node::Node;

/// A self-adjusting binary search tree. See the [module docs](self) for
/// which operations reshape the tree as a side effect.
///
/// ## Examples
///
/// ```rust
/// use treeforge::{OrderedMap, SplayTree};
///
/// let mut tree = SplayTree::new();
/// tree.insert(2, "a");
/// tree.insert(1, "b");
/// assert_eq!(OrderedMap::search(&mut tree, &1), Some("b"));
/// ```
pub struct SplayTree<K, V> {
    root: Option<Box<Node<K, V>>>,
    len: usize,
}

impl<K, V> SplayTree<K, V> {
    pub fn new() -> Self {
        SplayTree { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-down splay: reshapes `t` so that `key` becomes the root if present,
/// otherwise the last node touched on the search path for `key`.
///
/// Descends comparing `key` against the current node, pre-rotating on a
/// zig-zig/zig-zag pattern (two levels at a time) before detaching the
/// current node onto whichever accumulator ("spine") it belongs to. The
/// two spines are reassembled onto the final node's left/right children
/// once the descent bottoms out.
fn splay<K: Ord, V>(mut t: Box<Node<K, V>>, key: &K) -> Box<Node<K, V>> {
    let mut left_spine: Vec<Box<Node<K, V>>> = Vec::new();
    let mut right_spine: Vec<Box<Node<K, V>>> = Vec::new();

    loop {
        match key.cmp(&t.key) {
            Ordering::Equal => break,
            Ordering::Less => {
                if t.left.is_none() {
                    break;
                }
                if *key < t.left.as_ref().expect("checked above").key {
                    // zig-zig: rotate t right around its left child.
                    let mut left = t.left.take().expect("checked above");
                    t.left = left.right.take();
                    left.right = Some(t);
                    t = left;
                }
                if t.left.is_none() {
                    break;
                }
                let left = t.left.take().expect("checked above");
                right_spine.push(t);
                t = left;
            }
            Ordering::Greater => {
                if t.right.is_none() {
                    break;
                }
                if *key > t.right.as_ref().expect("checked above").key {
                    // zag-zag: rotate t left around its right child.
                    let mut right = t.right.take().expect("checked above");
                    t.right = right.left.take();
                    right.left = Some(t);
                    t = right;
                }
                if t.right.is_none() {
                    break;
                }
                let right = t.right.take().expect("checked above");
                left_spine.push(t);
                t = right;
            }
        }
    }

    let mut acc = t.right.take();
    while let Some(mut node) = right_spine.pop() {
        node.left = acc;
        acc = Some(node);
    }
    t.right = acc;

    let mut acc = t.left.take();
    while let Some(mut node) = left_spine.pop() {
        node.right = acc;
        acc = Some(node);
    }
    t.left = acc;

    t
}

fn detach_max<K, V>(mut node: Box<Node<K, V>>) -> (Option<Box<Node<K, V>>>, Box<Node<K, V>>) {
    match node.right.take() {
        None => (node.left.take(), node),
        Some(right) => {
            let (new_right, max) = detach_max(right);
            node.right = new_right;
            (Some(node), max)
        }
    }
}

fn node_count<K, V>(node: &Option<Box<Node<K, V>>>) -> usize {
    match node {
        None => 0,
        Some(n) => 1 + node_count(&n.left) + node_count(&n.right),
    }
}

fn peek_max<K, V>(node: &Node<K, V>) -> &K {
    match &node.right {
        Some(r) => peek_max(r),
        None => &node.key,
    }
}

fn peek_min<K, V>(node: &Node<K, V>) -> &K {
    match &node.left {
        Some(l) => peek_min(l),
        None => &node.key,
    }
}

fn peek_max_of<K: Clone, V: Clone>(node: &Option<Box<Node<K, V>>>) -> Option<(K, V)> {
    let mut cur = node.as_deref()?;
    while let Some(r) = &cur.right {
        cur = r;
    }
    Some((cur.key.clone(), cur.value.clone()))
}

fn peek_min_of<K: Clone, V: Clone>(node: &Option<Box<Node<K, V>>>) -> Option<(K, V)> {
    let mut cur = node.as_deref()?;
    while let Some(l) = &cur.left {
        cur = l;
    }
    Some((cur.key.clone(), cur.value.clone()))
}

fn collect_inorder<K: Clone, V: Clone>(node: &Option<Box<Node<K, V>>>, out: &mut Vec<(K, V)>) {
    if let Some(n) = node {
        collect_inorder(&n.left, out);
        out.push((n.key.clone(), n.value.clone()));
        collect_inorder(&n.right, out);
    }
}

fn collect_bounded<K: Ord + Clone, V: Clone>(node: &Option<Box<Node<K, V>>>, hi: &K, out: &mut Vec<(K, V)>) {
    if let Some(n) = node {
        collect_bounded(&n.left, hi, out);
        if n.key <= *hi {
            out.push((n.key.clone(), n.value.clone()));
            collect_bounded(&n.right, hi, out);
        }
    }
}

impl<K: Ord + Clone, V: Clone> SplayTree<K, V> {
    /// Splay `key` to the root; the root holds `key` iff it is present.
    pub fn search(&mut self, key: &K) -> Option<V> {
        let root = self.root.take()?;
        let root = splay(root, key);
        let result = if root.key == *key { Some(root.value.clone()) } else { None };
        self.root = Some(root);
        result
    }

    /// The least key/value pair. Does not splay - required by the
    /// ordered-collection contract to take `&self`.
    pub fn min(&self) -> Option<(K, V)> {
        let mut node = self.root.as_deref()?;
        while let Some(l) = &node.left {
            node = l;
        }
        Some((node.key.clone(), node.value.clone()))
    }

    /// The greatest key/value pair. Does not splay.
    pub fn max(&self) -> Option<(K, V)> {
        let mut node = self.root.as_deref()?;
        while let Some(r) = &node.right {
            node = r;
        }
        Some((node.key.clone(), node.value.clone()))
    }

    /// Greatest key `<= key`.
    pub fn floor(&mut self, key: &K) -> Option<(K, V)> {
        let root = self.root.take()?;
        let root = splay(root, key);
        let result = if root.key <= *key {
            Some((root.key.clone(), root.value.clone()))
        } else {
            peek_max_of(&root.left)
        };
        self.root = Some(root);
        result
    }

    /// Least key `>= key`.
    pub fn ceiling(&mut self, key: &K) -> Option<(K, V)> {
        let root = self.root.take()?;
        let root = splay(root, key);
        let result = if root.key >= *key {
            Some((root.key.clone(), root.value.clone()))
        } else {
            peek_min_of(&root.right)
        };
        self.root = Some(root);
        result
    }

    /// Greatest key strictly `< key`.
    pub fn predecessor(&mut self, key: &K) -> Option<(K, V)> {
        let root = self.root.take()?;
        let root = splay(root, key);
        let result = if root.key < *key {
            Some((root.key.clone(), root.value.clone()))
        } else {
            peek_max_of(&root.left)
        };
        self.root = Some(root);
        result
    }

    /// Least key strictly `> key`.
    pub fn successor(&mut self, key: &K) -> Option<(K, V)> {
        let root = self.root.take()?;
        let root = splay(root, key);
        let result = if root.key > *key {
            Some((root.key.clone(), root.value.clone()))
        } else {
            peek_min_of(&root.right)
        };
        self.root = Some(root);
        result
    }

    /// Splays `lo` to the root, includes it if in `[lo, hi]`, then walks
    /// the right subtree in order, bounded above by `hi`.
    pub fn range(&mut self, lo: &K, hi: &K) -> Vec<(K, V)> {
        let mut out = Vec::new();
        if lo > hi {
            return out;
        }
        let root = match self.root.take() {
            None => return out,
            Some(r) => r,
        };
        let root = splay(root, lo);
        if root.key >= *lo && root.key <= *hi {
            out.push((root.key.clone(), root.value.clone()));
        }
        collect_bounded(&root.right, hi, &mut out);
        self.root = Some(root);
        out
    }

    /// All elements in ascending order. Does not splay.
    pub fn elements(&self) -> Vec<(K, V)> {
        let mut out = Vec::with_capacity(self.len);
        collect_inorder(&self.root, &mut out);
        out
    }

    /// Lazy ascending iterator over borrowed key/value pairs. Like
    /// `elements`, this does not splay.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// Lazy descending iterator over borrowed key/value pairs. Does not
    /// splay.
    pub fn iter_rev(&self) -> RevIter<'_, K, V> {
        RevIter::new(&self.root)
    }

    /// Splay `key`; if absent, attach a new node with the splayed root
    /// moved to the side matching the comparison.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.root.take() {
            None => {
                self.root = Some(Box::new(Node::new(key, value)));
                self.len = 1;
                true
            }
            Some(root) => {
                let mut root = splay(root, &key);
                match key.cmp(&root.key) {
                    Ordering::Equal => {
                        self.root = Some(root);
                        false
                    }
                    Ordering::Less => {
                        let left = root.left.take();
                        let mut new_node = Box::new(Node::new(key, value));
                        new_node.left = left;
                        new_node.right = Some(root);
                        self.root = Some(new_node);
                        self.len += 1;
                        true
                    }
                    Ordering::Greater => {
                        let right = root.right.take();
                        let mut new_node = Box::new(Node::new(key, value));
                        new_node.right = right;
                        new_node.left = Some(root);
                        self.root = Some(new_node);
                        self.len += 1;
                        true
                    }
                }
            }
        }
    }

    /// Splay `key`; if it is the root, detach it (the left subtree's
    /// rightmost descendant, if any, takes its place) and return the
    /// removed value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let root = self.root.take()?;
        let root = splay(root, key);
        if root.key != *key {
            self.root = Some(root);
            return None;
        }
        let Node { value, left, right, .. } = *root;
        self.root = match left {
            None => right,
            Some(left) => {
                let (new_left, mut max_node) = detach_max(left);
                max_node.left = new_left;
                max_node.right = right;
                Some(max_node)
            }
        };
        self.len -= 1;
        Some(value)
    }

    /// Overwrite the value at `key` in place. Returns the previous value,
    /// or `None` (no change) if `key` is absent.
    pub fn update(&mut self, key: &K, value: V) -> Option<V> {
        let root = self.root.take()?;
        let mut root = splay(root, key);
        let result = if root.key == *key {
            Some(std::mem::replace(&mut root.value, value))
        } else {
            None
        };
        self.root = Some(root);
        result
    }

    /// Insert-or-overwrite.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        match self.root.take() {
            None => {
                self.root = Some(Box::new(Node::new(key, value)));
                self.len = 1;
                None
            }
            Some(root) => {
                let mut root = splay(root, &key);
                if root.key == key {
                    let old = std::mem::replace(&mut root.value, value);
                    self.root = Some(root);
                    Some(old)
                } else {
                    let is_less = key < root.key;
                    let mut new_node = Box::new(Node::new(key, value));
                    if is_less {
                        new_node.left = root.left.take();
                        new_node.right = Some(root);
                    } else {
                        new_node.right = root.right.take();
                        new_node.left = Some(root);
                    }
                    self.root = Some(new_node);
                    self.len += 1;
                    None
                }
            }
        }
    }

    /// Splits into two trees at `key`: everything `<= key` stays on the
    /// left, everything `> key` goes to the right (or, if the splayed
    /// root's key is `> key`, everything `< key`'s threshold mirrors onto
    /// the right). `self` becomes empty; both resulting counts are
    /// recomputed in O(n).
    pub fn split(&mut self, key: &K) -> (SplayTree<K, V>, SplayTree<K, V>) {
        let root = match self.root.take() {
            None => return (SplayTree::new(), SplayTree::new()),
            Some(r) => r,
        };
        let mut root = splay(root, key);
        self.len = 0;
        if root.key < *key {
            let right = root.right.take();
            let right_len = node_count(&right);
            let left_box = Some(root);
            let left_len = node_count(&left_box);
            (
                SplayTree { root: left_box, len: left_len },
                SplayTree { root: right, len: right_len },
            )
        } else {
            let left = root.left.take();
            let left_len = node_count(&left);
            let right_box = Some(root);
            let right_len = node_count(&right_box);
            (
                SplayTree { root: left, len: left_len },
                SplayTree { root: right_box, len: right_len },
            )
        }
    }

    /// Attaches `other` as this tree's new maximum, requiring
    /// `self.max() < other.min()`. On success `other` becomes empty; on a
    /// precondition violation neither tree is touched.
    pub fn join(&mut self, other: &mut SplayTree<K, V>) -> bool {
        if self.root.is_none() {
            std::mem::swap(self, other);
            return true;
        }
        if other.root.is_none() {
            return true;
        }
        let self_max = peek_max(self.root.as_deref().expect("checked above")).clone();
        let other_min = peek_min(other.root.as_deref().expect("checked above")).clone();
        if !(self_max < other_min) {
            return false;
        }
        let root = self.root.take().expect("checked above");
        let mut root = splay(root, &self_max);
        root.right = other.root.take();
        self.len += other.len;
        other.len = 0;
        self.root = Some(root);
        true
    }
}

impl<K: Ord + Clone, V: Clone> OrderedMap<K, V> for SplayTree<K, V> {
    fn len(&self) -> usize {
        SplayTree::len(self)
    }

    fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    fn search(&mut self, key: &K) -> Option<V> {
        SplayTree::search(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> bool {
        SplayTree::insert(self, key, value)
    }

    fn update(&mut self, key: &K, value: V) -> Option<V> {
        SplayTree::update(self, key, value)
    }

    fn upsert(&mut self, key: K, value: V) -> Option<V> {
        SplayTree::upsert(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        SplayTree::remove(self, key)
    }

    fn min(&self) -> Option<(K, V)> {
        SplayTree::min(self)
    }

    fn max(&self) -> Option<(K, V)> {
        SplayTree::max(self)
    }

    fn floor(&mut self, key: &K) -> Option<(K, V)> {
        SplayTree::floor(self, key)
    }

    fn ceiling(&mut self, key: &K) -> Option<(K, V)> {
        SplayTree::ceiling(self, key)
    }

    fn predecessor(&mut self, key: &K) -> Option<(K, V)> {
        SplayTree::predecessor(self, key)
    }

    fn successor(&mut self, key: &K) -> Option<(K, V)> {
        SplayTree::successor(self, key)
    }

    fn range(&mut self, lo: &K, hi: &K) -> Vec<(K, V)> {
        SplayTree::range(self, lo, hi)
    }

    fn elements(&self) -> Vec<(K, V)> {
        SplayTree::elements(self)
    }
}

#[cfg(test)]
mod tree_test;
