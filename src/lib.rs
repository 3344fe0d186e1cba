// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! treeforge - in-memory ordered key-value containers behind one contract.
//!
//! Three engines, one trait ([`OrderedMap`]):
//!
//! - [`BTree`]: Knuth-order multi-way tree, keys and values resident in
//!   every node.
//! - [`BPlusTree`]: same branching discipline, but values live only in
//!   leaves, which are chained for fast ordered range scans.
//! - [`SplayTree`]: self-adjusting binary search tree; every access
//!   reshapes the tree so the touched key ends up at the root.
//!
//! ## Quick start
//!
//! ```rust
//! use treeforge::{BTree, OrderedMap};
//!
//! let mut tree = BTree::new();
//! tree.insert(1, "a");
//! tree.insert(2, "b");
//! assert_eq!(OrderedMap::search(&mut tree, &1), Some("a"));
//! assert_eq!(tree.range(&1, &2), vec![(1, "a"), (2, "b")]);
//! ```
//!
//! ## Choosing an engine
//!
//! B-Tree and B+Tree give worst-case `O(log n)` for every operation and
//! support bulk-loading a sorted sequence. The B+Tree trades slightly
//! larger internal nodes (separators only, no values) for faster range
//! scans via its leaf chain. The splay tree needs no configuration and
//! adapts to access patterns - repeatedly touched keys get cheaper over
//! time - at the cost of read operations that are not read-only (they
//! restructure the tree) and no worst-case-per-operation bound.

pub mod bplustree;
pub mod btree;
pub mod collection;
pub mod order;
pub mod splay;

mod bulk;

pub use bplustree::BPlusTree;
pub use btree::BTree;
pub use collection::OrderedMap;
pub use order::{InvalidOrder, Order};
pub use splay::SplayTree;
