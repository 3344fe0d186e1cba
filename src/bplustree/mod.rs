// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! B+Tree engine: separators-only internal nodes, values resident only in
//! leaves, doubly-linked leaf chain for ordered scans.

mod iter;
mod node;
mod tree;

pub use iter::{Iter, RevIter};
pub use tree::BPlusTree;
