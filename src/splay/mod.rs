// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Splay tree engine: self-adjusting binary search tree, top-down splay on
//! every access, `split`/`join` as first-class structural operations.

mod iter;
mod node;
mod tree;

pub use iter::{Iter, RevIter};
pub use tree::SplayTree;
