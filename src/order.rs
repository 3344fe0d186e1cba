// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Branching-factor parameter shared by the B-Tree and B+Tree engines.

use std::fmt;

/// Knuth order of a multiway tree: the maximum number of children an
/// internal node may carry.
///
/// ## Examples
///
/// ```rust
/// use treeforge::Order;
///
/// let order = Order::new(16);
/// assert_eq!(order.get(), 16);
/// assert_eq!(Order::default().get(), 16);
/// ```
///
/// ## Panics
///
/// `Order::new` panics if `m < 3`; use [`Order::try_new`] for a
/// non-panicking constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Order(usize);

impl Order {
    /// Default order used when an engine is constructed without one.
    pub const DEFAULT: usize = 16;

    /// Smallest valid order. Below this a node cannot satisfy the
    /// ⌈m/2⌉ minimum-children invariant.
    pub const MIN: usize = 3;

    /// Construct an order, panicking on an invalid value.
    pub fn new(m: usize) -> Self {
        match Self::try_new(m) {
            Ok(order) => order,
            Err(err) => panic!("{err}"),
        }
    }

    /// Construct an order, reporting an invalid value instead of panicking.
    pub fn try_new(m: usize) -> Result<Self, InvalidOrder> {
        if m < Self::MIN {
            Err(InvalidOrder {
                order: m,
                min: Self::MIN,
            })
        } else {
            Ok(Order(m))
        }
    }

    /// The raw order value.
    pub fn get(self) -> usize {
        self.0
    }

    /// `MAX_KEYS = m - 1`: the most keys a single node may hold.
    pub fn max_keys(self) -> usize {
        self.0 - 1
    }

    /// `MIN_KEYS = ⌈m/2⌉ - 1`: the fewest keys a non-root node may hold.
    pub fn min_keys(self) -> usize {
        self.0.div_ceil(2) - 1
    }

    /// `MIN_CHILDREN = ⌈m/2⌉`: the fewest children a non-root internal
    /// node may hold.
    pub fn min_children(self) -> usize {
        self.0.div_ceil(2)
    }
}

impl Default for Order {
    fn default() -> Self {
        Order(Self::DEFAULT)
    }
}

impl TryFrom<usize> for Order {
    type Error = InvalidOrder;

    fn try_from(m: usize) -> Result<Self, Self::Error> {
        Self::try_new(m)
    }
}

/// Programmer-error signal for an out-of-range order, surfaced through
/// [`Order::try_new`] for callers that prefer a fallible constructor over
/// the panicking default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOrder {
    /// The rejected order.
    pub order: usize,
    /// The smallest order that would have been accepted.
    pub min: usize,
}

impl fmt::Display for InvalidOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid tree order {}: order must be >= {}",
            self.order, self.min
        )
    }
}

impl std::error::Error for InvalidOrder {}

#[cfg(test)]
mod order_test;
