// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! DYNAMIC state (mutable, tracked on trail).
//!
//! The subset-sum search keeps two things that change per decision: the
//! amount still needed to reach the target and which elements have been
//! taken. Every modification goes through [`SearchContext`] so that an undo
//! entry lands on the trail first.
//!
//! [`SearchContext`]: crate::context::SearchContext

pub mod statistics;

use bitvec::prelude::*;
use num_bigint::BigUint;

/// One undo entry: the value a field held before it was overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Selection flag of `index` before the change.
    Selected { index: usize, old: bool },
    /// Remaining target before the change.
    Remaining(BigUint),
}

/// Mutable search state.
#[derive(Debug, Clone)]
pub struct DynamicState {
    /// Target minus the sizes of the selected elements.
    pub remaining: BigUint,
    /// One flag per element, set when the element is in the subset.
    pub selected: BitVec<u64, Lsb0>,
    /// Set when a node or time limit cut the search short.
    pub aborted: bool,
}

impl DynamicState {
    /// Nothing selected, the full target remaining.
    pub fn new(len: usize, target: BigUint) -> Self {
        Self {
            remaining: target,
            selected: bitvec![u64, Lsb0; 0; len],
            aborted: false,
        }
    }

    /// Restore the value recorded in `change`.
    pub fn undo(&mut self, change: Change) {
        match change {
            Change::Selected { index, old } => self.selected.set(index, old),
            Change::Remaining(old) => self.remaining = old,
        }
    }

    /// Indices of the selected elements, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.selected.iter_ones().collect()
    }
}
