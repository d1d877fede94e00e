// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining MEMO and DYNAMIC state.
//!
//! The SearchContext is the core data structure that combines:
//! - MEMO: the element sizes, their suffix sums and the target, fixed for
//!   the whole search
//! - DYNAMIC: the remaining target and the selection flags, with trail-based
//!   backtracking
//!
//! Several contexts can be built from clones of the same MEMO data and
//! searched independently.

use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::model::PartitionInstance;
use crate::state::statistics::{Counters, Statistics};
use crate::state::{Change, DynamicState};
use crate::trail::Trail;

/// Deadline checks are this many nodes apart.
const CLOCK_INTERVAL: u64 = 1024;

/// Immutable precomputed data.
///
/// Computed once per instance and never changed during search.
#[derive(Debug, Clone)]
pub struct MemoizedData {
    /// Element sizes in instance order.
    pub sizes: Vec<BigUint>,
    /// `suffix_sums[i]` is the sum of `sizes[i..]`; one longer than `sizes`.
    pub suffix_sums: Vec<BigUint>,
    /// Sum the selected subset must reach.
    pub target: BigUint,
}

impl MemoizedData {
    pub fn new(sizes: Vec<BigUint>, target: BigUint) -> Self {
        let mut suffix_sums = vec![BigUint::zero(); sizes.len() + 1];
        for i in (0..sizes.len()).rev() {
            suffix_sums[i] = &suffix_sums[i + 1] + &sizes[i];
        }
        Self {
            sizes,
            suffix_sums,
            target,
        }
    }

    /// Sizes of `instance` with target `target`.
    pub fn for_instance(instance: &PartitionInstance, target: BigUint) -> Self {
        let sizes = instance.elements().iter().map(|e| e.size().clone()).collect();
        Self::new(sizes, target)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Limits on how long one search may run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    pub node_limit: Option<u64>,
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    /// Limits starting now.
    pub fn new(node_limit: Option<u64>, time_limit: Option<Duration>) -> Self {
        Self {
            node_limit,
            deadline: time_limit.map(|limit| Instant::now() + limit),
        }
    }
}

/// Search context combining MEMO and DYNAMIC state.
///
/// This is the main data structure passed through the search algorithm.
///
/// # Memory Model
///
/// ```text
/// SearchContext {
///     memo: MemoizedData,        // Immutable
///     trail: Trail<Change>,      // Mutable, owned
///     state: DynamicState,       // Mutable, owned
///     statistics: Statistics,    // Counters, never rewound
/// }
/// ```
///
/// State changes must go through methods such as [`select`](Self::select)
/// so they are recorded on the trail before they happen.
#[derive(Debug)]
pub struct SearchContext {
    pub memo: MemoizedData,
    pub trail: Trail<Change>,
    pub state: DynamicState,
    pub statistics: Statistics,
    limits: SearchLimits,
}

impl SearchContext {
    pub fn new(memo: MemoizedData, limits: SearchLimits) -> Self {
        let state = DynamicState::new(memo.len(), memo.target.clone());
        // Each element is selected at most once per branch, recording two changes.
        let trail = Trail::with_max_size(memo.len().saturating_mul(2));
        Self {
            memo,
            trail,
            state,
            statistics: Statistics::new(),
            limits,
        }
    }

    /// A context over no elements with a zero target.
    pub fn empty() -> Self {
        Self::new(
            MemoizedData::new(Vec::new(), BigUint::zero()),
            SearchLimits::default(),
        )
    }

    /// Put element `index` into the subset.
    ///
    /// The caller has checked that its size does not exceed the remaining
    /// target.
    pub fn select(&mut self, index: usize) {
        let size = &self.memo.sizes[index];
        let old_remaining = std::mem::take(&mut self.state.remaining);
        self.state.remaining = &old_remaining - size;
        self.trail.record(Change::Remaining(old_remaining));
        self.trail.record(Change::Selected {
            index,
            old: self.state.selected[index],
        });
        self.state.selected.set(index, true);
    }

    /// Current trail position.
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Undo every change recorded after `position`.
    pub fn rewind_to(&mut self, position: usize) {
        let state = &mut self.state;
        self.trail.rewind_to(position, |change| state.undo(change));
    }

    /// Whether the node budget is spent or the deadline passed.
    ///
    /// The clock is read only every [`CLOCK_INTERVAL`] nodes.
    pub fn limit_reached(&self) -> bool {
        let nodes = self.statistics.get(Counters::NodesVisited);
        if self.limits.node_limit.is_some_and(|limit| nodes >= limit) {
            return true;
        }
        match self.limits.deadline {
            Some(deadline) if nodes % CLOCK_INTERVAL == 0 => Instant::now() >= deadline,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(values: &[u32]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn test_suffix_sums() {
        let memo = MemoizedData::new(sizes(&[3, 1, 4]), BigUint::from(4u32));
        assert_eq!(memo.suffix_sums, sizes(&[8, 5, 4, 0]));
        assert_eq!(memo.len(), 3);
    }

    #[test]
    fn test_select_and_rewind() {
        let memo = MemoizedData::new(sizes(&[3, 1, 4]), BigUint::from(4u32));
        let mut ctx = SearchContext::new(memo, SearchLimits::default());

        let start = ctx.trail_len();
        ctx.select(0);
        let middle = ctx.trail_len();
        ctx.select(1);
        assert!(ctx.state.remaining.is_zero());
        assert_eq!(ctx.state.selected_indices(), vec![0, 1]);

        ctx.rewind_to(middle);
        assert_eq!(ctx.state.remaining, BigUint::from(1u32));
        assert_eq!(ctx.state.selected_indices(), vec![0]);

        ctx.rewind_to(start);
        assert_eq!(ctx.state.remaining, BigUint::from(4u32));
        assert!(ctx.state.selected_indices().is_empty());
    }

    #[test]
    fn test_trail_holds_every_element_selected() {
        let n = 1000;
        let memo = MemoizedData::new(vec![BigUint::zero(); n], BigUint::zero());
        let mut ctx = SearchContext::new(memo, SearchLimits::default());
        for index in 0..n {
            ctx.select(index);
        }
        assert_eq!(ctx.trail_len(), 2 * n);
        ctx.rewind_to(0);
        assert!(ctx.state.selected_indices().is_empty());
    }

    #[test]
    fn test_node_limit() {
        let limits = SearchLimits::new(Some(2), None);
        let mut ctx = SearchContext::new(MemoizedData::new(Vec::new(), BigUint::zero()), limits);
        assert!(!ctx.limit_reached());
        ctx.statistics.increment(Counters::NodesVisited);
        assert!(!ctx.limit_reached());
        ctx.statistics.increment(Counters::NodesVisited);
        assert!(ctx.limit_reached());
    }

    #[test]
    fn test_expired_deadline() {
        let limits = SearchLimits {
            node_limit: None,
            deadline: Some(Instant::now()),
        };
        let ctx = SearchContext::new(MemoizedData::new(Vec::new(), BigUint::zero()), limits);
        assert!(ctx.limit_reached());
    }
}
