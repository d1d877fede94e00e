// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Include/exclude search over the elements of a Partition instance.
//!
//! Round `i` decides element `i`. The predicate offers two choices, include
//! then exclude, so the first leaf reached is the canonical subset: the
//! lowest-index element is taken whenever some completion exists.
//!
//! A branch is cut when the remaining target exceeds the sum of the
//! undecided elements; an element larger than the remaining target cannot be
//! included. The predicate runs all `n` rounds even once the target is met,
//! so zero-size elements are included exactly as the table solver does.

use tracing::trace;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::state::statistics::Counters;

const INCLUDE: usize = 0;
const EXCLUDE: usize = 1;

#[derive(Debug, Default)]
pub struct SubsetSumPredicate;

impl Predicate for SubsetSumPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        if ctx.limit_reached() {
            ctx.state.aborted = true;
            return PredicateResult::Suspend;
        }
        ctx.statistics.increment(Counters::NodesVisited);

        if ctx.state.remaining > ctx.memo.suffix_sums[round] {
            ctx.statistics.increment(Counters::Pruned);
            return PredicateResult::Failure;
        }
        if round == ctx.memo.len() {
            // remaining <= suffix_sums[n] == 0
            return PredicateResult::Success;
        }
        PredicateResult::Choices(2)
    }

    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        match choice {
            INCLUDE => {
                if ctx.memo.sizes[round] > ctx.state.remaining {
                    return PredicateResult::Failure;
                }
                ctx.select(round);
                trace!(round, "include");
                PredicateResult::SuccessSamePredicate
            }
            EXCLUDE => PredicateResult::SuccessSamePredicate,
            _ => PredicateResult::Failure,
        }
    }

    fn name(&self) -> &str {
        "SubsetSum"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{MemoizedData, SearchLimits};
    use crate::engine::EngineBuilder;
    use crate::predicates::{FailPredicate, SuspendPredicate};
    use crate::state::statistics::Statistics;
    use num_bigint::BigUint;

    fn context(sizes: &[u32], target: u32, limits: SearchLimits) -> SearchContext {
        let sizes = sizes.iter().map(|&s| BigUint::from(s)).collect();
        SearchContext::new(MemoizedData::new(sizes, BigUint::from(target)), limits)
    }

    fn first_subset(sizes: &[u32], target: u32) -> Option<Vec<usize>> {
        let mut ctx = context(sizes, target, SearchLimits::default());
        let engine = EngineBuilder::new()
            .add(Box::new(SubsetSumPredicate))
            .terminal(Box::new(SuspendPredicate))
            .build();
        engine
            .search(&mut ctx)
            .map(|_| ctx.state.selected_indices())
    }

    #[test]
    fn test_finds_include_first_subset() {
        // {3, 1} and {4} both reach 4; include-first takes element 0.
        assert_eq!(first_subset(&[3, 1, 4], 4), Some(vec![0, 1]));
        assert_eq!(first_subset(&[3, 2, 4], 4), Some(vec![2]));
    }

    #[test]
    fn test_no_subset() {
        assert_eq!(first_subset(&[2, 4, 6], 5), None);
    }

    #[test]
    fn test_zero_size_elements_are_included() {
        assert_eq!(first_subset(&[2, 0, 3], 2), Some(vec![0, 1]));
        assert_eq!(first_subset(&[0, 0], 0), Some(vec![0, 1]));
    }

    #[test]
    fn test_counts_every_solution_under_fail() {
        // Subsets of {1, 1, 2} summing to 2: {0,1} and {2}.
        let mut ctx = context(&[1, 1, 2], 2, SearchLimits::default());
        let engine = EngineBuilder::new()
            .add(Box::new(SubsetSumPredicate))
            .add(Statistics::counting_predicate(Counters::Solutions, None))
            .terminal(Box::new(FailPredicate))
            .build();
        assert!(engine.search(&mut ctx).is_none());
        assert_eq!(ctx.statistics.get(Counters::Solutions), 2);
        assert!(ctx.statistics.get(Counters::Pruned) > 0);
        // Fully rewound.
        assert_eq!(ctx.state.remaining, BigUint::from(2u32));
        assert!(ctx.state.selected_indices().is_empty());
    }

    #[test]
    fn test_node_limit_suspends_with_abort_flag() {
        let mut ctx = context(&[1; 12], 7, SearchLimits::new(Some(3), None));
        let engine = EngineBuilder::new()
            .add(Box::new(SubsetSumPredicate))
            .terminal(Box::new(FailPredicate))
            .build();
        assert!(engine.search(&mut ctx).is_some());
        assert!(ctx.state.aborted);
        assert_eq!(ctx.statistics.get(Counters::NodesVisited), 3);
    }
}
