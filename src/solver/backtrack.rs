// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exponential include/exclude search on the predicate engine.
//!
//! The program is
//!
//! ```text
//! SubsetSum -> Count(Solutions) -> Suspend
//! ```
//!
//! so the engine stops at the first subset reaching the target, with the
//! selection still in the context. Exhausting the engine proves there is no
//! subset. A node or time limit makes `SubsetSum` suspend with the abort
//! flag set instead, which is reported as `Unknown`.

use std::time::Duration;

use tracing::{debug, instrument};

use super::{half_target, PartitionStrategy, SolveOutcome};
use crate::config::SolverConfig;
use crate::context::{MemoizedData, SearchContext, SearchLimits};
use crate::engine::EngineBuilder;
use crate::error::SolverError;
use crate::model::PartitionInstance;
use crate::predicates::{SubsetSumPredicate, SuspendPredicate};
use crate::state::statistics::{Counters, Statistics};

/// Exact solver, exponential in the number of elements.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    node_limit: Option<u64>,
    time_limit: Option<Duration>,
}

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            node_limit: config.node_limit,
            time_limit: config.time_limit,
        }
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Run the search, returning the outcome with the search counters.
    pub fn solve_with_statistics(&self, instance: &PartitionInstance) -> (SolveOutcome, Statistics) {
        let Some(target) = half_target(instance) else {
            return (SolveOutcome::Infeasible, Statistics::new());
        };

        let memo = MemoizedData::for_instance(instance, target);
        let mut ctx = SearchContext::new(memo, SearchLimits::new(self.node_limit, self.time_limit));

        let engine = EngineBuilder::new()
            .add(Box::new(SubsetSumPredicate))
            .add(Statistics::counting_predicate(Counters::Solutions, None))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let outcome = match engine.search(&mut ctx) {
            None => SolveOutcome::Infeasible,
            Some(_) if ctx.state.aborted => SolveOutcome::Unknown,
            Some(_) => {
                SolveOutcome::Solved(instance.solution_from_indices(ctx.state.selected_indices()))
            }
        };
        (outcome, ctx.statistics)
    }
}

impl PartitionStrategy for BacktrackingSolver {
    fn name(&self) -> &str {
        "backtrack"
    }

    #[instrument(skip_all, fields(n = instance.len()))]
    fn solve(&self, instance: &PartitionInstance) -> Result<SolveOutcome, SolverError> {
        let (outcome, statistics) = self.solve_with_statistics(instance);
        for (counter, value) in statistics.snapshot() {
            debug!(counter, value, "search statistic");
        }
        if outcome == SolveOutcome::Unknown {
            debug!(
                node_limit = ?self.node_limit,
                time_limit = ?self.time_limit,
                "search stopped by limit"
            );
        }
        Ok(outcome)
    }
}
