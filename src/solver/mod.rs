// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Partition solvers.
//!
//! Every strategy answers the same question: is there a subset of the
//! elements summing to exactly half the total? The answer is a
//! [`SolveOutcome`]; only a strategy that ran out of resources returns an
//! error.
//!
//! Exact strategies agree on *which* subset they return: the one found by
//! include-first depth-first search in element order.

pub mod auto;
pub mod backtrack;
pub mod dp;
pub mod greedy;

pub use auto::AutoSolver;
pub use backtrack::BacktrackingSolver;
pub use dp::DynamicProgrammingSolver;
pub use greedy::GreedySolver;

use std::fmt::Debug;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

use crate::config::{SolverConfig, StrategyKind};
use crate::error::SolverError;
use crate::model::{PartitionInstance, PartitionSolution};

/// Answer of one solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "solution", rename_all = "lowercase")]
pub enum SolveOutcome {
    /// One side of an equal split.
    Solved(PartitionSolution),
    /// No equal split exists (a proof only from an exact strategy).
    Infeasible,
    /// A limit stopped the search before it could decide.
    Unknown,
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&PartitionSolution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<PartitionSolution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }
}

/// A way of solving Partition.
pub trait PartitionStrategy: Send + Sync + Debug {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Whether `Infeasible` from this strategy proves no split exists.
    fn is_exact(&self) -> bool {
        true
    }

    fn solve(&self, instance: &PartitionInstance) -> Result<SolveOutcome, SolverError>;
}

/// Half the total, or `None` when the total is odd.
pub fn half_target(instance: &PartitionInstance) -> Option<BigUint> {
    let total = instance.total_sum();
    if (&total % 2u32).is_zero() {
        Some(total >> 1u32)
    } else {
        None
    }
}

/// The strategy `config` asks for.
pub fn strategy_for(config: &SolverConfig) -> Box<dyn PartitionStrategy> {
    match config.strategy {
        StrategyKind::Auto => Box::new(AutoSolver::from_config(config)),
        StrategyKind::Dp => Box::new(DynamicProgrammingSolver::new(config.dp_cell_budget)),
        StrategyKind::Backtrack => Box::new(BacktrackingSolver::from_config(config)),
        StrategyKind::Greedy => Box::new(GreedySolver),
    }
}
