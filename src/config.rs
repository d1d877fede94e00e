// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration for the reduction and the solvers.
//!
//! Both structs have sensible defaults and `with_*` builders; the binary
//! maps its command-line arguments onto them and calls `validate()`.

use std::time::Duration;

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::error::{Error, Result};
use crate::reduction::WeightLayout;

/// Largest size, in bits, the reduction may produce.
pub const DEFAULT_MAX_SIZE_BITS: u64 = 1 << 20;

/// Largest dynamic programming table, in cells (bits).
pub const DEFAULT_DP_CELL_BUDGET: u64 = 1 << 30;

/// Reduction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionConfig {
    /// Digit placement of the weights.
    pub layout: WeightLayout,
    /// Ceiling on the bit length of any weight, B or filler.
    pub max_size_bits: u64,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            layout: WeightLayout::default(),
            max_size_bits: DEFAULT_MAX_SIZE_BITS,
        }
    }
}

impl ReductionConfig {
    pub fn with_layout(mut self, layout: WeightLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_max_size_bits(mut self, max_size_bits: u64) -> Self {
        self.max_size_bits = max_size_bits;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_size_bits == 0 {
            return Err(Error::config("max size bits must be positive"));
        }
        Ok(())
    }
}

/// Which Partition solving strategy to run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Dynamic programming when it fits the budget, backtracking otherwise.
    #[default]
    Auto,
    /// Dynamic programming only; fails when over budget.
    Dp,
    /// Exponential include/exclude search.
    Backtrack,
    /// Best-fit decreasing heuristic. Not exact.
    Greedy,
}

/// Solver settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub strategy: StrategyKind,
    /// Maximum `(n + 1) * (S + 1)` cells for the dynamic programming table.
    pub dp_cell_budget: u64,
    /// Maximum search nodes for backtracking; `None` is unlimited.
    pub node_limit: Option<u64>,
    /// Wall-clock limit for backtracking; `None` is unlimited.
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            dp_cell_budget: DEFAULT_DP_CELL_BUDGET,
            node_limit: None,
            time_limit: None,
        }
    }
}

impl SolverConfig {
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_dp_cell_budget(mut self, budget: u64) -> Self {
        self.dp_cell_budget = budget;
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.dp_cell_budget == 0 {
            return Err(Error::config("dynamic programming budget must be positive"));
        }
        if self.node_limit == Some(0) {
            return Err(Error::config("node limit must be positive"));
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(Error::config("time limit must be positive"));
        }
        Ok(())
    }
}
