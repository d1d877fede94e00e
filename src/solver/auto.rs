// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Table when it fits, search when it does not.

use tracing::info;

use super::{BacktrackingSolver, DynamicProgrammingSolver, PartitionStrategy, SolveOutcome};
use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::model::PartitionInstance;

#[derive(Debug, Clone, Default)]
pub struct AutoSolver {
    dp: DynamicProgrammingSolver,
    backtrack: BacktrackingSolver,
}

impl AutoSolver {
    pub fn new(dp: DynamicProgrammingSolver, backtrack: BacktrackingSolver) -> Self {
        Self { dp, backtrack }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(
            DynamicProgrammingSolver::new(config.dp_cell_budget),
            BacktrackingSolver::from_config(config),
        )
    }
}

impl PartitionStrategy for AutoSolver {
    fn name(&self) -> &str {
        "auto"
    }

    fn solve(&self, instance: &PartitionInstance) -> Result<SolveOutcome, SolverError> {
        match self.dp.check_budget(instance) {
            Ok(()) => {
                info!(strategy = self.dp.name(), "selected solver");
                self.dp.solve(instance)
            }
            Err(reason) => {
                info!(strategy = self.backtrack.name(), %reason, "table over budget, searching instead");
                self.backtrack.solve(instance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartitionElement;

    #[test]
    fn test_falls_back_to_search_over_budget() {
        let instance = PartitionInstance::new(vec![
            PartitionElement::new("a", 40u32),
            PartitionElement::new("b", 25u32),
            PartitionElement::new("c", 15u32),
        ])
        .unwrap();
        let tight = AutoSolver::new(DynamicProgrammingSolver::new(4), BacktrackingSolver::new());
        let roomy = AutoSolver::default();
        let expected: crate::model::PartitionSolution = ["a"].into_iter().collect();
        assert_eq!(tight.solve(&instance).unwrap(), SolveOutcome::Solved(expected.clone()));
        assert_eq!(roomy.solve(&instance).unwrap(), SolveOutcome::Solved(expected));
    }
}
