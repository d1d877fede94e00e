// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Best-fit decreasing heuristic.
//!
//! Takes elements largest first whenever they still fit under the target.
//! Fast, but `Infeasible` from here proves nothing unless the total is odd:
//! `{3, 3, 2, 2, 2, 2}` splits as `{3, 2, 2} / {3, 2, 2}`, which this misses.

use tracing::debug;

use super::{half_target, PartitionStrategy, SolveOutcome};
use crate::error::SolverError;
use crate::model::PartitionInstance;

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl PartitionStrategy for GreedySolver {
    fn name(&self) -> &str {
        "greedy"
    }

    fn is_exact(&self) -> bool {
        false
    }

    fn solve(&self, instance: &PartitionInstance) -> Result<SolveOutcome, SolverError> {
        let Some(mut remaining) = half_target(instance) else {
            return Ok(SolveOutcome::Infeasible);
        };

        let elements = instance.elements();
        let mut order: Vec<usize> = (0..elements.len()).collect();
        // Stable: equal sizes keep instance order.
        order.sort_by(|&a, &b| elements[b].size().cmp(elements[a].size()));

        let mut chosen = Vec::new();
        for i in order {
            let size = elements[i].size();
            if size <= &remaining {
                remaining -= size;
                chosen.push(i);
            }
        }

        if remaining == num_bigint::BigUint::default() {
            Ok(SolveOutcome::Solved(instance.solution_from_indices(chosen)))
        } else {
            debug!(%remaining, "greedy fill fell short");
            Ok(SolveOutcome::Infeasible)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PartitionElement, PartitionSolution};

    fn instance(sizes: &[u64]) -> PartitionInstance {
        PartitionInstance::new(
            sizes
                .iter()
                .enumerate()
                .map(|(i, &s)| PartitionElement::new(format!("e{i}"), s))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_greedy_finds_easy_split() {
        let outcome = GreedySolver.solve(&instance(&[1, 5, 4])).unwrap();
        let expected: PartitionSolution = ["e1"].into_iter().collect();
        assert_eq!(outcome, SolveOutcome::Solved(expected));
    }

    #[test]
    fn test_greedy_misses_existing_split() {
        let inst = instance(&[3, 3, 2, 2, 2, 2]);
        assert_eq!(GreedySolver.solve(&inst).unwrap(), SolveOutcome::Infeasible);
        assert!(!GreedySolver.is_exact());
    }
}
