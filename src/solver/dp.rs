// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pseudo-polynomial subset-sum table.
//!
//! Row `i` of the table is a bit set over `0..=S`: bit `s` is set when the
//! elements `i..n` can reach exactly `s`. Rows are built from the last
//! element backwards, so reconstruction can walk forwards and take each
//! element whenever the rest can still complete the sum. That walk picks the
//! same subset as include-first depth-first search.

use bitvec::prelude::*;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tracing::{debug, instrument};

use super::{half_target, PartitionStrategy, SolveOutcome};
use crate::error::SolverError;
use crate::model::PartitionInstance;

type Row = BitVec<u64, Lsb0>;

/// Exact solver in `O(n * S)` time and bits, `S` being half the total.
#[derive(Debug, Clone)]
pub struct DynamicProgrammingSolver {
    cell_budget: u64,
}

impl DynamicProgrammingSolver {
    /// Solver refusing tables of more than `cell_budget` bits.
    pub fn new(cell_budget: u64) -> Self {
        Self { cell_budget }
    }

    pub fn cell_budget(&self) -> u64 {
        self.cell_budget
    }

    /// Table size for `instance`, or the error the solve would return.
    pub fn check_budget(&self, instance: &PartitionInstance) -> Result<(), SolverError> {
        match half_target(instance) {
            Some(target) => self.target_within_budget(instance.len(), &target).map(|_| ()),
            None => Ok(()),
        }
    }

    fn target_within_budget(&self, n: usize, target: &BigUint) -> Result<usize, SolverError> {
        let exceeded = || {
            let cells = (BigUint::from(n) + 1u32) * (target + 1u32);
            SolverError::ResourceExceeded {
                required: cells.to_string(),
                budget: self.cell_budget,
            }
        };
        let s = target.to_usize().ok_or_else(exceeded)?;
        let cells = (n as u64 + 1)
            .checked_mul((s as u64).checked_add(1).ok_or_else(exceeded)?)
            .ok_or_else(exceeded)?;
        if cells > self.cell_budget {
            return Err(exceeded());
        }
        Ok(s)
    }
}

impl Default for DynamicProgrammingSolver {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DP_CELL_BUDGET)
    }
}

impl PartitionStrategy for DynamicProgrammingSolver {
    fn name(&self) -> &str {
        "dp"
    }

    #[instrument(skip_all, fields(n = instance.len()))]
    fn solve(&self, instance: &PartitionInstance) -> Result<SolveOutcome, SolverError> {
        let Some(target) = half_target(instance) else {
            debug!("odd total");
            return Ok(SolveOutcome::Infeasible);
        };
        let s = self.target_within_budget(instance.len(), &target)?;

        // Sizes above S can never be taken.
        let sizes: Vec<Option<usize>> = instance
            .elements()
            .iter()
            .map(|e| e.size().to_usize().filter(|&size| size <= s))
            .collect();

        let reach = suffix_reachability(&sizes, s);
        if !reach[0][s] {
            debug!(target = s, "unreachable");
            return Ok(SolveOutcome::Infeasible);
        }

        let mut remaining = s;
        let mut chosen = Vec::new();
        for (i, size) in sizes.iter().enumerate() {
            if let Some(size) = *size {
                if size <= remaining && reach[i + 1][remaining - size] {
                    chosen.push(i);
                    remaining -= size;
                }
            }
        }
        debug!(target = s, chosen = chosen.len(), "solved");
        Ok(SolveOutcome::Solved(instance.solution_from_indices(chosen)))
    }
}

/// `rows[i][t]` is set iff some subset of `sizes[i..]` sums to `t`.
fn suffix_reachability(sizes: &[Option<usize>], s: usize) -> Vec<Row> {
    let mut rows = vec![bitvec![u64, Lsb0; 0; s + 1]; sizes.len() + 1];
    rows[sizes.len()].set(0, true);
    for i in (0..sizes.len()).rev() {
        let mut row = rows[i + 1].clone();
        if let Some(size) = sizes[i] {
            for reached in rows[i + 1].iter_ones() {
                let sum = reached + size;
                if sum > s {
                    break;
                }
                row.set(sum, true);
            }
        }
        rows[i] = row;
    }
    rows
}
