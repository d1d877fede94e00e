// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Property-based tests for the reduction and the solvers.
//!
//! Uses proptest to check that the reduction preserves the answer and that
//! the exact solvers agree on arbitrary small instances.

mod common;

use common::{partition, three_dm_owned};
use proptest::prelude::*;
use tdm_partition::config::{ReductionConfig, SolverConfig};
use tdm_partition::error::ReductionError;
use tdm_partition::mapping::map_solution;
use tdm_partition::model::PartitionSolution;
use tdm_partition::pipeline::{ReductionPipeline, Verdict};
use tdm_partition::solver::{BacktrackingSolver, DynamicProgrammingSolver, PartitionStrategy};
use tdm_partition::validation::{verify_partition_solution, verify_three_dm_solution};
use tdm_partition::{Error, Triple};

fn triple(w: usize, x: usize, y: usize) -> Triple {
    Triple::new(format!("w{}", w + 1), format!("x{}", x + 1), format!("y{}", y + 1))
}

/// A planted perfect matching plus up to three random decoys, shuffled.
fn planted() -> impl Strategy<Value = (usize, Vec<Triple>)> {
    (1usize..=4)
        .prop_flat_map(|q| {
            let permutation = move || Just((0..q).collect::<Vec<usize>>()).prop_shuffle();
            (
                Just(q),
                permutation(),
                permutation(),
                prop::collection::vec((0..q, 0..q, 0..q), 0..=3),
            )
        })
        .prop_flat_map(|(q, xs, ys, decoys)| {
            let mut triples: Vec<Triple> = (0..q).map(|w| triple(w, xs[w], ys[w])).collect();
            triples.extend(decoys.into_iter().map(|(w, x, y)| triple(w, x, y)));
            (Just(q), Just(triples).prop_shuffle())
        })
}

/// Any small instance, with or without a matching.
fn arbitrary() -> impl Strategy<Value = (usize, Vec<Triple>)> {
    (1usize..=3).prop_flat_map(|q| {
        (
            Just(q),
            prop::collection::vec((0..q, 0..q, 0..q).prop_map(|(w, x, y)| triple(w, x, y)), 1..=5),
        )
    })
}

/// Auto strategy with a small table budget, so both solvers get used.
fn pipeline() -> ReductionPipeline {
    ReductionPipeline::new(
        ReductionConfig::default(),
        &SolverConfig::default().with_dp_cell_budget(1 << 22),
    )
}

/// Exhaustive check over every q-subset of the triples.
fn has_matching(q: usize, triples: &[Triple]) -> bool {
    fn extend(q: usize, triples: &[Triple], start: usize, chosen: &mut Vec<Triple>) -> bool {
        if chosen.len() == q {
            return true;
        }
        for i in start..triples.len() {
            if chosen.iter().all(|t| !t.shares_coordinate_with(&triples[i])) {
                chosen.push(triples[i].clone());
                if extend(q, triples, i + 1, chosen) {
                    return true;
                }
                chosen.pop();
            }
        }
        false
    }
    extend(q, triples, 0, &mut Vec::new())
}

// =============================================================================
// Reduction Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A planted matching is always found, and the found matching verifies.
    #[test]
    fn prop_planted_matching_found((q, triples) in planted()) {
        let instance = three_dm_owned(q, triples);
        let run = pipeline().run(&instance).unwrap();
        prop_assert_eq!(run.report.verdict, Verdict::Found);
        let matching = run.report.matching.unwrap();
        prop_assert!(verify_three_dm_solution(&instance, &matching));
    }

    /// The other side of the split maps to the same matching.
    #[test]
    fn prop_complement_maps_to_same_matching((q, triples) in planted()) {
        let instance = three_dm_owned(q, triples);
        let run = pipeline().run(&instance).unwrap();
        let solution = run.report.outcome.solution().unwrap();
        let complement: PartitionSolution = run
            .reduction
            .partition()
            .elements()
            .iter()
            .map(|e| e.id().clone())
            .filter(|id| !solution.contains(id))
            .collect();
        let mapped = map_solution(&complement, &run.reduction, &instance).unwrap();
        prop_assert_eq!(Some(mapped), run.report.matching);
    }

    /// The verdict matches exhaustive search.
    #[test]
    fn prop_verdict_matches_brute_force((q, triples) in arbitrary()) {
        let expected = has_matching(q, &triples);
        let instance = three_dm_owned(q, triples);
        match pipeline().run(&instance) {
            Ok(run) => {
                let verdict = if expected { Verdict::Found } else { Verdict::NoMatching };
                prop_assert_eq!(run.report.verdict, verdict);
            }
            // Triples too light to ever sum to B: no matching either.
            Err(Error::Reduction(ReductionError::NegativeFiller { .. })) => prop_assert!(!expected),
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}

// =============================================================================
// Solver Properties
// =============================================================================

proptest! {
    /// Table and search return the same canonical answer.
    #[test]
    fn prop_exact_solvers_agree(sizes in prop::collection::vec(0u64..40, 1..=10)) {
        let instance = partition(&sizes);
        let dp = DynamicProgrammingSolver::default().solve(&instance).unwrap();
        let backtrack = BacktrackingSolver::new().solve(&instance).unwrap();
        prop_assert_eq!(&dp, &backtrack);
        if let Some(solution) = dp.solution() {
            prop_assert!(verify_partition_solution(&instance, solution));
        }
    }
}
