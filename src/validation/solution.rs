// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Solution verifiers for both problems and the mapping between them.

use std::collections::{BTreeSet, HashSet};

use num_bigint::BigUint;

use super::report::ValidationReport;
use crate::model::{PartitionInstance, PartitionSolution, ThreeDmInstance, Triple, Universe};
use crate::reduction::Reduction;

/// Whether `subset` is one side of an equal split of `instance`.
pub fn verify_partition_solution(instance: &PartitionInstance, subset: &PartitionSolution) -> bool {
    partition_solution_report(instance, subset).is_valid()
}

pub fn partition_solution_report(
    instance: &PartitionInstance,
    subset: &PartitionSolution,
) -> ValidationReport {
    let mut report = ValidationReport::new("Partition solution verification");

    let unknown: Vec<&str> = subset
        .iter()
        .filter(|id| instance.get(id).is_none())
        .map(|id| id.as_str())
        .collect();
    report.check("members", unknown.is_empty(), format!("unknown ids: {unknown:?}"));

    let mut seen = HashSet::new();
    let repeated: Vec<&str> = subset
        .iter()
        .filter(|id| !seen.insert(*id))
        .map(|id| id.as_str())
        .collect();
    report.check("distinct", repeated.is_empty(), format!("repeated ids: {repeated:?}"));

    let total = instance.total_sum();
    let sum: BigUint = subset
        .iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .filter_map(|id| instance.get(id))
        .map(|e| e.size())
        .sum();
    report.check(
        "half sum",
        &sum * 2u32 == total,
        format!("subset sums to {sum}, total is {total}"),
    );
    report
}

/// Whether `matching` is a perfect matching of `instance`.
pub fn verify_three_dm_solution(instance: &ThreeDmInstance, matching: &[Triple]) -> bool {
    three_dm_solution_report(instance, matching).is_valid()
}

pub fn three_dm_solution_report(instance: &ThreeDmInstance, matching: &[Triple]) -> ValidationReport {
    let mut report = ValidationReport::new("3DM solution verification");
    check_matching_shape(&mut report, instance, matching);

    for (universe, pick) in [
        (Universe::W, Triple::w as fn(&Triple) -> &str),
        (Universe::X, Triple::x),
        (Universe::Y, Triple::y),
    ] {
        let covered: BTreeSet<&str> = matching.iter().map(pick).collect();
        let expected: BTreeSet<&str> = instance.universe(universe).iter().map(String::as_str).collect();
        report.check(
            format!("covers {universe}"),
            covered == expected,
            format!("{} of {} covered", covered.intersection(&expected).count(), expected.len()),
        );
    }
    report
}

/// Whether `mapped` is the matching that `solution` encodes under
/// `reduction`, and a valid matching of `original`.
pub fn validate_solution_mapping(
    reduction: &Reduction,
    solution: &PartitionSolution,
    mapped: &[Triple],
    original: &ThreeDmInstance,
) -> bool {
    solution_mapping_report(reduction, solution, mapped, original).is_valid()
}

pub fn solution_mapping_report(
    reduction: &Reduction,
    solution: &PartitionSolution,
    mapped: &[Triple],
    original: &ThreeDmInstance,
) -> ValidationReport {
    let mut report = ValidationReport::new("Solution mapping validation");
    check_matching_shape(&mut report, original, mapped);

    let has_b1 = solution.contains(&reduction.b1_id());
    let has_b2 = solution.contains(&reduction.b2_id());
    if !report.check(
        "one filler",
        has_b1 != has_b2,
        format!("b1: {has_b1}, b2: {has_b2}"),
    ) {
        return report;
    }

    // Triples on the b1 side of the split.
    let encoded: BTreeSet<&Triple> = reduction
        .association()
        .iter()
        .filter(|(id, _)| solution.contains(id) == has_b1)
        .map(|(_, triple)| triple)
        .collect();
    let claimed: BTreeSet<&Triple> = mapped.iter().collect();
    report.check(
        "agrees with solution",
        encoded == claimed,
        format!("solution encodes {} triples, {} mapped", encoded.len(), claimed.len()),
    );
    report
}

/// Size q, every triple from the instance, pairwise disjoint.
fn check_matching_shape(report: &mut ValidationReport, instance: &ThreeDmInstance, matching: &[Triple]) {
    report.check(
        "size",
        matching.len() == instance.q(),
        format!("{} triples, q = {}", matching.len(), instance.q()),
    );

    let foreign: Vec<String> = matching
        .iter()
        .filter(|t| !instance.contains_triple(t))
        .map(Triple::to_string)
        .collect();
    report.check("from instance", foreign.is_empty(), format!("not in instance: {foreign:?}"));

    let clash = matching.iter().enumerate().find_map(|(i, a)| {
        matching[i + 1..]
            .iter()
            .find(|b| a.shares_coordinate_with(b))
            .map(|b| format!("{a} and {b}"))
    });
    report.check(
        "pairwise disjoint",
        clash.is_none(),
        clash.unwrap_or_default(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartitionElement;
    use crate::reduction::ReductionEngine;

    fn partition() -> PartitionInstance {
        PartitionInstance::new(vec![
            PartitionElement::new("a", 3u32),
            PartitionElement::new("b", 1u32),
            PartitionElement::new("c", 2u32),
        ])
        .unwrap()
    }

    fn ids(ids: &[&str]) -> PartitionSolution {
        ids.iter().copied().collect()
    }

    fn instance() -> ThreeDmInstance {
        ThreeDmInstance::new(
            2,
            ["w1", "w2"],
            ["x1", "x2"],
            ["y1", "y2"],
            vec![
                Triple::new("w1", "x1", "y1"),
                Triple::new("w2", "x2", "y2"),
                Triple::new("w1", "x2", "y2"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_partition_solution() {
        let inst = partition();
        assert!(verify_partition_solution(&inst, &ids(&["a"])));
        assert!(verify_partition_solution(&inst, &ids(&["b", "c"])));
        assert!(!verify_partition_solution(&inst, &ids(&["b"])));
        assert!(!verify_partition_solution(&inst, &ids(&["a", "a"])));
        assert!(!verify_partition_solution(&inst, &ids(&["z", "a"])));
    }

    #[test]
    fn test_partition_solution_odd_total() {
        let inst = PartitionInstance::new(vec![
            PartitionElement::new("a", 1u32),
            PartitionElement::new("b", 2u32),
        ])
        .unwrap();
        assert!(!verify_partition_solution(&inst, &ids(&["a"])));
    }

    #[test]
    fn test_three_dm_solution() {
        let inst = instance();
        let good = vec![inst.triples()[0].clone(), inst.triples()[1].clone()];
        assert!(verify_three_dm_solution(&inst, &good));

        let overlapping = vec![inst.triples()[1].clone(), inst.triples()[2].clone()];
        let report = three_dm_solution_report(&inst, &overlapping);
        assert!(!report.is_valid());
        assert!(report.failures().any(|c| c.name == "pairwise disjoint"));

        let foreign = vec![inst.triples()[0].clone(), Triple::new("w2", "x2", "y1")];
        assert!(!verify_three_dm_solution(&inst, &foreign));
        assert!(!verify_three_dm_solution(&inst, &good[..1]));
    }

    #[test]
    fn test_solution_mapping() {
        let inst = instance();
        let reduction = ReductionEngine::new().reduce(&inst).unwrap();
        let mapped = vec![inst.triples()[0].clone(), inst.triples()[1].clone()];

        assert!(validate_solution_mapping(&reduction, &ids(&["a_0", "a_1", "b1"]), &mapped, &inst));
        // The complementary side encodes the same matching.
        assert!(validate_solution_mapping(&reduction, &ids(&["a_2", "b2"]), &mapped, &inst));
        assert!(!validate_solution_mapping(&reduction, &ids(&["a_0", "b1"]), &mapped, &inst));
        assert!(!validate_solution_mapping(&reduction, &ids(&["a_0", "a_1"]), &mapped, &inst));
    }
}
