// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Independent recomputation of a reduction.
//!
//! Nothing here calls into `reduction`: ranks, `p`, every weight, B and the
//! fillers are rebuilt with plain shifts and compared element by element
//! against the Partition instance under test.

use std::collections::HashMap;

use num_bigint::BigUint;
use num_traits::One;

use super::report::ValidationReport;
use crate::model::{PartitionInstance, ThreeDmInstance};
use crate::reduction::WeightLayout;

/// Whether `partition` is exactly what reducing `instance` under `layout`
/// must produce.
pub fn validate_reduction(
    instance: &ThreeDmInstance,
    partition: &PartitionInstance,
    layout: WeightLayout,
) -> bool {
    reduction_report(instance, partition, layout).is_valid()
}

/// The checks behind [`validate_reduction`].
pub fn reduction_report(
    instance: &ThreeDmInstance,
    partition: &PartitionInstance,
    layout: WeightLayout,
) -> ValidationReport {
    let mut report = ValidationReport::new(format!("Reduction validation ({layout})"));
    let q = instance.q() as u64;
    let k = instance.triples().len();

    let mut p = 0u64;
    while (1u128 << p) <= k as u128 {
        p += 1;
    }

    report.check(
        "element count",
        partition.len() == k + 2,
        format!("{} elements, expected {} triples + 2 fillers", partition.len(), k),
    );

    let digits = match layout {
        WeightLayout::Disjoint => 3 * q,
        WeightLayout::Packed => (3 * q).saturating_sub(1),
    };

    // b2 is at least every weight and at least B, so the partition's widest
    // size covers their top digits. Anything narrower cannot match, and is
    // not worth allocating.
    let top_weight = match layout {
        WeightLayout::Disjoint => p.saturating_mul((3 * q).saturating_sub(1)),
        WeightLayout::Packed => p.saturating_mul(3).saturating_mul(q.saturating_sub(1)),
    };
    let top_target = p.saturating_mul(digits.saturating_sub(1));
    let needed = top_weight.max(top_target).saturating_add(1);
    let widest = partition.elements().iter().map(|e| e.size().bits()).max().unwrap_or(0);
    if k > 0 && needed > widest {
        report.check(
            "size width",
            false,
            format!("weights need {needed} bits, partition holds at most {widest}"),
        );
        return report;
    }

    let rank = |elements: &[String]| -> HashMap<String, u64> {
        let mut sorted = elements.to_vec();
        sorted.sort();
        sorted.into_iter().zip(1u64..).collect()
    };
    let (rw, rx, ry) = (rank(instance.w()), rank(instance.x()), rank(instance.y()));

    let pow = |e: u64| BigUint::one() << e;
    let mut total_weight = BigUint::default();
    let mut mismatch = None;
    for (i, triple) in instance.triples().iter().enumerate() {
        let (Some(&a), Some(&b), Some(&c)) = (rw.get(triple.w()), rx.get(triple.x()), ry.get(triple.y())) else {
            mismatch.get_or_insert(format!("triple {i} {triple} has an unranked coordinate"));
            continue;
        };
        let weight = match layout {
            WeightLayout::Disjoint => pow(p * (3 * q - a)) + pow(p * (2 * q - b)) + pow(p * (q - c)),
            WeightLayout::Packed => pow(3 * p * (q - a)) + pow(2 * p * (q - b)) + pow(p * (q - c)),
        };
        let expected_id = format!("a_{i}");
        match partition.elements().get(i) {
            Some(e) if e.id().as_str() == expected_id && *e.size() == weight => {}
            Some(e) => {
                mismatch.get_or_insert(format!(
                    "element {i} is {}:{}, expected {expected_id}:{weight}",
                    e.id(),
                    e.size()
                ));
            }
            None => {
                mismatch.get_or_insert(format!("element {i} missing"));
            }
        }
        total_weight += weight;
    }
    report.check(
        "triple weights",
        mismatch.is_none(),
        mismatch.unwrap_or_else(|| format!("{k} weights match")),
    );

    let target: BigUint = (0..digits).map(|d| pow(p * d)).sum();

    let doubled = &total_weight * 2u32;
    if !report.check(
        "b1 non-negative",
        doubled >= target,
        format!("2 * {total_weight} vs B = {target}"),
    ) {
        return report;
    }
    let b1 = doubled - &target;
    let b2 = &total_weight + &target;

    for (offset, (name, expected)) in [("b1", &b1), ("b2", &b2)].into_iter().enumerate() {
        let found = partition.elements().get(k + offset);
        report.check(
            format!("filler {name}"),
            found.is_some_and(|e| e.id().as_str() == name && e.size() == expected),
            match found {
                Some(e) => format!("{}:{}, expected {name}:{expected}", e.id(), e.size()),
                None => format!("missing, expected {name}:{expected}"),
            },
        );
    }

    let fillers: BigUint = partition.elements().iter().skip(k).map(|e| e.size()).sum();
    report.check(
        "b1 + b2 = 3 * total weight",
        fillers == &total_weight * 3u32,
        format!("{fillers} vs {}", &total_weight * 3u32),
    );
    let total = partition.total_sum();
    report.check(
        "total = 4 * total weight",
        total == &total_weight * 4u32,
        format!("{total} vs {}", &total_weight * 4u32),
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PartitionElement, Triple};
    use crate::reduction::ReductionEngine;

    fn matching_instance() -> ThreeDmInstance {
        ThreeDmInstance::new(
            2,
            ["w1", "w2"],
            ["x1", "x2"],
            ["y1", "y2"],
            vec![Triple::new("w1", "x1", "y1"), Triple::new("w2", "x2", "y2")],
        )
        .unwrap()
    }

    #[test]
    fn test_engine_output_validates() {
        let instance = matching_instance();
        let reduction = ReductionEngine::new().reduce(&instance).unwrap();
        let report = reduction_report(&instance, reduction.partition(), WeightLayout::Disjoint);
        assert!(report.is_valid(), "{report}");
        assert!(!validate_reduction(&instance, reduction.partition(), WeightLayout::Packed));
    }

    #[test]
    fn test_hand_computed_numbers_validate() {
        let partition = PartitionInstance::new(vec![
            PartitionElement::new("a_0", 1092u32),
            PartitionElement::new("a_1", 273u32),
            PartitionElement::new("b1", 1365u32),
            PartitionElement::new("b2", 2730u32),
        ])
        .unwrap();
        assert!(validate_reduction(&matching_instance(), &partition, WeightLayout::Disjoint));
    }

    #[test]
    fn test_tampered_size_fails() {
        let partition = PartitionInstance::new(vec![
            PartitionElement::new("a_0", 1092u32),
            PartitionElement::new("a_1", 274u32),
            PartitionElement::new("b1", 1365u32),
            PartitionElement::new("b2", 2730u32),
        ])
        .unwrap();
        let report = reduction_report(&matching_instance(), &partition, WeightLayout::Disjoint);
        assert!(!report.is_valid());
        let failed: Vec<&str> = report.failures().map(|c| c.name.as_str()).collect();
        // Fillers were computed from the true weights, so only these two differ.
        assert_eq!(failed, vec!["triple weights", "total = 4 * total weight"]);
    }

    #[test]
    fn test_wrong_count_fails() {
        let partition = PartitionInstance::new(vec![PartitionElement::new("a_0", 1092u32)]).unwrap();
        assert!(!validate_reduction(&matching_instance(), &partition, WeightLayout::Disjoint));
    }

    #[test]
    fn test_packed_single_triple() {
        let instance = ThreeDmInstance::new(1, ["w"], ["x"], ["y"], vec![Triple::new("w", "x", "y")]).unwrap();
        let partition = PartitionInstance::new(vec![
            PartitionElement::new("a_0", 3u32),
            PartitionElement::new("b1", 3u32),
            PartitionElement::new("b2", 6u32),
        ])
        .unwrap();
        assert!(validate_reduction(&instance, &partition, WeightLayout::Packed));
        assert!(!validate_reduction(&instance, &partition, WeightLayout::Disjoint));
    }

    #[test]
    fn test_packed_output_validates_with_wide_digits() {
        // Nine triples give p = 4; B's top digit sits above every weight's.
        let triples = (1..=3)
            .flat_map(|x| (1..=3).map(move |y| Triple::new("w1", format!("x{x}"), format!("y{y}"))))
            .collect();
        let instance =
            ThreeDmInstance::new(3, ["w1", "w2", "w3"], ["x1", "x2", "x3"], ["y1", "y2", "y3"], triples)
                .unwrap();
        let reduction = ReductionEngine::with_layout(WeightLayout::Packed).reduce(&instance).unwrap();
        let report = reduction_report(&instance, reduction.partition(), WeightLayout::Packed);
        assert!(report.is_valid(), "{report}");
    }

    #[test]
    fn test_too_narrow_partition_fails_fast() {
        let partition = PartitionInstance::new(vec![
            PartitionElement::new("a_0", 1u32),
            PartitionElement::new("a_1", 1u32),
            PartitionElement::new("b1", 1u32),
            PartitionElement::new("b2", 1u32),
        ])
        .unwrap();
        let report = reduction_report(&matching_instance(), &partition, WeightLayout::Disjoint);
        let failed: Vec<&str> = report.failures().map(|c| c.name.as_str()).collect();
        assert_eq!(failed, vec!["size width"]);
    }
}
