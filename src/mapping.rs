// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Partition solution → 3DM matching.
//!
//! The side of an equal split that holds `b1` also holds triples summing to
//! exactly `B`, which is the matching. A solver may return either side, so a
//! side holding `b2` instead is complemented first.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::MappingError;
use crate::model::{PartitionSolution, ThreeDmInstance, Triple};
use crate::reduction::Reduction;

/// Triples encoded by the matching side of `solution`, in triple order.
pub fn map_solution(
    solution: &PartitionSolution,
    reduction: &Reduction,
    instance: &ThreeDmInstance,
) -> Result<Vec<Triple>, MappingError> {
    let association = reduction.association();

    let mut chosen = BTreeSet::new();
    let (mut has_b1, mut has_b2) = (false, false);
    for id in solution.iter() {
        if *id == reduction.b1_id() {
            has_b1 = true;
        } else if *id == reduction.b2_id() {
            has_b2 = true;
        } else {
            let index = association
                .triple_index(id)
                .ok_or_else(|| MappingError::UnknownElement { id: id.to_string() })?;
            chosen.insert(index);
        }
    }

    let indices: Vec<usize> = match (has_b1, has_b2) {
        (true, false) => chosen.into_iter().collect(),
        (false, true) => (0..association.len()).filter(|i| !chosen.contains(i)).collect(),
        _ => return Err(MappingError::FillerPlacement { has_b1, has_b2 }),
    };

    let triples: Vec<Triple> = association
        .iter()
        .enumerate()
        .filter(|(i, _)| indices.binary_search(i).is_ok())
        .map(|(_, (_, triple))| triple.clone())
        .collect();

    if triples.len() != instance.q() {
        return Err(MappingError::WrongCount {
            expected: instance.q(),
            found: triples.len(),
        });
    }
    for (i, first) in triples.iter().enumerate() {
        if let Some(second) = triples[i + 1..].iter().find(|t| first.shares_coordinate_with(t)) {
            return Err(MappingError::CoordinateCollision {
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }

    debug!(triples = triples.len(), complemented = has_b2, "mapped solution");
    Ok(triples)
}
