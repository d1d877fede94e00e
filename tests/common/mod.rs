// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use tdm_partition::model::PartitionElement;
use tdm_partition::solver::SolveOutcome;
use tdm_partition::{PartitionInstance, ThreeDmInstance, Triple};

/// Coordinate sets `w1..wq`, `x1..xq`, `y1..yq` and the given triples.
pub fn three_dm(q: usize, triples: &[(&str, &str, &str)]) -> ThreeDmInstance {
    three_dm_owned(
        q,
        triples
            .iter()
            .map(|&(w, x, y)| Triple::new(w, x, y))
            .collect(),
    )
}

pub fn three_dm_owned(q: usize, triples: Vec<Triple>) -> ThreeDmInstance {
    let set = |prefix: &str| (1..=q).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>();
    ThreeDmInstance::new(q, set("w"), set("x"), set("y"), triples).unwrap()
}

/// The q = 2 instance with the matching (w1,x1,y1), (w2,x2,y2).
pub fn matching_pair() -> ThreeDmInstance {
    three_dm(2, &[("w1", "x1", "y1"), ("w2", "x2", "y2")])
}

/// A q = 2 instance that covers w1 twice and never w2.
pub fn no_matching_pair() -> ThreeDmInstance {
    three_dm(2, &[("w1", "x1", "y1"), ("w1", "x2", "y2")])
}

/// Partition instance with ids `e0, e1, ...`.
pub fn partition(sizes: &[u64]) -> PartitionInstance {
    PartitionInstance::new(
        sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| PartitionElement::new(format!("e{i}"), s))
            .collect(),
    )
    .unwrap()
}

/// Ids of a solved outcome, or panic.
pub fn solved_ids(outcome: &SolveOutcome) -> Vec<String> {
    match outcome {
        SolveOutcome::Solved(solution) => solution.iter().map(|id| id.to_string()).collect(),
        other => panic!("expected a solution, got {other:?}"),
    }
}

/// Sizes of a partition instance as `(id, size)` pairs.
pub fn sizes(instance: &PartitionInstance) -> Vec<(String, u64)> {
    instance
        .elements()
        .iter()
        .map(|e| (e.id().to_string(), u64::try_from(e.size()).unwrap()))
        .collect()
}

/// A fresh path under the system temp directory.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("tdm-partition-{}-{name}", std::process::id()))
}
