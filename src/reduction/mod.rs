// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! 3DM → Partition reduction.
//!
//! [`ReductionEngine::reduce`] ranks the coordinates, encodes one weight per
//! triple and appends the two fillers:
//!
//! ```text
//! a_i = weight(triple i)            for i in 0..k
//! b1  = 2 * total_weight - B
//! b2  = total_weight + B
//! ```
//!
//! The total is `4 * total_weight`, so the side of an equal split holding `b1`
//! must pick triples summing to exactly `B`; under the disjoint layout those
//! triples form a perfect matching.
//!
//! Everything the reduction derives (ranks, id → triple association, p, B)
//! is returned in the [`Reduction`] value. The engine holds configuration
//! only and can be shared between threads.

pub mod rank;
pub mod weight;

pub use rank::{RankMap, Ranks};
pub use weight::{digit_width, WeightEncoder, WeightLayout};

use std::collections::HashMap;

use num_bigint::BigUint;
use tracing::{debug, instrument};

use crate::config::ReductionConfig;
use crate::error::{InstanceError, ReductionError};
use crate::model::{ElementId, PartitionElement, PartitionInstance, ThreeDmInstance, Triple, Universe};

/// Id of the first filler, `2 * total_weight - B`.
pub const FILLER_B1: &str = "b1";

/// Id of the second filler, `total_weight + B`.
pub const FILLER_B2: &str = "b2";

/// Id of the element encoding the triple at `index`.
pub fn triple_element_id(index: usize) -> ElementId {
    ElementId::new(format!("a_{}", index))
}

/// Per-triple element ids and the triples they encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripleAssociation {
    entries: Vec<(ElementId, Triple)>,
    index: HashMap<ElementId, usize>,
}

impl TripleAssociation {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn insert(&mut self, id: ElementId, triple: Triple) {
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, triple));
    }

    pub fn triple(&self, id: &ElementId) -> Option<&Triple> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    /// Position of the triple in the original instance.
    pub fn triple_index(&self, id: &ElementId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in triple order.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &Triple)> {
        self.entries.iter().map(|(id, triple)| (id, triple))
    }
}

/// Result of one reduction: the Partition instance and all bookkeeping
/// needed to interpret its solutions.
#[derive(Debug, Clone)]
pub struct Reduction {
    partition: PartitionInstance,
    association: TripleAssociation,
    ranks: Ranks,
    layout: WeightLayout,
    digit_width: u32,
    total_weight: BigUint,
    target: BigUint,
}

impl Reduction {
    pub fn partition(&self) -> &PartitionInstance {
        &self.partition
    }

    pub fn association(&self) -> &TripleAssociation {
        &self.association
    }

    pub fn ranks(&self) -> &Ranks {
        &self.ranks
    }

    pub fn layout(&self) -> WeightLayout {
        self.layout
    }

    /// `p`, the width of one digit slot in bits.
    pub fn digit_width(&self) -> u32 {
        self.digit_width
    }

    /// Sum of all per-triple weights.
    pub fn total_weight(&self) -> &BigUint {
        &self.total_weight
    }

    /// `B`, the sum a perfect matching contributes.
    pub fn target(&self) -> &BigUint {
        &self.target
    }

    /// Id of the `b1` filler.
    pub fn b1_id(&self) -> ElementId {
        ElementId::from(FILLER_B1)
    }

    /// Id of the `b2` filler.
    pub fn b2_id(&self) -> ElementId {
        ElementId::from(FILLER_B2)
    }

    pub fn is_filler(&self, id: &ElementId) -> bool {
        id.as_str() == FILLER_B1 || id.as_str() == FILLER_B2
    }
}

/// Builds Partition instances from 3DM instances.
#[derive(Debug, Clone, Default)]
pub struct ReductionEngine {
    config: ReductionConfig,
}

impl ReductionEngine {
    /// Engine with the default configuration (disjoint layout).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReductionConfig) -> Self {
        Self { config }
    }

    pub fn with_layout(layout: WeightLayout) -> Self {
        Self::with_config(ReductionConfig::default().with_layout(layout))
    }

    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Reduce `instance` to Partition.
    #[instrument(skip_all, fields(q = instance.q(), k = instance.triples().len(), layout = %self.config.layout))]
    pub fn reduce(&self, instance: &ThreeDmInstance) -> Result<Reduction, ReductionError> {
        let q = instance.q();
        let k = instance.triples().len();
        let encoder = WeightEncoder::new(self.config.layout, q, k, self.config.max_size_bits);
        let ranks = Ranks::for_instance(instance);

        let mut elements = Vec::with_capacity(k + 2);
        let mut association = TripleAssociation::with_capacity(k);
        let mut total_weight = BigUint::default();

        for (triple_index, triple) in instance.triples().iter().enumerate() {
            let triple_ranks = ranks.of_triple(triple).map_err(|universe| {
                let element = match universe {
                    Universe::W => triple.w(),
                    Universe::X => triple.x(),
                    Universe::Y => triple.y(),
                };
                InstanceError::UnknownCoordinate {
                    universe,
                    element: element.to_string(),
                    triple_index,
                }
            })?;

            let weight = encoder.weight(triple_ranks)?;
            total_weight += &weight;

            let id = triple_element_id(triple_index);
            association.insert(id.clone(), triple.clone());
            elements.push(PartitionElement::new(id, weight));
        }
        encoder.check_width(&total_weight, "total weight")?;

        let target = encoder.target()?;
        let (b1, b2) = encoder.fillers(&total_weight, &target)?;
        elements.push(PartitionElement::new(FILLER_B1, b1));
        elements.push(PartitionElement::new(FILLER_B2, b2));

        let partition = PartitionInstance::new(elements)?;

        debug!(
            p = encoder.digit_width(),
            target_bits = target.bits(),
            elements = partition.len(),
            "reduction complete"
        );

        Ok(Reduction {
            partition,
            association,
            ranks,
            layout: self.config.layout,
            digit_width: encoder.digit_width(),
            total_weight,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(q: usize, triples: &[(&str, &str, &str)]) -> ThreeDmInstance {
        let set = |prefix: &str| (1..=q).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>();
        ThreeDmInstance::new(
            q,
            set("w"),
            set("x"),
            set("y"),
            triples.iter().map(|&(w, x, y)| Triple::new(w, x, y)).collect(),
        )
        .unwrap()
    }

    fn sizes(reduction: &Reduction) -> Vec<(String, u64)> {
        reduction
            .partition()
            .elements()
            .iter()
            .map(|e| (e.id().to_string(), e.size().try_into().unwrap()))
            .collect()
    }

    #[test]
    fn test_single_triple_packed() {
        let reduction = ReductionEngine::with_layout(WeightLayout::Packed)
            .reduce(&instance(1, &[("w1", "x1", "y1")]))
            .unwrap();
        assert_eq!(reduction.digit_width(), 1);
        assert_eq!(
            sizes(&reduction),
            vec![("a_0".into(), 3), ("b1".into(), 3), ("b2".into(), 6)]
        );
        assert_eq!(reduction.partition().total_sum(), BigUint::from(12u32));
    }

    #[test]
    fn test_single_triple_disjoint() {
        let reduction = ReductionEngine::new()
            .reduce(&instance(1, &[("w1", "x1", "y1")]))
            .unwrap();
        assert_eq!(
            sizes(&reduction),
            vec![("a_0".into(), 7), ("b1".into(), 7), ("b2".into(), 14)]
        );
    }

    #[test]
    fn test_association_maps_ids_to_triples() {
        let inst = instance(2, &[("w1", "x1", "y1"), ("w2", "x2", "y2")]);
        let reduction = ReductionEngine::new().reduce(&inst).unwrap();
        let association = reduction.association();
        assert_eq!(association.len(), 2);
        assert_eq!(association.triple(&"a_1".into()), Some(&inst.triples()[1]));
        assert_eq!(association.triple_index(&"a_0".into()), Some(0));
        assert_eq!(association.triple(&"b1".into()), None);
        assert!(reduction.is_filler(&"b2".into()));
        assert!(!reduction.is_filler(&"a_0".into()));
    }

    #[test]
    fn test_total_sum_is_four_times_total_weight() {
        let inst = instance(2, &[("w1", "x1", "y1"), ("w2", "x2", "y2"), ("w1", "x2", "y1")]);
        let reduction = ReductionEngine::new().reduce(&inst).unwrap();
        assert_eq!(reduction.partition().total_sum(), reduction.total_weight() * 4u32);
    }

    #[test]
    fn test_no_triples_is_negative_filler() {
        let err = ReductionEngine::new().reduce(&instance(1, &[])).unwrap_err();
        assert!(matches!(err, ReductionError::NegativeFiller { .. }));
    }

    #[test]
    fn test_size_ceiling() {
        let config = ReductionConfig::default().with_max_size_bits(8);
        let err = ReductionEngine::with_config(config)
            .reduce(&instance(2, &[("w1", "x1", "y1"), ("w2", "x2", "y2")]))
            .unwrap_err();
        assert!(matches!(err, ReductionError::ArithmeticOverflow { .. }));
    }
}
