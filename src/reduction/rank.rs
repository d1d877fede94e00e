// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Dense ranks for coordinate elements.
//!
//! Each universe is ranked independently: its elements are sorted
//! lexicographically and numbered 1..=q. The order is fixed, so the same
//! instance always reduces to the same weights whatever order its sets were
//! listed in.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::model::{ThreeDmInstance, Triple, Universe};

/// Bijection from the elements of one universe to `1..=q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankMap {
    ranks: BTreeMap<String, usize>,
}

impl RankMap {
    /// Rank `elements` in lexicographic order, starting at 1.
    pub fn assign(elements: &[String]) -> Self {
        let mut sorted: Vec<&String> = elements.iter().collect();
        sorted.sort();
        let ranks = sorted
            .into_iter()
            .enumerate()
            .map(|(i, element)| (element.clone(), i + 1))
            .collect();
        Self { ranks }
    }

    pub fn rank(&self, element: &str) -> Option<usize> {
        self.ranks.get(element).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Elements with their ranks, in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.ranks.iter().map(|(element, &rank)| (element.as_str(), rank))
    }
}

/// Rank maps for all three universes of one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranks {
    w: RankMap,
    x: RankMap,
    y: RankMap,
}

impl Ranks {
    pub fn for_instance(instance: &ThreeDmInstance) -> Self {
        Self {
            w: RankMap::assign(instance.w()),
            x: RankMap::assign(instance.x()),
            y: RankMap::assign(instance.y()),
        }
    }

    pub fn of(&self, universe: Universe) -> &RankMap {
        match universe {
            Universe::W => &self.w,
            Universe::X => &self.x,
            Universe::Y => &self.y,
        }
    }

    /// Ranks of a triple's coordinates as `[w, x, y]`.
    ///
    /// Returns the first universe whose coordinate is unknown on failure.
    pub fn of_triple(&self, triple: &Triple) -> Result<[usize; 3], Universe> {
        let coordinates = [triple.w(), triple.x(), triple.y()];
        let mut ranks = [0; 3];
        for (slot, universe) in Universe::iter().enumerate() {
            ranks[slot] = self.of(universe).rank(coordinates[slot]).ok_or(universe)?;
        }
        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lexicographic_ranks() {
        let map = RankMap::assign(&strings(&["w3", "w1", "w2"]));
        assert_eq!(map.rank("w1"), Some(1));
        assert_eq!(map.rank("w2"), Some(2));
        assert_eq!(map.rank("w3"), Some(3));
        assert_eq!(map.rank("w4"), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_ranks_independent_of_input_order() {
        let a = RankMap::assign(&strings(&["b", "a", "c"]));
        let b = RankMap::assign(&strings(&["c", "b", "a"]));
        assert_eq!(a, b);
        let ranked: Vec<_> = a.iter().collect();
        assert_eq!(ranked, vec![("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_triple_ranks() {
        let instance = ThreeDmInstance::new(
            2,
            ["w2", "w1"],
            ["x1", "x2"],
            ["y2", "y1"],
            vec![Triple::new("w2", "x1", "y2")],
        )
        .unwrap();
        let ranks = Ranks::for_instance(&instance);
        assert_eq!(ranks.of_triple(&instance.triples()[0]), Ok([2, 1, 2]));
        assert_eq!(ranks.of_triple(&Triple::new("w1", "zz", "y1")), Err(Universe::X));
    }
}
