// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Partition instances and their solutions.
//!
//! Sizes are [`BigUint`]: a reduced instance needs up to `3 * p * q` bits per
//! size, far beyond any machine word, and wrapping arithmetic would silently
//! invalidate the reduction.

use std::collections::HashMap;
use std::fmt;

use num_bigint::BigUint;
use serde::Serialize;

use crate::error::InstanceError;

/// Identifier of a Partition element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An identifier with a non-negative size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionElement {
    id: ElementId,
    size: BigUint,
}

impl PartitionElement {
    pub fn new(id: impl Into<ElementId>, size: impl Into<BigUint>) -> Self {
        Self {
            id: id.into(),
            size: size.into(),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn size(&self) -> &BigUint {
        &self.size
    }
}

/// An ordered, non-empty list of elements with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionInstance {
    elements: Vec<PartitionElement>,
    index: HashMap<ElementId, usize>,
}

impl PartitionInstance {
    /// Build an instance, rejecting empty lists and duplicate ids.
    pub fn new(elements: Vec<PartitionElement>) -> Result<Self, InstanceError> {
        if elements.is_empty() {
            return Err(InstanceError::EmptyPartition);
        }

        let mut index = HashMap::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            if index.insert(element.id.clone(), i).is_some() {
                return Err(InstanceError::DuplicateElementId {
                    id: element.id.to_string(),
                });
            }
        }

        Ok(Self { elements, index })
    }

    pub fn elements(&self) -> &[PartitionElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false for a constructed instance.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sum of every element size.
    pub fn total_sum(&self) -> BigUint {
        self.elements.iter().map(|e| &e.size).sum()
    }

    /// Position of an element in the instance.
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &ElementId) -> Option<&PartitionElement> {
        self.index_of(id).map(|i| &self.elements[i])
    }

    /// Solution made of the elements at `indices`, in instance order.
    pub fn solution_from_indices(&self, indices: impl IntoIterator<Item = usize>) -> PartitionSolution {
        let mut indices: Vec<usize> = indices.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        PartitionSolution::new(indices.into_iter().map(|i| self.elements[i].id.clone()))
    }
}

impl fmt::Display for PartitionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", element.id, element.size)?;
        }
        write!(f, "}} (total {})", self.total_sum())
    }
}

/// A subset of element ids, one side of a partition.
///
/// Solvers return ids in instance order; ids supplied by callers are kept
/// as given so verifiers can detect duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PartitionSolution {
    ids: Vec<ElementId>,
}

impl PartitionSolution {
    pub fn new(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.ids.iter()
    }
}

impl<S: Into<ElementId>> FromIterator<S> for PartitionSolution {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into))
    }
}

impl fmt::Display for PartitionSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.ids.iter().map(ElementId::as_str).collect();
        write!(f, "{{{}}}", ids.join(", "))
    }
}
