// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! 3-Dimensional Matching instances.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use super::Triple;
use crate::error::InstanceError;

/// One of the three coordinate universes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
pub enum Universe {
    W,
    X,
    Y,
}

/// A 3DM instance: three coordinate sets of size `q` and a list of triples.
///
/// Invariants, checked by [`ThreeDmInstance::new`]:
/// - `q >= 1`
/// - `|W| = |X| = |Y| = q`, no duplicates within a set
/// - every triple's coordinates belong to their respective sets
///
/// Sets keep the order they were given in; ranking uses its own fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreeDmInstance {
    q: usize,
    w: Vec<String>,
    x: Vec<String>,
    y: Vec<String>,
    triples: Vec<Triple>,
}

impl ThreeDmInstance {
    /// Build an instance, checking every structural invariant.
    pub fn new<S, I>(q: usize, w: I, x: I, y: I, triples: Vec<Triple>) -> Result<Self, InstanceError>
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        if q == 0 {
            return Err(InstanceError::ZeroSize);
        }

        let w = checked_set(Universe::W, q, w)?;
        let x = checked_set(Universe::X, q, x)?;
        let y = checked_set(Universe::Y, q, y)?;

        let instance = Self { q, w, x, y, triples };
        instance.check_triples()?;
        Ok(instance)
    }

    fn check_triples(&self) -> Result<(), InstanceError> {
        let w: HashSet<&str> = self.w.iter().map(String::as_str).collect();
        let x: HashSet<&str> = self.x.iter().map(String::as_str).collect();
        let y: HashSet<&str> = self.y.iter().map(String::as_str).collect();

        for (triple_index, triple) in self.triples.iter().enumerate() {
            for (universe, set, element) in [
                (Universe::W, &w, triple.w()),
                (Universe::X, &x, triple.x()),
                (Universe::Y, &y, triple.y()),
            ] {
                if !set.contains(element) {
                    return Err(InstanceError::UnknownCoordinate {
                        universe,
                        element: element.to_string(),
                        triple_index,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn q(&self) -> usize {
        self.q
    }

    pub fn w(&self) -> &[String] {
        &self.w
    }

    pub fn x(&self) -> &[String] {
        &self.x
    }

    pub fn y(&self) -> &[String] {
        &self.y
    }

    /// Elements of one universe, in the order they were given.
    pub fn universe(&self, universe: Universe) -> &[String] {
        match universe {
            Universe::W => &self.w,
            Universe::X => &self.x,
            Universe::Y => &self.y,
        }
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Position of the first triple equal to `triple`.
    pub fn triple_index(&self, triple: &Triple) -> Option<usize> {
        self.triples.iter().position(|t| t == triple)
    }

    pub fn contains_triple(&self, triple: &Triple) -> bool {
        self.triple_index(triple).is_some()
    }
}

fn checked_set<S, I>(universe: Universe, q: usize, elements: I) -> Result<Vec<String>, InstanceError>
where
    S: Into<String>,
    I: IntoIterator<Item = S>,
{
    let elements: Vec<String> = elements.into_iter().map(Into::into).collect();
    if elements.is_empty() {
        return Err(InstanceError::EmptyUniverse { universe });
    }

    let mut seen = HashSet::with_capacity(elements.len());
    for element in &elements {
        if !seen.insert(element.as_str()) {
            return Err(InstanceError::DuplicateElement {
                universe,
                element: element.clone(),
            });
        }
    }

    if elements.len() != q {
        return Err(InstanceError::SetSizeMismatch {
            universe,
            expected: q,
            found: elements.len(),
        });
    }
    Ok(elements)
}

impl fmt::Display for ThreeDmInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "q = {}", self.q)?;
        writeln!(f, "W = {{{}}}", self.w.join(", "))?;
        writeln!(f, "X = {{{}}}", self.x.join(", "))?;
        writeln!(f, "Y = {{{}}}", self.y.join(", "))?;
        write!(f, "M = [")?;
        for (i, triple) in self.triples.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", triple)?;
        }
        write!(f, "]")
    }
}
