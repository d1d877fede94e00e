// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A single (w, x, y) triple.

use std::fmt;

use serde::Serialize;

/// Immutable 3-tuple of coordinate identifiers.
///
/// Equality is component-wise. The ordering is only used to give sets of
/// triples a stable iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Triple {
    w: String,
    x: String,
    y: String,
}

impl Triple {
    pub fn new(w: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            w: w.into(),
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn w(&self) -> &str {
        &self.w
    }

    pub fn x(&self) -> &str {
        &self.x
    }

    pub fn y(&self) -> &str {
        &self.y
    }

    /// True if any coordinate matches the same coordinate of `other`.
    pub fn shares_coordinate_with(&self, other: &Triple) -> bool {
        self.w == other.w || self.x == other.x || self.y == other.y
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.w, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_coordinate() {
        let t = Triple::new("w1", "x1", "y1");
        assert!(t.shares_coordinate_with(&Triple::new("w1", "x2", "y2")));
        assert!(t.shares_coordinate_with(&Triple::new("w2", "x1", "y2")));
        assert!(t.shares_coordinate_with(&Triple::new("w2", "x2", "y1")));
        assert!(!t.shares_coordinate_with(&Triple::new("w2", "x2", "y2")));
    }

    #[test]
    fn test_coordinates_compare_positionally() {
        // Same identifier in different positions is not a shared coordinate.
        let t = Triple::new("a", "b", "c");
        assert!(!t.shares_coordinate_with(&Triple::new("b", "c", "a")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Triple::new("w1", "x2", "y3").to_string(), "(w1, x2, y3)");
    }
}
