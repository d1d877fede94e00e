// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for every stage of the reduction.
//!
//! Each stage has its own enum so callers can tell a malformed instance
//! from an arithmetic limit or an upstream defect. [`Error`] wraps them all
//! for the I/O collaborators and the binary.
//!
//! "No matching" and "no partition" are not errors: the solver reports them
//! as [`SolveOutcome::Infeasible`](crate::solver::SolveOutcome::Infeasible).

use std::path::PathBuf;

use num_bigint::BigUint;
use thiserror::Error;

use crate::model::Universe;

/// Structural invariant violations of a 3DM or Partition instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    /// `q` must be at least 1.
    #[error("q must be a positive integer")]
    ZeroSize,

    /// A coordinate set has no elements.
    #[error("set {universe} cannot be empty")]
    EmptyUniverse { universe: Universe },

    /// A coordinate set does not have exactly `q` elements.
    #[error("set {universe} has {found} elements, expected q = {expected}")]
    SetSizeMismatch {
        universe: Universe,
        expected: usize,
        found: usize,
    },

    /// The same identifier appears twice within one coordinate set.
    #[error("element '{element}' appears more than once in set {universe}")]
    DuplicateElement { universe: Universe, element: String },

    /// A triple names a coordinate that is not in its set.
    #[error("triple {triple_index} uses '{element}', which is not in set {universe}")]
    UnknownCoordinate {
        universe: Universe,
        element: String,
        triple_index: usize,
    },

    /// A Partition instance must contain at least one element.
    #[error("partition instance has no elements")]
    EmptyPartition,

    /// Partition element identifiers must be unique.
    #[error("partition element id '{id}' is used more than once")]
    DuplicateElementId { id: String },
}

/// Failures while building the Partition instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReductionError {
    #[error("invalid 3DM instance: {0}")]
    Instance(#[from] InstanceError),

    /// A weight, B or filler needs more bits than the configured ceiling.
    #[error("{quantity} needs {required_bits} bits, limit is {limit_bits}")]
    ArithmeticOverflow {
        quantity: String,
        required_bits: u64,
        limit_bits: u64,
    },

    /// `b1 = 2 * total_weight - B` would be negative.
    #[error("filler b1 would be negative: 2 * total_weight ({total_weight}) < B ({target})")]
    NegativeFiller {
        total_weight: BigUint,
        target: BigUint,
    },
}

impl ReductionError {
    /// Create an overflow error for a named quantity.
    pub fn overflow(quantity: impl Into<String>, required_bits: u64, limit_bits: u64) -> Self {
        Self::ArithmeticOverflow {
            quantity: quantity.into(),
            required_bits,
            limit_bits,
        }
    }
}

/// Solver failures. An instance without a solution is not one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The dynamic programming table would not fit the cell budget.
    #[error("dynamic programming table needs {required} cells, budget is {budget}")]
    ResourceExceeded { required: String, budget: u64 },
}

/// The mapped 3DM solution is inconsistent. Always an upstream defect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("partition solution names element '{id}', which the reduction did not produce")]
    UnknownElement { id: String },

    #[error("partition solution must hold exactly one of b1 and b2 (b1: {has_b1}, b2: {has_b2})")]
    FillerPlacement { has_b1: bool, has_b2: bool },

    #[error("mapped {found} triples, expected q = {expected}")]
    WrongCount { expected: usize, found: usize },

    #[error("mapped triples {first} and {second} share a coordinate")]
    CoordinateCollision { first: String, second: String },
}

/// Crate-level error used by the I/O collaborators, the pipeline and the binary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors (file missing, permission denied, read/write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file
    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed text input
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error(transparent)]
    Reduction(#[from] ReductionError),

    /// The validator disagrees with the reduction that was just built.
    #[error("reduction inconsistency: {details}")]
    ReductionInconsistency { details: String },

    #[error(transparent)]
    Solver(#[from] SolverError),

    /// A solver or the mapper produced an answer its verifier rejects.
    #[error("solution rejected: {details}")]
    InvalidSolution { details: String },

    #[error("mapping inconsistency: {0}")]
    Mapping(#[from] MappingError),

    /// Report serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration values
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Type alias for Results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a parse error at a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Attach a path to an I/O error.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
