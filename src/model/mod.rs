// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Instance types shared by the reduction, the solvers and the validators.
//!
//! All types here are built once through validating constructors and are
//! immutable afterwards.

pub mod partition;
pub mod three_dm;
pub mod triple;

pub use partition::{ElementId, PartitionElement, PartitionInstance, PartitionSolution};
pub use three_dm::{ThreeDmInstance, Universe};
pub use triple::Triple;
