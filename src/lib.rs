// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Polynomial-time reduction from 3-Dimensional Matching (3DM) to Partition,
//! an exact Partition solver, and the mapping of Partition solutions back to
//! perfect matchings.
//!
//! A 3DM instance has three disjoint sets W, X and Y of size `q` and a list
//! of triples from `W × X × Y`. It asks whether `q` triples cover every
//! element exactly once. The reduction encodes each triple as a weight with
//! one base-`2^p` digit per coordinate and adds two fillers, so that an equal
//! split of the weights exists exactly when a perfect matching does.
//!
//! # Architecture
//!
//! The crate is split into stages, each checked by an independent validator
//! before the next runs:
//!
//! 1. **Reduction** ([`reduction`]): rank the elements, encode the weights,
//!    compute `B` and the fillers `b1 = 2·Σw − B`, `b2 = Σw + B`.
//! 2. **Solving** ([`solver`]): dynamic programming over subset sums, or an
//!    include/exclude search run on the [`engine`] with trail-based undo,
//!    or a greedy heuristic that is not exact.
//! 3. **Mapping** ([`mapping`]): read the matching off whichever side of the
//!    split holds `b1`.
//! 4. **Validation** ([`validation`]): recompute the reduction from scratch and
//!    check every solution and mapping.
//!
//! [`pipeline::ReductionPipeline`] runs all four.
//!
//! # Search Engine
//!
//! The backtracking solver is a predicate program: a sequence of
//! [`Predicate`]s that each either succeed, fail or offer numbered choices.
//! State changes are recorded on a [`Trail`] and undone on backtrack, so no
//! state is ever copied.
//!
//! # Example
//!
//! ```
//! use tdm_partition::io::parse_three_dm;
//! use tdm_partition::pipeline::{ReductionPipeline, Verdict};
//!
//! let instance = parse_three_dm("2\nw1 w2\nx1 x2\ny1 y2\nw1 x1 y1\nw2 x2 y2\n").unwrap();
//! let run = ReductionPipeline::default().run(&instance).unwrap();
//! assert_eq!(run.report.verdict, Verdict::Found);
//! assert_eq!(run.report.target, "1365");
//! ```
//!
//! # References
//!
//! - Garey, M. R. and Johnson, D. S. (1979). *Computers and Intractability*, §3.1.5.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod io;
pub mod mapping;
pub mod model;
pub mod pipeline;
pub mod predicates;
pub mod reduction;
pub mod solver;
pub mod state;
pub mod trail;
pub mod validation;

// Re-export commonly used types
pub use context::SearchContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use error::{Error, Result};
pub use model::{PartitionInstance, PartitionSolution, ThreeDmInstance, Triple};
pub use reduction::{Reduction, ReductionEngine, WeightLayout};
pub use solver::{PartitionStrategy, SolveOutcome};
pub use trail::Trail;
