// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! - `subset`: SubsetSumPredicate, the include/exclude decision per element
//! - Built-in predicates: `FailPredicate`, `SuspendPredicate`

pub mod subset;

pub use subset::SubsetSumPredicate;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// This predicate always fails, forcing backtracking. Ending a program with
/// it makes the engine explore every alternative.
///
/// # Example
///
/// ```
/// use tdm_partition::engine::EngineBuilder;
/// use tdm_partition::predicates::FailPredicate;
/// use tdm_partition::context::SearchContext;
///
/// let mut ctx = SearchContext::empty();
/// let engine = EngineBuilder::new()
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// let result = engine.search(&mut ctx);
/// assert!(result.is_none()); // Failed - engine consumed
/// ```
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}

/// Built-in suspend predicate.
///
/// Pauses the engine with the current state intact, so the caller can read
/// the solution out of the context.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}
