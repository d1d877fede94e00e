// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine coordinates with the trail to restore state
//! automatically on backtracking.
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index (when in choice mode)
//!
//! Execution model:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to the most recent entry with choices left
//! 6. If Suspend: pause and return control to caller
//!
//! Resuming a suspended engine backtracks out of the suspending predicate,
//! so successive calls enumerate successive solutions.
//!
//! # Example
//!
//! ```
//! use tdm_partition::engine::EngineBuilder;
//! use tdm_partition::context::SearchContext;
//! use tdm_partition::predicates::SuspendPredicate;
//!
//! let mut ctx = SearchContext::empty();
//! let engine = EngineBuilder::new()
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//!
//! // Engine is consumed, returns Some(engine) if suspended
//! let engine = engine.search(&mut ctx).expect("suspends immediately");
//! // Resuming backtracks past the only predicate
//! assert!(engine.search(&mut ctx).is_none());
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::SearchContext;

/// Initial capacity of the predicate stack.
const INITIAL_STACK_SIZE: usize = 1000;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Current choice being tried (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail position for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn call(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Assembles a predicate program that ends in a terminal predicate.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate to the program.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Close the program with a FAIL or SUSPEND predicate.
    pub fn terminal<T: TerminalPredicate + 'static>(mut self, predicate: Box<T>) -> TerminatedProgram {
        self.predicates.push(predicate);
        TerminatedProgram {
            predicates: self.predicates,
        }
    }
}

/// A predicate program whose last predicate is terminal.
#[derive(Debug)]
pub struct TerminatedProgram {
    predicates: Vec<Box<dyn Predicate>>,
}

impl TerminatedProgram {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}

/// Search engine that coordinates predicate execution and backtracking.
///
/// The engine runs predicates in sequence, managing rounds, choices, and
/// backtracking automatically via the trail.
#[derive(Debug)]
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Set while the engine is paused on a Suspend.
    suspended: bool,
}

impl SearchEngine {
    /// Create a new search engine with the given predicates.
    ///
    /// Prefer [`EngineBuilder`], which guarantees the program ends with a
    /// terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(INITIAL_STACK_SIZE),
            suspended: false,
        }
    }

    /// Run the search until the next suspension.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended - can resume by calling search() again
    /// - `None` if exhausted (backtracked past first predicate) - search is complete
    ///
    /// Success is indicated via side effects (state in `ctx`), not by the
    /// return value: programs never "complete", they either fail or suspend.
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence is invalid (reaches the end without
    /// FAIL or SUSPEND), or if retry_pred returns Choices or Suspend.
    pub fn search(mut self, ctx: &mut SearchContext) -> Option<Self> {
        if self.suspended {
            // Resume: backtrack out of the suspending predicate.
            self.suspended = false;
            self.stack.pop();
        } else {
            self.stack.clear();
            if self.predicates.is_empty() {
                return None; // Empty is exhausted
            }
            self.stack.push(StackEntry::call(0, 0, ctx.trail_len()));
        }

        // Main execution loop
        loop {
            // Backtracked past the first predicate: search exhausted
            let entry = self.stack.last_mut()?;

            ctx.rewind_to(entry.trail_checkpoint);

            let (result, in_choice_mode) = if !entry.in_choice_mode {
                let result = self.predicates[entry.predicate_index].try_pred(ctx, entry.round);
                (result, false)
            } else {
                // Check if we've exhausted all choices
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }
                let choice = entry.current_choice;
                entry.current_choice += 1;
                let result =
                    self.predicates[entry.predicate_index].retry_pred(ctx, entry.round, choice);
                (result, true)
            };

            if !in_choice_mode
                && matches!(
                    result,
                    PredicateResult::Success | PredicateResult::SuccessSamePredicate
                )
            {
                // A deterministic success has no alternatives: backtracking
                // into this entry must pop it, not call try_pred again.
                if let Some(entry) = self.stack.last_mut() {
                    entry.in_choice_mode = true;
                    entry.current_choice = 0;
                    entry.num_choices = 0;
                }
            }

            match result {
                PredicateResult::Success => self.push_next_predicate(ctx),
                PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                PredicateResult::Failure => {
                    if !in_choice_mode {
                        self.stack.pop();
                    }
                    // In choice mode: try the next choice on the next iteration
                }
                PredicateResult::Choices(n) if !in_choice_mode => {
                    if let Some(entry) = self.stack.last_mut() {
                        entry.in_choice_mode = true;
                        entry.current_choice = 0;
                        entry.num_choices = n;
                        entry.trail_checkpoint = ctx.trail_len();
                    }
                }
                PredicateResult::Suspend if !in_choice_mode => {
                    self.suspended = true;
                    return Some(self);
                }
                PredicateResult::Choices(_) | PredicateResult::Suspend => {
                    panic!("retry_pred returned invalid result: {:?}", result);
                }
            }
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    ///
    /// Panics if we've reached the end of the predicate sequence, as this indicates
    /// an invalid program (all valid programs must end with FAIL or SUSPEND).
    fn push_next_predicate(&mut self, ctx: &SearchContext) {
        let next_index = self.stack.last().map_or(0, |e| e.predicate_index + 1);

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 Every program must terminate with a FAIL or SUSPEND predicate."
            );
        }

        self.stack
            .push(StackEntry::call(next_index, 0, ctx.trail_len()));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &SearchContext) {
        let (predicate_index, round) = self
            .stack
            .last()
            .map_or((0, 0), |e| (e.predicate_index, e.round + 1));

        self.stack
            .push(StackEntry::call(predicate_index, round, ctx.trail_len()));
    }
}
