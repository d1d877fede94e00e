// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Validators and verifiers.
//!
//! None of these return errors or alter their inputs: each builds a
//! [`ValidationReport`] and the `bool` variants ask whether it passed.

pub mod reduction;
pub mod report;
pub mod solution;

pub use reduction::{reduction_report, validate_reduction};
pub use report::{Check, ValidationReport};
pub use solution::{
    partition_solution_report, solution_mapping_report, three_dm_solution_report,
    validate_solution_mapping, verify_partition_solution, verify_three_dm_solution,
};
