// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Named pass/fail checks collected into a printable report.

use std::fmt;

use serde::Serialize;

/// One named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Outcome of a validator: every check it ran, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub title: String,
    pub checks: Vec<Check>,
}

impl ValidationReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            checks: Vec::new(),
        }
    }

    /// Record a check and return whether it passed.
    pub fn check(&mut self, name: impl Into<String>, passed: bool, detail: impl Into<String>) -> bool {
        self.checks.push(Check {
            name: name.into(),
            passed,
            detail: detail.into(),
        });
        passed
    }

    /// True when there is at least one check and all of them passed.
    pub fn is_valid(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_valid() { "PASSED" } else { "FAILED" };
        writeln!(f, "{}: {}", self.title, verdict)?;
        for check in &self.checks {
            let mark = if check.passed { "ok" } else { "FAIL" };
            write!(f, "  [{mark:<4}] {}", check.name)?;
            if !check.detail.is_empty() {
                write!(f, ": {}", check.detail)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
