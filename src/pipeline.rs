// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end run: reduce, validate, solve, verify, map back, verify again.
//!
//! Each stage's output is checked by an independent validator before the
//! next stage sees it. A failed check is a defect, not an answer, and stops
//! the run with an error; "no matching" is an answer and does not.

use std::fmt;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::{ReductionConfig, SolverConfig};
use crate::error::{Error, Result};
use crate::mapping::map_solution;
use crate::model::{ThreeDmInstance, Triple};
use crate::reduction::{Reduction, ReductionEngine, WeightLayout};
use crate::solver::{strategy_for, PartitionStrategy, SolveOutcome};
use crate::validation::{
    partition_solution_report, reduction_report, solution_mapping_report,
    three_dm_solution_report, ValidationReport,
};

/// What the run concluded about the 3DM instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// A perfect matching was found and verified.
    Found,
    /// An exact solver proved there is no perfect matching.
    NoMatching,
    /// A limit or a non-exact solver left the question open.
    Unknown,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Found => "perfect matching found",
            Verdict::NoMatching => "no perfect matching",
            Verdict::Unknown => "undecided",
        })
    }
}

/// Summary of one run, printable and serializable.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub q: usize,
    pub triples: usize,
    pub layout: WeightLayout,
    pub digit_width: u32,
    /// `B`, in decimal.
    pub target: String,
    pub elements: usize,
    pub strategy: String,
    pub exact: bool,
    pub outcome: SolveOutcome,
    pub matching: Option<Vec<Triple>>,
    pub verdict: Verdict,
    pub checks: Vec<ValidationReport>,
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "3DM instance: q = {}, {} triples", self.q, self.triples)?;
        writeln!(
            f,
            "Reduction: {} layout, p = {}, B = {}, {} elements",
            self.layout, self.digit_width, self.target, self.elements
        )?;
        let exactness = if self.exact { "exact" } else { "not exact" };
        match &self.outcome {
            SolveOutcome::Solved(solution) => {
                writeln!(f, "Solver: {} ({exactness}): {solution}", self.strategy)?
            }
            SolveOutcome::Infeasible => {
                writeln!(f, "Solver: {} ({exactness}): no equal split", self.strategy)?
            }
            SolveOutcome::Unknown => {
                writeln!(f, "Solver: {} ({exactness}): gave up", self.strategy)?
            }
        }
        if let Some(matching) = &self.matching {
            writeln!(f, "Matching:")?;
            for triple in matching {
                writeln!(f, "  {triple}")?;
            }
        }
        writeln!(f, "Verdict: {}", self.verdict)?;
        for check in &self.checks {
            write!(f, "{check}")?;
        }
        Ok(())
    }
}

/// A finished run: the reduction it built and its report.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub reduction: Reduction,
    pub report: PipelineReport,
}

/// Reduction engine plus Partition strategy.
#[derive(Debug)]
pub struct ReductionPipeline {
    engine: ReductionEngine,
    solver: Box<dyn PartitionStrategy>,
}

impl Default for ReductionPipeline {
    fn default() -> Self {
        Self::new(ReductionConfig::default(), &SolverConfig::default())
    }
}

impl ReductionPipeline {
    pub fn new(reduction: ReductionConfig, solver: &SolverConfig) -> Self {
        Self::with_strategy(ReductionEngine::with_config(reduction), strategy_for(solver))
    }

    pub fn with_strategy(engine: ReductionEngine, solver: Box<dyn PartitionStrategy>) -> Self {
        Self { engine, solver }
    }

    /// Reduce and check the result against an independent recomputation.
    pub fn reduce(&self, instance: &ThreeDmInstance) -> Result<(Reduction, ValidationReport)> {
        let reduction = self.engine.reduce(instance)?;
        let report = reduction_report(instance, reduction.partition(), reduction.layout());
        if !report.is_valid() {
            return Err(Error::ReductionInconsistency {
                details: report.to_string(),
            });
        }
        Ok((reduction, report))
    }

    /// Run every stage on `instance`.
    #[instrument(skip_all, fields(q = instance.q(), strategy = self.solver.name()))]
    pub fn run(&self, instance: &ThreeDmInstance) -> Result<PipelineRun> {
        let (reduction, reduction_check) = self.reduce(instance)?;
        let mut checks = vec![reduction_check];

        let mut outcome = self.solver.solve(reduction.partition())?;
        if outcome == SolveOutcome::Infeasible && !self.solver.is_exact() {
            warn!(strategy = self.solver.name(), "non-exact solver found no split; verdict left open");
            outcome = SolveOutcome::Unknown;
        }

        let matching = match &outcome {
            SolveOutcome::Solved(solution) => {
                let partition_check = partition_solution_report(reduction.partition(), solution);
                reject_unless_valid(&partition_check)?;
                checks.push(partition_check);

                let matching = map_solution(solution, &reduction, instance)?;

                let mapping_check = solution_mapping_report(&reduction, solution, &matching, instance);
                reject_unless_valid(&mapping_check)?;
                checks.push(mapping_check);

                let matching_check = three_dm_solution_report(instance, &matching);
                reject_unless_valid(&matching_check)?;
                checks.push(matching_check);

                Some(matching)
            }
            _ => None,
        };

        let verdict = match (&outcome, &matching) {
            (_, Some(_)) => Verdict::Found,
            (SolveOutcome::Infeasible, None) => Verdict::NoMatching,
            _ => Verdict::Unknown,
        };
        info!(%verdict, "pipeline finished");

        let report = PipelineReport {
            q: instance.q(),
            triples: instance.triples().len(),
            layout: reduction.layout(),
            digit_width: reduction.digit_width(),
            target: reduction.target().to_string(),
            elements: reduction.partition().len(),
            strategy: self.solver.name().to_string(),
            exact: self.solver.is_exact(),
            outcome,
            matching,
            verdict,
            checks,
        };
        Ok(PipelineRun { reduction, report })
    }
}

fn reject_unless_valid(report: &ValidationReport) -> Result<()> {
    if report.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidSolution {
            details: report.to_string(),
        })
    }
}
