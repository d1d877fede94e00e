// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `tdm`: reduce 3-Dimensional Matching to Partition and back.
//!
//! ```bash
//! # Write the Partition instance for a 3DM file
//! tdm reduce instance.3dm -o instance.part
//!
//! # Solve a Partition file
//! tdm solve instance.part --strategy backtrack --node-limit 1000000
//!
//! # Full pipeline with a JSON report
//! tdm run instance.3dm --json
//!
//! # Check a proposed matching
//! tdm verify-3dm instance.3dm matching.txt
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tdm_partition::config::{ReductionConfig, SolverConfig, StrategyKind, DEFAULT_DP_CELL_BUDGET, DEFAULT_MAX_SIZE_BITS};
use tdm_partition::io;
use tdm_partition::pipeline::ReductionPipeline;
use tdm_partition::reduction::WeightLayout;
use tdm_partition::solver::{strategy_for, SolveOutcome};
use tdm_partition::validation::{partition_solution_report, three_dm_solution_report};
use tdm_partition::{Error, Result};

#[derive(Parser)]
#[command(name = "tdm", version, about = "3-Dimensional Matching to Partition reduction")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reduce a 3DM instance to a Partition instance.
    Reduce {
        input: PathBuf,
        /// Write the Partition instance here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        reduction: ReductionArgs,
    },
    /// Solve a Partition instance.
    Solve {
        input: PathBuf,
        #[command(flatten)]
        solver: SolverArgs,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Reduce, solve, map back and verify every stage.
    Run {
        input: PathBuf,
        /// Also write the Partition instance here.
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        reduction: ReductionArgs,
        #[command(flatten)]
        solver: SolverArgs,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check that a list of triples is a perfect matching of an instance.
    #[command(name = "verify-3dm")]
    Verify3dm { instance: PathBuf, matching: PathBuf },
}

#[derive(Args)]
struct ReductionArgs {
    /// Digit layout of the weights (disjoint or packed).
    #[arg(long, default_value_t = WeightLayout::Disjoint)]
    layout: WeightLayout,
    /// Refuse sizes wider than this many bits.
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE_BITS)]
    max_size_bits: u64,
}

impl ReductionArgs {
    fn config(&self) -> Result<ReductionConfig> {
        let config = ReductionConfig::default()
            .with_layout(self.layout)
            .with_max_size_bits(self.max_size_bits);
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args)]
struct SolverArgs {
    /// auto, dp, backtrack or greedy (greedy is not exact).
    #[arg(long, default_value_t = StrategyKind::Auto)]
    strategy: StrategyKind,
    /// Largest dynamic programming table, in bits.
    #[arg(long, default_value_t = DEFAULT_DP_CELL_BUDGET)]
    dp_budget: u64,
    /// Stop backtracking after this many nodes.
    #[arg(long)]
    node_limit: Option<u64>,
    /// Stop backtracking after this many seconds.
    #[arg(long)]
    time_limit: Option<f64>,
}

impl SolverArgs {
    fn config(&self) -> Result<SolverConfig> {
        let mut config = SolverConfig::default()
            .with_strategy(self.strategy)
            .with_dp_cell_budget(self.dp_budget);
        if let Some(limit) = self.node_limit {
            config = config.with_node_limit(limit);
        }
        if let Some(seconds) = self.time_limit {
            let limit = Duration::try_from_secs_f64(seconds)
                .map_err(|_| Error::config(format!("invalid time limit: {seconds}")))?;
            config = config.with_time_limit(limit);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Reduce {
            input,
            output,
            reduction,
        } => {
            let instance = io::read_three_dm_file(&input)?;
            let pipeline = ReductionPipeline::new(reduction.config()?, &SolverConfig::default());
            let (reduction, _) = pipeline.reduce(&instance)?;
            write_partition(reduction.partition(), output.as_deref())?;
        }
        Command::Solve { input, solver, json } => {
            let instance = io::read_partition_file(&input)?;
            let strategy = strategy_for(&solver.config()?);
            info!(strategy = strategy.name(), elements = instance.len(), "solving");
            let outcome = strategy.solve(&instance)?;
            if json {
                println!("{}", to_json(&outcome)?);
            } else {
                match &outcome {
                    SolveOutcome::Solved(solution) => {
                        println!("{solution}");
                        print!("{}", partition_solution_report(&instance, solution));
                    }
                    SolveOutcome::Infeasible if strategy.is_exact() => println!("no equal split"),
                    SolveOutcome::Infeasible => println!("no equal split found ({} is not exact)", strategy.name()),
                    SolveOutcome::Unknown => println!("undecided: search limit reached"),
                }
            }
        }
        Command::Run {
            input,
            output,
            reduction,
            solver,
            json,
        } => {
            let instance = io::read_three_dm_file(&input)?;
            let pipeline = ReductionPipeline::new(reduction.config()?, &solver.config()?);
            let run = pipeline.run(&instance)?;
            if let Some(path) = output {
                io::write_partition_file(run.reduction.partition(), path)?;
            }
            if json {
                println!("{}", to_json(&run.report)?);
            } else {
                print!("{}", run.report);
            }
        }
        Command::Verify3dm { instance, matching } => {
            let instance = io::read_three_dm_file(&instance)?;
            let matching = io::read_matching_file(&matching)?;
            let report = three_dm_solution_report(&instance, &matching);
            print!("{report}");
            if !report.is_valid() {
                return Err(Error::InvalidSolution {
                    details: "not a perfect matching".to_string(),
                });
            }
        }
    }
    Ok(())
}

fn write_partition(partition: &tdm_partition::model::PartitionInstance, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => io::write_partition_file(partition, path),
        None => io::write_partition(partition, std::io::stdout().lock()),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
