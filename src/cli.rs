//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::Ticks;
use crate::scheduler::Placement;

/// mlq-sim - multi-level queue scheduling simulator
#[derive(Debug, Parser)]
#[command(
    name = "mlq-sim",
    about = "Simulate multi-level queue CPU scheduling with priority aging",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Time quantum, overrides the workload and config file
    #[arg(short, long, global = true)]
    pub quantum: Option<Ticks>,

    /// Where unfinished processes are re-admitted
    #[arg(long, global = true, value_enum)]
    pub placement: Option<Placement>,

    /// Print every queue's contents after each pass
    #[arg(long, global = true)]
    pub show_queues: bool,

    /// Print summary statistics after the trace
    #[arg(short, long, global = true)]
    pub summary: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate the processes in a YAML or JSON workload file
    Run {
        /// Workload file
        #[arg(value_name = "FILE")]
        workload: PathBuf,
    },

    /// Read `count quantum` then `id burst priority` per process from stdin
    Stdin,

    /// Simulate a seeded random workload
    Random {
        /// Number of processes
        #[arg(short = 'n', long)]
        count: usize,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Shortest burst time
        #[arg(long)]
        min_burst: Option<Ticks>,

        /// Longest burst time
        #[arg(long)]
        max_burst: Option<Ticks>,
    },
}
