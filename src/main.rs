//! mlq-sim - multi-level queue scheduling simulator
//!
//! Loads a process set, runs it to completion and prints the dispatch trace.

use std::io::{self, IsTerminal, Read, Write};

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use mlq_sim::cli::{Cli, Command};
use mlq_sim::config::Config;
use mlq_sim::core::Ticks;
use mlq_sim::{MlqAging, MlqFeedback, Placement, Scheduler, Sim, Workload};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) {
    // Priority: CLI --log-level > config file > WARN
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", s);
                tracing::Level::WARN
            }
        },
        None => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    debug!("Logging initialized (level: {:?})", level);
}

fn read_stdin_workload() -> Result<Workload> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!(
            "Enter the number of processes, the time quantum, then `id burst priority` per process"
        );
        eprintln!("(end input with Ctrl-D):");
    }

    let mut input = String::new();
    stdin.read_to_string(&mut input).context("Failed to read stdin")?;
    Ok(Workload::parse_triples(&input)?)
}

fn simulate<S: Scheduler>(
    workload: Workload,
    quantum: Ticks,
    show_queues: bool,
    summary: bool,
) -> Result<()> {
    let mut sim =
        Sim::<S>::new(workload.processes, quantum).context("Failed to set up simulation")?;

    let mut out = io::stdout().lock();
    while !sim.all_jobs_completed() {
        for event in sim.step()? {
            writeln!(out, "{event}")?;
        }
        if show_queues {
            write!(out, "{}", sim.core.queues.snapshot())?;
        }
    }

    if summary {
        writeln!(out)?;
        writeln!(out, "{}", sim.report())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref());

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    let workload = match cli.command {
        Command::Run { workload } => Workload::load(&workload)
            .context(format!("Failed to load workload {}", workload.display()))?,
        Command::Stdin => read_stdin_workload()?,
        Command::Random {
            count,
            seed,
            min_burst,
            max_burst,
        } => Workload::random(
            count,
            min_burst.unwrap_or(config.random.min_burst),
            max_burst.unwrap_or(config.random.max_burst),
            seed.unwrap_or(config.random.seed),
        ),
    };

    // Priority: CLI --quantum > workload > config file
    let quantum = cli.quantum.or(workload.quantum).unwrap_or(config.quantum);
    let placement = cli.placement.unwrap_or(config.placement);
    let show_queues = cli.show_queues || config.trace.show_queues;

    info!(
        processes = workload.processes.len(),
        quantum,
        ?placement,
        "Starting simulation"
    );
    match placement {
        Placement::SameLevel => {
            simulate::<MlqAging>(workload, quantum, show_queues, cli.summary)
        }
        Placement::ByPriority => {
            simulate::<MlqFeedback>(workload, quantum, show_queues, cli.summary)
        }
    }
}
