//! Process sets to feed a simulation: workload files, the plain
//! `count quantum (id burst priority)*` token stream, and seeded random sets.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use eyre::{Context, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::job::Job;
use crate::core::{SimError, Ticks};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Ticks>,
    pub processes: Vec<Job>,
}

impl Workload {
    /// Loads a YAML workload, or JSON when the file ends in `.json`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).context("Failed to read workload file")?;

        let workload: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                serde_json::from_str(&content).context("Failed to parse JSON workload")?
            }
            _ => serde_yaml::from_str(&content).context("Failed to parse YAML workload")?,
        };

        info!(
            path = %path.display(),
            processes = workload.processes.len(),
            "Loaded workload"
        );
        Ok(workload)
    }

    /// Parses whitespace-separated tokens: the process count, the time
    /// quantum, then `id burst priority` for each process. Line breaks are
    /// not significant.
    pub fn parse_triples(input: &str) -> Result<Self, SimError> {
        let mut tokens = Tokens::new(input);

        let count: usize = tokens.next("number of processes")?;
        let quantum: Ticks = tokens.next("time quantum")?;

        // `count` is untrusted; let the token stream bound the allocation
        let mut processes = Vec::new();
        for n in 1..=count {
            let id = tokens.next(&format!("id of process {n}"))?;
            let burst = tokens.next(&format!("burst time of process {n}"))?;
            let priority = tokens.next(&format!("priority of process {n}"))?;
            processes.push(Job::new(id, burst, priority));
        }

        if let Some((line, token)) = tokens.peek() {
            warn!(line, token, "Ignoring trailing input after {count} processes");
        }

        Ok(Self {
            quantum: Some(quantum),
            processes,
        })
    }

    /// `count` jobs with ids `0..count` and bursts drawn uniformly from
    /// `min_burst..=max_burst`. Bursts are at least one tick.
    pub fn random(count: usize, min_burst: Ticks, max_burst: Ticks, seed: u64) -> Self {
        let (lo, hi) = if min_burst <= max_burst {
            (min_burst, max_burst)
        } else {
            (max_burst, min_burst)
        };
        let (lo, hi) = (lo.max(1), hi.max(1));
        let mut rng = StdRng::seed_from_u64(seed);

        let processes = (0..count as u64)
            .map(|id| Job::new(id, rng.random_range(lo..=hi), 0))
            .collect();

        Self {
            quantum: None,
            processes,
        }
    }
}

struct Tokens<'a> {
    iter: std::iter::Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        let iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            input
                .lines()
                .enumerate()
                .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t))),
        );
        Self {
            iter: iter.peekable(),
            last_line: 1,
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T, SimError> {
        let Some((line, token)) = self.iter.next() else {
            return Err(SimError::Parse {
                line: self.last_line,
                reason: format!("expected {what}, found end of input"),
            });
        };
        self.last_line = line;

        token.parse().map_err(|_| SimError::Parse {
            line,
            reason: format!("expected {what} as a non-negative integer, found `{token}`"),
        })
    }

    fn peek(&mut self) -> Option<(usize, &'a str)> {
        self.iter.peek().copied()
    }
}
