use std::fmt;

use average::Estimate;
use serde::Serialize;

use crate::core::Ticks;

/// Summary of a finished run. All processes arrive at t = 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub processes: usize,
    pub makespan: Ticks,
    pub passes: u64,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    // Time to first dispatch
    pub avg_response: f64,
}

impl Report {
    pub fn avg(iter: impl Iterator<Item = f64>) -> f64 {
        iter.collect::<average::Mean>().estimate()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processes: {}", self.processes)?;
        writeln!(f, "Makespan: {} ticks over {} passes", self.makespan, self.passes)?;
        writeln!(f, "Average turnaround time: {:.2} ticks", self.avg_turnaround)?;
        writeln!(f, "Average waiting time: {:.2} ticks", self.avg_waiting)?;
        write!(f, "Average response time: {:.2} ticks", self.avg_response)
    }
}
