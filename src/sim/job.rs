use serde::{Deserialize, Serialize};

use crate::core::{Priority, ProcessId, ProcessRecord, Ticks};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: ProcessId,
    pub burst: Ticks,
    #[serde(default)]
    pub priority: Priority,
}

impl Job {
    pub fn new(id: ProcessId, burst: Ticks, priority: Priority) -> Self {
        Self {
            id,
            burst,
            priority,
        }
    }

    pub fn record(&self) -> ProcessRecord {
        ProcessRecord::new(self.id, self.burst, self.priority)
    }
}

#[derive(Debug, Clone)]
pub struct JobInstance {
    pub job: Job,
    pub executed: Ticks,
    pub dispatches: u64,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl JobInstance {
    pub fn new(job: Job) -> Self {
        Self {
            job,
            executed: 0,
            dispatches: 0,
            start_time: None,
            completion_time: None,
        }
    }

    // Every job is present at t = 0, so turnaround is the completion time
    pub fn turnaround(&self) -> Option<Ticks> {
        self.completion_time
    }

    pub fn waiting(&self) -> Option<Ticks> {
        self.completion_time.map(|t| t.saturating_sub(self.job.burst))
    }
}
