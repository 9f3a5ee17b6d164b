use rustc_hash::{FxHashMap, FxHashSet};

use super::state::{MAX_PRIORITY, Priority, ProcessId, QueueSet};

/// Checks queue bookkeeping after every pass. All checks are debug
/// assertions; release builds only count passes.
#[derive(Debug, Default)]
pub struct Observer {
    passes: u64,
    // Highest priority seen per resident record
    priorities: FxHashMap<ProcessId, Priority>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, queues: &QueueSet, num_processes: usize) {
        self.passes += 1;

        debug_assert_eq!(
            queues.completed + queues.resident_count(),
            num_processes,
            "Completed and resident records must account for every process"
        );

        let mut seen = FxHashSet::default();
        for (level, record) in queues.residents() {
            let id = record.id;
            let first = seen.insert(id);
            debug_assert!(first, "Record {id} resident more than once");
            debug_assert!(
                !record.is_complete(),
                "Completed record {id} still resident at level {level}"
            );
            debug_assert!(
                record.priority <= MAX_PRIORITY,
                "Record {id} priority {} above cap",
                record.priority
            );
            debug_assert!(
                record.waiting >= 0,
                "Record {id} waiting counter left negative after aging"
            );

            let previous = self.priorities.insert(id, record.priority);
            if let Some(previous) = previous {
                debug_assert!(
                    previous <= record.priority,
                    "Record {id} priority dropped from {previous} to {}",
                    record.priority
                );
            }
        }

        // Forget completed records
        self.priorities.retain(|id, _| seen.contains(id));
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }
}
