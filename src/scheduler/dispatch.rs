use crate::core::{Level, MAX_PRIORITY, ProcessRecord, Ticks};

/// Result of running one record for (at most) one quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantum {
    pub executed: Ticks,
    // Clock after the quantum
    pub now: Ticks,
    pub completed: bool,
}

/// Runs `record`, just dequeued from `level`, for `min(remaining, quantum)`
/// ticks starting at `now`.
///
/// An unfinished record below the last level has its priority bumped by one,
/// saturating at [`MAX_PRIORITY`]. Where it goes next is up to the caller.
pub fn run_quantum(
    record: &mut ProcessRecord,
    level: Level,
    quantum: Ticks,
    now: Ticks,
    num_levels: usize,
) -> Quantum {
    let executed = record.remaining.min(quantum);

    record.remaining -= executed;
    record.waiting = 0;
    record.last_dispatch = Some(now);

    let completed = record.is_complete();
    if !completed && level + 1 < num_levels {
        record.priority = record.priority.saturating_add(1).min(MAX_PRIORITY);
    }

    Quantum {
        executed,
        now: now + executed,
        completed,
    }
}
