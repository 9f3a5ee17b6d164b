use super::{DispatchDecision, Scheduler, run_quantum};
use crate::core::{Level, ProcessRecord, Ticks};

/// Round robin within each level with aging. Unfinished records go back to
/// the level they were taken from; priority is tracked but never moves them.
pub struct MlqAging {
    quantum: Ticks,
}

impl Scheduler for MlqAging {
    fn init(quantum: Ticks) -> Self {
        Self { quantum }
    }

    fn dispatch(
        &mut self,
        record: &mut ProcessRecord,
        level: Level,
        now: Ticks,
        num_levels: usize,
    ) -> DispatchDecision {
        let q = run_quantum(record, level, self.quantum, now, num_levels);
        DispatchDecision::from_quantum(q, level)
    }
}
