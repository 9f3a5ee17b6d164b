use super::{DispatchDecision, Scheduler, run_quantum};
use crate::core::{Level, ProcessRecord, Ticks};

/// Like [`super::MlqAging`], except an unfinished record is re-admitted at
/// the level named by its priority after the dispatch bump. Aging still only
/// updates the attribute; the move happens on the record's next dispatch.
pub struct MlqFeedback {
    quantum: Ticks,
}

impl Scheduler for MlqFeedback {
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
        let target = (record.priority as Level).min(num_levels - 1);
        DispatchDecision::from_quantum(q, target)
    }
}
