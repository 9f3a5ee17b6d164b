pub mod aging;
pub mod dispatch;
pub mod feedback;
pub mod mlq;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::{Level, ProcessRecord, Ticks};
pub use dispatch::{Quantum, run_quantum};
pub use feedback::MlqFeedback;
pub use mlq::MlqAging;

pub const DEFAULT_QUANTUM: Ticks = 2;

/// What happens to a record after its quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Completed,
    Requeue(Level),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchDecision {
    pub executed: Ticks,
    pub now: Ticks,
    pub fate: Fate,
}

impl DispatchDecision {
    pub fn from_quantum(q: Quantum, requeue_to: Level) -> Self {
        let fate = if q.completed {
            Fate::Completed
        } else {
            Fate::Requeue(requeue_to)
        };
        Self {
            executed: q.executed,
            now: q.now,
            fate,
        }
    }
}

/// Where an unfinished record is re-admitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Back to the tail of the level it came from
    #[default]
    SameLevel,
    /// To the level matching its updated priority
    ByPriority,
}

pub trait Scheduler {
    fn init(quantum: Ticks) -> Self;

    fn dispatch(
        &mut self,
        record: &mut ProcessRecord,
        level: Level,
        now: Ticks,
        num_levels: usize,
    ) -> DispatchDecision;

    // Applied in place to every resident record once per pass
    fn age(&mut self, record: &mut ProcessRecord) {
        aging::age(record);
    }
}
