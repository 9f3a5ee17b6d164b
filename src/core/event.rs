use std::fmt;

use crate::core::{Level, ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Dispatched {
        id: ProcessId,
        level: Level,
        executed: Ticks,
        at: Ticks,
    },
    // `at` is the clock once the final quantum has run
    Completed {
        id: ProcessId,
        at: Ticks,
    },
}

impl SimEvent {
    pub fn id(&self) -> ProcessId {
        match *self {
            Self::Dispatched { id, .. } | Self::Completed { id, .. } => id,
        }
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatched {
                id,
                level,
                executed,
                at,
            } => write!(
                f,
                "Time {at}: Executing P{id} from Queue {level} for {executed} units"
            ),
            Self::Completed { id, at } => write!(f, "Process P{id} completed at time {at}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let dispatched = SimEvent::Dispatched {
            id: 3,
            level: 0,
            executed: 2,
            at: 10,
        };
        assert_eq!(
            dispatched.to_string(),
            "Time 10: Executing P3 from Queue 0 for 2 units"
        );
        assert_eq!(
            SimEvent::Completed { id: 3, at: 12 }.to_string(),
            "Process P3 completed at time 12"
        );
    }
}
