use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::{
    error::SimError,
    event::SimEvent,
    observer::Observer,
    state::{Level, MAX_PRIORITY, ProcessRecord, QueueSet, Ticks},
};
use crate::scheduler::{Fate, Scheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Done,
}

pub struct SchedCore<S: Scheduler> {
    pub queues: QueueSet,
    pub scheduler: S,
    num_processes: usize,
    state: LoopState,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    /// Seeds every record into level 0. Fails before any work is done if the
    /// process set or quantum cannot be simulated.
    pub fn new(records: Vec<ProcessRecord>, quantum: Ticks) -> Result<Self, SimError> {
        validate(&records, quantum)?;

        let num_processes = records.len();
        let mut queues = QueueSet::new();
        for record in records {
            queues.enqueue(0, record);
        }

        debug!(num_processes, quantum, "SchedCore seeded");
        Ok(Self {
            queues,
            scheduler: S::init(quantum),
            num_processes,
            state: LoopState::Running,
            observer: Observer::new(),
        })
    }

    /// One sweep over the levels in ascending order, at most one dispatch
    /// per level, then one aging pass over whatever is still queued.
    pub fn pass(&mut self) -> Result<Vec<SimEvent>, SimError> {
        let mut events = Vec::new();
        if self.state == LoopState::Done {
            return Ok(events);
        }

        let num_levels = self.queues.num_levels();
        for level in 0..num_levels {
            if self.queues.is_empty(level) {
                continue;
            }
            self.dispatch_level(level, num_levels, &mut events)?;
        }

        for record in self.queues.residents_mut() {
            self.scheduler.age(record);
            trace!(
                id = record.id,
                priority = record.priority,
                waiting = record.waiting,
                "aged"
            );
        }

        self.observer.observe(&self.queues, self.num_processes);
        debug!(
            pass = self.observer.passes(),
            now = self.queues.now,
            completed = self.queues.completed,
            "pass finished\n{}",
            self.queues.snapshot()
        );

        if self.queues.completed == self.num_processes {
            self.state = LoopState::Done;
        }
        Ok(events)
    }

    fn dispatch_level(
        &mut self,
        level: Level,
        num_levels: usize,
        events: &mut Vec<SimEvent>,
    ) -> Result<(), SimError> {
        let mut record = self.queues.dequeue(level)?;
        let started = self.queues.now;

        let decision = self
            .scheduler
            .dispatch(&mut record, level, started, num_levels);
        debug_assert_eq!(decision.now, started + decision.executed);

        events.push(SimEvent::Dispatched {
            id: record.id,
            level,
            executed: decision.executed,
            at: started,
        });
        self.queues.advance_time(decision.executed);

        match decision.fate {
            Fate::Completed => {
                self.queues.mark_completed();
                debug!(id = record.id, now = self.queues.now, "completed");
                events.push(SimEvent::Completed {
                    id: record.id,
                    at: self.queues.now,
                });
            }
            Fate::Requeue(target) => {
                debug!(
                    id = record.id,
                    from = level,
                    to = target,
                    remaining = record.remaining,
                    priority = record.priority,
                    "requeued"
                );
                self.queues.enqueue(target, record);
            }
        }
        Ok(())
    }

    /// Runs passes until every process has completed.
    pub fn run(&mut self) -> Result<Vec<SimEvent>, SimError> {
        let mut events = Vec::new();
        while self.state == LoopState::Running {
            events.extend(self.pass()?);
        }
        Ok(events)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn now(&self) -> Ticks {
        self.queues.now
    }

    pub fn completed(&self) -> usize {
        self.queues.completed
    }

    pub fn num_processes(&self) -> usize {
        self.num_processes
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

fn validate(records: &[ProcessRecord], quantum: Ticks) -> Result<(), SimError> {
    if records.is_empty() {
        return Err(SimError::invalid("at least one process is required"));
    }
    if quantum == 0 {
        return Err(SimError::invalid("time quantum must be positive"));
    }

    let mut total: Ticks = 0;
    let mut seen = FxHashSet::default();
    for record in records {
        if !seen.insert(record.id) {
            return Err(SimError::invalid(format!(
                "duplicate process id {}",
                record.id
            )));
        }
        if record.is_complete() {
            return Err(SimError::invalid(format!(
                "process {} has zero burst time",
                record.id
            )));
        }
        if record.priority > MAX_PRIORITY {
            return Err(SimError::invalid(format!(
                "process {} has priority {}, expected 0..={MAX_PRIORITY}",
                record.id, record.priority
            )));
        }
        total = total.checked_add(record.remaining).ok_or_else(|| {
            SimError::invalid("total burst time overflows the simulated clock")
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{MlqAging, MlqFeedback};

    fn dispatched(id: u64, level: Level, executed: Ticks, at: Ticks) -> SimEvent {
        SimEvent::Dispatched {
            id,
            level,
            executed,
            at,
        }
    }

    fn completed(id: u64, at: Ticks) -> SimEvent {
        SimEvent::Completed { id, at }
    }

    #[test]
    fn test_two_process_trace() {
        let records = vec![ProcessRecord::new(0, 3, 0), ProcessRecord::new(1, 2, 0)];
        let mut core = SchedCore::<MlqAging>::new(records, 2).unwrap();

        let first = core.pass().unwrap();
        assert_eq!(first, vec![dispatched(0, 0, 2, 0)]);
        // B aged once, A bumped on dispatch then aged
        let priorities: Vec<_> = core
            .queues
            .residents()
            .map(|(_, r)| (r.id, r.priority))
            .collect();
        assert_eq!(priorities, vec![(1, 1), (0, 2)]);

        let rest = core.run().unwrap();
        assert_eq!(
            rest,
            vec![
                dispatched(1, 0, 2, 2),
                completed(1, 4),
                dispatched(0, 0, 1, 4),
                completed(0, 5),
            ]
        );
        assert_eq!(core.state(), LoopState::Done);
        assert_eq!(core.completed(), 2);
        assert_eq!(core.now(), 5);
        assert_eq!(core.observer().passes(), 3);
    }

    #[test]
    fn test_single_exact_quantum() {
        let mut core = SchedCore::<MlqAging>::new(vec![ProcessRecord::new(4, 3, 0)], 3).unwrap();
        let events = core.run().unwrap();
        assert_eq!(events, vec![dispatched(4, 0, 3, 0), completed(4, 3)]);
        assert_eq!(core.observer().passes(), 1);
    }

    #[test]
    fn test_done_is_terminal() {
        let mut core = SchedCore::<MlqAging>::new(vec![ProcessRecord::new(0, 1, 0)], 1).unwrap();
        core.run().unwrap();
        assert!(core.pass().unwrap().is_empty());
        assert_eq!(core.observer().passes(), 1);
    }

    #[test]
    fn test_invalid_configuration() {
        let err = SchedCore::<MlqAging>::new(Vec::new(), 2).err();
        assert!(matches!(err, Some(SimError::InvalidConfiguration(_))));

        let err = SchedCore::<MlqAging>::new(vec![ProcessRecord::new(0, 1, 0)], 0).err();
        assert!(matches!(err, Some(SimError::InvalidConfiguration(_))));

        let dup = vec![ProcessRecord::new(1, 1, 0), ProcessRecord::new(1, 2, 0)];
        let err = SchedCore::<MlqAging>::new(dup, 2).err();
        assert_eq!(
            err,
            Some(SimError::InvalidConfiguration("duplicate process id 1".into()))
        );

        let err = SchedCore::<MlqAging>::new(vec![ProcessRecord::new(0, 1, 3)], 2).err();
        assert!(matches!(err, Some(SimError::InvalidConfiguration(_))));

        let err = SchedCore::<MlqAging>::new(vec![ProcessRecord::new(0, 0, 0)], 2).err();
        assert!(matches!(err, Some(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_clock_overflow_rejected() {
        let records = vec![ProcessRecord::new(0, u64::MAX, 0), ProcessRecord::new(1, 1, 0)];
        let err = SchedCore::<MlqAging>::new(records, 2).err();
        assert_eq!(
            err,
            Some(SimError::InvalidConfiguration(
                "total burst time overflows the simulated clock".into()
            ))
        );

        // exactly u64::MAX still fits
        let records = vec![ProcessRecord::new(0, u64::MAX - 1, 0), ProcessRecord::new(1, 1, 0)];
        assert!(SchedCore::<MlqAging>::new(records, 2).is_ok());
    }

    #[test]
    fn test_only_level_zero_used() {
        let records = (0..4).map(|id| ProcessRecord::new(id, 5, 0)).collect();
        let mut core = SchedCore::<MlqAging>::new(records, 1).unwrap();
        for event in core.run().unwrap() {
            if let SimEvent::Dispatched { level, .. } = event {
                assert_eq!(level, 0);
            }
        }
    }

    #[test]
    fn test_feedback_serves_new_level_same_pass() {
        let records = vec![ProcessRecord::new(0, 3, 0), ProcessRecord::new(1, 2, 0)];
        let mut core = SchedCore::<MlqFeedback>::new(records, 2).unwrap();

        assert_eq!(
            core.pass().unwrap(),
            vec![dispatched(0, 0, 2, 0), dispatched(0, 1, 1, 2), completed(0, 3)]
        );
        assert_eq!(
            core.run().unwrap(),
            vec![dispatched(1, 0, 2, 3), completed(1, 5)]
        );
    }
}
