use std::collections::VecDeque;
use std::fmt::Write as _;

use super::error::SimError;

pub type ProcessId = u64;
pub type Ticks = u64;
pub type Priority = u8;
// Index into QueueSet levels
pub type Level = usize;

pub const NUM_LEVELS: usize = 3;
pub const MAX_PRIORITY: Priority = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub priority: Priority,
    pub remaining: Ticks,
    // Reset on dispatch, counted down by aging
    pub waiting: i64,
    pub last_dispatch: Option<Ticks>,
}

impl ProcessRecord {
    pub fn new(id: ProcessId, burst: Ticks, priority: Priority) -> Self {
        Self {
            id,
            priority,
            remaining: burst,
            waiting: 0,
            last_dispatch: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Default)]
pub struct LevelQueue {
    records: VecDeque<ProcessRecord>,
}

impl LevelQueue {
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
        }
    }

    pub fn push_back(&mut self, record: ProcessRecord) {
        self.records.push_back(record);
    }

    pub fn pop_front(&mut self) -> Option<ProcessRecord> {
        self.records.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ProcessRecord> {
        self.records.iter_mut()
    }
}

/// Owns every record still in the system, one FIFO per priority level,
/// together with the simulated clock and the completion count.
#[derive(Debug)]
pub struct QueueSet {
    pub now: Ticks,
    pub completed: usize,
    levels: [LevelQueue; NUM_LEVELS],
}

impl QueueSet {
    pub fn new() -> Self {
        Self {
            now: 0,
            completed: 0,
            levels: std::array::from_fn(|_| LevelQueue::new()),
        }
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn enqueue(&mut self, level: Level, record: ProcessRecord) {
        debug_assert!(
            !record.is_complete(),
            "Completed record {} must not be enqueued",
            record.id
        );
        debug_assert!(
            !self.levels.iter().any(|q| q.contains(record.id)),
            "Record {} already present in some level",
            record.id
        );
        self.levels[level].push_back(record);
    }

    pub fn dequeue(&mut self, level: Level) -> Result<ProcessRecord, SimError> {
        self.levels
            .get_mut(level)
            .and_then(LevelQueue::pop_front)
            .ok_or(SimError::EmptyQueue { level })
    }

    pub fn is_empty(&self, level: Level) -> bool {
        self.levels[level].is_empty()
    }

    pub fn level(&self, level: Level) -> &LevelQueue {
        &self.levels[level]
    }

    pub fn residents(&self) -> impl Iterator<Item = (Level, &ProcessRecord)> {
        self.levels
            .iter()
            .enumerate()
            .flat_map(|(level, q)| q.iter().map(move |r| (level, r)))
    }

    // In-place traversal; never dequeues or reorders
    pub fn residents_mut(&mut self) -> impl Iterator<Item = &mut ProcessRecord> {
        self.levels.iter_mut().flat_map(|q| q.iter_mut())
    }

    pub fn resident_count(&self) -> usize {
        self.levels.iter().map(LevelQueue::len).sum()
    }

    // Total burst is checked against overflow at setup
    pub fn advance_time(&mut self, delta: Ticks) {
        self.now += delta;
    }

    pub fn mark_completed(&mut self) {
        self.completed += 1;
    }

    /// One line per level: `Queue 0: P3(1) P4(0)`.
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        for (level, q) in self.levels.iter().enumerate() {
            let _ = write!(out, "Queue {level}:");
            for record in q.iter() {
                let _ = write!(out, " P{}({})", record.id, record.priority);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for QueueSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(queues: &QueueSet, level: Level) -> Vec<ProcessId> {
        queues.level(level).iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_fifo_order_within_level() {
        let mut queues = QueueSet::new();
        queues.enqueue(0, ProcessRecord::new(7, 4, 0));
        queues.enqueue(0, ProcessRecord::new(3, 4, 0));
        queues.enqueue(0, ProcessRecord::new(5, 4, 0));

        assert_eq!(queues.dequeue(0).unwrap().id, 7);
        queues.enqueue(0, ProcessRecord::new(7, 2, 1));
        assert_eq!(ids(&queues, 0), vec![3, 5, 7]);
    }

    #[test]
    fn test_dequeue_empty_level() {
        let mut queues = QueueSet::new();
        assert_eq!(queues.dequeue(1), Err(SimError::EmptyQueue { level: 1 }));
        // out-of-range levels are empty too rather than a panic
        assert_eq!(queues.dequeue(9), Err(SimError::EmptyQueue { level: 9 }));
    }

    #[test]
    fn test_levels_are_independent() {
        let mut queues = QueueSet::new();
        queues.enqueue(2, ProcessRecord::new(1, 1, 0));
        assert!(queues.is_empty(0));
        assert!(queues.is_empty(1));
        assert!(!queues.is_empty(2));
        assert_eq!(queues.resident_count(), 1);
        assert_eq!(queues.num_levels(), NUM_LEVELS);
    }

    #[test]
    fn test_residents_mut_keeps_order() {
        let mut queues = QueueSet::new();
        for id in 0..4 {
            queues.enqueue((id % 2) as Level, ProcessRecord::new(id, 5, 0));
        }
        for record in queues.residents_mut() {
            record.waiting -= 1;
        }
        assert_eq!(ids(&queues, 0), vec![0, 2]);
        assert_eq!(ids(&queues, 1), vec![1, 3]);
        assert!(queues.residents().all(|(_, r)| r.waiting == -1));
    }

    #[test]
    fn test_snapshot() {
        let mut queues = QueueSet::new();
        queues.enqueue(0, ProcessRecord::new(1, 3, 0));
        queues.enqueue(0, ProcessRecord::new(2, 3, 2));
        assert_eq!(queues.snapshot(), "Queue 0: P1(0) P2(2)\nQueue 1:\nQueue 2:\n");
    }

    #[test]
    fn test_new_record_never_dispatched() {
        let record = ProcessRecord::new(4, 6, 1);
        assert_eq!(record.waiting, 0);
        assert_eq!(record.last_dispatch, None);
        assert!(!record.is_complete());
    }
}
