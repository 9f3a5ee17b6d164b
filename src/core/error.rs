use thiserror::Error;

use super::state::Level;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// Dequeue on an empty level. The scheduling loop checks emptiness first,
    /// so hitting this means the queue bookkeeping is broken.
    #[error("attempted to dequeue from empty queue at level {level}")]
    EmptyQueue { level: Level },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl SimError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}
