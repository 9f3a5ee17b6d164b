pub mod driver;
pub mod error;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::{LoopState, SchedCore};
pub use error::SimError;
pub use event::SimEvent;
pub use observer::Observer;
pub use state::{
    Level, LevelQueue, MAX_PRIORITY, NUM_LEVELS, Priority, ProcessId, ProcessRecord, QueueSet,
    Ticks,
};
