pub mod cli;
pub mod config;
pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{SchedCore, SimError, SimEvent};
pub use scheduler::{MlqAging, MlqFeedback, Placement, Scheduler};
pub use sim::{Job, Sim, Workload};
