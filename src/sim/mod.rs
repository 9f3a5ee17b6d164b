pub mod driver;
pub mod job;
pub mod report;
pub mod workload;

pub use driver::Sim;
pub use job::{Job, JobInstance};
pub use report::Report;
pub use workload::Workload;
