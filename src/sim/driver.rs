use rustc_hash::FxHashMap;
use tracing::info;

use super::{
    job::{Job, JobInstance},
    report::Report,
};
use crate::{
    core::{LoopState, ProcessId, SchedCore, SimError, SimEvent, Ticks},
    scheduler::Scheduler,
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    pub jobs: Vec<JobInstance>,
    // ProcessId --> jobs[index]; used to attribute events to their job
    jobs_by_id: FxHashMap<ProcessId, usize>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(jobs: Vec<Job>, quantum: Ticks) -> Result<Self, SimError> {
        let records = jobs.iter().map(Job::record).collect();
        let core = SchedCore::<S>::new(records, quantum)?;

        let jobs_by_id = jobs
            .iter()
            .enumerate()
            .map(|(index, job)| (job.id, index))
            .collect();
        let jobs = jobs.into_iter().map(JobInstance::new).collect();

        Ok(Self {
            core,
            jobs,
            jobs_by_id,
        })
    }

    /// Runs one scheduling pass and returns the events it produced.
    pub fn step(&mut self) -> Result<Vec<SimEvent>, SimError> {
        let events = self.core.pass()?;
        for event in &events {
            self.record(event);
        }
        Ok(events)
    }

    /// Steps until done, handing each event to `on_event` as it happens.
    pub fn run_with(&mut self, mut on_event: impl FnMut(&SimEvent)) -> Result<(), SimError> {
        while !self.all_jobs_completed() {
            for event in self.step()? {
                on_event(&event);
            }
        }
        info!(
            processes = self.jobs.len(),
            now = self.core.now(),
            passes = self.core.observer().passes(),
            "simulation finished"
        );
        Ok(())
    }

    pub fn run(&mut self) -> Result<Vec<SimEvent>, SimError> {
        let mut events = Vec::new();
        self.run_with(|event| events.push(*event))?;
        Ok(events)
    }

    fn record(&mut self, event: &SimEvent) {
        let Some(&index) = self.jobs_by_id.get(&event.id()) else {
            debug_assert!(false, "Event for unknown process {}", event.id());
            return;
        };
        let job = &mut self.jobs[index];

        match *event {
            SimEvent::Dispatched { executed, at, .. } => {
                if job.start_time.is_none() {
                    job.start_time = Some(at);
                }
                job.executed += executed;
                job.dispatches += 1;
            }
            SimEvent::Completed { at, .. } => {
                debug_assert_eq!(
                    job.executed, job.job.burst,
                    "Process {} completed with unexecuted burst",
                    job.job.id
                );
                job.completion_time = Some(at);
            }
        }
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.state() == LoopState::Done
    }

    pub fn jobs_map<'a>(
        &'a self,
        f: impl Fn(&JobInstance) -> Option<Ticks> + 'a,
    ) -> impl Iterator<Item = f64> + 'a {
        self.jobs.iter().filter_map(move |j| f(j)).map(|t| t as f64)
    }

    pub fn report(&self) -> Report {
        Report {
            processes: self.jobs.len(),
            makespan: self.core.now(),
            passes: self.core.observer().passes(),
            avg_turnaround: Report::avg(self.jobs_map(JobInstance::turnaround)),
            avg_waiting: Report::avg(self.jobs_map(JobInstance::waiting)),
            avg_response: Report::avg(self.jobs_map(|j| j.start_time)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::MlqAging;

    fn scenario() -> Sim<MlqAging> {
        Sim::new(vec![Job::new(0, 3, 0), Job::new(1, 2, 0)], 2).unwrap()
    }

    #[test]
    fn test_job_bookkeeping() {
        let mut sim = scenario();
        sim.run().unwrap();

        let a = &sim.jobs[0];
        assert_eq!(a.start_time, Some(0));
        assert_eq!(a.completion_time, Some(5));
        assert_eq!(a.dispatches, 2);
        assert_eq!(a.executed, 3);

        let b = &sim.jobs[1];
        assert_eq!(b.start_time, Some(2));
        assert_eq!(b.completion_time, Some(4));
        assert_eq!(b.dispatches, 1);
    }

    #[test]
    fn test_report() {
        let mut sim = scenario();
        sim.run().unwrap();
        let report = sim.report();

        assert_eq!(report.processes, 2);
        assert_eq!(report.makespan, 5);
        assert_eq!(report.passes, 3);
        assert_eq!(report.avg_turnaround, 4.5);
        assert_eq!(report.avg_waiting, 2.0);
        assert_eq!(report.avg_response, 1.0);
    }

    #[test]
    fn test_step_stops_when_done() {
        let mut sim = Sim::<MlqAging>::new(vec![Job::new(9, 2, 1)], 4).unwrap();
        assert_eq!(sim.step().unwrap().len(), 2);
        assert!(sim.all_jobs_completed());
        assert!(sim.step().unwrap().is_empty());
    }

    #[test]
    fn test_zero_processes_rejected() {
        assert!(matches!(
            Sim::<MlqAging>::new(Vec::new(), 2),
            Err(SimError::InvalidConfiguration(_))
        ));
    }
}
