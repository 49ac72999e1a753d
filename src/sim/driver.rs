use super::job::{JobRecord, JobSpec};
use crate::{
    core::{
        SimEvent,
        driver::SchedCore,
        state::{JobId, Ticks},
    },
    scheduler::Scheduler,
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Job ids in admission order: by arrival time, then job number
    admission: Vec<JobId>,
    job_cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(jobs: &[JobSpec], slice: Option<Ticks>) -> Self {
        let mut admission: Vec<JobId> = (0..jobs.len()).collect();
        admission.sort_by(|&a, &b| {
            jobs[a]
                .arrival_time
                .total_cmp(&jobs[b].arrival_time)
                .then_with(|| a.cmp(&b))
        });

        Self {
            core: SchedCore::<S>::new(jobs, slice),
            admission,
            job_cursor: 0,
        }
    }

    pub fn step(&mut self) -> Vec<SimEvent> {
        self.handle_arrivals();
        self.core.tick()
    }

    fn handle_arrivals(&mut self) {
        let now = self.core.now() as f64;
        let ctx = &self.core.ctx;
        let arriving: Vec<JobId> = self.admission[self.job_cursor..]
            .iter()
            .copied()
            .take_while(|&job| ctx.job(job).arrival_time <= now) // This will be contiguous, since admission is sorted
            .collect();

        self.job_cursor += arriving.len();
        for job in arriving {
            self.core.wake_job(job);
        }
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.ctx.all_jobs_completed()
    }

    pub fn run_to_completion(&mut self) {
        while !self.all_jobs_completed() {
            let now = self.core.now();
            for event in self.step() {
                log::trace!("t={now} {event:?}");
            }
        }
    }

    pub fn records(&self) -> Vec<JobRecord> {
        self.core.ctx.jobs.iter().map(JobRecord::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Sim;
    use crate::scheduler::FifoScheduler;
    use crate::sim::JobSpec;

    #[test]
    fn admits_out_of_order_input_by_arrival() {
        // Job 1 arrives first even though it is listed second
        let jobs = vec![JobSpec::new(2.0, 4.0), JobSpec::new(2.0, 0.0)];
        let mut sim = Sim::<FifoScheduler>::new(&jobs, None);
        sim.run_to_completion();

        assert_eq!(sim.core.ctx.job(1).start_time, Some(0));
        assert_eq!(sim.core.ctx.job(0).start_time, Some(4));
        let records = sim.records();
        assert_eq!(records[0].job_no, 0);
        assert_eq!(records[1].end_time, 2);
    }

    #[test]
    fn fractional_arrival_waits_for_next_tick() {
        let jobs = vec![JobSpec::new(1.5, 2.25)];
        let mut sim = Sim::<FifoScheduler>::new(&jobs, None);
        sim.run_to_completion();

        let record = &sim.records()[0];
        assert_eq!(record.start_time, 3);
        assert_eq!(record.end_time, 5);
        assert_eq!(record.response_time, 0.75);
        assert_eq!(record.turnaround, 2.75);
        assert_eq!(record.time_left, 0.0);
        assert_eq!(record.status, 2);
    }

    #[test]
    fn empty_input_finishes_immediately() {
        let mut sim = Sim::<FifoScheduler>::new(&[], None);
        sim.run_to_completion();
        assert!(sim.records().is_empty());
        assert_eq!(sim.core.now(), 0);
    }
}
