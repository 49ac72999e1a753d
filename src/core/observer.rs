use super::{
    event::SimEvent,
    state::{JobId, JobStatus, ReadySet, SimCtx, Ticks},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    busy_ticks: Ticks,
    idle_ticks: Ticks,
    peak_ready: usize,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, ctx: &SimCtx, events: &[SimEvent], ready_len: usize) {
        self.step += 1;
        self.peak_ready = self.peak_ready.max(ready_len);

        if let Some(job_id) = ctx.running {
            let job = ctx.job(job_id);
            debug_assert_eq!(
                job.status,
                JobStatus::Running,
                "running job {job_id} must be Running"
            );
            debug_assert!(
                !ctx.job_in_any_ready_set(job_id),
                "Running job {job_id} must not appear in any ready set"
            );
        }

        for event in events {
            match *event {
                SimEvent::Ran { job, time_left } => {
                    self.busy_ticks += 1;
                    check_progress(ctx, job, time_left);
                }
                SimEvent::Idle => {
                    self.idle_ticks += 1;
                    debug_assert!(ctx.running.is_none(), "Idle tick with a running job");
                    debug_assert!(
                        ctx.ready_sets.values().all(ReadySet::is_empty),
                        "Idle tick with jobs waiting"
                    );
                }
                // A preempted job may already be running again
                SimEvent::Arrived { job } | SimEvent::Preempted { job } => {
                    if ctx.job(job).status == JobStatus::Ready {
                        check_membership(ctx, job);
                    }
                }
                SimEvent::Completed { job } => {
                    debug_assert_eq!(ctx.job(job).status, JobStatus::Completed);
                    debug_assert!(
                        !ctx.job_in_any_ready_set(job),
                        "Completed job {job} still present in a ready set"
                    );
                }
                SimEvent::Dispatched { .. } | SimEvent::Started { .. } => {}
            }
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn busy_ticks(&self) -> Ticks {
        self.busy_ticks
    }

    pub fn idle_ticks(&self) -> Ticks {
        self.idle_ticks
    }

    pub fn peak_ready(&self) -> usize {
        self.peak_ready
    }
}

fn check_progress(ctx: &SimCtx, job_id: JobId, time_left: f64) {
    let job = ctx.job(job_id);
    debug_assert!(
        (0.0..=job.size).contains(&time_left),
        "Job {job_id} time left {time_left} outside [0, {}]",
        job.size
    );
    debug_assert!(
        job.start_time.is_some(),
        "Job {job_id} ran without a start time"
    );
    if time_left == 0.0 {
        debug_assert_eq!(job.status, JobStatus::Completed);
    }
}

// The membership map must point at the set that actually holds the job
fn check_membership(ctx: &SimCtx, job_id: JobId) {
    debug_assert!(
        ctx.job_to_ready
            .get(&job_id)
            .and_then(|&set_id| ctx.ready_sets.get(set_id))
            .is_some_and(|set| set.contains(job_id)),
        "Ready job {job_id} missing from its recorded ready set"
    );
}
