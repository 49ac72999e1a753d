use super::{EnqueueFlags, JobId, Scheduler, SimCtx, Ticks};
use crate::core::ReadySetId;

/// Runs jobs to completion in arrival order.
pub struct FifoScheduler {
    ready: ReadySetId,
}

impl Scheduler for FifoScheduler {
    fn init(ctx: &mut SimCtx, _slice: Option<Ticks>) -> Self {
        Self {
            ready: ctx.create_ready_fifo(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, job: JobId, flags: EnqueueFlags) {
        let _ = flags;
        ctx.ready_push_back(self.ready, job);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<JobId> {
        ctx.ready_pop(self.ready)
    }

    fn ready_len(&self, ctx: &SimCtx) -> usize {
        ctx.ready_len(self.ready)
    }
}

#[cfg(test)]
mod tests {
    use super::FifoScheduler;
    use crate::sim::{JobSpec, Sim};

    #[test]
    fn runs_in_arrival_order_without_preemption() {
        let jobs = vec![JobSpec::new(5.0, 0.0), JobSpec::new(3.0, 1.0)];
        let mut sim = Sim::<FifoScheduler>::new(&jobs, None);
        sim.run_to_completion();

        let a = sim.core.ctx.job(0);
        let b = sim.core.ctx.job(1);
        assert_eq!((a.start_time, a.end_time), (Some(0), Some(5)));
        assert_eq!((b.start_time, b.end_time), (Some(5), Some(8)));
        assert_eq!(b.response_time, Some(4.0));
        assert_eq!(b.turnaround, Some(7.0));
        assert_eq!(a.context_switches + b.context_switches, 2);
    }

    #[test]
    fn idles_until_first_arrival() {
        let jobs = vec![JobSpec::new(2.0, 3.0)];
        let mut sim = Sim::<FifoScheduler>::new(&jobs, None);
        sim.run_to_completion();

        let job = sim.core.ctx.job(0);
        assert_eq!(job.start_time, Some(3));
        assert_eq!(job.end_time, Some(5));
        assert_eq!(job.response_time, Some(0.0));
        assert_eq!(sim.core.observer().idle_ticks(), 3);
    }
}
