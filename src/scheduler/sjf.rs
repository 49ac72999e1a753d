use super::{EnqueueFlags, JobId, Scheduler, SimCtx, Ticks};
use crate::core::ReadySetId;

/// Non-preemptive shortest job first.
///
/// Waiting jobs are ranked by total size, ties going to the earlier arrival.
/// A job leaves the ready set once dispatched and, with no slice, runs to
/// completion, so a started job can never be displaced by a later, shorter
/// arrival.
pub struct SjfScheduler {
    ready: ReadySetId,
}

impl Scheduler for SjfScheduler {
    fn init(ctx: &mut SimCtx, _slice: Option<Ticks>) -> Self {
        Self {
            ready: ctx.create_ready_ranked(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, job: JobId, _flags: EnqueueFlags) {
        let size = ctx.job(job).size;
        ctx.ready_push_ranked(self.ready, job, size);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<JobId> {
        ctx.ready_pop(self.ready)
    }

    fn ready_len(&self, ctx: &SimCtx) -> usize {
        ctx.ready_len(self.ready)
    }
}
