use super::{EnqueueFlags, JobId, RR_QUANTUM_DFL, Scheduler, SimCtx, Ticks};
use crate::core::ReadySetId;

/// Round robin over arrival order with a fixed quantum.
///
/// The ready set is a ring keyed by admission order and is never re-sorted.
/// After each quantum (or completion) the cursor moves to the next unfinished
/// job past the one that just ran, wrapping to the oldest. If the ring holds
/// only the job that just ran, that job keeps the CPU.
pub struct RoundRobinScheduler {
    ready: ReadySetId,
    quantum: Ticks,
}

impl Scheduler for RoundRobinScheduler {
    fn init(ctx: &mut SimCtx, slice: Option<Ticks>) -> Self {
        let quantum = slice.unwrap_or(RR_QUANTUM_DFL);
        assert!(quantum > 0, "Round robin requires a non-zero quantum");
        Self {
            ready: ctx.create_ready_ring(),
            quantum,
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, job: JobId, _flags: EnqueueFlags) {
        ctx.ready_push_back(self.ready, job);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<JobId> {
        ctx.ready_pop(self.ready)
    }

    fn slice(&self) -> Option<Ticks> {
        Some(self.quantum)
    }

    fn ready_len(&self, ctx: &SimCtx) -> usize {
        ctx.ready_len(self.ready)
    }
}
