pub mod fifo;
pub mod rr;
pub mod sjf;
pub mod stcf;

use crate::core::{
    Ticks,
    state::{JobId, SimCtx},
};
pub use fifo::FifoScheduler;
pub use rr::RoundRobinScheduler;
pub use sjf::SjfScheduler;
pub use stcf::StcfScheduler;

pub type EnqueueFlags = u64;

pub const ENQ_WAKEUP: EnqueueFlags = 1 << 0;
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 1;

pub const STCF_SLICE_DFL: Ticks = 30;
pub const RR_QUANTUM_DFL: Ticks = 30;
pub const RR_QUANTUM_LONG: Ticks = 75;

/// A scheduling policy plugged into [`SchedCore`](crate::core::SchedCore).
///
/// The core owns the clock and the running slot. A policy only decides where
/// jobs wait (`enqueue`) and which one runs next (`dispatch`). When `slice()`
/// returns `Some(n)`, the core forces a preemption boundary after `n` ticks of
/// uninterrupted execution: the running job is handed back through `enqueue`
/// with [`ENQ_PREEMPT`] and `dispatch` is asked again.
pub trait Scheduler {
    fn init(ctx: &mut SimCtx, slice: Option<Ticks>) -> Self;

    fn enqueue(&mut self, ctx: &mut SimCtx, job: JobId, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<JobId>;

    fn slice(&self) -> Option<Ticks> {
        None
    }

    fn ready_len(&self, ctx: &SimCtx) -> usize;
}
