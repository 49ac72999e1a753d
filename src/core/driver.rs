use super::{
    event::SimEvent,
    observer::Observer,
    state::{JobId, SimCtx, Ticks},
};
use crate::scheduler::{ENQ_PREEMPT, ENQ_WAKEUP, EnqueueFlags, Scheduler};
use crate::sim::JobSpec;

pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
    // Ticks left before the next preemption boundary; None while idle or unsliced
    slice_left: Option<Ticks>,
    // Arrivals since the last tick
    pending: Vec<SimEvent>,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(jobs: &[JobSpec], slice: Option<Ticks>) -> Self {
        let mut ctx = SimCtx::new(jobs);
        let scheduler = S::init(&mut ctx, slice);
        let observer = Observer::new();
        Self {
            ctx,
            scheduler,
            observer,
            slice_left: None,
            pending: Vec::new(),
        }
    }

    pub fn tick(&mut self) -> Vec<SimEvent> {
        let now = self.ctx.now;
        let mut events = std::mem::take(&mut self.pending);

        // Preemption boundary: hand the running job back before picking again
        let mut preempted = None;
        if let Some(job) = self.ctx.running {
            if self.slice_left == Some(0) {
                self.ctx.clear_running();
                self.ctx.mark_ready(job);
                events.push(SimEvent::Preempted { job });
                let flags: EnqueueFlags = ENQ_PREEMPT;
                self.scheduler.enqueue(&mut self.ctx, job, flags);
                preempted = Some(job);
            }
        }

        if self.ctx.running.is_none() {
            self.try_dispatch(preempted, &mut events);
        }

        let current_job = match self.ctx.running {
            Some(job) => job,
            None => {
                events.push(SimEvent::Idle);
                self.finish_tick(&events);
                return events;
            }
        };

        if self.ctx.job(current_job).start_time.is_none() {
            self.ctx.mark_started(current_job, now);
            events.push(SimEvent::Started { job: current_job });
        }

        let completed = self.ctx.consume_tick(current_job);
        if let Some(left) = self.slice_left.as_mut() {
            *left = left.saturating_sub(1);
        }
        events.push(SimEvent::Ran {
            job: current_job,
            time_left: self.ctx.job(current_job).time_left,
        });

        // Completion ends the slice early
        if completed {
            self.ctx.clear_running();
            self.ctx.mark_completed(current_job, now + 1);
            self.slice_left = None;
            events.push(SimEvent::Completed { job: current_job });
        }

        self.finish_tick(&events);
        events
    }

    fn finish_tick(&mut self, events: &[SimEvent]) {
        let ready = self.scheduler.ready_len(&self.ctx);
        self.observer.observe(&self.ctx, events, ready);
        self.ctx.advance_time(1);
    }

    fn try_dispatch(&mut self, preempted: Option<JobId>, events: &mut Vec<SimEvent>) {
        let Some(next) = self.scheduler.dispatch(&mut self.ctx) else {
            // Scheduler left the CPU idle.
            return;
        };

        self.ctx.set_running(next);
        self.slice_left = self.scheduler.slice();

        match preempted {
            // Same job picked again at the boundary: it just keeps running
            Some(prev) if prev == next => {}
            Some(prev) => {
                self.ctx.job_mut(prev).context_switches += 1;
                self.ctx.job_mut(next).context_switches += 1;
                events.push(SimEvent::Dispatched {
                    from: Some(prev),
                    to: next,
                });
            }
            None => events.push(SimEvent::Dispatched {
                from: None,
                to: next,
            }),
        }
    }

    pub fn wake_job(&mut self, job: JobId) {
        self.ctx.mark_ready(job);
        let flags: EnqueueFlags = ENQ_WAKEUP;
        self.scheduler.enqueue(&mut self.ctx, job, flags);
        self.pending.push(SimEvent::Arrived { job });
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
