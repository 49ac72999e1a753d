use crate::core::JobId;

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    // Admitted into the ready set
    Arrived {
        job: JobId,
    },
    // Running slot changed hands; `from` is set only when a boundary picked another job
    Dispatched {
        from: Option<JobId>,
        to: JobId,
    },
    // Slice ran out and the job was handed back, even if it is picked again
    Preempted {
        job: JobId,
    },
    // First execution tick of a job
    Started {
        job: JobId,
    },
    Ran {
        job: JobId,
        time_left: f64,
    },
    Completed {
        job: JobId,
    },
    // Nothing runnable even after dispatch()
    Idle,
}
