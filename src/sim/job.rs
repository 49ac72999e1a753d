use serde::{Deserialize, Serialize};

use crate::core::state::{Job, JobId, Ticks};

/// One input record: how much work a job needs and when it shows up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    pub size: f64,
    pub arrival_time: f64,
}

impl JobSpec {
    pub fn new(size: f64, arrival_time: f64) -> Self {
        Self { size, arrival_time }
    }
}

/// Per-job outcome of a finished run, in report column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub job_no: JobId,
    pub arrival_time: f64,
    pub size: f64,
    pub start_time: Ticks,
    pub time_left: f64,
    pub status: u8,
    pub context_switches: u32,
    pub end_time: Ticks,
    pub response_time: f64,
    pub turnaround: f64,
}

impl From<&Job> for JobRecord {
    fn from(job: &Job) -> Self {
        Self {
            job_no: job.id,
            arrival_time: job.arrival_time,
            size: job.size,
            start_time: job.start_time.expect("Finished job missing start time"),
            time_left: job.time_left,
            status: job.status.code(),
            context_switches: job.context_switches,
            end_time: job.end_time.expect("Finished job missing end time"),
            response_time: job
                .response_time
                .expect("Finished job missing response time"),
            turnaround: job.turnaround.expect("Finished job missing turnaround"),
        }
    }
}
