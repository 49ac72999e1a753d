//! Reduction of finished runs into per-policy summaries.

use average::{Estimate, Mean};
use serde::Serialize;

use crate::{
    core::Ticks,
    sim::{JobRecord, JobSpec, Policy},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub avg_response: f64,
    pub avg_turnaround: f64,
    pub total_context_switches: u64,
    // Completion time of the last job
    pub makespan: Ticks,
}

impl Summary {
    pub fn from_records(records: &[JobRecord]) -> Self {
        Self {
            avg_response: avg(records.iter().map(|r| r.response_time)),
            avg_turnaround: avg(records.iter().map(|r| r.turnaround)),
            total_context_switches: records.iter().map(|r| u64::from(r.context_switches)).sum(),
            makespan: records.iter().map(|r| r.end_time).max().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyRun {
    pub policy: Policy,
    pub summary: Summary,
    pub busy_ticks: Ticks,
    pub idle_ticks: Ticks,
    pub peak_ready: usize,
    pub records: Vec<JobRecord>,
}

/// Every policy replayed over the same job mixture.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub label: String,
    pub jobs: usize,
    pub runs: Vec<PolicyRun>,
}

impl Comparison {
    pub fn run(&self, policy: Policy) -> Option<&PolicyRun> {
        self.runs.iter().find(|run| run.policy == policy)
    }
}

/// Runs each policy over its own copy of `jobs`. With `parallel`, every policy
/// gets a scoped thread; runs share nothing but the read-only input.
pub fn compare(label: &str, jobs: &[JobSpec], policies: &[Policy], parallel: bool) -> Comparison {
    let runs: Vec<PolicyRun> = if parallel {
        std::thread::scope(|s| {
            let handles: Vec<_> = policies
                .iter()
                .map(|policy| s.spawn(move || policy.run(jobs)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("Policy run panicked"))
                .collect()
        })
    } else {
        policies.iter().map(|policy| policy.run(jobs)).collect()
    };

    Comparison {
        label: label.to_string(),
        jobs: jobs.len(),
        runs,
    }
}

// Zero for an empty run instead of the NaN `Mean` reports
fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    let mean: Mean = iter.collect();
    if mean.is_empty() {
        0.0
    } else {
        mean.estimate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(job_no: usize, response_time: f64, turnaround: f64, switches: u32) -> JobRecord {
        JobRecord {
            job_no,
            arrival_time: 0.0,
            size: turnaround,
            start_time: response_time as Ticks,
            time_left: 0.0,
            status: 2,
            context_switches: switches,
            end_time: turnaround as Ticks,
            response_time,
            turnaround,
        }
    }

    #[test]
    fn summary_averages_and_totals() {
        let records = vec![record(0, 0.0, 5.0, 1), record(1, 4.0, 7.0, 3)];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.avg_response, 2.0);
        assert_eq!(summary.avg_turnaround, 6.0);
        assert_eq!(summary.total_context_switches, 4);
        assert_eq!(summary.makespan, 7);
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.avg_response, 0.0);
        assert_eq!(summary.avg_turnaround, 0.0);
        assert_eq!(summary.total_context_switches, 0);
        assert_eq!(summary.makespan, 0);
    }

    #[test]
    fn empty_workload_reports_zero_averages() {
        for policy in Policy::defaults() {
            let run = policy.run(&[]);
            assert!(run.records.is_empty(), "{policy}");
            assert_eq!(run.summary.avg_response, 0.0, "{policy}");
            assert_eq!(run.summary.avg_turnaround, 0.0, "{policy}");
        }
    }

    #[test]
    fn parallel_and_serial_agree() {
        let jobs: Vec<JobSpec> = (0..40)
            .map(|i| JobSpec::new(1.0 + (i * 7 % 13) as f64, (i * 3) as f64))
            .collect();
        let policies = Policy::defaults();
        let serial = compare("mix", &jobs, &policies, false);
        let parallel = compare("mix", &jobs, &policies, true);

        assert_eq!(serial.runs.len(), 5);
        for (a, b) in serial.runs.iter().zip(&parallel.runs) {
            assert_eq!(a.policy, b.policy);
            assert_eq!(a.summary, b.summary);
            assert_eq!(a.records, b.records);
        }
        assert!(serial.run(Policy::Sjf).is_some());
    }
}
