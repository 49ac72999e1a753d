use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{JobSpec, Sim};
use crate::{
    core::Ticks,
    error::Error,
    metrics::{PolicyRun, Summary},
    scheduler::{
        FifoScheduler, RR_QUANTUM_DFL, RR_QUANTUM_LONG, RoundRobinScheduler, STCF_SLICE_DFL,
        Scheduler, SjfScheduler, StcfScheduler,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Policy {
    Fifo,
    Sjf,
    Stcf { slice: Ticks },
    Rr { quantum: Ticks },
}

impl Policy {
    /// The five reference runs: FIFO, SJF, STCF(30), RR(30), RR(75).
    pub fn defaults() -> Vec<Policy> {
        vec![
            Policy::Fifo,
            Policy::Sjf,
            Policy::Stcf {
                slice: STCF_SLICE_DFL,
            },
            Policy::Rr {
                quantum: RR_QUANTUM_DFL,
            },
            Policy::Rr {
                quantum: RR_QUANTUM_LONG,
            },
        ]
    }

    pub fn slice(&self) -> Option<Ticks> {
        match *self {
            Policy::Fifo | Policy::Sjf => None,
            Policy::Stcf { slice } => Some(slice),
            Policy::Rr { quantum } => Some(quantum),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        match self.slice() {
            Some(0) => Err(Error::InvalidPolicy(format!("{self}: slice must be at least 1"))),
            _ => Ok(()),
        }
    }

    /// Replays `jobs` under this policy on a fresh job table.
    pub fn run(&self, jobs: &[JobSpec]) -> PolicyRun {
        match self {
            Policy::Fifo => self.run_with::<FifoScheduler>(jobs),
            Policy::Sjf => self.run_with::<SjfScheduler>(jobs),
            Policy::Stcf { .. } => self.run_with::<StcfScheduler>(jobs),
            Policy::Rr { .. } => self.run_with::<RoundRobinScheduler>(jobs),
        }
    }

    fn run_with<S: Scheduler>(&self, jobs: &[JobSpec]) -> PolicyRun {
        log::info!("{self}: simulating {} jobs", jobs.len());
        let mut sim = Sim::<S>::new(jobs, self.slice());
        sim.run_to_completion();

        let records = sim.records();
        let summary = Summary::from_records(&records);
        let observer = sim.core.observer();
        log::info!(
            "{self}: done at t={} after {} steps (avg response {:.2}, avg turnaround {:.2}, {} context switches)",
            sim.core.now(),
            observer.steps(),
            summary.avg_response,
            summary.avg_turnaround,
            summary.total_context_switches
        );

        PolicyRun {
            policy: *self,
            summary,
            busy_ticks: observer.busy_ticks(),
            idle_ticks: observer.idle_ticks(),
            peak_ready: observer.peak_ready(),
            records,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Sjf => write!(f, "SJF"),
            Policy::Stcf { slice } => write!(f, "STCF({slice})"),
            Policy::Rr { quantum } => write!(f, "RR({quantum})"),
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    // `fifo`, `sjf`, `stcf[:slice]`, `rr[:quantum]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPolicy(s.to_string());
        let lower = s.trim().to_ascii_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg.parse::<Ticks>().map_err(|_| invalid())?)),
            None => (lower.as_str(), None),
        };

        let policy = match (name, arg) {
            ("fifo", None) => Policy::Fifo,
            ("sjf", None) => Policy::Sjf,
            ("stcf", slice) => Policy::Stcf {
                slice: slice.unwrap_or(STCF_SLICE_DFL),
            },
            ("rr", quantum) => Policy::Rr {
                quantum: quantum.unwrap_or(RR_QUANTUM_DFL),
            },
            _ => return Err(invalid()),
        };
        policy.validate()?;
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::Policy;

    #[test]
    fn parses_policy_names() {
        assert_eq!("fifo".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!("SJF".parse::<Policy>().unwrap(), Policy::Sjf);
        assert_eq!(
            "stcf".parse::<Policy>().unwrap(),
            Policy::Stcf { slice: 30 }
        );
        assert_eq!("rr:75".parse::<Policy>().unwrap(), Policy::Rr { quantum: 75 });
    }

    #[test]
    fn rejects_bad_policies() {
        assert!("lottery".parse::<Policy>().is_err());
        assert!("rr:0".parse::<Policy>().is_err());
        assert!("rr:abc".parse::<Policy>().is_err());
        assert!("fifo:3".parse::<Policy>().is_err());
    }

    #[test]
    fn display_matches_report_headers() {
        let names: Vec<String> = Policy::defaults().iter().map(ToString::to_string).collect();
        assert_eq!(names, ["FIFO", "SJF", "STCF(30)", "RR(30)", "RR(75)"]);
    }

    #[test]
    fn serde_uses_tagged_form() {
        let json = serde_json::to_string(&Policy::Rr { quantum: 75 }).unwrap();
        assert_eq!(json, r#"{"kind":"rr","quantum":75}"#);
        let back: Policy = serde_json::from_str(r#"{"kind":"stcf","slice":10}"#).unwrap();
        assert_eq!(back, Policy::Stcf { slice: 10 });
    }
}
