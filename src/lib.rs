//! Discrete-time CPU scheduling simulator.
//!
//! A job list (size, arrival) is replayed under FIFO, SJF, STCF and round
//! robin. Each run owns a fresh [`SimCtx`](crate::core::SimCtx) and advances one tick at a
//! time until every job completes; the [`metrics`] module then reduces the
//! per-job records into averages and context-switch totals.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod metrics;
pub mod report;
pub mod scheduler;
pub mod sim;
pub mod workload;

pub use config::SimConfig;
pub use crate::core::SimEvent;
pub use error::{Error, Result};
pub use metrics::{Comparison, PolicyRun, Summary, compare};
pub use scheduler::Scheduler;
pub use sim::{JobRecord, JobSpec, Policy, Sim};
