use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{report::Format, sim::Policy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Replays CPU scheduling policies over job workloads")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate every policy over each input job list and write one report per input.
    Simulate {
        /// CSV job lists of `size,arrival` records.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory receiving `scheduling_<input>.<ext>` reports.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        format: Option<Format>,

        /// Jobs expected per input (0 accepts any number).
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Policies to run, e.g. `fifo`, `sjf`, `stcf:30`, `rr:75`. Repeatable.
        #[arg(short, long = "policy")]
        policies: Vec<Policy>,

        /// Run policies on separate threads.
        #[arg(long)]
        parallel: bool,
    },

    /// Generate the three reference job mixtures as `job_runtime_{1,2,3}.csv`.
    Generate {
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        #[arg(short, long, default_value_t = crate::workload::DEFAULT_JOB_COUNT)]
        jobs: usize,

        /// RNG seed; random if omitted.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Sample a number distribution and plot it in the terminal.
    Distribution {
        kind: DistributionKind,

        #[arg(short = 'n', long, default_value_t = 1000)]
        samples: usize,

        #[arg(short, long)]
        seed: Option<u64>,

        /// Bin count for `uniform`.
        #[arg(long, default_value_t = 100)]
        bins: u32,

        #[arg(long, default_value_t = 50.0)]
        mean: f64,

        #[arg(long, default_value_t = 10.0)]
        sd: f64,

        /// Expected value for `poisson`.
        #[arg(long, default_value_t = 5.0)]
        lambda: f64,

        /// Width of the longest bar.
        #[arg(long, default_value_t = 60)]
        width: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistributionKind {
    Uniform,
    Normal,
    Poisson,
    Dice,
}
