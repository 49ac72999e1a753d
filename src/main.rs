use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::LevelFilter;
use rand::prelude::*;
use sched_model::{
    SimConfig,
    cli::{Cli, Command, DistributionKind},
    compare,
    report::{self, Format},
    workload::{self, Distribution, Mixture},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Simulate {
            inputs,
            output,
            config,
            format,
            jobs,
            policies,
            parallel,
        } => {
            let mut config = match config {
                Some(path) => SimConfig::from_path(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => SimConfig::default(),
            };
            if let Some(format) = format {
                config.format = format;
            }
            if let Some(jobs) = jobs {
                config.job_count = (jobs > 0).then_some(jobs);
            }
            if !policies.is_empty() {
                config.policies = policies;
            }
            config.parallel |= parallel;
            config.validate()?;

            for input in &inputs {
                simulate(input, &output, &config)?;
            }
            Ok(())
        }
        Command::Generate { output, jobs, seed } => generate(&output, jobs, seed),
        Command::Distribution {
            kind,
            samples,
            seed,
            bins,
            mean,
            sd,
            lambda,
            width,
        } => {
            if samples == 0 {
                bail!("sample count must be positive");
            }
            let distribution = match kind {
                DistributionKind::Uniform => Distribution::Uniform { bins },
                DistributionKind::Normal => Distribution::Normal { mean, sd },
                DistributionKind::Poisson if lambda > 0.0 => Distribution::Poisson { lambda },
                DistributionKind::Poisson => bail!("lambda must be positive"),
                DistributionKind::Dice => Distribution::Dice,
            };
            let histogram = distribution.histogram(&mut rng(seed), samples);
            print!("{}", histogram.render(distribution.title(), width));
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    // RUST_LOG takes precedence over -v
    builder.parse_default_env();
    builder.init();
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn simulate(input: &Path, output: &Path, config: &SimConfig) -> Result<()> {
    let jobs = workload::load_jobs_from_path(input, config.job_count)
        .with_context(|| format!("reading jobs from {}", input.display()))?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "jobs".to_string());
    let comparison = compare(&stem, &jobs, &config.policies, config.parallel);

    // Mixture descriptions only apply to the generator's own file names
    let labels = mixture_for(&stem).map_or(&[][..], |m| m.label_lines());

    if config.format == Format::Table {
        return report::write_report(io::stdout().lock(), config.format, &comparison, labels)
            .context("writing summary table");
    }

    let path = report_path(output, &stem, config.format);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    report::write_report(BufWriter::new(file), config.format, &comparison, labels)
        .with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn report_path(output: &Path, stem: &str, format: Format) -> PathBuf {
    let name = stem.replace("job_runtime", "scheduling");
    let name = if name == stem {
        format!("scheduling_{stem}")
    } else {
        name
    };
    output.join(format!("{name}.{}", format.extension()))
}

fn mixture_for(stem: &str) -> Option<Mixture> {
    let idx: usize = stem.strip_prefix("job_runtime_")?.parse().ok()?;
    Mixture::ALL.get(idx.checked_sub(1)?).copied()
}

fn generate(output: &Path, count: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = rng(seed);
    std::fs::create_dir_all(output).with_context(|| format!("creating {}", output.display()))?;

    for (idx, mixture) in Mixture::ALL.iter().enumerate() {
        let jobs = mixture.generate(&mut rng, count);
        let path = output.join(format!("job_runtime_{}.csv", idx + 1));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        workload::write_jobs(BufWriter::new(file), &jobs)
            .with_context(|| format!("writing {}", path.display()))?;
        log::debug!("generated {count} {mixture:?} jobs into {}", path.display());
    }
    Ok(())
}
