use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    sim::JobSpec,
};

/// Number of jobs in each reference workload file.
pub const DEFAULT_JOB_COUNT: usize = 5000;

/// Reads `size,arrival` records, one per line.
///
/// With `expected = Some(n)` exactly `n` jobs are returned: a shorter input is
/// an error, and records past the `n`th are ignored.
pub fn load_jobs<R: BufRead>(reader: R, expected: Option<usize>) -> Result<Vec<JobSpec>> {
    let mut jobs = Vec::with_capacity(expected.unwrap_or(0));
    let mut ignored = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| Error::Io {
            path: "<input>".into(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if expected.is_some_and(|n| jobs.len() == n) {
            ignored += 1;
            continue;
        }
        jobs.push(parse_record(line, line_no)?);
    }

    if ignored > 0 {
        log::warn!("ignoring {ignored} records past the first {}", jobs.len());
    }

    match expected {
        Some(n) if jobs.len() < n => Err(Error::ShortInput {
            expected: n,
            found: jobs.len(),
        }),
        _ => Ok(jobs),
    }
}

pub fn load_jobs_from_path(path: &Path, expected: Option<usize>) -> Result<Vec<JobSpec>> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let jobs = load_jobs(BufReader::new(file), expected).map_err(|err| match err {
        Error::Io { source, .. } => Error::Io {
            path: path.to_path_buf(),
            source,
        },
        err => err,
    })?;
    log::debug!("loaded {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

fn parse_record(line: &str, line_no: usize) -> Result<JobSpec> {
    let mut fields = line.split(',').map(str::trim);
    let (Some(size), Some(arrival), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(Error::Parse {
            line: line_no,
            reason: format!("expected `size,arrival`, got `{line}`"),
        });
    };

    let number = |field: &str, what: &str| {
        field.parse::<f64>().map_err(|_| Error::Parse {
            line: line_no,
            reason: format!("{what} `{field}` is not a number"),
        })
    };
    let size = number(size, "size")?;
    let arrival_time = number(arrival, "arrival time")?;

    if !size.is_finite() || size <= 0.0 {
        return Err(Error::InvalidJob {
            line: line_no,
            reason: format!("size must be positive, got {size}"),
        });
    }
    if !arrival_time.is_finite() || arrival_time < 0.0 {
        return Err(Error::InvalidJob {
            line: line_no,
            reason: format!("arrival time must be non-negative, got {arrival_time}"),
        });
    }

    Ok(JobSpec { size, arrival_time })
}

/// Writes jobs in the same `size,arrival` layout the loader reads.
pub fn write_jobs<W: Write>(mut writer: W, jobs: &[JobSpec]) -> io::Result<()> {
    for job in jobs {
        writeln!(writer, "{:.2},{:.2}", job.size, job.arrival_time)?;
    }
    writer.flush()
}
