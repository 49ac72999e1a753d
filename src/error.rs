use std::{fmt, io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures at the edges of a simulation: reading workloads, parsing
/// configuration and policy names. Scheduling itself cannot fail; a broken
/// scheduling invariant panics instead.
#[derive(Debug)]
pub enum Error {
    Io { path: PathBuf, source: io::Error },
    Parse { line: usize, reason: String },
    InvalidJob { line: usize, reason: String },
    ShortInput { expected: usize, found: usize },
    InvalidPolicy(String),
    Config(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Parse { line, reason } => write!(f, "line {line}: {reason}"),
            Error::InvalidJob { line, reason } => write!(f, "line {line}: invalid job: {reason}"),
            Error::ShortInput { expected, found } => {
                write!(f, "expected {expected} jobs but input holds only {found}")
            }
            Error::InvalidPolicy(spec) => write!(f, "invalid policy `{spec}`"),
            Error::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            Error::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err)
    }
}
