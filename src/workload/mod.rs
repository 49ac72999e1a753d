//! Where jobs come from: CSV job lists and synthetic generators.

pub mod distribution;
pub mod loader;
pub mod mixture;

pub use distribution::{Distribution, Histogram};
pub use loader::{DEFAULT_JOB_COUNT, load_jobs, load_jobs_from_path, write_jobs};
pub use mixture::Mixture;
