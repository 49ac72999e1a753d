pub mod driver;
pub mod job;
pub mod policy;

pub use driver::Sim;
pub use job::{JobRecord, JobSpec};
pub use policy::Policy;
