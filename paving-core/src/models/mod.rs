mod job_type;
mod rate_config;
mod selections;

pub use job_type::JobType;
pub use rate_config::{RateConfig, RateRecord, keys};
pub use selections::{ErosionKind, YesNo};
