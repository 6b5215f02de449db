pub mod health_log;
pub mod profile;
pub mod report;

pub use health_log::*;
pub use profile::*;
pub use report::*;
