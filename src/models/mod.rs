//! Domain records shared across the backend.

pub mod enums;
pub mod health_log;
pub mod profile;
pub mod report;

pub use enums::{MoodType, ReportType, SymptomSeverity};
pub use health_log::{HealthLog, ValidationError};
pub use profile::UserProfile;
pub use report::HealthReport;
