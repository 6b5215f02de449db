use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::ReportType;

/// Metadata for a previously stored medical document (lab report,
/// prescription, ...). Owned by the report-management subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub id: Uuid,
    pub user_id: String,
    pub report_date: NaiveDate,
    pub report_type: ReportType,
    pub title: String,
    pub doctor_name: Option<String>,
    pub notes: Option<String>,
}
