use serde::{Deserialize, Serialize};

/// Severity of a reported symptom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomSeverity {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

impl SymptomSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            SymptomSeverity::None => "none",
            SymptomSeverity::Mild => "mild",
            SymptomSeverity::Moderate => "moderate",
            SymptomSeverity::Severe => "severe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "none" => Some(SymptomSeverity::None),
            "mild" => Some(SymptomSeverity::Mild),
            "moderate" => Some(SymptomSeverity::Moderate),
            "severe" => Some(SymptomSeverity::Severe),
            _ => None,
        }
    }

    /// Severities that count as a notable symptom day.
    pub fn is_notable(self) -> bool {
        matches!(self, SymptomSeverity::Moderate | SymptomSeverity::Severe)
    }
}

/// Self-reported mood for the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodType {
    Great,
    Good,
    #[default]
    Okay,
    Low,
    Terrible,
}

impl MoodType {
    pub fn as_str(self) -> &'static str {
        match self {
            MoodType::Great => "great",
            MoodType::Good => "good",
            MoodType::Okay => "okay",
            MoodType::Low => "low",
            MoodType::Terrible => "terrible",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "great" => Some(MoodType::Great),
            "good" => Some(MoodType::Good),
            "okay" => Some(MoodType::Okay),
            "low" => Some(MoodType::Low),
            "terrible" => Some(MoodType::Terrible),
            _ => None,
        }
    }
}

/// Kind of stored medical document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    LabReport,
    Prescription,
    Imaging,
    DischargeSummary,
    #[default]
    Other,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::LabReport => "lab_report",
            ReportType::Prescription => "prescription",
            ReportType::Imaging => "imaging",
            ReportType::DischargeSummary => "discharge_summary",
            ReportType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "lab_report" => Some(ReportType::LabReport),
            "prescription" => Some(ReportType::Prescription),
            "imaging" => Some(ReportType::Imaging),
            "discharge_summary" => Some(ReportType::DischargeSummary),
            "other" => Some(ReportType::Other),
            _ => None,
        }
    }

    /// Human-readable label for PDF tables ("lab_report" → "Lab Report").
    pub fn display_label(self) -> &'static str {
        match self {
            ReportType::LabReport => "Lab Report",
            ReportType::Prescription => "Prescription",
            ReportType::Imaging => "Imaging",
            ReportType::DischargeSummary => "Discharge Summary",
            ReportType::Other => "Other",
        }
    }
}
