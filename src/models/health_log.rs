//! One day's recorded vitals, symptoms, and lifestyle data for a user.
//!
//! Every numeric field carries a documented clinical bound; `validate()`
//! rejects out-of-range values before a record reaches storage or the
//! aggregation pipeline. Optional vitals stay `Option` end to end - a
//! missing measurement is excluded from averages, never coerced to zero.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::{MoodType, SymptomSeverity};

/// A field value outside its clinical bound.
#[derive(Debug, thiserror::Error)]
#[error("{field} out of range: {value} (allowed {min}..={max})")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// A single day's health log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthLog {
    pub id: Uuid,
    pub user_id: String,
    pub log_date: NaiveDate,

    // Vitals - each optional, bounded
    pub temperature: Option<f64>,
    pub blood_pressure_systolic: Option<u16>,
    pub blood_pressure_diastolic: Option<u16>,
    pub heart_rate: Option<u16>,
    pub oxygen_saturation: Option<f64>,
    pub weight: Option<f64>,
    pub blood_sugar: Option<f64>,

    // Symptom flags
    #[serde(default)]
    pub has_fever: bool,
    #[serde(default)]
    pub has_cough: bool,
    #[serde(default)]
    pub has_headache: bool,
    #[serde(default)]
    pub has_fatigue: bool,
    #[serde(default)]
    pub has_body_pain: bool,
    #[serde(default)]
    pub has_nausea: bool,

    #[serde(default)]
    pub pain_level: SymptomSeverity,
    #[serde(default)]
    pub symptom_severity: SymptomSeverity,

    // Mental health
    #[serde(default)]
    pub mood: MoodType,
    pub stress_level: u8,
    pub anxiety_level: u8,

    // Lifestyle
    pub sleep_hours: Option<f64>,
    pub sleep_quality: u8,
    pub water_intake: Option<f64>,
    pub exercise_minutes: Option<u32>,

    #[serde(default)]
    pub medications_taken: Vec<String>,
    pub notes: Option<String>,
    pub symptoms_description: Option<String>,

    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl HealthLog {
    /// New log for a user with every measurement absent and schema defaults
    /// for the always-present fields.
    pub fn new(user_id: &str, log_date: NaiveDate) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            log_date,
            temperature: None,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            heart_rate: None,
            oxygen_saturation: None,
            weight: None,
            blood_sugar: None,
            has_fever: false,
            has_cough: false,
            has_headache: false,
            has_fatigue: false,
            has_body_pain: false,
            has_nausea: false,
            pain_level: SymptomSeverity::None,
            symptom_severity: SymptomSeverity::None,
            mood: MoodType::Okay,
            stress_level: 5,
            anxiety_level: 5,
            sleep_hours: None,
            sleep_quality: 5,
            water_intake: None,
            exercise_minutes: None,
            medications_taken: Vec::new(),
            notes: None,
            symptoms_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check every present numeric field against its clinical bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_opt("temperature", self.temperature, 35.0, 45.0)?;
        check_opt(
            "blood_pressure_systolic",
            self.blood_pressure_systolic.map(f64::from),
            50.0,
            250.0,
        )?;
        check_opt(
            "blood_pressure_diastolic",
            self.blood_pressure_diastolic.map(f64::from),
            30.0,
            150.0,
        )?;
        check_opt("heart_rate", self.heart_rate.map(f64::from), 30.0, 220.0)?;
        check_opt("oxygen_saturation", self.oxygen_saturation, 0.0, 100.0)?;
        check_opt("weight", self.weight, 10.0, 300.0)?;
        check_opt("blood_sugar", self.blood_sugar, 0.0, 600.0)?;
        check("stress_level", f64::from(self.stress_level), 1.0, 10.0)?;
        check("anxiety_level", f64::from(self.anxiety_level), 1.0, 10.0)?;
        check_opt("sleep_hours", self.sleep_hours, 0.0, 24.0)?;
        check("sleep_quality", f64::from(self.sleep_quality), 1.0, 10.0)?;
        check_opt("water_intake", self.water_intake, 0.0, 20.0)?;
        check_opt(
            "exercise_minutes",
            self.exercise_minutes.map(f64::from),
            0.0,
            1440.0,
        )?;
        Ok(())
    }

    /// Blood pressure as "systolic/diastolic", or `None` when systolic is absent.
    pub fn blood_pressure(&self) -> Option<String> {
        self.blood_pressure_systolic.map(|sys| {
            match self.blood_pressure_diastolic {
                Some(dia) => format!("{sys}/{dia}"),
                None => format!("{sys}/-"),
            }
        })
    }
}

fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError { field, value, min, max });
    }
    Ok(())
}

fn check_opt(
    field: &'static str,
    value: Option<f64>,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => check(field, v, min, max),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> HealthLog {
        HealthLog::new("user-1", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
    }

    #[test]
    fn empty_log_is_valid() {
        assert!(log().validate().is_ok());
    }

    #[test]
    fn boundary_values_accepted() {
        let mut l = log();
        l.temperature = Some(35.0);
        l.sleep_hours = Some(24.0);
        l.oxygen_saturation = Some(100.0);
        l.stress_level = 1;
        l.anxiety_level = 10;
        assert!(l.validate().is_ok());
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let mut l = log();
        l.temperature = Some(50.0);
        let err = l.validate().unwrap_err();
        assert_eq!(err.field, "temperature");
    }

    #[test]
    fn out_of_range_sleep_rejected() {
        let mut l = log();
        l.sleep_hours = Some(25.0);
        assert_eq!(l.validate().unwrap_err().field, "sleep_hours");
    }

    #[test]
    fn zero_stress_rejected() {
        let mut l = log();
        l.stress_level = 0;
        assert_eq!(l.validate().unwrap_err().field, "stress_level");
    }

    #[test]
    fn blood_pressure_formatting() {
        let mut l = log();
        assert!(l.blood_pressure().is_none());
        l.blood_pressure_systolic = Some(120);
        l.blood_pressure_diastolic = Some(80);
        assert_eq!(l.blood_pressure().unwrap(), "120/80");
    }

    #[test]
    fn validation_error_names_field_and_bounds() {
        let mut l = log();
        l.blood_sugar = Some(700.0);
        let msg = l.validate().unwrap_err().to_string();
        assert!(msg.contains("blood_sugar"));
        assert!(msg.contains("600"));
    }
}
