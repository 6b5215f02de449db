//! Health-log endpoints.
//!
//! Three endpoints:
//! - `POST /api/logs` - create a log (log_date defaults to today)
//! - `PATCH /api/logs/:id` - partial update
//! - `GET /api/logs` - recent logs, most recent first

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db::{self, HealthLogUpdate};
use crate::models::{HealthLog, MoodType, SymptomSeverity};

#[derive(Deserialize, Default)]
pub struct HealthLogCreate {
    pub log_date: Option<NaiveDate>,
    pub temperature: Option<f64>,
    pub blood_pressure_systolic: Option<u16>,
    pub blood_pressure_diastolic: Option<u16>,
    pub heart_rate: Option<u16>,
    pub oxygen_saturation: Option<f64>,
    pub weight: Option<f64>,
    pub blood_sugar: Option<f64>,
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
    #[serde(default)]
    pub mood: MoodType,
    pub stress_level: Option<u8>,
    pub anxiety_level: Option<u8>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<u8>,
    pub water_intake: Option<f64>,
    pub exercise_minutes: Option<u32>,
    #[serde(default)]
    pub medications_taken: Vec<String>,
    pub notes: Option<String>,
    pub symptoms_description: Option<String>,
}

#[derive(Serialize)]
pub struct LogCreatedResponse {
    pub id: String,
    pub log_date: NaiveDate,
}

/// `POST /api/logs` - create a log for the authenticated user.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Json(req): Json<HealthLogCreate>,
) -> Result<(StatusCode, Json<LogCreatedResponse>), ApiError> {
    let log_date = req
        .log_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let mut log = HealthLog::new(&user.user_id, log_date);
    log.temperature = req.temperature;
    log.blood_pressure_systolic = req.blood_pressure_systolic;
    log.blood_pressure_diastolic = req.blood_pressure_diastolic;
    log.heart_rate = req.heart_rate;
    log.oxygen_saturation = req.oxygen_saturation;
    log.weight = req.weight;
    log.blood_sugar = req.blood_sugar;
    log.has_fever = req.has_fever;
    log.has_cough = req.has_cough;
    log.has_headache = req.has_headache;
    log.has_fatigue = req.has_fatigue;
    log.has_body_pain = req.has_body_pain;
    log.has_nausea = req.has_nausea;
    log.pain_level = req.pain_level;
    log.symptom_severity = req.symptom_severity;
    log.mood = req.mood;
    if let Some(stress) = req.stress_level {
        log.stress_level = stress;
    }
    if let Some(anxiety) = req.anxiety_level {
        log.anxiety_level = anxiety;
    }
    log.sleep_hours = req.sleep_hours;
    if let Some(quality) = req.sleep_quality {
        log.sleep_quality = quality;
    }
    log.water_intake = req.water_intake;
    log.exercise_minutes = req.exercise_minutes;
    log.medications_taken = req.medications_taken;
    log.notes = req.notes;
    log.symptoms_description = req.symptoms_description;

    // Clinical bounds - reject before anything reaches storage
    log.validate()?;

    let conn = ctx.open_db()?;
    db::insert_health_log(&conn, &log)?;

    Ok((
        StatusCode::CREATED,
        Json(LogCreatedResponse {
            id: log.id.to_string(),
            log_date: log.log_date,
        }),
    ))
}

/// `PATCH /api/logs/:id` - partial update of an existing log. Any
/// recordable field may be patched; clinical bounds are checked on the
/// merged record.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<HealthLogUpdate>,
) -> Result<Json<HealthLog>, ApiError> {
    let conn = ctx.open_db()?;

    let mut merged = db::get_log_by_id(&conn, &user.user_id, &id)?;
    req.apply_to(&mut merged);
    merged.validate()?;

    db::update_health_log(&conn, &user.user_id, &id, &req)?;
    let log = db::get_log_by_id(&conn, &user.user_id, &id)?;
    Ok(Json(log))
}

#[derive(Deserialize)]
pub struct LogsQuery {
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct LogsResponse {
    pub logs: Vec<HealthLog>,
}

/// `GET /api/logs` - recent logs, most recent first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(30).min(365);
    let conn = ctx.open_db()?;
    let logs = db::get_recent_logs(&conn, &user.user_id, limit)?;
    Ok(Json(LogsResponse { logs }))
}
