//! Insight endpoints.
//!
//! Four endpoints:
//! - `GET /api/ai/insights?days=N` - trend insights over recent logs
//! - `GET /api/ai/sleep-analysis` - sleep averages and recommendation
//! - `POST /api/ai/symptom-advice` - assistant advice for one symptom
//! - `POST /api/ai/chat` - assistant chat turn
//!
//! Empty histories return informational payloads, not errors. Assistant
//! calls run on the blocking pool and degrade to 503 on failure.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db;
use crate::insights::{self, ChatMessage, InsightPayload};
use crate::models::SymptomSeverity;

const DEFAULT_LOOKBACK_DAYS: u32 = 30;
const MAX_LOOKBACK_DAYS: u32 = 365;
const MAX_CHAT_MESSAGE_CHARS: usize = 2000;

const NO_DATA_MESSAGE: &str =
    "No health data available. Start logging your daily health to get insights!";
const NO_SLEEP_DATA_MESSAGE: &str = "No sleep data available";

#[derive(Deserialize)]
pub struct InsightsQuery {
    pub days: Option<u32>,
}

/// Insight payload, or the informational no-data shape.
#[derive(Serialize)]
#[serde(untagged)]
pub enum InsightsResponse {
    NoData {
        message: &'static str,
        logs_count: usize,
    },
    Ready(Box<InsightPayload>),
}

/// `GET /api/ai/insights` - trend insights over the user's recent logs.
///
/// `days` bounds the number of most-recent logs analyzed (the original
/// result-set-limit semantics, deliberately not a calendar filter).
pub async fn insights(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<InsightsResponse>, ApiError> {
    let days = query.days.unwrap_or(DEFAULT_LOOKBACK_DAYS);
    if days == 0 || days > MAX_LOOKBACK_DAYS {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and {MAX_LOOKBACK_DAYS}"
        )));
    }

    let conn = ctx.open_db()?;
    let logs = db::get_recent_logs(&conn, &user.user_id, days)?;

    let Some(trends) = insights::analyze_trends(&logs) else {
        return Ok(Json(InsightsResponse::NoData {
            message: NO_DATA_MESSAGE,
            logs_count: 0,
        }));
    };

    let profile = db::get_profile(&conn, &user.user_id)?;
    let payload = insights::compose_trend_insights(&profile, trends, days);
    Ok(Json(InsightsResponse::Ready(Box::new(payload))))
}

/// Sleep metrics payload, or the informational no-data shape.
#[derive(Serialize)]
#[serde(untagged)]
pub enum SleepAnalysisResponse {
    NoData { message: &'static str },
    Ready(SleepAnalysisPayload),
}

#[derive(Serialize)]
pub struct SleepAnalysisPayload {
    pub average_sleep_hours: f64,
    pub average_sleep_quality: f64,
    pub total_nights_tracked: usize,
    pub recommendation: &'static str,
    pub insights: String,
}

/// `GET /api/ai/sleep-analysis` - averages over the 30 most recent
/// sleep-tracked nights.
pub async fn sleep_analysis(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<SleepAnalysisResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let logs = db::get_recent_logs_with_sleep(&conn, &user.user_id, DEFAULT_LOOKBACK_DAYS)?;

    let Some(summary) = insights::analyze_sleep(&logs) else {
        return Ok(Json(SleepAnalysisResponse::NoData {
            message: NO_SLEEP_DATA_MESSAGE,
        }));
    };

    Ok(Json(SleepAnalysisResponse::Ready(SleepAnalysisPayload {
        average_sleep_hours: summary.average_sleep_hours,
        average_sleep_quality: summary.average_sleep_quality,
        total_nights_tracked: summary.total_nights_tracked,
        recommendation: summary.recommendation(),
        insights: summary.narrative(),
    })))
}

#[derive(Deserialize)]
pub struct SymptomRequest {
    pub symptom: String,
    pub severity: Option<String>,
}

/// `POST /api/ai/symptom-advice` - assistant advice for one symptom.
pub async fn symptom_advice(
    State(ctx): State<ApiContext>,
    Extension(_user): Extension<UserContext>,
    Json(req): Json<SymptomRequest>,
) -> Result<Json<insights::AdvicePayload>, ApiError> {
    let symptom = req.symptom.trim().to_string();
    if symptom.is_empty() {
        return Err(ApiError::BadRequest("Symptom cannot be empty".into()));
    }
    let severity = match req.severity.as_deref() {
        None => SymptomSeverity::Mild,
        Some(s) => SymptomSeverity::from_str(s).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Invalid severity '{s}' (expected none, mild, moderate, or severe)"
            ))
        })?,
    };

    let assistant = Arc::clone(&ctx.assistant);
    let payload = run_assistant(move || {
        insights::symptom_advice(assistant.as_ref(), &symptom, severity)
    })
    .await?;
    Ok(Json(payload))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Option<Vec<ChatMessage>>,
}

/// `POST /api/ai/chat` - one chat turn with the health assistant.
pub async fn chat(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<insights::ChatPayload>, ApiError> {
    let message = req.message.trim().to_string();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".into()));
    }
    if message.chars().count() > MAX_CHAT_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "Message too long (max {MAX_CHAT_MESSAGE_CHARS} chars)"
        )));
    }

    let profile = {
        let conn = ctx.open_db()?;
        db::get_profile(&conn, &user.user_id)?
    };
    let history = req.conversation_history.unwrap_or_default();

    let assistant = Arc::clone(&ctx.assistant);
    let payload = run_assistant(move || {
        insights::chat_reply(assistant.as_ref(), &profile, &message, &history)
    })
    .await?;
    Ok(Json(payload))
}

/// Run a blocking assistant call off the async runtime.
async fn run_assistant<T, F>(call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, insights::AssistantError> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ApiError::Internal(format!("assistant task panicked: {e}")))?
        .map_err(ApiError::from)
}
