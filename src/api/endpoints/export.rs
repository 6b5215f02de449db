//! Export endpoints.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::db;
use crate::models::HealthReport;
use crate::report::{render_health_summary, MAX_LOG_ROWS, MAX_REPORT_ROWS};

/// `GET /api/export/summary` - render the PDF health summary.
pub async fn summary(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = ctx.open_db()?;
    let profile = db::get_profile(&conn, &user.user_id)?;
    let reports = db::get_recent_reports(&conn, &user.user_id, MAX_REPORT_ROWS as u32)?;
    let logs = db::get_recent_logs(&conn, &user.user_id, MAX_LOG_ROWS as u32)?;

    let pdf = render_health_summary(&profile, &reports, &logs)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"health-summary.pdf\"",
            ),
        ],
        pdf,
    ))
}

#[derive(Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<HealthReport>,
}

/// `GET /api/reports` - recent report metadata, most recent first.
pub async fn reports(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let reports = db::get_recent_reports(&conn, &user.user_id, MAX_REPORT_ROWS as u32)?;
    Ok(Json(ReportsResponse { reports }))
}
