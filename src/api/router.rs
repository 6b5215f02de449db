//! API router.
//!
//! Returns a composable `Router` mounted under `/api`. All routes except
//! the liveness check require bearer-token authentication.
//!
//! Middleware uses `Extension<ApiContext>` (injected as the outermost
//! layer); endpoint handlers use `State<ApiContext>`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
pub fn api_router(ctx: ApiContext) -> Router {
    // Protected routes - auth middleware resolves the bearer token to a
    // UserContext before any handler runs.
    let protected = Router::new()
        .route("/ai/insights", get(endpoints::ai::insights))
        .route("/ai/sleep-analysis", get(endpoints::ai::sleep_analysis))
        .route("/ai/symptom-advice", post(endpoints::ai::symptom_advice))
        .route("/ai/chat", post(endpoints::ai::chat))
        .route(
            "/logs",
            post(endpoints::logs::create).get(endpoints::logs::list),
        )
        .route("/logs/:id", patch(endpoints::logs::update))
        .route("/reports", get(endpoints::export::reports))
        .route("/export/summary", get(endpoints::export::summary))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext
        .layer(axum::Extension(ctx));

    let unprotected = Router::new().route("/health", get(endpoints::health::check));

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
}
