use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vitalog::api::router::api_router;
use vitalog::api::types::ApiContext;
use vitalog::config;
use vitalog::db;
use vitalog::insights::OllamaAssistant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let db_path = config::database_path();
    {
        // Runs migrations on open; fail fast if the schema is unusable
        let conn = db::open_database(&db_path)?;
        tracing::info!(tables = db::count_tables(&conn)?, "database ready");
    }

    // Blocking reqwest client; construct off the async runtime
    let assistant = Arc::new(tokio::task::spawn_blocking(OllamaAssistant::from_env).await??);
    let ctx = ApiContext::new(db_path, assistant);
    let seeded = ctx.seed_tokens()?;
    tracing::info!(tokens = seeded, "seeded api tokens from profiles");

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, api_router(ctx)).await?;
    Ok(())
}
