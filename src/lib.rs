//! Vitalog - personal health-tracking backend.
//!
//! Users log daily vitals and symptoms, retrieve insights over their history
//! (deterministic trend summaries plus AI-assisted symptom advice and chat),
//! and export a formatted PDF health summary.
//!
//! Module map:
//! - `models` - domain records (HealthLog, UserProfile, HealthReport)
//! - `db` - SQLite persistence (schema + repositories)
//! - `insights` - aggregation pipeline, insight composer, assistant client
//! - `report` - PDF health-summary renderer
//! - `api` - axum router, auth middleware, endpoint handlers

pub mod api;
pub mod config;
pub mod db;
pub mod insights;
pub mod models;
pub mod report;
