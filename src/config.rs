use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Vitalog";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the HTTP server.
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Default Ollama-compatible endpoint for the assistant.
pub const DEFAULT_ASSISTANT_URL: &str = "http://localhost:11434";

/// Default model served by the assistant endpoint.
pub const DEFAULT_ASSISTANT_MODEL: &str = "medgemma:4b";

/// Default hard timeout for a single assistant generation, in seconds.
pub const DEFAULT_ASSISTANT_TIMEOUT_SECS: u64 = 60;

/// Get the application data directory
/// ~/Vitalog/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VITALOG_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Vitalog")
}

/// Path of the SQLite database file.
pub fn database_path() -> PathBuf {
    app_data_dir().join("vitalog.db")
}

/// Bind address for the HTTP server (`VITALOG_ADDR` override).
pub fn bind_addr() -> String {
    std::env::var("VITALOG_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string())
}

/// Assistant base URL (`OLLAMA_URL` override).
pub fn assistant_url() -> String {
    std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_ASSISTANT_URL.to_string())
}

/// Assistant model name (`OLLAMA_MODEL` override).
pub fn assistant_model() -> String {
    std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_ASSISTANT_MODEL.to_string())
}

/// Assistant request timeout (`ASSISTANT_TIMEOUT_SECS` override).
pub fn assistant_timeout_secs() -> u64 {
    std::env::var("ASSISTANT_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ASSISTANT_TIMEOUT_SECS)
}
