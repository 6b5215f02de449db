//! Health-assistant client - the external text-generation collaborator.
//!
//! The composer only sees the `AssistantClient` trait: a prompt goes in,
//! free text comes out. The production implementation talks to an
//! Ollama-compatible `/api/generate` endpoint over blocking reqwest with a
//! hard timeout, so a stalled model degrades to an explicit error instead
//! of hanging the request. `MockAssistant` stands in for tests.

use serde::{Deserialize, Serialize};

/// Failures from the external generation service.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Cannot reach assistant at {0}")]
    Connection(String),
    #[error("Assistant request timed out after {0}s")]
    Timeout(u64),
    #[error("Assistant returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Cannot parse assistant response: {0}")]
    ResponseParsing(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

/// Capability interface for text generation.
pub trait AssistantClient: Send + Sync {
    /// Generate free text for a prompt. The prompt is passed through
    /// unmodified; the response is returned verbatim.
    fn generate(&self, prompt: &str, system: &str) -> Result<String, AssistantError>;
}

/// Ollama HTTP client for local model inference.
pub struct OllamaAssistant {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaAssistant {
    /// Create a client pointing at an Ollama-compatible endpoint.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, AssistantError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AssistantError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client configured from the environment (see `config`).
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::new(
            &crate::config::assistant_url(),
            &crate::config::assistant_model(),
            crate::config::assistant_timeout_secs(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl AssistantClient for OllamaAssistant {
    fn generate(&self, prompt: &str, system: &str) -> Result<String, AssistantError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                AssistantError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                AssistantError::Timeout(self.timeout_secs)
            } else {
                AssistantError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| AssistantError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// Mock assistant for testing - records the last prompt and returns a
/// configurable response (or a configurable failure).
pub struct MockAssistant {
    response: Result<String, &'static str>,
    last_prompt: std::sync::Mutex<Option<(String, String)>>,
}

impl MockAssistant {
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    /// Mock that fails every call with a timeout.
    pub fn unavailable() -> Self {
        Self {
            response: Err("timeout"),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    /// The (prompt, system) pair from the most recent `generate` call.
    pub fn last_prompt(&self) -> Option<(String, String)> {
        self.last_prompt.lock().ok()?.clone()
    }
}

impl AssistantClient for MockAssistant {
    fn generate(&self, prompt: &str, system: &str) -> Result<String, AssistantError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some((prompt.to_string(), system.to_string()));
        }
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(_) => Err(AssistantError::Timeout(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_configured_response() {
        let mock = MockAssistant::new("rest and hydrate");
        let reply = mock.generate("I have a headache", "You are a health assistant").unwrap();
        assert_eq!(reply, "rest and hydrate");
    }

    #[test]
    fn mock_records_prompt_verbatim() {
        let mock = MockAssistant::new("ok");
        mock.generate("exact prompt text", "system text").unwrap();
        let (prompt, system) = mock.last_prompt().unwrap();
        assert_eq!(prompt, "exact prompt text");
        assert_eq!(system, "system text");
    }

    #[test]
    fn unavailable_mock_times_out() {
        let mock = MockAssistant::unavailable();
        let err = mock.generate("anything", "").unwrap_err();
        assert!(matches!(err, AssistantError::Timeout(_)));
    }

    #[test]
    fn ollama_client_trims_trailing_slash() {
        let client = OllamaAssistant::new("http://localhost:11434/", "medgemma:4b", 60).unwrap();
        assert_eq!(client.base_url(), "http://localhost:11434");
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = AssistantError::Timeout(60);
        assert!(err.to_string().contains("60s"));
        let err = AssistantError::Upstream { status: 500, body: "boom".into() };
        assert!(err.to_string().contains("500"));
    }
}
