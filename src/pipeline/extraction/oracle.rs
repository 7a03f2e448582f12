use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// The external reasoning oracle, as seen by the pipeline: takes prompt text,
/// returns text expected to be JSON. Object-safe so the orchestrator can be
/// driven by mocks in tests.
pub trait OracleClient {
    fn complete(&self, prompt: &str, system: &str) -> Result<String, ExtractionError>;
}

/// Reference oracle client speaking the Ollama /api/generate protocol.
pub struct OllamaOracle {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaOracle {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default local Ollama instance with the configured timeout.
    pub fn default_local(model: &str, timeout_secs: u64) -> Self {
        Self::new("http://localhost:11434", model, timeout_secs)
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

impl OracleClient for OllamaOracle {
    fn complete(&self, prompt: &str, system: &str) -> Result<String, ExtractionError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                ExtractionError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                ExtractionError::Timeout(self.timeout_secs)
            } else {
                ExtractionError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExtractionError::OracleStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ExtractionError::HttpClient(e.to_string()))?;

        Ok(parsed.response)
    }
}

/// Mock oracle for testing — returns a configurable reply and counts calls,
/// so tests can prove the oracle was (or was not) invoked.
pub struct MockOracle {
    reply: String,
    calls: AtomicUsize,
}

impl MockOracle {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OracleClient for MockOracle {
    fn complete(&self, _prompt: &str, _system: &str) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_configured_reply_and_counts() {
        let oracle = MockOracle::new("{\"summary\": \"ok\"}");
        assert_eq!(oracle.call_count(), 0);
        let reply = oracle.complete("prompt", "system").unwrap();
        assert_eq!(reply, "{\"summary\": \"ok\"}");
        assert_eq!(oracle.call_count(), 1);
    }

    #[test]
    fn ollama_oracle_trims_trailing_slash() {
        let oracle = OllamaOracle::new("http://localhost:11434/", "llama3", 60);
        assert_eq!(oracle.base_url, "http://localhost:11434");
        assert_eq!(oracle.timeout_secs, 60);
    }

    #[test]
    fn default_local_uses_standard_port() {
        let oracle = OllamaOracle::default_local("llama3", 60);
        assert_eq!(oracle.base_url, "http://localhost:11434");
        assert_eq!(oracle.model, "llama3");
    }
}
