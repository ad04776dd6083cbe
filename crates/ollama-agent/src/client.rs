use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use taskplan_core::{DraftResult, GeneratorError, StepSource};

use crate::prompt;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for Ollama `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

/// The subset of the `/api/generate` response we consume.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

// ---------------------------------------------------------------------------
// OllamaClient
// ---------------------------------------------------------------------------

/// Stateless client for a single Ollama model.
///
/// Makes one attempt per call with no retries and sets no timeout of its
/// own; callers bound latency at the transport layer.
pub struct OllamaClient {
    http: reqwest::Client,
    host: String,
    model: String,
}

impl OllamaClient {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: host.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: String) -> Result<String, GeneratorError> {
        let url = format!("{}/api/generate", self.host.trim_end_matches('/'));
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError(format!("ollama request failed: {e}")))?
            .error_for_status()
            .map_err(|e| GeneratorError(format!("ollama returned an error: {e}")))?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError(format!("malformed ollama response: {e}")))?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl StepSource for OllamaClient {
    async fn draft(&self, task: &str) -> DraftResult {
        match self.generate(prompt::draft(task)).await {
            Ok(text) => DraftResult::Text(text),
            Err(e) => {
                tracing::warn!(error = %e, "plan generation failed, using fallback steps");
                DraftResult::fallback()
            }
        }
    }

    async fn revise(
        &self,
        task: &str,
        steps: &[String],
        instruction: &str,
    ) -> Result<String, GeneratorError> {
        self.generate(prompt::revise(task, steps, instruction))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "plan revision failed"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use taskplan_core::fallback_steps;

    fn client_for(server: &mockito::ServerGuard) -> OllamaClient {
        OllamaClient::new(server.url(), "tinyllama")
    }

    #[tokio::test]
    async fn draft_returns_raw_response_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response": "1. Do X\n2. Do Y"}"#)
            .create_async()
            .await;

        let result = client_for(&server).draft("Build a website").await;
        assert_eq!(result, DraftResult::Text("1. Do X\n2. Do Y".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn draft_request_carries_model_and_task() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::PartialJson(serde_json::json!({
                    "model": "tinyllama",
                    "stream": false,
                })),
                mockito::Matcher::Regex("Task: Build a website".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"response": "1. ok"}"#)
            .create_async()
            .await;

        client_for(&server).draft("Build a website").await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn draft_falls_back_on_backend_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(500)
            .create_async()
            .await;

        let result = client_for(&server).draft("Build a website").await;
        assert_eq!(result, DraftResult::Fallback(fallback_steps()));
    }

    #[tokio::test]
    async fn draft_falls_back_on_unreachable_host() {
        // Nothing is listening on this port.
        let client = OllamaClient::new("http://127.0.0.1:1", "tinyllama");
        let result = client.draft("Build a website").await;
        assert_eq!(result, DraftResult::Fallback(fallback_steps()));
    }

    #[tokio::test]
    async fn draft_falls_back_on_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = client_for(&server).draft("task").await;
        assert_eq!(result, DraftResult::Fallback(fallback_steps()));
    }

    #[tokio::test]
    async fn revise_returns_raw_text_on_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(r#"{"response": "New Title\n1. changed"}"#)
            .create_async()
            .await;

        let steps = vec!["old".to_string()];
        let text = client_for(&server)
            .revise("task", &steps, "change it")
            .await
            .unwrap();
        assert_eq!(text, "New Title\n1. changed");
    }

    #[tokio::test]
    async fn revise_surfaces_backend_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(503)
            .create_async()
            .await;

        let steps = vec!["old".to_string()];
        let err = client_for(&server)
            .revise("task", &steps, "change it")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("error"));
    }
}
