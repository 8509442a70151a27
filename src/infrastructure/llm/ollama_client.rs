use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Completion, CompletionRequest, LlmClient, LlmClientError};

/// Client for the Ollama `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    base_url: String,
}

impl OllamaClient {
    /// No request timeout is configured; a generation call waits until the
    /// server answers or the connection fails.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateReply {
    model: Option<String>,
    response: Option<String>,
}

#[async_trait]
impl LlmClient for OllamaClient {
    #[tracing::instrument(skip(self, request), fields(model = %request.model, num_predict = request.num_predict))]
    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, LlmClientError> {
        let body = GenerateBody {
            model: &request.model,
            prompt: &request.prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: request.num_predict,
                temperature: request.temperature,
                top_p: request.top_p,
            },
        };

        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmClientError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %text, "Ollama returned an error status");
            return Err(LlmClientError::Unavailable(format!(
                "Ollama returned {status}: {text}"
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| LlmClientError::Unavailable(e.to_string()))?;

        let reply: GenerateReply = serde_json::from_slice(&raw_bytes).map_err(|e| {
            let raw_text = String::from_utf8_lossy(&raw_bytes);
            tracing::error!(raw_response = %raw_text, "Failed to parse Ollama JSON");
            LlmClientError::InvalidResponse(e.to_string())
        })?;

        Ok(Completion {
            model: reply.model.unwrap_or_else(|| request.model.clone()),
            text: reply.response.unwrap_or_default(),
        })
    }
}
