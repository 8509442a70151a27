use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{FileLoader, FileLoaderError};

pub const OCR_PROMPT: &str = "Transcribe all of the text visible in this image exactly as written, \
keeping the original language. Output one line per line of text and nothing else. \
If the image contains no text, output nothing.";

/// Image OCR through a vision-capable model served by Ollama.
pub struct OllamaVisionOcrAdapter {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaVisionOcrAdapter {
    pub const OCR_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(base_url: &str, model: &str) -> Self {
        let client = Client::builder()
            .timeout(Self::OCR_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct GenerateReply {
    response: Option<String>,
}

#[async_trait]
impl FileLoader for OllamaVisionOcrAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display(), model = %self.model))]
    async fn extract_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let image = tokio::fs::read(path)
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to read image: {e}")))?;

        let body = serde_json::json!({
            "model": self.model,
            "prompt": OCR_PROMPT,
            "images": [general_purpose::STANDARD.encode(&image)],
            "stream": false,
            "options": { "temperature": 0.0 }
        });

        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("OCR request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FileLoaderError::ExtractionFailed(format!(
                "OCR model returned {status}: {text}"
            )));
        }

        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("OCR JSON parse error: {e}")))?;

        let text = reply.response.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(path.display().to_string()));
        }

        tracing::info!(chars = text.len(), "Image OCR complete");
        Ok(text)
    }
}
