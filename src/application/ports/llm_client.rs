use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Issues one non-streaming generation call.
    async fn generate(&self, request: &CompletionRequest) -> Result<Completion, LlmClientError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub num_predict: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub model: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("model server unavailable: {0}")]
    Unavailable(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
