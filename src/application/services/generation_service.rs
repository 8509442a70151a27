use std::sync::Arc;

use crate::application::ports::{
    CompletionRequest, LlmClient, LlmClientError, SessionStore, SessionStoreError,
};
use crate::domain::{ConversationEntry, SessionId};

use super::prompt_composer::{FileContext, compose_prompt};

pub const DEFAULT_MODEL: &str = "gemma3:12b";
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const HISTORY_WINDOW: usize = 4;

#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub model: String,
    pub default_max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub history_window: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            default_max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.5,
            top_p: 0.9,
            history_window: HISTORY_WINDOW,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub file: Option<FileContext>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub model: String,
    pub response: String,
    pub context_used: bool,
}

pub struct GenerationService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    session_store: Arc<dyn SessionStore>,
    options: GenerationOptions,
}

impl<L> GenerationService<L>
where
    L: LlmClient,
{
    pub fn new(
        llm_client: Arc<L>,
        session_store: Arc<dyn SessionStore>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            llm_client,
            session_store,
            options,
        }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Composes the prompt, calls the model and records the exchange. Nothing is
    /// recorded when the model call fails.
    #[tracing::instrument(skip(self, request), fields(session_id = %session))]
    pub async fn generate(
        &self,
        session: &SessionId,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let history = self
            .session_store
            .recent(session, self.options.history_window)
            .await?;

        let composed = compose_prompt(&request.prompt, request.file.as_ref(), &history);

        tracing::debug!(
            history_len = history.len(),
            context_used = composed.context_used,
            prompt_chars = composed.text.chars().count(),
            "Prompt composed"
        );

        let num_predict = request
            .max_tokens
            .filter(|n| *n > 0)
            .unwrap_or(self.options.default_max_tokens);

        let completion = self
            .llm_client
            .generate(&CompletionRequest {
                model: self.options.model.clone(),
                prompt: composed.text.clone(),
                num_predict,
                temperature: self.options.temperature,
                top_p: self.options.top_p,
            })
            .await
            .map_err(GenerationError::ModelUnavailable)?;

        let entry = ConversationEntry::new(
            composed.prior_file_text(),
            request.prompt,
            completion.text.clone(),
        );
        self.session_store.record(session, entry).await?;

        tracing::info!(model = %completion.model, "Generation complete");

        Ok(GenerationResponse {
            model: completion.model,
            response: completion.text,
            context_used: composed.context_used,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The model call failed, including replies that are not a generation body.
    #[error("model unavailable: {0}")]
    ModelUnavailable(LlmClientError),
    #[error("session store: {0}")]
    SessionStore(#[from] SessionStoreError),
}
