use std::sync::Arc;

use minijinja::Environment;

use crate::application::ports::{LlmClient, SessionStore};
use crate::application::services::{ExtractionService, GenerationService};

pub struct AppState<L>
where
    L: LlmClient,
{
    pub generation_service: Arc<GenerationService<L>>,
    pub extraction_service: Arc<ExtractionService>,
    pub session_store: Arc<dyn SessionStore>,
    pub templates: Arc<Environment<'static>>,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            generation_service: Arc::clone(&self.generation_service),
            extraction_service: Arc::clone(&self.extraction_service),
            session_store: Arc::clone(&self.session_store),
            templates: Arc::clone(&self.templates),
        }
    }
}
