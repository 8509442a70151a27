mod extraction_service;
mod generation_service;
mod prompt_composer;

pub use extraction_service::{ExtractionError, ExtractionService};
pub use generation_service::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, GenerationError, GenerationOptions, GenerationRequest,
    GenerationResponse, GenerationService, HISTORY_WINDOW,
};
pub use prompt_composer::{
    ComposedPrompt, FileContext, NO_CONTEXT_MARKER, NO_HISTORY_MARKER, PRIOR_FILE_PREFIX,
    compose_prompt, render_history,
};
