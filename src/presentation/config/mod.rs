mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ExtractionSettings, GenerationSettings, LoggingSettings, OllamaSettings, ServerSettings,
    Settings,
};
