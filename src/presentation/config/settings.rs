use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::application::services::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, GenerationOptions, HISTORY_WINDOW,
};
use crate::domain::MAX_EXTRACTED_CHARS;

use super::Environment;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub ollama: OllamaSettings,
    pub generation: GenerationSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OllamaSettings {
    pub host: String,
    pub model: String,
    /// Vision model used for image OCR; falls back to `model`.
    pub ocr_model: Option<String>,
}

impl OllamaSettings {
    pub fn ocr_model(&self) -> &str {
        self.ocr_model.as_deref().unwrap_or(&self.model)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationSettings {
    pub default_max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub history_window: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionSettings {
    pub max_chars: usize,
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8000,
                static_dir: PathBuf::from("static"),
                max_upload_bytes: 50 * 1024 * 1024,
            },
            ollama: OllamaSettings {
                host: "http://localhost:11434".to_string(),
                model: DEFAULT_MODEL.to_string(),
                ocr_model: None,
            },
            generation: GenerationSettings {
                default_max_tokens: DEFAULT_MAX_TOKENS,
                temperature: 0.5,
                top_p: 0.9,
                history_window: HISTORY_WINDOW,
            },
            extraction: ExtractionSettings {
                max_chars: MAX_EXTRACTED_CHARS,
                scratch_dir: None,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                enable_json: false,
            },
        }
    }
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}`, `APP__*`
    /// variables and the legacy `OLLAMA_HOST` / `MODEL_NAME` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("ollama.host", std::env::var("OLLAMA_HOST").ok())?
            .set_override_option("ollama.model", std::env::var("MODEL_NAME").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.ollama.model.clone(),
            default_max_tokens: self.generation.default_max_tokens,
            temperature: self.generation.temperature,
            top_p: self.generation.top_p,
            history_window: self.generation.history_window,
        }
    }
}
