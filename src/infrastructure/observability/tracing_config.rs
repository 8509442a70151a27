/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Filter used when `RUST_LOG` is not set.
    pub default_directive: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, level: &str, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_directive: format!("{level},chat_gateway=debug,tower_http=debug"),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            "info",
            std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        )
    }
}
