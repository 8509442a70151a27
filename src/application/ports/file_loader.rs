use std::path::Path;

use async_trait::async_trait;

/// Extracts plain text from a file staged on local disk.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_text(&self, path: &Path) -> Result<String, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
