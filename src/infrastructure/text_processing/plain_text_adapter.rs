use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};

/// `.txt` uploads, decoded as strict UTF-8.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to read file: {e}")))?;

        String::from_utf8(data).map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
