use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            let text = doc.extract_text(page_index).unwrap_or_default();
            let cleaned = sanitize_extracted_text(&text);
            if !cleaned.is_empty() {
                pages.push(cleaned);
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let owned: PathBuf = path.to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(path.display().to_string()));
        }

        Ok(pages.join("\n\n"))
    }
}
