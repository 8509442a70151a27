use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::NamedTempFile;

use crate::application::ports::FileLoader;
use crate::domain::{
    ExtractedFile, FileFormat, MAX_EXTRACTED_CHARS, file_extension, truncate_chars,
};

/// Dispatches uploads to the extractor registered for their format.
pub struct ExtractionService {
    loaders: HashMap<FileFormat, Arc<dyn FileLoader>>,
    max_chars: usize,
    scratch_dir: Option<PathBuf>,
}

impl ExtractionService {
    pub fn new(loaders: Vec<(FileFormat, Arc<dyn FileLoader>)>) -> Self {
        Self {
            loaders: loaders.into_iter().collect(),
            max_chars: MAX_EXTRACTED_CHARS,
            scratch_dir: None,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Stages uploads under `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: PathBuf) -> Self {
        self.scratch_dir = Some(dir);
        self
    }

    pub fn supports(&self, format: FileFormat) -> bool {
        self.loaders.contains_key(&format)
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract(
        &self,
        file_name: &str,
        data: &[u8],
    ) -> Result<ExtractedFile, ExtractionError> {
        let extension = file_extension(file_name);
        let format = FileFormat::from_extension(&extension)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(extension.clone()))?;
        let loader = self
            .loaders
            .get(&format)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(extension.clone()))?;

        // Removed when dropped, on every path out of this function.
        let scratch = self.stage(format, data)?;

        let text = match loader.extract_text(scratch.path()).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, format = format.as_extension(), "Extraction failed, continuing with empty text");
                String::new()
            }
        };

        let text = truncate_chars(&text, self.max_chars).to_string();

        tracing::info!(
            kind = format.kind().as_str(),
            chars = text.chars().count(),
            "File text extracted"
        );

        Ok(ExtractedFile::new(format.kind(), text, file_name.to_string()))
    }

    fn stage(&self, format: FileFormat, data: &[u8]) -> Result<NamedTempFile, ExtractionError> {
        let suffix = format!(".{}", format.as_extension());
        let mut builder = tempfile::Builder::new();
        builder.prefix("upload_").suffix(&suffix);

        let mut file = match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ExtractionError::Scratch)?;

        file.write_all(data).map_err(ExtractionError::Scratch)?;
        file.flush().map_err(ExtractionError::Scratch)?;

        Ok(file)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("scratch file: {0}")]
    Scratch(std::io::Error),
}
