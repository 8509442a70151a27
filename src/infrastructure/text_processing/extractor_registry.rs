use std::sync::Arc;

use crate::application::ports::FileLoader;
use crate::domain::{FileFormat, FileKind};

use super::docx_adapter::DocxAdapter;
use super::ollama_vision_ocr_adapter::OllamaVisionOcrAdapter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;
use super::pptx_adapter::PptxAdapter;
use super::xlsx_adapter::XlsxAdapter;

/// Builds the format → extractor table used by the extraction service.
pub struct ExtractorRegistry;

impl ExtractorRegistry {
    pub fn document_loaders() -> Vec<(FileFormat, Arc<dyn FileLoader>)> {
        let pdf: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
        let docx: Arc<dyn FileLoader> = Arc::new(DocxAdapter::new());
        let txt: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        let pptx: Arc<dyn FileLoader> = Arc::new(PptxAdapter::new());
        let xlsx: Arc<dyn FileLoader> = Arc::new(XlsxAdapter::new());

        vec![
            (FileFormat::Pdf, pdf),
            (FileFormat::Docx, docx),
            (FileFormat::Txt, txt),
            (FileFormat::Pptx, pptx),
            (FileFormat::Xlsx, xlsx),
        ]
    }

    /// Every supported format; images share one OCR adapter.
    pub fn create(ollama_host: &str, ocr_model: &str) -> Vec<(FileFormat, Arc<dyn FileLoader>)> {
        tracing::info!(ocr_model, ollama_host, "Registering file extractors");

        let ocr: Arc<dyn FileLoader> = Arc::new(OllamaVisionOcrAdapter::new(ollama_host, ocr_model));

        let mut loaders = Self::document_loaders();
        loaders.extend(
            FileFormat::ALL
                .into_iter()
                .filter(|format| format.kind() == FileKind::Image)
                .map(|format| (format, Arc::clone(&ocr))),
        );
        loaders
    }
}
