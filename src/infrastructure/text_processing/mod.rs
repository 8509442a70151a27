mod docx_adapter;
mod extractor_registry;
mod ollama_vision_ocr_adapter;
mod ooxml;
mod pdf_adapter;
mod plain_text_adapter;
mod pptx_adapter;
mod text_sanitizer;
mod xlsx_adapter;

pub use docx_adapter::{DocxAdapter, paragraphs_text};
pub use extractor_registry::ExtractorRegistry;
pub use ollama_vision_ocr_adapter::{OCR_PROMPT, OllamaVisionOcrAdapter};
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use pptx_adapter::{PptxAdapter, slide_text};
pub use text_sanitizer::sanitize_extracted_text;
pub use xlsx_adapter::{XlsxAdapter, relationships, shared_strings, sheet_text, workbook_sheets};
