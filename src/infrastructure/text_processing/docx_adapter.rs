use std::path::Path;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::application::ports::{FileLoader, FileLoaderError};

use super::ooxml::{open_archive, parse_blocking, read_part, xml_error};

const DOCUMENT_PART: &str = "word/document.xml";

/// Word documents: one output line per paragraph.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read(path: &Path) -> Result<String, FileLoaderError> {
        let mut archive = open_archive(path)?;
        let xml = read_part(&mut archive, DOCUMENT_PART)?.ok_or_else(|| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_PART}"))
        })?;
        paragraphs_text(&xml)
    }
}

/// Collects run text of the body paragraphs in `word/document.xml`, ending
/// every paragraph with a newline. Paragraphs inside tables are skipped.
pub fn paragraphs_text(xml: &str) -> Result<String, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut paragraph = String::new();
    let mut table_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"r" => in_run = table_depth == 0,
                b"t" => in_text = in_run,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                // `w:tab` also appears as a tab-stop definition outside runs.
                b"tab" if in_run => paragraph.push('\t'),
                b"br" | b"cr" if in_run => paragraph.push('\n'),
                b"p" if table_depth == 0 => text.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"r" => in_run = false,
                b"t" => in_text = false,
                b"p" if table_depth == 0 => {
                    text.push_str(&paragraph);
                    text.push('\n');
                    paragraph.clear();
                }
                _ => {}
            },
            Event::Text(t) if in_text => paragraph.push_str(&t.unescape().map_err(xml_error)?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let text = parse_blocking(path, Self::read).await?;
        tracing::debug!(chars = text.len(), "DOCX text extracted");
        Ok(text)
    }
}
