use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::application::ports::{FileLoader, FileLoaderError};

use super::ooxml::{Archive, attribute, open_archive, parse_blocking, read_part, xml_error};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const FALLBACK_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Excel workbooks: the active sheet, tab-separated, one line per row.
#[derive(Default)]
pub struct XlsxAdapter;

impl XlsxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read(path: &Path) -> Result<String, FileLoaderError> {
        let mut archive = open_archive(path)?;

        let shared = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => shared_strings(&xml)?,
            None => Vec::new(),
        };

        let sheet_part = active_sheet_part(&mut archive)?;
        let xml = read_part(&mut archive, &sheet_part)?
            .ok_or_else(|| FileLoaderError::ExtractionFailed(format!("missing {sheet_part}")))?;

        sheet_text(&xml, &shared)
    }
}

/// Resolves the worksheet shown when the workbook was last saved.
fn active_sheet_part(archive: &mut Archive) -> Result<String, FileLoaderError> {
    let Some(workbook) = read_part(archive, WORKBOOK_PART)? else {
        return Ok(FALLBACK_SHEET_PART.to_string());
    };
    let Some(rels) = read_part(archive, WORKBOOK_RELS_PART)? else {
        return Ok(FALLBACK_SHEET_PART.to_string());
    };

    let (sheet_ids, active_tab) = workbook_sheets(&workbook)?;
    let targets = relationships(&rels)?;

    let target = sheet_ids
        .get(active_tab)
        .or_else(|| sheet_ids.first())
        .and_then(|id| targets.get(id));

    Ok(match target {
        Some(target) => resolve_target(target),
        None => FALLBACK_SHEET_PART.to_string(),
    })
}

fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

/// Relationship ids of the workbook's sheets in tab order, plus the active tab index.
pub fn workbook_sheets(xml: &str) -> Result<(Vec<String>, usize), FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut sheet_ids = Vec::new();
    let mut active_tab = 0usize;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"sheet" => {
                    if let Some(id) = attribute(&e, b"r:id") {
                        sheet_ids.push(id);
                    }
                }
                b"workbookView" => {
                    if let Some(tab) = attribute(&e, b"activeTab").and_then(|v| v.parse().ok()) {
                        active_tab = tab;
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((sheet_ids, active_tab))
}

pub fn relationships(xml: &str) -> Result<HashMap<String, String>, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attribute(&e, b"Id"), attribute(&e, b"Target"))
                {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(targets)
}

/// Shared string table; rich-text runs inside one `si` are concatenated.
pub fn shared_strings(xml: &str) -> Result<Vec<String>, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape().map_err(xml_error)?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

/// Renders every non-empty cell followed by a tab and every row followed by a
/// newline, then trims the result.
pub fn sheet_text(xml: &str, shared: &[String]) -> Result<String, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut cell_type: Option<String> = None;
    let mut value = String::new();
    let mut in_value = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"c" => {
                    cell_type = attribute(&e, b"t");
                    value.clear();
                }
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"row" => text.push('\n'),
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    let rendered = cell_value(cell_type.as_deref(), &value, shared);
                    if !rendered.is_empty() {
                        text.push_str(&rendered);
                        text.push('\t');
                    }
                }
                b"row" => text.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_value => value.push_str(&t.unescape().map_err(xml_error)?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim().to_string())
}

/// Rendered cell text. Falsy cells (numeric zero, `FALSE`, empty text) render
/// as empty and are skipped by the caller.
fn cell_value(cell_type: Option<&str>, raw: &str, shared: &[String]) -> String {
    match cell_type {
        Some("s") => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared.get(idx))
            .cloned()
            .unwrap_or_default(),
        Some("b") => match raw.trim() {
            "1" => "True".to_string(),
            _ => String::new(),
        },
        Some("inlineStr" | "str" | "e" | "d") => raw.to_string(),
        _ => {
            if raw.trim().parse::<f64>().is_ok_and(|n| n == 0.0) {
                String::new()
            } else {
                raw.to_string()
            }
        }
    }
}

#[async_trait]
impl FileLoader for XlsxAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let text = parse_blocking(path, Self::read).await?;
        tracing::debug!(chars = text.len(), "XLSX text extracted");
        Ok(text)
    }
}
