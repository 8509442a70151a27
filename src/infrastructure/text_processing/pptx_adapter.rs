use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;

use crate::application::ports::{FileLoader, FileLoaderError};

use super::ooxml::{open_archive, parse_blocking, read_part, xml_error};

static SLIDE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// PowerPoint decks: every text-bearing shape, slide by slide.
#[derive(Default)]
pub struct PptxAdapter;

impl PptxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read(path: &Path) -> Result<String, FileLoaderError> {
        let mut archive = open_archive(path)?;

        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| {
                let number = SLIDE_PART.captures(name)?.get(1)?.as_str().parse().ok()?;
                Some((number, name.to_string()))
            })
            .collect();
        slides.sort_by_key(|(number, _)| *number);

        let mut text = String::new();
        for (_, part) in slides {
            if let Some(xml) = read_part(&mut archive, &part)? {
                text.push_str(&slide_text(&xml)?);
            }
        }

        Ok(text)
    }
}

/// Text of one slide. Each top-level shape with a text body contributes its
/// paragraphs joined by newlines, followed by a newline. Shapes inside a group
/// are skipped.
pub fn slide_text(xml: &str) -> Result<String, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut group_depth = 0usize;
    let mut in_shape = false;
    let mut shape_paragraphs: Option<Vec<String>> = None;
    let mut paragraph = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"grpSp" => group_depth += 1,
                b"sp" => in_shape = group_depth == 0,
                b"txBody" if in_shape => shape_paragraphs = Some(Vec::new()),
                b"p" => paragraph.clear(),
                b"t" => in_text = shape_paragraphs.is_some(),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" => paragraph.push('\n'),
                b"p" => {
                    if let Some(paragraphs) = shape_paragraphs.as_mut() {
                        paragraphs.push(String::new());
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(paragraphs) = shape_paragraphs.as_mut() {
                        paragraphs.push(std::mem::take(&mut paragraph));
                    }
                }
                b"grpSp" => group_depth = group_depth.saturating_sub(1),
                b"sp" => {
                    in_shape = false;
                    if let Some(paragraphs) = shape_paragraphs.take() {
                        text.push_str(&paragraphs.join("\n"));
                        text.push('\n');
                    }
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
impl FileLoader for PptxAdapter {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn extract_text(&self, path: &Path) -> Result<String, FileLoaderError> {
        let text = parse_blocking(path, Self::read).await?;
        tracing::debug!(chars = text.len(), "PPTX text extracted");
        Ok(text)
    }
}
